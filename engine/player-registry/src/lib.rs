//! Player Registry - in-memory player records with identifier management
//!
//! The registry assigns player ids, keeps nicknames unique and accumulates
//! points. Durable storage is delegated to a [`persistence::RecordStore`] chosen
//! by the caller.

pub mod registry;
pub mod types;


pub use persistence::{Player, PlayerId};
pub use registry::PlayerRegistry;
pub use types::RegistryError;
