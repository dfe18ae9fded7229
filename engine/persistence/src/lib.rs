//! # Persistence Layer
//!
//! Record stores for the player registry. A store reads and writes the complete
//! player collection to a single file in one encoding.
//!
//! ## Architecture
//!
//! - **RecordStore**: trait every encoding implements
//! - **JsonRecordStore**: pretty-printed JSON array
//! - **XmlRecordStore**: `<players>` XML document
//! - **StoreConfig**: file path plus encoding, used by [`open_store`]
//!
//! Saves go through a temp file and a rename, so a later load never observes a
//! partially written file.
//!
//! ## Usage
//!
//! ```rust
//! use persistence::{open_store_at, Player, RecordStore};
//! use tempfile::TempDir;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let temp_dir = TempDir::new()?;
//!     let store = open_store_at(temp_dir.path().join("players.xml"))?;
//!
//!     store.save(&[Player::new(1, Some("ace".to_string()))])?;
//!     assert_eq!(store.load()?.len(), 1);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod json;
pub mod local;
pub mod types;
pub mod xml;

pub use backend::{PlayerSnapshot, RecordStore};
pub use config::{StoreConfig, StoreFormat};
pub use error::{PersistenceError, Result};
pub use json::JsonRecordStore;
pub use local::{open_store, open_store_at};
pub use types::{Player, PlayerId};
pub use xml::XmlRecordStore;
