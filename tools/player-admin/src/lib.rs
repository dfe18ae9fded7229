//! Player Admin
//!
//! Command-line wrapper around the player registry. Each invocation loads the
//! configured record store, applies one registry operation and saves the
//! resulting snapshot.

pub mod cli;
pub mod config;
pub mod logging;

pub use cli::{execute, Cli, Command};
pub use config::{load_config, validate_config, AdminConfig, LoggingConfig};
pub use logging::initialize_logging;
