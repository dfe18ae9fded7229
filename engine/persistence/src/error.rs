//! Error types for the persistence layer

use thiserror::Error;

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Errors that can occur while reading or writing a record store
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O errors (open, write, rename, ...)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// XML serialization/deserialization errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PersistenceError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
