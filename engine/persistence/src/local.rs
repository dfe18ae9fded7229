//! Constructors for file-backed record stores

use crate::backend::RecordStore;
use crate::config::{StoreConfig, StoreFormat};
use crate::error::{PersistenceError, Result};
use crate::json::JsonRecordStore;
use crate::xml::XmlRecordStore;

/// Open the store described by `config`
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
    config.validate().map_err(PersistenceError::config)?;

    tracing::debug!("Opening {} record store at {:?}", config.format, config.path);

    let store: Box<dyn RecordStore> = match config.format {
        StoreFormat::Json => Box::new(JsonRecordStore::new(&config.path)),
        StoreFormat::Xml => Box::new(XmlRecordStore::new(&config.path)),
    };
    Ok(store)
}

/// Open a store at `path`, inferring the encoding from the file extension
pub fn open_store_at(path: impl Into<std::path::PathBuf>) -> Result<Box<dyn RecordStore>> {
    open_store(&StoreConfig::new(path))
}
