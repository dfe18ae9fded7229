//! Configuration for record stores

use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Encoding used by a record store file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,

    /// `<players>` document
    Xml,
}

impl StoreFormat {
    /// Infer the format from a file extension (`.xml` is XML, anything else JSON)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => StoreFormat::Xml,
            _ => StoreFormat::Json,
        }
    }

    /// Conventional file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            StoreFormat::Json => "json",
            StoreFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for StoreFormat {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StoreFormat::Json),
            "xml" => Ok(StoreFormat::Xml),
            other => Err(PersistenceError::config(format!("Unknown store format: {other}"))),
        }
    }
}

/// Location and encoding of a record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// File holding the whole player collection
    pub path: PathBuf,

    /// Encoding of that file
    #[serde(default)]
    pub format: StoreFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("./data/players.json"), format: StoreFormat::Json }
    }
}

impl StoreConfig {
    /// Create a configuration for `path`, inferring the format from its extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = StoreFormat::from_path(&path);
        Self { path, format }
    }

    /// Create a configuration with an explicit format
    pub fn with_format(path: impl Into<PathBuf>, format: StoreFormat) -> Self {
        Self { path: path.into(), format }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("Store path must not be empty".to_string());
        }

        if self.path.file_name().is_none() {
            return Err(format!("Store path {:?} does not name a file", self.path));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(StoreFormat::from_path(Path::new("players.xml")), StoreFormat::Xml);
        assert_eq!(StoreFormat::from_path(Path::new("players.XML")), StoreFormat::Xml);
        assert_eq!(StoreFormat::from_path(Path::new("players.json")), StoreFormat::Json);
        assert_eq!(StoreFormat::from_path(Path::new("players")), StoreFormat::Json);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<StoreFormat>().unwrap(), StoreFormat::Json);
        assert_eq!("XML".parse::<StoreFormat>().unwrap(), StoreFormat::Xml);
        assert!(matches!("yaml".parse::<StoreFormat>(), Err(PersistenceError::Config(_))));
    }

    #[test]
    fn test_new_infers_format() {
        let config = StoreConfig::new("data/players.xml");
        assert_eq!(config.format, StoreFormat::Xml);
        assert_eq!(config.path, PathBuf::from("data/players.xml"));
    }

    #[test]
    fn test_validate() {
        assert!(StoreConfig::default().validate().is_ok());
        assert!(StoreConfig::with_format("", StoreFormat::Json).validate().is_err());
        assert!(StoreConfig::with_format("..", StoreFormat::Json).validate().is_err());
    }
}
