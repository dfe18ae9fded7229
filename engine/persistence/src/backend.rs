//! Record store trait and shared file handling

use crate::config::StoreFormat;
use crate::error::Result;
use crate::types::{Player, PlayerId};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Player collection read back from a store, plus the id counter when one was saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Every stored player
    pub players: Vec<Player>,

    /// Identifier the registry had reserved for its next player
    pub next_id: Option<PlayerId>,
}

/// Abstract trait for record stores
///
/// A store owns one file holding the complete player collection. Every save
/// rewrites the whole file and every load reads it back in full.
pub trait RecordStore {
    /// Replace the file contents with `players` and, when given, the id counter
    fn save_snapshot(&self, players: &[Player], next_id: Option<PlayerId>) -> Result<()>;

    /// Read the whole file; absent or blank files yield an empty snapshot
    fn load_snapshot(&self) -> Result<PlayerSnapshot>;

    /// Replace the file contents with `players`
    fn save(&self, players: &[Player]) -> Result<()> {
        self.save_snapshot(players, None)
    }

    /// Read every player from the file; absent or blank files yield an empty collection
    fn load(&self) -> Result<Vec<Player>> {
        Ok(self.load_snapshot()?.players)
    }

    /// Get the backing file path
    fn path(&self) -> &Path;

    /// Get the encoding of the backing file
    fn format(&self) -> StoreFormat;
}

/// Write `contents` to `path` through a sibling temp file and a rename.
///
/// A concurrent reader sees either the previous file or the complete new one.
/// The temp file is removed when any step before the rename fails.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read the file at `path`, returning `None` when it is absent or holds only whitespace
pub(crate) fn read_contents(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(None),
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomically_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("players.json");

        write_atomically(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_atomically_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("players.json");

        write_atomically(&path, b"a much longer first version").unwrap();
        write_atomically(&path, b"short").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
        // Only the target file remains, no leftover temp files
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a rename
        let target = temp_dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        assert!(write_atomically(&target, b"[]").is_err());

        assert!(target.is_dir());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_contents_missing_and_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("players.json");

        assert!(read_contents(&path).unwrap().is_none());

        fs::write(&path, b"").unwrap();
        assert!(read_contents(&path).unwrap().is_none());

        fs::write(&path, b"  \n\t").unwrap();
        assert!(read_contents(&path).unwrap().is_none());

        fs::write(&path, b"[]").unwrap();
        assert_eq!(read_contents(&path).unwrap().as_deref(), Some("[]"));
    }
}
