//! JSON record store

use crate::backend::{read_contents, write_atomically, PlayerSnapshot, RecordStore};
use crate::config::StoreFormat;
use crate::error::Result;
use crate::types::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Accepted file shapes: a bare array, or an object carrying the id counter
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonDocument<P> {
    WithCounter { next_id: PlayerId, players: P },
    Bare(P),
}

/// Stores players as a pretty-printed JSON array
///
/// When the id counter is saved the array is wrapped as
/// `{ "next_id": .., "players": [..] }`.
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    /// Create a JSON store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for JsonRecordStore {
    fn save_snapshot(&self, players: &[Player], next_id: Option<PlayerId>) -> Result<()> {
        let document = match next_id {
            Some(next_id) => JsonDocument::WithCounter { next_id, players },
            None => JsonDocument::Bare(players),
        };
        let json = serde_json::to_vec_pretty(&document)?;
        write_atomically(&self.path, &json)?;

        tracing::info!("Saved {} players to {:?}", players.len(), self.path);
        Ok(())
    }

    fn load_snapshot(&self) -> Result<PlayerSnapshot> {
        let Some(contents) = read_contents(&self.path)? else {
            tracing::info!("No player data at {:?}, starting empty", self.path);
            return Ok(PlayerSnapshot::default());
        };

        let snapshot = match serde_json::from_str::<JsonDocument<Vec<Player>>>(&contents) {
            Ok(JsonDocument::WithCounter { next_id, players }) => {
                PlayerSnapshot { players, next_id: Some(next_id) }
            }
            Ok(JsonDocument::Bare(players)) => PlayerSnapshot { players, next_id: None },
            // Re-parse as the plain array so the error names the offending position
            Err(_) => PlayerSnapshot { players: serde_json::from_str(&contents)?, next_id: None },
        };

        tracing::info!("Loaded {} players from {:?}", snapshot.players.len(), self.path);
        Ok(snapshot)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> StoreFormat {
        StoreFormat::Json
    }
}
