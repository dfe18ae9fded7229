//! XML record store
//!
//! Layout:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <players next-id="3">
//!   <player id="1" nickname="ace" points="20" active="true"/>
//!   <player id="2" points="0" active="true"/>
//! </players>
//! ```
//!
//! The nickname is an attribute so that surrounding whitespace survives, and it is
//! omitted entirely for players without one. An empty attribute (`nickname=""`)
//! reloads as an empty nickname, not as a missing one. The optional `next-id`
//! root attribute carries the registry's id counter.

use crate::backend::{read_contents, write_atomically, PlayerSnapshot, RecordStore};
use crate::config::StoreFormat;
use crate::error::Result;
use crate::types::{Player, PlayerId};
use quick_xml::se::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Root element of a player document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "players")]
struct PlayersDocument {
    #[serde(rename = "@next-id", default, skip_serializing_if = "Option::is_none")]
    next_id: Option<PlayerId>,

    #[serde(rename = "player", default)]
    players: Vec<XmlPlayer>,
}

/// On-disk shape of a single player
#[derive(Debug, Serialize, Deserialize)]
struct XmlPlayer {
    #[serde(rename = "@id")]
    id: PlayerId,

    #[serde(
        rename = "@nickname",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_attribute"
    )]
    nickname: Option<String>,

    #[serde(rename = "@points")]
    points: i64,

    #[serde(rename = "@active")]
    active: bool,
}

/// Treat any present attribute, including an empty one, as `Some`
fn present_attribute<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl From<&Player> for XmlPlayer {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            nickname: player.nickname.clone(),
            points: player.points,
            active: player.active,
        }
    }
}

impl From<XmlPlayer> for Player {
    fn from(player: XmlPlayer) -> Self {
        Self {
            id: player.id,
            nickname: player.nickname,
            points: player.points,
            active: player.active,
        }
    }
}

/// Stores players as a `<players>` XML document
pub struct XmlRecordStore {
    path: PathBuf,
}

impl XmlRecordStore {
    /// Create an XML store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn encode(players: &[Player], next_id: Option<PlayerId>) -> Result<String> {
        let document =
            PlayersDocument { next_id, players: players.iter().map(XmlPlayer::from).collect() };

        let mut xml = String::from(XML_DECLARATION);
        let mut serializer = Serializer::new(&mut xml);
        serializer.indent(' ', 2);
        document.serialize(serializer)?;
        xml.push('\n');

        Ok(xml)
    }

    fn decode(xml: &str) -> Result<PlayerSnapshot> {
        let document: PlayersDocument = quick_xml::de::from_str(xml)?;
        Ok(PlayerSnapshot {
            players: document.players.into_iter().map(Player::from).collect(),
            next_id: document.next_id,
        })
    }
}

impl RecordStore for XmlRecordStore {
    fn save_snapshot(&self, players: &[Player], next_id: Option<PlayerId>) -> Result<()> {
        let xml = Self::encode(players, next_id)?;
        write_atomically(&self.path, xml.as_bytes())?;

        tracing::info!("Saved {} players to {:?}", players.len(), self.path);
        Ok(())
    }

    fn load_snapshot(&self) -> Result<PlayerSnapshot> {
        let Some(contents) = read_contents(&self.path)? else {
            tracing::info!("No player data at {:?}, starting empty", self.path);
            return Ok(PlayerSnapshot::default());
        };

        let snapshot = Self::decode(&contents)?;

        tracing::info!("Loaded {} players from {:?}", snapshot.players.len(), self.path);
        Ok(snapshot)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> StoreFormat {
        StoreFormat::Xml
    }
}
