use crate::types::RegistryError;
use persistence::{Player, PlayerId, RecordStore};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Player Registry - authoritative in-memory collection of players
///
/// The registry assigns identifiers, keeps non-empty nicknames unique and
/// accumulates points. It never touches disk on its own; callers persist a
/// snapshot through [`PlayerRegistry::save_to`] when they want durability.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    /// Map from player ID to Player
    players_by_id: BTreeMap<PlayerId, Player>,

    /// Map from non-empty nickname to player ID (for uniqueness checks)
    ids_by_nickname: HashMap<String, PlayerId>,

    /// Identifier handed to the next created player, never decreases
    next_id: PlayerId,
}

/// Nicknames that take part in the uniqueness check; empty and absent ones are exempt
fn unique_key(nickname: Option<&str>) -> Option<&str> {
    nickname.filter(|nickname| !nickname.is_empty())
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { players_by_id: BTreeMap::new(), ids_by_nickname: HashMap::new(), next_id: 1 }
    }

    /// Rebuild a registry from a previously saved collection
    ///
    /// Identifier assignment resumes after the largest loaded id.
    pub fn from_players<I>(players: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Player>,
    {
        Self::from_players_with_next_id(players, None)
    }

    /// Rebuild a registry from a saved collection and its saved id counter
    ///
    /// The counter resumes at `next_id` or after the largest loaded id,
    /// whichever is higher, so ids deleted before the save stay retired.
    pub fn from_players_with_next_id<I>(
        players: I,
        next_id: Option<PlayerId>,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Player>,
    {
        let mut registry = Self::new();

        if let Some(next_id) = next_id {
            if next_id == 0 {
                return Err(RegistryError::InvalidId);
            }
            registry.next_id = next_id;
        }

        for player in players {
            if player.id == 0 {
                return Err(RegistryError::InvalidId);
            }

            if registry.players_by_id.contains_key(&player.id) {
                return Err(RegistryError::DuplicateId { id: player.id });
            }

            if let Some(nickname) = unique_key(player.nickname.as_deref()) {
                if registry.ids_by_nickname.contains_key(nickname) {
                    return Err(RegistryError::DuplicateKey { nickname: nickname.to_string() });
                }
                registry.ids_by_nickname.insert(nickname.to_string(), player.id);
            }

            let after = player.id.checked_add(1).ok_or(RegistryError::IdsExhausted)?;
            registry.next_id = registry.next_id.max(after);
            registry.players_by_id.insert(player.id, player);
        }

        Ok(registry)
    }

    /// Load a registry from a record store
    pub fn load_from(store: &dyn RecordStore) -> Result<Self, RegistryError> {
        let snapshot = store.load_snapshot()?;
        let registry = Self::from_players_with_next_id(snapshot.players, snapshot.next_id)?;

        info!(
            "Loaded registry with {} players from {:?} (next id {})",
            registry.len(),
            store.path(),
            registry.next_id
        );
        Ok(registry)
    }

    /// Persist a snapshot of every player and the id counter to a record store
    pub fn save_to(&self, store: &dyn RecordStore) -> Result<(), RegistryError> {
        store.save_snapshot(&self.get_players(), Some(self.next_id))?;
        Ok(())
    }

    /// Create a player with the next free identifier
    ///
    /// Fails with [`RegistryError::DuplicateKey`] when a non-empty `nickname` is
    /// already taken, and with [`RegistryError::IdsExhausted`] once the id space
    /// is used up. Nothing is modified on failure and no id is consumed.
    pub fn create_player(&mut self, nickname: Option<&str>) -> Result<&Player, RegistryError> {
        if let Some(key) = unique_key(nickname) {
            if self.ids_by_nickname.contains_key(key) {
                warn!("Rejected player creation, nickname already in use: {}", key);
                return Err(RegistryError::DuplicateKey { nickname: key.to_string() });
            }
        }

        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or_else(|| {
            warn!("Rejected player creation, no ids left after {}", id);
            RegistryError::IdsExhausted
        })?;

        if self.players_by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateId { id });
        }

        self.next_id = next_id;
        if let Some(key) = unique_key(nickname) {
            self.ids_by_nickname.insert(key.to_string(), id);
        }

        debug!("Created player {} with nickname {:?}", id, nickname);

        self.players_by_id.insert(id, Player::new(id, nickname.map(str::to_string)));
        self.players_by_id.get(&id).ok_or(RegistryError::NotFound { id })
    }

    /// Get all players, ordered by id
    pub fn get_players(&self) -> Vec<Player> {
        self.players_by_id.values().cloned().collect()
    }

    /// Get a player by ID
    pub fn get_player_by_id(&self, id: PlayerId) -> Result<&Player, RegistryError> {
        self.players_by_id.get(&id).ok_or(RegistryError::NotFound { id })
    }

    /// Find the player holding a non-empty nickname
    pub fn find_by_nickname(&self, nickname: &str) -> Option<&Player> {
        let id = self.ids_by_nickname.get(nickname)?;
        self.players_by_id.get(id)
    }

    /// Remove a player permanently, returning the removed record
    ///
    /// The id is never handed out again by this registry.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, RegistryError> {
        let player = self.players_by_id.remove(&id).ok_or_else(|| {
            warn!("Delete failed, no such user: {}", id);
            RegistryError::NotFound { id }
        })?;

        if let Some(key) = unique_key(player.nickname.as_deref()) {
            self.ids_by_nickname.remove(key);
        }

        debug!("Deleted player {}", id);
        Ok(player)
    }

    /// Add `delta` (possibly negative) to a player's points, returning the new total
    pub fn add_points(&mut self, id: PlayerId, delta: i64) -> Result<i64, RegistryError> {
        let player = self.players_by_id.get_mut(&id).ok_or(RegistryError::NotFound { id })?;

        let total =
            player.points.checked_add(delta).ok_or(RegistryError::PointsOverflow { id })?;
        player.points = total;

        debug!("Player {} points {:+} -> {}", id, delta, total);
        Ok(total)
    }

    /// Identifier the next successful `create_player` will assign
    pub fn next_id(&self) -> PlayerId {
        self.next_id
    }

    /// Get player count
    pub fn len(&self) -> usize {
        self.players_by_id.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.players_by_id.is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
