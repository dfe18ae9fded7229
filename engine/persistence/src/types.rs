use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a player by the registry
pub type PlayerId = u64;

/// A registered player and their accumulated score
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Registry-assigned identifier (starts at 1)
    pub id: PlayerId,

    /// Display nickname; `None` when the player was created without one
    pub nickname: Option<String>,

    /// Accumulated points, may be negative
    pub points: i64,

    /// Whether the player is active
    pub active: bool,
}

impl Player {
    /// Create a fresh player with zero points
    pub fn new(id: PlayerId, nickname: Option<String>) -> Self {
        Self { id, nickname, points: 0, active: true }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nickname = match self.nickname.as_deref() {
            Some(nickname) => format!("{nickname:?}"),
            None => "-".to_string(),
        };
        write!(f, "#{} {} points={} active={}", self.id, nickname, self.points, self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(7, Some("ace".to_string()));
        assert_eq!(player.id, 7);
        assert_eq!(player.nickname.as_deref(), Some("ace"));
        assert_eq!(player.points, 0);
        assert!(player.active);
    }

    #[test]
    fn test_display() {
        let mut player = Player::new(3, Some("ace".to_string()));
        player.points = -10;
        assert_eq!(player.to_string(), "#3 \"ace\" points=-10 active=true");

        let anonymous = Player::new(4, None);
        assert_eq!(anonymous.to_string(), "#4 - points=0 active=true");
    }
}
