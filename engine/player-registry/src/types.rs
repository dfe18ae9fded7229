use persistence::{PersistenceError, PlayerId};
use thiserror::Error;

/// Errors returned by registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Another player already holds this nickname
    #[error("nickname already in use: {nickname}")]
    DuplicateKey { nickname: String },

    /// No player has this id
    #[error("no such user: {id}")]
    NotFound { id: PlayerId },

    /// A loaded collection holds the same id twice
    #[error("duplicate player id: {id}")]
    DuplicateId { id: PlayerId },

    /// A loaded collection holds the reserved id 0
    #[error("player id 0 is not a valid id")]
    InvalidId,

    /// The id counter has reached `PlayerId::MAX`
    #[error("no player ids left to assign")]
    IdsExhausted,

    /// Adding the delta would overflow the points counter
    #[error("points overflow for user: {id}")]
    PointsOverflow { id: PlayerId },

    /// Loading or saving through a record store failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[cfg(test)]
impl RegistryError {
    /// Whether this error reports a missing player
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    /// Whether this error reports a nickname collision
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, RegistryError::DuplicateKey { .. })
    }
}
