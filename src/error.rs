//! Error types for the referee core.
//!
//! Every rejected transition maps to exactly one variant, and every variant
//! maps to one [`ErrorKind`] so transports can pick an outward response
//! without matching on individual variants.

use thiserror::Error;

use crate::core::{Category, Feature, SessionKey};

/// Result type alias for referee operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Referee error types.
#[derive(Debug, Error)]
pub enum Error {
    // === Validation ===
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("category {0} is written by the engine and cannot be scored directly")]
    BonusCategory(Category),

    #[error("die index {index} out of range for {len} dice")]
    InvalidDieIndex { index: usize, len: usize },

    #[error("player {0} already joined")]
    AlreadyJoined(String),

    #[error("category {0} already scored")]
    AlreadyScored(Category),

    #[error("invalid dice: {0}")]
    InvalidDice(String),

    // === Turn order ===
    #[error("not this player's turn")]
    NotYourTurn,

    // === Lifecycle ===
    #[error("game already started")]
    GameStarted,

    #[error("game over")]
    GameOver,

    #[error("out of rolls")]
    OutOfRolls,

    #[error("must roll before locking or scoring")]
    NoRollYet,

    // === Store ===
    #[error("session not found: {0}")]
    NotFound(SessionKey),

    // === Configuration ===
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("features {0} and {1} cannot be combined")]
    IncompatibleFeatures(Feature, Feature),

    // === Codec ===
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("corrupt session: {0}")]
    CorruptSession(String),
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: category, die index, duplicate join, duplicate score.
    Validation,
    /// Acting player is not the current player (or nobody joined yet).
    TurnOrder,
    /// Action not legal in the session's current phase.
    Lifecycle,
    /// Unknown session key.
    NotFound,
    /// Feature set cannot be resolved into a rule set.
    Configuration,
    /// Snapshot encoding or decoding failed, or decoded to an impossible session.
    Codec,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownCategory(_)
            | Error::BonusCategory(_)
            | Error::InvalidDieIndex { .. }
            | Error::AlreadyJoined(_)
            | Error::AlreadyScored(_)
            | Error::InvalidDice(_) => ErrorKind::Validation,
            Error::NotYourTurn => ErrorKind::TurnOrder,
            Error::GameStarted | Error::GameOver | Error::OutOfRolls | Error::NoRollYet => {
                ErrorKind::Lifecycle
            }
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::UnknownFeature(_) | Error::IncompatibleFeatures(..) => ErrorKind::Configuration,
            Error::Codec(_) | Error::CorruptSession(_) => ErrorKind::Codec,
        }
    }

    /// True for the store's distinguished "unknown session" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
