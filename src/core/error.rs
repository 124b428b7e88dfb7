//! Error taxonomy.
//!
//! Every engine operation returns `Result<_, EngineError>`. Normal game flow
//! (a round ending, a hand being passed) is never signalled with an error.

use thiserror::Error;

use super::ids::{GameId, TokenId};
use super::seat::SeatId;
use super::species::Species;
use crate::board::EnclosureId;
use crate::rules::DieFace;

/// Why a proposed placement was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enclosure {0} does not exist (expected 1-7)")]
    InvalidEnclosure(u8),

    #[error("{token} is not an unplayed token in {seat}'s bag")]
    TokenUnavailable { seat: SeatId, token: TokenId },

    #[error("{enclosure} is full ({capacity} tokens)")]
    EnclosureFull { enclosure: EnclosureId, capacity: usize },

    #[error("Slot {slot} of {enclosure} is taken or out of range")]
    SlotUnavailable { enclosure: EnclosureId, slot: u8 },

    #[error("{species} is not allowed in {enclosure}")]
    SpeciesConflict { enclosure: EnclosureId, species: Species },

    #[error("The die ({face}) forbids placing in {enclosure}")]
    DieRestriction { enclosure: EnclosureId, face: DieFace },
}

/// Failures reported by a `GameStateStore`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Game {0} already exists")]
    DuplicateGame(GameId),

    #[error("Game {0} is not stored")]
    MissingGame(GameId),

    #[error("Stale write to game {game}: expected version {expected}, found {found}")]
    VersionConflict { game: GameId, expected: u64, found: u64 },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by engine operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("It is not {seat}'s turn ({active} is active)")]
    NotActiveSeat { seat: SeatId, active: SeatId },

    #[error("{token} does not belong to {seat}'s bag")]
    TokenNotOwned { seat: SeatId, token: TokenId },

    #[error("Game {0} not found")]
    GameNotFound(GameId),

    #[error("Game {0} has not started")]
    GameNotStarted(GameId),

    #[error("Game {0} is already completed")]
    GameCompleted(GameId),

    #[error("{0} seats cannot play (supported: {1}-{2})")]
    InvalidSeatCount(usize, usize, usize),

    #[error("{seat} is not part of game {game}")]
    UnknownSeat { game: GameId, seat: SeatId },

    #[error("Concurrent update to game {game}: expected version {expected}, found {found}")]
    ConcurrencyConflict { game: GameId, expected: u64, found: u64 },

    #[error("Token redistribution failed: {0}")]
    Distribution(String),

    #[error(transparent)]
    Storage(StorageError),
}

/// Coarse error classes callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The proposed action breaks a rule. Not retried.
    Validation,
    /// The seat may not act right now ("not your turn").
    Ownership,
    /// The game is missing, not started, finished, or malformed.
    State,
    /// Another request changed the game first. Retry the whole call once.
    Conflict,
    /// Persistence failed or the engine could not keep state consistent.
    Storage,
}

impl EngineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::NotActiveSeat { .. } | EngineError::TokenNotOwned { .. } => {
                ErrorKind::Ownership
            }
            EngineError::GameNotFound(_)
            | EngineError::GameNotStarted(_)
            | EngineError::GameCompleted(_)
            | EngineError::InvalidSeatCount(..)
            | EngineError::UnknownSeat { .. } => ErrorKind::State,
            EngineError::ConcurrencyConflict { .. } => ErrorKind::Conflict,
            EngineError::Distribution(_) | EngineError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Only concurrency conflicts are worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::VersionConflict { game, expected, found } => {
                EngineError::ConcurrencyConflict { game, expected, found }
            }
            StorageError::MissingGame(game) => EngineError::GameNotFound(game),
            other => EngineError::Storage(other),
        }
    }
}
