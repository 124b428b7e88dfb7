//! Persistence interface.
//!
//! The engine reads and writes whole `GameSnapshot`s through a
//! `GameStateStore`. Commits are optimistic: a snapshot is only written if
//! the stored version still matches the version it was loaded at, so two
//! requests racing on the same game cannot both commit.
//!
//! The store is constructed once by the host and handed to the engine;
//! `Arc<S>` is a store too, so one store can back several engines.

pub mod memory;

pub use memory::InMemoryStore;

use std::sync::Arc;

use crate::core::error::StorageError;
use crate::core::ids::GameId;
use crate::core::state::GameSnapshot;

/// Storage for game snapshots.
pub trait GameStateStore: Send + Sync {
    /// Reserve a fresh game id.
    fn allocate_game_id(&self) -> Result<GameId, StorageError>;

    /// Store a new game. Fails if the id is already taken.
    fn insert(&self, snapshot: GameSnapshot) -> Result<(), StorageError>;

    /// Load a game, or `None` if it does not exist.
    fn load(&self, game: GameId) -> Result<Option<GameSnapshot>, StorageError>;

    /// Replace a stored game if its version still equals `snapshot.version`.
    ///
    /// Returns the new version. A mismatch yields
    /// `StorageError::VersionConflict` and leaves the stored game unchanged.
    fn commit(&self, snapshot: GameSnapshot) -> Result<u64, StorageError>;
}

impl<S: GameStateStore + ?Sized> GameStateStore for Arc<S> {
    fn allocate_game_id(&self) -> Result<GameId, StorageError> {
        (**self).allocate_game_id()
    }

    fn insert(&self, snapshot: GameSnapshot) -> Result<(), StorageError> {
        (**self).insert(snapshot)
    }

    fn load(&self, game: GameId) -> Result<Option<GameSnapshot>, StorageError> {
        (**self).load(game)
    }

    fn commit(&self, snapshot: GameSnapshot) -> Result<u64, StorageError> {
        (**self).commit(snapshot)
    }
}
