//! In-memory `GameStateStore`.
//!
//! Snapshots live in an `FxHashMap` behind a `parking_lot::RwLock`. Loads
//! clone the snapshot; placements and roll history are `im::Vector`s, so the
//! clone shares their storage.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::GameStateStore;
use crate::core::error::StorageError;
use crate::core::ids::GameId;
use crate::core::state::GameSnapshot;

/// Process-local store.
#[derive(Debug)]
pub struct InMemoryStore {
    games: RwLock<FxHashMap<GameId, GameSnapshot>>,
    next_id: AtomicU64,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            games: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while unavailable, every call fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable("in-memory store switched off".into()))
        }
    }
}

impl GameStateStore for InMemoryStore {
    fn allocate_game_id(&self) -> Result<GameId, StorageError> {
        self.ensure_available()?;
        Ok(GameId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn insert(&self, snapshot: GameSnapshot) -> Result<(), StorageError> {
        self.ensure_available()?;
        let mut games = self.games.write();
        let id = snapshot.game.id;
        if games.contains_key(&id) {
            return Err(StorageError::DuplicateGame(id));
        }
        games.insert(id, snapshot);
        Ok(())
    }

    fn load(&self, game: GameId) -> Result<Option<GameSnapshot>, StorageError> {
        self.ensure_available()?;
        Ok(self.games.read().get(&game).cloned())
    }

    fn commit(&self, mut snapshot: GameSnapshot) -> Result<u64, StorageError> {
        self.ensure_available()?;
        let mut games = self.games.write();
        let id = snapshot.game.id;
        let stored = games.get(&id).ok_or(StorageError::MissingGame(id))?;

        if stored.version != snapshot.version {
            return Err(StorageError::VersionConflict {
                game: id,
                expected: snapshot.version,
                found: stored.version,
            });
        }

        snapshot.version += 1;
        let version = snapshot.version;
        games.insert(id, snapshot);
        Ok(version)
    }
}
