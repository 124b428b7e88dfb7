//! # dino-draft
//!
//! Rules engine for a dinosaur token-drafting board game.
//!
//! Each seat owns a board of seven enclosures. Every round each seat draws a
//! bag of six dinosaur tokens; on its turn a seat places one token into an
//! enclosure, subject to the enclosure's species rule, its capacity and the
//! current die restriction. When every seat has placed once, hands pass to
//! the next seat. After two rounds the boards are scored and the game ends.
//!
//! ## Design Principles
//!
//! 1. **Typed Records**: games, bags, placements and scores are plain structs
//!    bundled into one `GameSnapshot` per game.
//!
//! 2. **One Commit Per Call**: every operation loads a snapshot, mutates a
//!    copy and commits it once with an optimistic version check. A round
//!    close is never partially visible.
//!
//! 3. **Explicit Dependencies**: the store, the rules configuration and every
//!    RNG are passed in. There is no global state.
//!
//! ## Modules
//!
//! - `core`: ids, seats, species, RNG, configuration, records, errors
//! - `board`: enclosure catalogue and per-seat board view
//! - `rules`: die restriction, placement validation, scoring, turn engine
//! - `bags`: bag dealing, hand passing and reshuffling
//! - `store`: `GameStateStore` trait and in-memory store
//!
//! ## Example
//!
//! ```
//! use dino_draft::{DieFace, InMemoryStore, RulesConfig, SeatId, TurnEngine};
//!
//! let engine = TurnEngine::new(InMemoryStore::new(), RulesConfig::default());
//! let game = engine.start_game(&["ana".to_string(), "ben".to_string()]).unwrap();
//!
//! engine.roll_die(game, SeatId::new(0), DieFace::Forest).unwrap();
//!
//! let view = engine.get_state(game).unwrap();
//! let token = view.seat(SeatId::new(0)).unwrap().bag[0].id;
//! // The river accepts any token under any die face.
//! engine.process_turn(game, SeatId::new(0), token, 7, None).unwrap();
//!
//! let view = engine.get_state(game).unwrap();
//! assert_eq!(view.active_seat, SeatId::new(1));
//! assert_eq!(view.seat(SeatId::new(0)).unwrap().live_score.river(), 1);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod bags;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    GameId, TokenId, BagId, PlacementId, RollId,
    SeatId, SeatMap, Species,
    GameRng,
    RulesConfig, GameOptions, RotationDirection, RotationMode,
    Game, GameSnapshot, GameStatus, Bag, Token, Placement, DieRoll, FinalScore,
    EngineError, ErrorKind, StorageError, ValidationError,
};

pub use crate::board::{Board, EnclosureId, EnclosureKind};

pub use crate::rules::{
    DieFace, DieRestriction,
    PlacementValidator, ValidPlacement,
    ScoringEngine, BoardScore,
    TurnEngine,
    GameView, SeatView, EnclosureView,
    GameResult, Standing,
};

pub use crate::bags::{BagDistributor, DealReport};

pub use crate::store::{GameStateStore, InMemoryStore};
