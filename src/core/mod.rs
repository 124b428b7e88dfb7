//! Core engine types: ids, seats, species, RNG, configuration, records, errors.
//!
//! Everything here is plain data. Rules live in `rules`, bag handling in
//! `bags`, persistence in `store`.

pub mod ids;
pub mod seat;
pub mod species;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use ids::{BagId, GameId, IdCounters, PlacementId, RollId, TokenId};
pub use seat::{SeatId, SeatMap};
pub use species::{Species, SpeciesCounts};
pub use rng::GameRng;
pub use config::{GameOptions, RotationDirection, RotationMode, RulesConfig};
pub use state::{Bag, DieRoll, FinalScore, Game, GameSnapshot, GameStatus, Placement, Seat, Token};
pub use error::{EngineError, ErrorKind, StorageError, ValidationError};
