//! Game rules.
//!
//! - `die`: die faces and the placement restriction each one imposes
//! - `validator`: whether a token may go into an enclosure
//! - `scoring`: board scoring tables
//! - `turn`: the turn engine state machine
//! - `view`: the `GetState` read model
//! - `result`: final standings

pub mod die;
pub mod result;
pub mod scoring;
pub mod turn;
pub mod validator;
pub mod view;

pub use die::{DieFace, DieRestriction};
pub use result::{game_result, standings, GameResult, Standing};
pub use scoring::{BoardScore, ScoringEngine};
pub use turn::TurnEngine;
pub use validator::{PlacementValidator, ValidPlacement};
pub use view::{EnclosureView, GameView, SeatView};
