//! Read model returned by `GetState`.
//!
//! A `GameView` is computed from a snapshot on every read. Live board scores
//! are derived here and never persisted; only `FinalScore`s accumulated at
//! round close are stored.

use serde::{Deserialize, Serialize};

use crate::board::{EnclosureId, EnclosureKind};
use crate::core::config::{RotationDirection, RulesConfig};
use crate::core::ids::GameId;
use crate::core::seat::SeatId;
use crate::core::state::{DieRoll, FinalScore, GameSnapshot, GameStatus, Placement, Token};

use super::result::{game_result, standings, GameResult, Standing};
use super::scoring::{BoardScore, ScoringEngine};

/// One enclosure of a seat's board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclosureView {
    pub id: EnclosureId,
    pub kind: EnclosureKind,
    pub capacity: usize,
    pub placements: Vec<Placement>,
}

/// Everything visible about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: SeatId,
    pub player: String,
    pub bag: Vec<Token>,
    pub enclosures: Vec<EnclosureView>,
    /// Score of the board as it stands now.
    pub live_score: BoardScore,
}

/// Full state of a game as seen by clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game: GameId,
    pub status: GameStatus,
    pub round: u8,
    pub turn: u32,
    pub active_seat: SeatId,
    pub direction: RotationDirection,
    pub theme: String,
    pub seats: Vec<SeatView>,
    /// Restriction in force for the current cycle.
    pub last_die_roll: Option<DieRoll>,
    pub scores: Vec<FinalScore>,
    /// Set once the game is completed.
    pub standings: Option<Vec<Standing>>,
    pub result: Option<GameResult>,
    pub version: u64,
}

impl GameView {
    #[must_use]
    pub fn from_snapshot(snapshot: &GameSnapshot, config: &RulesConfig) -> Self {
        let game = &snapshot.game;

        let seats = game
            .seats
            .iter()
            .map(|seat| {
                let board = snapshot.board(seat.seat);
                let enclosures = EnclosureId::ALL
                    .into_iter()
                    .map(|id| EnclosureView {
                        id,
                        kind: id.kind(),
                        capacity: config.capacity(id),
                        placements: snapshot
                            .placements_of(seat.seat)
                            .filter(|p| p.enclosure == id)
                            .copied()
                            .collect(),
                    })
                    .collect();

                SeatView {
                    seat: seat.seat,
                    player: seat.player.clone(),
                    bag: snapshot
                        .bag_of(seat.seat)
                        .map(|bag| bag.tokens.clone())
                        .unwrap_or_default(),
                    enclosures,
                    live_score: ScoringEngine::score_board(&board),
                }
            })
            .collect();

        let completed = game.status == GameStatus::Completed;

        Self {
            game: game.id,
            status: game.status,
            round: game.round,
            turn: game.turn,
            active_seat: game.active_seat,
            direction: game.direction,
            theme: game.theme.clone(),
            seats,
            last_die_roll: snapshot.die_roll.clone(),
            scores: snapshot.scores.values().cloned().collect(),
            standings: completed.then(|| standings(&snapshot.scores)),
            result: completed.then(|| game_result(&snapshot.scores)),
            version: snapshot.version,
        }
    }

    #[must_use]
    pub fn seat(&self, seat: SeatId) -> Option<&SeatView> {
        self.seats.get(seat.index())
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}

impl SeatView {
    #[must_use]
    pub fn enclosure(&self, id: EnclosureId) -> &EnclosureView {
        &self.enclosures[id.index()]
    }

    /// Tokens on the board.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.enclosures.iter().map(|e| e.placements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameOptions;
    use crate::core::ids::{PlacementId, TokenId};
    use crate::core::species::Species;
    use crate::core::state::Game;

    fn snapshot() -> GameSnapshot {
        let players = vec!["ana".to_string(), "ben".to_string()];
        let mut snapshot = GameSnapshot::new(Game::new(GameId(3), &players, &GameOptions::default()));
        snapshot.placements.push_back(Placement {
            id: PlacementId(1),
            seat: SeatId::new(1),
            enclosure: EnclosureId::RIVER,
            token: TokenId(5),
            species: Species::TRex,
            slot: 0,
        });
        snapshot
    }

    #[test]
    fn test_view_groups_placements_by_enclosure() {
        let view = GameView::from_snapshot(&snapshot(), &RulesConfig::default());

        assert_eq!(view.seats.len(), 2);
        let ben = view.seat(SeatId::new(1)).unwrap();
        assert_eq!(ben.player, "ben");
        assert_eq!(ben.placed(), 1);
        assert_eq!(ben.enclosure(EnclosureId::RIVER).placements.len(), 1);
        assert_eq!(ben.enclosure(EnclosureId::KING).capacity, 1);
        assert_eq!(ben.enclosure(EnclosureId::KING).kind, EnclosureKind::King);
        assert_eq!(ben.live_score.river(), 1);
        assert_eq!(ben.live_score.trex_bonus, 0);

        assert_eq!(view.seat(SeatId::new(0)).unwrap().placed(), 0);
        assert!(view.result.is_none());
        assert!(view.standings.is_none());
    }

    #[test]
    fn test_completed_view_has_result() {
        let mut snapshot = snapshot();
        snapshot.game.status = GameStatus::Completed;
        snapshot.scores[SeatId::new(0)].total_points = 12;

        let view = GameView::from_snapshot(&snapshot, &RulesConfig::default());
        assert!(view.is_completed());
        assert_eq!(view.result, Some(GameResult::Winner(SeatId::new(0))));
        assert_eq!(view.standings.map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_view_json_round_trip() {
        let view = GameView::from_snapshot(&snapshot(), &RulesConfig::default());
        let json = serde_json::to_string(&view).unwrap();
        let back: GameView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
