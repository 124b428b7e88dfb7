//! Persisted game records.
//!
//! ## Records
//!
//! - `Game`: seats, turn/round counters, status, rotation direction
//! - `Bag`: a seat's unplayed tokens for the current round
//! - `Placement`: a played token bound to (seat, enclosure, slot)
//! - `DieRoll`: the current die restriction
//! - `FinalScore`: per-seat totals accumulated at round boundaries
//!
//! ## GameSnapshot
//!
//! All records of one game, loaded and committed as a unit. Every engine
//! operation (including a round close, which touches scores, placements and
//! bags at once) produces exactly one new snapshot, so a partial write can
//! never be observed.

use im::Vector;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::config::{GameOptions, RotationDirection};
use super::ids::{BagId, GameId, IdCounters, PlacementId, RollId, TokenId};
use super::seat::{SeatId, SeatMap};
use super::species::Species;
use crate::board::{Board, EnclosureId};
use crate::rules::DieFace;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Created,
    InProgress,
    Completed,
}

/// A seat and the participant bound to it for the whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub seat: SeatId,
    pub player: String,
}

/// The game record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub seats: Vec<Seat>,
    pub active_seat: SeatId,
    /// Turn number within the round (starts at 1).
    pub turn: u32,
    /// Round number (starts at 1).
    pub round: u8,
    pub status: GameStatus,
    pub direction: RotationDirection,
    /// Cosmetic.
    pub theme: String,
    /// Placements made since the current cycle began.
    pub cycle_placements: u32,
    pub seed_salt: u64,
}

impl Game {
    /// A fresh game in `Created` state: round 1, turn 1, seat 0 active.
    #[must_use]
    pub fn new(id: GameId, players: &[String], options: &GameOptions) -> Self {
        let seats = players
            .iter()
            .enumerate()
            .map(|(i, player)| Seat {
                seat: SeatId::new(i as u8),
                player: player.clone(),
            })
            .collect();

        Self {
            id,
            seats,
            active_seat: SeatId::new(0),
            turn: 1,
            round: 1,
            status: GameStatus::Created,
            direction: options.direction,
            theme: options.theme.clone(),
            cycle_placements: 0,
            seed_salt: options.seed_salt,
        }
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn has_seat(&self, seat: SeatId) -> bool {
        seat.index() < self.seats.len()
    }
}

/// A dinosaur token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub species: Species,
    /// Persisted bag record flag. Placing a token takes it out of its bag
    /// and the `Placement` carries it from then on, so a token held in a
    /// bag always has this unset. Ownership checks use bag membership.
    pub played: bool,
}

impl Token {
    #[must_use]
    pub fn new(id: TokenId, species: Species) -> Self {
        Self {
            id,
            species,
            played: false,
        }
    }
}

/// A seat's hand for the current round.
///
/// Tokens leave the bag when they are placed, so every token in a bag is
/// unplayed. Passing hands reassigns `owner`; the tokens stay with the bag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    pub id: BagId,
    pub owner: SeatId,
    pub tokens: Vec<Token>,
}

impl Bag {
    #[must_use]
    pub fn contains(&self, token: TokenId) -> bool {
        self.tokens.iter().any(|t| t.id == token)
    }

    #[must_use]
    pub fn get(&self, token: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == token)
    }

    /// Remove a token from the bag.
    pub fn take(&mut self, token: TokenId) -> Option<Token> {
        let pos = self.tokens.iter().position(|t| t.id == token)?;
        Some(self.tokens.remove(pos))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A token placed on a seat's board. Never mutated once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub id: PlacementId,
    pub seat: SeatId,
    pub enclosure: EnclosureId,
    pub token: TokenId,
    pub species: Species,
    pub slot: u8,
}

/// A recorded die roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    pub id: RollId,
    pub face: DieFace,
    /// The seat that rolled. The restriction binds every seat regardless.
    pub bound_seat: SeatId,
    pub round: u8,
    pub turn: u32,
    pub created_at: OffsetDateTime,
}

/// Accumulated score of one seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub seat: SeatId,
    /// All points, T-Rex bonus included.
    pub total_points: u32,
    pub river_points: u32,
    pub trex_bonus: u32,
    /// T-Rex tokens placed over the whole game (river included).
    pub trex_tiebreak_count: u32,
}

/// Every record of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: Game,
    pub bags: Vec<Bag>,
    pub placements: Vector<Placement>,
    /// Current restriction; `None` when no die has been rolled this cycle.
    pub die_roll: Option<DieRoll>,
    pub roll_history: Vector<DieRoll>,
    pub scores: SeatMap<FinalScore>,
    pub ids: IdCounters,
    /// Bumped by the store on every successful commit.
    pub version: u64,
}

impl GameSnapshot {
    /// Wrap a new game with empty bags, placements and scores.
    #[must_use]
    pub fn new(game: Game) -> Self {
        let seat_count = game.seat_count();
        Self {
            game,
            bags: Vec::new(),
            placements: Vector::new(),
            die_roll: None,
            roll_history: Vector::new(),
            scores: SeatMap::new(seat_count, |seat| FinalScore {
                seat,
                ..FinalScore::default()
            }),
            ids: IdCounters::default(),
            version: 0,
        }
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.game.seat_count()
    }

    /// The bag currently owned by `seat`.
    #[must_use]
    pub fn bag_of(&self, seat: SeatId) -> Option<&Bag> {
        self.bags.iter().find(|b| b.owner == seat)
    }

    pub fn bag_of_mut(&mut self, seat: SeatId) -> Option<&mut Bag> {
        self.bags.iter_mut().find(|b| b.owner == seat)
    }

    /// Unplayed tokens across all bags.
    #[must_use]
    pub fn unplayed_total(&self) -> usize {
        self.bags.iter().map(Bag::len).sum()
    }

    /// Placements on `seat`'s board.
    pub fn placements_of(&self, seat: SeatId) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.seat == seat)
    }

    /// Build `seat`'s board from its placements.
    #[must_use]
    pub fn board(&self, seat: SeatId) -> Board {
        Board::from_placements(self.placements_of(seat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn test_new_game_defaults() {
        let game = Game::new(GameId(1), &players(3), &GameOptions::default());

        assert_eq!(game.seat_count(), 3);
        assert_eq!(game.active_seat, SeatId::new(0));
        assert_eq!(game.turn, 1);
        assert_eq!(game.round, 1);
        assert_eq!(game.status, GameStatus::Created);
        assert!(game.has_seat(SeatId::new(2)));
        assert!(!game.has_seat(SeatId::new(3)));
    }

    #[test]
    fn test_bag_take() {
        let mut bag = Bag {
            id: BagId(1),
            owner: SeatId::new(0),
            tokens: vec![
                Token::new(TokenId(1), Species::TRex),
                Token::new(TokenId(2), Species::Stegosaurus),
            ],
        };

        assert!(bag.contains(TokenId(2)));
        let taken = bag.take(TokenId(2)).unwrap();
        assert_eq!(taken.species, Species::Stegosaurus);
        assert!(!bag.contains(TokenId(2)));
        assert_eq!(bag.take(TokenId(2)), None);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_snapshot_lookups() {
        let game = Game::new(GameId(1), &players(2), &GameOptions::default());
        let mut snapshot = GameSnapshot::new(game);
        snapshot.bags.push(Bag {
            id: BagId(1),
            owner: SeatId::new(1),
            tokens: vec![Token::new(TokenId(1), Species::TRex)],
        });
        snapshot.placements.push_back(Placement {
            id: PlacementId(1),
            seat: SeatId::new(0),
            enclosure: EnclosureId::RIVER,
            token: TokenId(2),
            species: Species::Triceratops,
            slot: 0,
        });

        assert!(snapshot.bag_of(SeatId::new(0)).is_none());
        assert_eq!(snapshot.bag_of(SeatId::new(1)).map(Bag::len), Some(1));
        assert_eq!(snapshot.unplayed_total(), 1);
        assert_eq!(snapshot.placements_of(SeatId::new(0)).count(), 1);
        assert_eq!(snapshot.placements_of(SeatId::new(1)).count(), 0);
        assert_eq!(snapshot.scores[SeatId::new(1)].seat, SeatId::new(1));
    }

    #[test]
    fn test_snapshot_serde() {
        let game = Game::new(GameId(4), &players(2), &GameOptions::default());
        let snapshot = GameSnapshot::new(game);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, restored);
    }
}
