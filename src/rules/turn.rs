//! Turn engine: the game state machine.
//!
//! ## States
//!
//! `Created -> InProgress -> Completed`. A game is dealt as part of
//! `start_game`, so callers only ever see `InProgress` or `Completed`.
//!
//! ## Turn flow
//!
//! `process_turn` checks that the seat is active and owns the token, runs the
//! placement validator, records the placement and advances the turn:
//!
//! - all bags empty: close the round (accumulate scores; then either deal the
//!   next round or complete the game)
//! - every seat placed once this cycle: clear the die and rotate the bags
//! - otherwise: next seat, next turn
//!
//! ## Atomicity
//!
//! Each operation loads one snapshot, mutates a private copy and commits it
//! once. Calls for the same game are serialised by a per-game mutex; the
//! store's version check rejects stale commits from other processes.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

use crate::bags::BagDistributor;
use crate::board::EnclosureId;
use crate::core::config::{GameOptions, RulesConfig};
use crate::core::error::{EngineError, StorageError};
use crate::core::ids::{GameId, RollId, TokenId};
use crate::core::seat::SeatId;
use crate::core::state::{DieRoll, Game, GameSnapshot, GameStatus, Placement};
use crate::store::GameStateStore;

use super::die::DieFace;
use super::scoring::ScoringEngine;
use super::validator::PlacementValidator;
use super::view::GameView;

/// Runs games stored in `S`.
pub struct TurnEngine<S> {
    store: S,
    config: RulesConfig,
    locks: Mutex<FxHashMap<GameId, Arc<Mutex<()>>>>,
}

impl<S: GameStateStore> TurnEngine<S> {
    #[must_use]
    pub fn new(store: S, config: RulesConfig) -> Self {
        Self {
            store,
            config,
            locks: Mutex::new(FxHashMap::default()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Create a game with default options and deal the first round.
    pub fn start_game(&self, players: &[String]) -> Result<GameId, EngineError> {
        self.start_game_with(players, GameOptions::default())
    }

    #[instrument(skip(self))]
    pub fn start_game_with(
        &self,
        players: &[String],
        options: GameOptions,
    ) -> Result<GameId, EngineError> {
        let seat_count = players.len();
        if !self.config.supports_seats(seat_count) {
            let (min, max) = self.config.seat_bounds();
            return Err(EngineError::InvalidSeatCount(seat_count, min, max));
        }

        let id = self.store.allocate_game_id()?;
        let mut snapshot = GameSnapshot::new(Game::new(id, players, &options));
        let report = BagDistributor::new(&self.config).deal(&mut snapshot);
        snapshot.game.status = GameStatus::InProgress;

        self.store.insert(snapshot)?;
        info!(
            game = %id,
            seats = seat_count,
            duplicate_bags = report.duplicate_signatures,
            "game started"
        );
        Ok(id)
    }

    /// Record a die roll by the active seat. The face restricts every seat
    /// until the current cycle ends; a later roll in the same cycle replaces it.
    #[instrument(skip(self))]
    pub fn roll_die(&self, game: GameId, seat: SeatId, face: DieFace) -> Result<RollId, EngineError> {
        self.with_game_lock(game, || self.record_roll(game, seat, face))
    }

    fn record_roll(&self, game: GameId, seat: SeatId, face: DieFace) -> Result<RollId, EngineError> {
        let mut snapshot = self.load(game)?;
        ensure_in_progress(&snapshot)?;
        ensure_seat(&snapshot, seat)?;
        ensure_active(&snapshot, seat)?;

        let id = snapshot.ids.next_roll();
        let roll = DieRoll {
            id,
            face,
            bound_seat: seat,
            round: snapshot.game.round,
            turn: snapshot.game.turn,
            created_at: OffsetDateTime::now_utc(),
        };
        snapshot.roll_history.push_back(roll.clone());
        snapshot.die_roll = Some(roll);

        self.commit(snapshot)?;
        debug!(game = %game, %seat, %face, roll = %id, "die rolled");
        Ok(id)
    }

    /// Place `token` from `seat`'s bag into `enclosure` and advance the turn.
    ///
    /// `slot` picks a position inside the enclosure; `None` takes the first
    /// free one.
    #[instrument(skip(self))]
    pub fn process_turn(
        &self,
        game: GameId,
        seat: SeatId,
        token: TokenId,
        enclosure: u8,
        slot: Option<u8>,
    ) -> Result<(), EngineError> {
        self.with_game_lock(game, || self.place_token(game, seat, token, enclosure, slot))
    }

    fn place_token(
        &self,
        game: GameId,
        seat: SeatId,
        token: TokenId,
        enclosure: u8,
        slot: Option<u8>,
    ) -> Result<(), EngineError> {
        let mut snapshot = self.load(game)?;
        ensure_in_progress(&snapshot)?;
        ensure_seat(&snapshot, seat)?;
        ensure_active(&snapshot, seat)?;

        let owned = snapshot.bag_of(seat).is_some_and(|bag| bag.contains(token));
        if !owned {
            return Err(EngineError::TokenNotOwned { seat, token });
        }

        let valid = PlacementValidator::new(&self.config).validate(&snapshot, seat, token, enclosure, slot)?;

        let taken = snapshot
            .bag_of_mut(seat)
            .and_then(|bag| bag.take(token))
            .ok_or(EngineError::TokenNotOwned { seat, token })?;

        let placement = Placement {
            id: snapshot.ids.next_placement(),
            seat,
            enclosure: valid.enclosure,
            token: taken.id,
            species: taken.species,
            slot: valid.slot,
        };
        snapshot.placements.push_back(placement);
        snapshot.game.cycle_placements += 1;
        debug!(
            game = %game,
            %seat,
            %token,
            enclosure = %valid.enclosure,
            slot = valid.slot,
            species = %taken.species,
            "token placed"
        );

        self.advance_turn(&mut snapshot)?;
        self.commit(snapshot)?;
        Ok(())
    }

    /// Current state of a game, with live scores.
    pub fn get_state(&self, game: GameId) -> Result<GameView, EngineError> {
        let snapshot = self.load(game)?;
        Ok(GameView::from_snapshot(&snapshot, &self.config))
    }

    /// Enclosures where `seat` could legally place `token` right now.
    ///
    /// Lets an external timer pick a default placement for a stalled seat.
    pub fn legal_enclosures(
        &self,
        game: GameId,
        seat: SeatId,
        token: TokenId,
    ) -> Result<Vec<EnclosureId>, EngineError> {
        let snapshot = self.load(game)?;
        ensure_seat(&snapshot, seat)?;

        let species = snapshot
            .bag_of(seat)
            .and_then(|bag| bag.get(token))
            .map(|t| t.species)
            .ok_or(EngineError::TokenNotOwned { seat, token })?;
        let face = snapshot.die_roll.as_ref().map(|roll| roll.face);

        Ok(PlacementValidator::new(&self.config).legal_enclosures(&snapshot.board(seat), face, species))
    }

    /// Move the game past the placement just recorded.
    fn advance_turn(&self, snapshot: &mut GameSnapshot) -> Result<(), EngineError> {
        let seat_count = snapshot.seat_count();
        let next = snapshot.game.active_seat.next(seat_count);

        if snapshot.unplayed_total() == 0 {
            self.close_round(snapshot);
            return Ok(());
        }

        if snapshot.game.cycle_placements as usize >= seat_count {
            snapshot.die_roll = None;
            snapshot.game.cycle_placements = 0;
            BagDistributor::new(&self.config).rotate(snapshot)?;
            debug!(game = %snapshot.game.id, turn = snapshot.game.turn, "cycle complete");
        }

        snapshot.game.active_seat = next;
        snapshot.game.turn += 1;
        Ok(())
    }

    /// Accumulate every seat's board into its final score, then either start
    /// the next round or complete the game.
    fn close_round(&self, snapshot: &mut GameSnapshot) {
        let game_id = snapshot.game.id;
        let round = snapshot.game.round;

        for seat in SeatId::all(snapshot.seat_count()) {
            let score = ScoringEngine::score_board(&snapshot.board(seat));
            let total = &mut snapshot.scores[seat];
            total.total_points += score.total;
            total.river_points += score.river();
            total.trex_bonus += score.trex_bonus;
            total.trex_tiebreak_count += score.trex_count;
        }

        snapshot.die_roll = None;
        snapshot.game.cycle_placements = 0;

        if round >= self.config.max_rounds {
            snapshot.game.status = GameStatus::Completed;
            info!(game = %game_id, round, "game completed");
            return;
        }

        snapshot.placements.clear();
        let report = BagDistributor::new(&self.config).deal(snapshot);
        snapshot.game.round += 1;
        snapshot.game.turn = 1;
        snapshot.game.active_seat = SeatId::new(0);
        info!(
            game = %game_id,
            round,
            duplicate_bags = report.duplicate_signatures,
            "round closed"
        );
    }

    fn load(&self, game: GameId) -> Result<GameSnapshot, EngineError> {
        self.store.load(game)?.ok_or(EngineError::GameNotFound(game))
    }

    fn commit(&self, snapshot: GameSnapshot) -> Result<u64, EngineError> {
        let game = snapshot.game.id;
        self.store.commit(snapshot).map_err(|err| {
            if let StorageError::VersionConflict { expected, found, .. } = &err {
                warn!(game = %game, expected, found, "stale commit rejected");
            }
            EngineError::from(err)
        })
    }

    /// Run `f` while holding `game`'s mutex.
    ///
    /// An entry lives in `locks` only while some call for that game is in
    /// flight; the last caller out removes it.
    fn with_game_lock<T>(
        &self,
        game: GameId,
        f: impl FnOnce() -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let lock = Arc::clone(self.locks.lock().entry(game).or_default());
        let result = {
            let _guard = lock.lock();
            f()
        };

        let mut locks = self.locks.lock();
        // One handle in the map, one here: nobody else holds or waits on it.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&game);
        }
        result
    }
}

fn ensure_in_progress(snapshot: &GameSnapshot) -> Result<(), EngineError> {
    match snapshot.game.status {
        GameStatus::InProgress => Ok(()),
        GameStatus::Created => Err(EngineError::GameNotStarted(snapshot.game.id)),
        GameStatus::Completed => Err(EngineError::GameCompleted(snapshot.game.id)),
    }
}

fn ensure_seat(snapshot: &GameSnapshot, seat: SeatId) -> Result<(), EngineError> {
    if snapshot.game.has_seat(seat) {
        Ok(())
    } else {
        Err(EngineError::UnknownSeat {
            game: snapshot.game.id,
            seat,
        })
    }
}

fn ensure_active(snapshot: &GameSnapshot, seat: SeatId) -> Result<(), EngineError> {
    let active = snapshot.game.active_seat;
    if seat == active {
        Ok(())
    } else {
        Err(EngineError::NotActiveSeat { seat, active })
    }
}
