//! Rules and per-game configuration.
//!
//! - `RulesConfig`: engine-wide rules (bag size, rounds, capacities, ...)
//! - `GameOptions`: choices made when a game is started (direction, theme)
//!
//! Both are plain values passed into the engine; there is no global config.

use serde::{Deserialize, Serialize};

use crate::board::EnclosureId;

/// Direction in which hands are passed at the end of a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Seat i passes to seat i + 1.
    #[default]
    Clockwise,
    /// Seat i passes to seat i - 1.
    Counterclockwise,
}

/// How remaining tokens move between seats at the end of a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationMode {
    /// Each seat's hand goes to the next seat along the rotation direction.
    #[default]
    Pass,
    /// All unplayed tokens are pooled and dealt out again as evenly as possible.
    Reshuffle,
}

/// Engine-wide rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Tokens dealt to every seat at the start of a round.
    pub tokens_per_bag: usize,

    /// Number of rounds in a game.
    pub max_rounds: u8,

    /// Smallest table size.
    pub min_players: usize,

    /// Largest table size.
    pub max_players: usize,

    /// Capacity of each enclosure, indexed by enclosure id - 1.
    pub capacities: [usize; EnclosureId::COUNT],

    /// Pairwise swaps attempted when a dealt bag duplicates an earlier one.
    pub uniqueness_retries: u32,

    /// What happens to remaining hands when a cycle completes.
    pub rotation_mode: RotationMode,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tokens_per_bag: 6,
            max_rounds: 2,
            min_players: 2,
            max_players: 5,
            capacities: [6, 6, 6, 3, 1, 1, 6],
            uniqueness_retries: 8,
            rotation_mode: RotationMode::Pass,
        }
    }
}

impl RulesConfig {
    /// Capacity of an enclosure.
    #[must_use]
    pub fn capacity(&self, enclosure: EnclosureId) -> usize {
        self.capacities[enclosure.index()]
    }

    /// Effective `(min, max)` seat bounds.
    ///
    /// Passing needs a neighbour, so fewer than two seats never play, and
    /// seat ids are `u8`.
    #[must_use]
    pub fn seat_bounds(&self) -> (usize, usize) {
        (
            self.min_players.max(2),
            self.max_players.min(usize::from(u8::MAX)),
        )
    }

    /// Whether a table of `seat_count` seats can play.
    #[must_use]
    pub fn supports_seats(&self, seat_count: usize) -> bool {
        let (min, max) = self.seat_bounds();
        (min..=max).contains(&seat_count)
    }

    /// Set the number of tokens per bag.
    #[must_use]
    pub fn with_tokens_per_bag(mut self, tokens: usize) -> Self {
        self.tokens_per_bag = tokens;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u8) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Override a single enclosure's capacity.
    #[must_use]
    pub fn with_capacity(mut self, enclosure: EnclosureId, capacity: usize) -> Self {
        self.capacities[enclosure.index()] = capacity;
        self
    }

    /// Set the deal's uniqueness retry budget.
    #[must_use]
    pub fn with_uniqueness_retries(mut self, retries: u32) -> Self {
        self.uniqueness_retries = retries;
        self
    }

    /// Set the rotation mode.
    #[must_use]
    pub fn with_rotation_mode(mut self, mode: RotationMode) -> Self {
        self.rotation_mode = mode;
        self
    }
}

/// Options chosen when a game starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Direction hands are passed.
    pub direction: RotationDirection,

    /// Board theme. Cosmetic only.
    pub theme: String,

    /// Mixed into every derived seed of this game.
    pub seed_salt: u64,
}

impl GameOptions {
    #[must_use]
    pub fn with_direction(mut self, direction: RotationDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    #[must_use]
    pub fn with_seed_salt(mut self, salt: u64) -> Self {
        self.seed_salt = salt;
        self
    }
}
