//! Record identifiers.
//!
//! Every persisted record (game, bag, token, placement, die roll) has its own
//! newtype id so they cannot be mixed up at call sites.
//!
//! ## Allocation
//!
//! Game ids are allocated by the `GameStateStore`. All other ids are
//! allocated per game from counters kept in the game snapshot, so they are
//! stable across reloads and deterministic for a given sequence of actions.
//!
//! ```
//! use dino_draft::core::{IdCounters, TokenId};
//!
//! let mut ids = IdCounters::default();
//! assert_eq!(ids.next_token(), TokenId(1));
//! assert_eq!(ids.next_token(), TokenId(2));
//! ```

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl $name {
            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a game, allocated by the store.
    GameId(u64),
    "Game"
);
record_id!(
    /// Identifier of a bag. New bags (and ids) are created every round.
    BagId(u32),
    "Bag"
);
record_id!(
    /// Identifier of a dinosaur token.
    TokenId(u32),
    "Token"
);
record_id!(
    /// Identifier of a placement record.
    PlacementId(u32),
    "Placement"
);
record_id!(
    /// Identifier of a die roll.
    RollId(u32),
    "Roll"
);

/// Per-game id counters.
///
/// Ids start at 1 and never repeat within a game, even after placements are
/// deleted at a round boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    bag: u32,
    token: u32,
    placement: u32,
    roll: u32,
}

impl IdCounters {
    /// Allocate the next bag id.
    pub fn next_bag(&mut self) -> BagId {
        self.bag += 1;
        BagId(self.bag)
    }

    /// Allocate the next token id.
    pub fn next_token(&mut self) -> TokenId {
        self.token += 1;
        TokenId(self.token)
    }

    /// Allocate the next placement id.
    pub fn next_placement(&mut self) -> PlacementId {
        self.placement += 1;
        PlacementId(self.placement)
    }

    /// Allocate the next die roll id.
    pub fn next_roll(&mut self) -> RollId {
        self.roll += 1;
        RollId(self.roll)
    }
}
