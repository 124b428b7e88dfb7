//! The seven enclosures of a seat's board.
//!
//! Enclosure ids are fixed integers 1-7; the id decides the enclosure's kind
//! (and therefore its placement and scoring rule) and its die tags:
//!
//! | id | kind           | area   | side  |
//! |----|----------------|--------|-------|
//! | 1  | same species   | forest | left  |
//! | 2  | diff. species  | plain  | left  |
//! | 3  | pairs          | plain  | right |
//! | 4  | trio           | forest | left  |
//! | 5  | king           | forest | right |
//! | 6  | island         | plain  | right |
//! | 7  | river          | -      | -     |
//!
//! The river carries no tags: it is exempt from every die restriction.

use serde::{Deserialize, Serialize};

/// Enclosure identifier (1-7), identical on every seat's board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EnclosureId(u8);

impl EnclosureId {
    pub const SAME_SPECIES: Self = Self(1);
    pub const DIFFERENT_SPECIES: Self = Self(2);
    pub const PAIRS: Self = Self(3);
    pub const TRIO: Self = Self(4);
    pub const KING: Self = Self(5);
    pub const ISLAND: Self = Self(6);
    pub const RIVER: Self = Self(7);

    /// Number of enclosures per board.
    pub const COUNT: usize = 7;

    /// All enclosures in id order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::SAME_SPECIES,
        Self::DIFFERENT_SPECIES,
        Self::PAIRS,
        Self::TRIO,
        Self::KING,
        Self::ISLAND,
        Self::RIVER,
    ];

    /// Create an enclosure id, or `None` when outside 1-7.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= 1 && raw as usize <= Self::COUNT {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Raw id (1-7).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Zero-based index for per-enclosure arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    #[must_use]
    pub const fn kind(self) -> EnclosureKind {
        match self.0 {
            1 => EnclosureKind::SameSpecies,
            2 => EnclosureKind::DifferentSpecies,
            3 => EnclosureKind::Pairs,
            4 => EnclosureKind::Trio,
            5 => EnclosureKind::King,
            6 => EnclosureKind::Island,
            _ => EnclosureKind::River,
        }
    }

    /// Forest/plain tag. `None` for the river.
    #[must_use]
    pub const fn area(self) -> Option<Area> {
        match self.kind() {
            EnclosureKind::SameSpecies | EnclosureKind::Trio | EnclosureKind::King => {
                Some(Area::Forest)
            }
            EnclosureKind::DifferentSpecies | EnclosureKind::Pairs | EnclosureKind::Island => {
                Some(Area::Plain)
            }
            EnclosureKind::River => None,
        }
    }

    /// Left/right tag. `None` for the river.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self.kind() {
            EnclosureKind::SameSpecies | EnclosureKind::DifferentSpecies | EnclosureKind::Trio => {
                Some(Side::Left)
            }
            EnclosureKind::Pairs | EnclosureKind::King | EnclosureKind::Island => {
                Some(Side::Right)
            }
            EnclosureKind::River => None,
        }
    }

    #[must_use]
    pub const fn is_river(self) -> bool {
        self.0 == Self::RIVER.0
    }
}

impl TryFrom<u8> for EnclosureId {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(raw)
    }
}

impl From<EnclosureId> for u8 {
    fn from(id: EnclosureId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EnclosureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enclosure({})", self.0)
    }
}

/// Placement and scoring rule of an enclosure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnclosureKind {
    /// One species only.
    SameSpecies,
    /// No species twice.
    DifferentSpecies,
    /// Any mix; scores per pair.
    Pairs,
    /// Any mix; scores when exactly three.
    Trio,
    /// Single token; scores when its species leads the board.
    King,
    /// Single token; scores when its species is alone on the board.
    Island,
    /// Overflow; one point per token.
    River,
}

/// Area tag used by the forest/plain die faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    Forest,
    Plain,
}

/// Side tag used by the left/right die faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}
