//! Placement die and the restriction each face imposes.
//!
//! The active seat rolls the die once per cycle. Until the cycle ends, every
//! seat (the roller included) may only place into enclosures the face allows.
//! The river is exempt from every face.

use serde::{Deserialize, Serialize};

use crate::board::{Area, Board, EnclosureId, Side};
use crate::core::rng::GameRng;

/// The six faces of the placement die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieFace {
    /// Only forest-area enclosures.
    Forest,
    /// Only plain-area enclosures.
    Plain,
    /// Only left-side enclosures.
    LeftSide,
    /// Only right-side enclosures.
    RightSide,
    /// Only enclosures that are currently empty.
    EmptyEnclosure,
    /// Only enclosures without a T-Rex.
    NoTRex,
}

impl DieFace {
    pub const ALL: [DieFace; 6] = [
        DieFace::Forest,
        DieFace::Plain,
        DieFace::LeftSide,
        DieFace::RightSide,
        DieFace::EmptyEnclosure,
        DieFace::NoTRex,
    ];

    /// Roll a face uniformly.
    pub fn roll(rng: &mut GameRng) -> DieFace {
        Self::ALL[rng.gen_range_usize(0..Self::ALL.len())]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DieFace::Forest => "forest",
            DieFace::Plain => "plain",
            DieFace::LeftSide => "left side",
            DieFace::RightSide => "right side",
            DieFace::EmptyEnclosure => "empty enclosure",
            DieFace::NoTRex => "no T-Rex",
        }
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a die face to a placement predicate over enclosures.
pub struct DieRestriction;

impl DieRestriction {
    /// Whether placing into `enclosure` on `board` is allowed under `face`.
    ///
    /// `face == None` means no die was rolled this cycle: everything is
    /// allowed. The acting seat's own board answers the empty/no-T-Rex faces.
    ///
    /// ```
    /// use dino_draft::board::{Board, EnclosureId};
    /// use dino_draft::rules::{DieFace, DieRestriction};
    ///
    /// let board = Board::new();
    /// assert!(DieRestriction::allows(Some(DieFace::Forest), EnclosureId::KING, &board));
    /// assert!(!DieRestriction::allows(Some(DieFace::Forest), EnclosureId::ISLAND, &board));
    /// assert!(DieRestriction::allows(Some(DieFace::Forest), EnclosureId::RIVER, &board));
    /// ```
    #[must_use]
    pub fn allows(face: Option<DieFace>, enclosure: EnclosureId, board: &Board) -> bool {
        let Some(face) = face else {
            return true;
        };
        if enclosure.is_river() {
            return true;
        }

        match face {
            DieFace::Forest => enclosure.area() == Some(Area::Forest),
            DieFace::Plain => enclosure.area() == Some(Area::Plain),
            DieFace::LeftSide => enclosure.side() == Some(Side::Left),
            DieFace::RightSide => enclosure.side() == Some(Side::Right),
            DieFace::EmptyEnclosure => board.is_empty_enclosure(enclosure),
            DieFace::NoTRex => !board.species_in(enclosure).any(|s| s.is_trex()),
        }
    }

    /// Enclosures `face` allows on `board`.
    #[must_use]
    pub fn allowed_enclosures(face: Option<DieFace>, board: &Board) -> Vec<EnclosureId> {
        EnclosureId::ALL
            .into_iter()
            .filter(|&e| Self::allows(face, e, board))
            .collect()
    }
}
