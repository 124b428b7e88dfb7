//! A seat's board: placements grouped by enclosure.
//!
//! `Board` is a read-only view rebuilt from placement records whenever it is
//! needed. It answers the questions validation and scoring ask:
//! - How many tokens (and which species) are in an enclosure?
//! - Which slots are taken?
//! - How often does a species appear across the whole board?

use smallvec::SmallVec;

use super::enclosure::EnclosureId;
use crate::core::species::{Species, SpeciesCounts};
use crate::core::state::Placement;

/// A token sitting in an enclosure slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub slot: u8,
    pub species: Species,
}

/// Placements of one seat, grouped by enclosure.
///
/// ```
/// use dino_draft::board::{Board, EnclosureId};
/// use dino_draft::core::Species;
///
/// let mut board = Board::new();
/// board.push(EnclosureId::RIVER, 0, Species::TRex);
/// assert_eq!(board.count(EnclosureId::RIVER), 1);
/// assert_eq!(board.species_total(Species::TRex), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    enclosures: [SmallVec<[Occupant; 6]>; EnclosureId::COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a seat's placements.
    pub fn from_placements<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> Self {
        let mut board = Self::new();
        for placement in placements {
            board.push(placement.enclosure, placement.slot, placement.species);
        }
        board
    }

    /// Add an occupant. Does not check capacity or rules.
    pub fn push(&mut self, enclosure: EnclosureId, slot: u8, species: Species) {
        self.enclosures[enclosure.index()].push(Occupant { slot, species });
    }

    /// Occupants of an enclosure, in placement order.
    #[must_use]
    pub fn occupants(&self, enclosure: EnclosureId) -> &[Occupant] {
        &self.enclosures[enclosure.index()]
    }

    /// Species in an enclosure, in placement order.
    pub fn species_in(&self, enclosure: EnclosureId) -> impl Iterator<Item = Species> + '_ {
        self.occupants(enclosure).iter().map(|o| o.species)
    }

    #[must_use]
    pub fn count(&self, enclosure: EnclosureId) -> usize {
        self.enclosures[enclosure.index()].len()
    }

    #[must_use]
    pub fn is_empty_enclosure(&self, enclosure: EnclosureId) -> bool {
        self.enclosures[enclosure.index()].is_empty()
    }

    #[must_use]
    pub fn contains_species(&self, enclosure: EnclosureId, species: Species) -> bool {
        self.species_in(enclosure).any(|s| s == species)
    }

    #[must_use]
    pub fn is_slot_taken(&self, enclosure: EnclosureId, slot: u8) -> bool {
        self.occupants(enclosure).iter().any(|o| o.slot == slot)
    }

    /// Lowest free slot below `capacity`, if any.
    #[must_use]
    pub fn first_free_slot(&self, enclosure: EnclosureId, capacity: usize) -> Option<u8> {
        (0..capacity.min(u8::MAX as usize) as u8).find(|&slot| !self.is_slot_taken(enclosure, slot))
    }

    /// Per-species counts inside one enclosure.
    #[must_use]
    pub fn species_counts_in(&self, enclosure: EnclosureId) -> SpeciesCounts {
        let mut counts = [0; Species::COUNT];
        for species in self.species_in(enclosure) {
            counts[species.index()] += 1;
        }
        counts
    }

    /// Per-species counts across every enclosure.
    #[must_use]
    pub fn species_counts(&self) -> SpeciesCounts {
        let mut counts = [0; Species::COUNT];
        for enclosure in EnclosureId::ALL {
            for species in self.species_in(enclosure) {
                counts[species.index()] += 1;
            }
        }
        counts
    }

    /// How often `species` appears across the whole board.
    #[must_use]
    pub fn species_total(&self, species: Species) -> u32 {
        self.species_counts()[species.index()]
    }

    /// Whether `species` appears in any enclosure other than `except`.
    #[must_use]
    pub fn species_elsewhere(&self, species: Species, except: EnclosureId) -> bool {
        EnclosureId::ALL
            .iter()
            .filter(|&&e| e != except)
            .any(|&e| self.contains_species(e, species))
    }

    /// Total tokens on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enclosures.iter().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
