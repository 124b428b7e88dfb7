//! Placement validation.
//!
//! Checks, in order:
//! 1. the enclosure id is 1-7
//! 2. the token is in the seat's bag (placed tokens have left it)
//! 3. the enclosure has room (and the requested slot is free)
//! 4. the enclosure's species rule
//! 5. the current die restriction
//!
//! Validation never mutates anything; committing is the turn engine's job.

use crate::board::{Board, EnclosureId, EnclosureKind};
use crate::core::config::RulesConfig;
use crate::core::ids::TokenId;
use crate::core::seat::SeatId;
use crate::core::species::Species;
use crate::core::state::GameSnapshot;
use crate::core::error::ValidationError;

use super::die::{DieFace, DieRestriction};

/// A placement that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidPlacement {
    pub enclosure: EnclosureId,
    pub species: Species,
    /// The requested slot, or the first free one.
    pub slot: u8,
}

/// Validates proposed placements against capacity, species and die rules.
pub struct PlacementValidator<'a> {
    config: &'a RulesConfig,
}

impl<'a> PlacementValidator<'a> {
    #[must_use]
    pub fn new(config: &'a RulesConfig) -> Self {
        Self { config }
    }

    /// Validate placing `token` from `seat`'s bag into `enclosure` (raw id).
    pub fn validate(
        &self,
        snapshot: &GameSnapshot,
        seat: SeatId,
        token: TokenId,
        enclosure: u8,
        slot: Option<u8>,
    ) -> Result<ValidPlacement, ValidationError> {
        let enclosure = EnclosureId::new(enclosure).ok_or(ValidationError::InvalidEnclosure(enclosure))?;

        let species = snapshot
            .bag_of(seat)
            .and_then(|bag| bag.get(token))
            .map(|t| t.species)
            .ok_or(ValidationError::TokenUnavailable { seat, token })?;

        let board = snapshot.board(seat);
        let face = snapshot.die_roll.as_ref().map(|roll| roll.face);

        self.check(&board, face, species, enclosure, slot)
    }

    /// Validate a placement of `species` against an explicit board and die face.
    pub fn check(
        &self,
        board: &Board,
        face: Option<DieFace>,
        species: Species,
        enclosure: EnclosureId,
        slot: Option<u8>,
    ) -> Result<ValidPlacement, ValidationError> {
        let capacity = self.config.capacity(enclosure);
        if board.count(enclosure) >= capacity {
            return Err(ValidationError::EnclosureFull { enclosure, capacity });
        }

        let slot = match slot {
            Some(slot) if (slot as usize) >= capacity || board.is_slot_taken(enclosure, slot) => {
                return Err(ValidationError::SlotUnavailable { enclosure, slot });
            }
            Some(slot) => slot,
            None => board
                .first_free_slot(enclosure, capacity)
                .ok_or(ValidationError::EnclosureFull { enclosure, capacity })?,
        };

        if !species_rule_allows(board, enclosure, species) {
            return Err(ValidationError::SpeciesConflict { enclosure, species });
        }

        if let Some(face) = face {
            if !DieRestriction::allows(Some(face), enclosure, board) {
                return Err(ValidationError::DieRestriction { enclosure, face });
            }
        }

        Ok(ValidPlacement {
            enclosure,
            species,
            slot,
        })
    }

    /// Enclosures where `species` could be placed on `board` right now.
    #[must_use]
    pub fn legal_enclosures(
        &self,
        board: &Board,
        face: Option<DieFace>,
        species: Species,
    ) -> Vec<EnclosureId> {
        EnclosureId::ALL
            .into_iter()
            .filter(|&e| self.check(board, face, species, e, None).is_ok())
            .collect()
    }
}

fn species_rule_allows(board: &Board, enclosure: EnclosureId, species: Species) -> bool {
    match enclosure.kind() {
        EnclosureKind::SameSpecies => board.species_in(enclosure).all(|s| s == species),
        EnclosureKind::DifferentSpecies => !board.contains_species(enclosure, species),
        EnclosureKind::Island => !board.species_elsewhere(species, enclosure),
        EnclosureKind::Pairs | EnclosureKind::Trio | EnclosureKind::King | EnclosureKind::River => true,
    }
}
