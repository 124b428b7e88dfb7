//! Scoring of a seat's board.
//!
//! | Enclosure         | Points                                                  |
//! |-------------------|---------------------------------------------------------|
//! | Same species      | table by count, 0 if two species are mixed              |
//! | Different species | table by distinct count, 0 if any species repeats       |
//! | Pairs             | 5 per pair of the same species                          |
//! | Trio              | 7 with exactly three tokens                             |
//! | King              | 7 if its species is (tied-)most frequent on the board   |
//! | Island            | 7 if its species appears nowhere else on the board      |
//! | River             | 1 per token                                             |
//!
//! On top of that, every T-Rex outside the river is worth one bonus point.
//!
//! Scoring is a pure function of the board, so the same code serves live
//! score display mid-round and the accumulation at round close.

use serde::{Deserialize, Serialize};

use crate::board::{Board, EnclosureId, EnclosureKind};
use crate::core::species::Species;

/// Same-species points by token count (0-6).
pub const SAME_SPECIES_POINTS: [u32; 7] = [0, 2, 4, 8, 12, 18, 24];

/// Different-species points by distinct species count (0-6).
pub const DIFFERENT_SPECIES_POINTS: [u32; 7] = [0, 1, 3, 6, 10, 15, 21];

pub const PAIR_POINTS: u32 = 5;
pub const TRIO_POINTS: u32 = 7;
pub const TRIO_SIZE: usize = 3;
pub const KING_POINTS: u32 = 7;
pub const ISLAND_POINTS: u32 = 7;
pub const RIVER_POINTS: u32 = 1;
pub const TREX_BONUS: u32 = 1;

/// Score breakdown of one board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardScore {
    /// Points per enclosure, indexed by enclosure id - 1.
    pub enclosures: [u32; EnclosureId::COUNT],
    /// One point per T-Rex outside the river.
    pub trex_bonus: u32,
    /// Every T-Rex on the board, river included.
    pub trex_count: u32,
    /// Enclosure points plus the T-Rex bonus.
    pub total: u32,
}

impl BoardScore {
    #[must_use]
    pub fn enclosure(&self, enclosure: EnclosureId) -> u32 {
        self.enclosures[enclosure.index()]
    }

    #[must_use]
    pub fn river(&self) -> u32 {
        self.enclosure(EnclosureId::RIVER)
    }
}

/// Table-driven scoring engine.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Points for one enclosure of `board`.
    #[must_use]
    pub fn score_enclosure(board: &Board, enclosure: EnclosureId) -> u32 {
        let count = board.count(enclosure);
        match enclosure.kind() {
            EnclosureKind::SameSpecies => {
                let counts = board.species_counts_in(enclosure);
                let species_present = counts.iter().filter(|&&c| c > 0).count();
                if species_present > 1 {
                    0
                } else {
                    table_lookup(&SAME_SPECIES_POINTS, count)
                }
            }
            EnclosureKind::DifferentSpecies => {
                let counts = board.species_counts_in(enclosure);
                if counts.iter().any(|&c| c > 1) {
                    0
                } else {
                    table_lookup(&DIFFERENT_SPECIES_POINTS, count)
                }
            }
            EnclosureKind::Pairs => board
                .species_counts_in(enclosure)
                .iter()
                .map(|&c| PAIR_POINTS * (c / 2))
                .sum(),
            EnclosureKind::Trio => {
                if count == TRIO_SIZE {
                    TRIO_POINTS
                } else {
                    0
                }
            }
            EnclosureKind::King => board
                .species_in(enclosure)
                .filter(|&s| Self::is_majority(board, s))
                .map(|_| KING_POINTS)
                .sum(),
            EnclosureKind::Island => board
                .species_in(enclosure)
                .filter(|&s| board.species_total(s) == 1)
                .map(|_| ISLAND_POINTS)
                .sum(),
            EnclosureKind::River => RIVER_POINTS * count as u32,
        }
    }

    /// Full breakdown for `board`.
    ///
    /// ```
    /// use dino_draft::board::{Board, EnclosureId};
    /// use dino_draft::core::Species;
    /// use dino_draft::rules::ScoringEngine;
    ///
    /// let mut board = Board::new();
    /// board.push(EnclosureId::RIVER, 0, Species::TRex);
    /// board.push(EnclosureId::PAIRS, 0, Species::TRex);
    ///
    /// let score = ScoringEngine::score_board(&board);
    /// assert_eq!(score.river(), 1);
    /// assert_eq!(score.trex_bonus, 1);
    /// assert_eq!(score.total, 2);
    /// ```
    #[must_use]
    pub fn score_board(board: &Board) -> BoardScore {
        let mut score = BoardScore::default();

        for enclosure in EnclosureId::ALL {
            score.enclosures[enclosure.index()] = Self::score_enclosure(board, enclosure);

            let trexes = board.species_in(enclosure).filter(|s| s.is_trex()).count() as u32;
            score.trex_count += trexes;
            if !enclosure.is_river() {
                score.trex_bonus += TREX_BONUS * trexes;
            }
        }

        score.total = score.enclosures.iter().sum::<u32>() + score.trex_bonus;
        score
    }

    /// Board-wide count of the most frequent species.
    #[must_use]
    pub fn majority_count(board: &Board) -> u32 {
        board.species_counts().iter().copied().max().unwrap_or(0)
    }

    /// Whether `species` is (tied for) the most frequent on `board`.
    #[must_use]
    pub fn is_majority(board: &Board, species: Species) -> bool {
        let total = board.species_total(species);
        total > 0 && total == Self::majority_count(board)
    }
}

fn table_lookup(table: &[u32; 7], count: usize) -> u32 {
    table[count.min(table.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(board: &mut Board, enclosure: EnclosureId, species: &[Species]) {
        for (slot, &s) in species.iter().enumerate() {
            board.push(enclosure, slot as u8, s);
        }
    }

    #[test]
    fn test_same_species_table() {
        for count in 0..=6 {
            let mut board = Board::new();
            fill(&mut board, EnclosureId::SAME_SPECIES, &vec![Species::Brachiosaurus; count]);
            assert_eq!(
                ScoringEngine::score_enclosure(&board, EnclosureId::SAME_SPECIES),
                SAME_SPECIES_POINTS[count]
            );
        }
    }

    #[test]
    fn test_same_species_mixed_is_zero() {
        let mut board = Board::new();
        fill(
            &mut board,
            EnclosureId::SAME_SPECIES,
            &[Species::TRex, Species::TRex, Species::TRex, Species::Triceratops],
        );
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::SAME_SPECIES), 0);
    }

    #[test]
    fn test_different_species_table() {
        for count in 0..=6 {
            let mut board = Board::new();
            fill(&mut board, EnclosureId::DIFFERENT_SPECIES, &Species::ALL[..count]);
            assert_eq!(
                ScoringEngine::score_enclosure(&board, EnclosureId::DIFFERENT_SPECIES),
                DIFFERENT_SPECIES_POINTS[count]
            );
        }
    }

    #[test]
    fn test_different_species_duplicate_is_zero() {
        let mut board = Board::new();
        fill(
            &mut board,
            EnclosureId::DIFFERENT_SPECIES,
            &[Species::TRex, Species::Stegosaurus, Species::TRex],
        );
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::DIFFERENT_SPECIES), 0);
    }

    #[test]
    fn test_pairs() {
        let mut board = Board::new();
        fill(
            &mut board,
            EnclosureId::PAIRS,
            &[
                Species::TRex,
                Species::TRex,
                Species::TRex,
                Species::Spinosaurus,
                Species::Spinosaurus,
                Species::Stegosaurus,
            ],
        );
        // Two pairs (T-Rex, Spinosaurus); the third T-Rex and the Stegosaurus are single.
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::PAIRS), 10);
    }

    #[test]
    fn test_trio_needs_exactly_three() {
        for count in 0..=6 {
            let mut board = Board::new();
            fill(&mut board, EnclosureId::TRIO, &vec![Species::TRex; count]);
            let expected = if count == 3 { 7 } else { 0 };
            assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::TRIO), expected);
        }
    }

    #[test]
    fn test_king_majority() {
        // 3 T-Rex and 2 Triceratops on the board.
        let mut trex_king = Board::new();
        fill(&mut trex_king, EnclosureId::SAME_SPECIES, &[Species::TRex, Species::TRex]);
        fill(&mut trex_king, EnclosureId::PAIRS, &[Species::Triceratops, Species::Triceratops]);
        fill(&mut trex_king, EnclosureId::KING, &[Species::TRex]);
        assert_eq!(ScoringEngine::score_enclosure(&trex_king, EnclosureId::KING), 7);

        let mut trice_king = Board::new();
        fill(&mut trice_king, EnclosureId::SAME_SPECIES, &[Species::TRex, Species::TRex, Species::TRex]);
        fill(&mut trice_king, EnclosureId::PAIRS, &[Species::Triceratops]);
        fill(&mut trice_king, EnclosureId::KING, &[Species::Triceratops]);
        assert_eq!(ScoringEngine::score_enclosure(&trice_king, EnclosureId::KING), 0);
    }

    #[test]
    fn test_king_tie_scores() {
        let mut board = Board::new();
        fill(&mut board, EnclosureId::RIVER, &[Species::TRex, Species::Stegosaurus]);
        fill(&mut board, EnclosureId::KING, &[Species::Stegosaurus]);
        // T-Rex 1, Stegosaurus 2 -> Stegosaurus leads.
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::KING), 7);

        fill(&mut board, EnclosureId::PAIRS, &[Species::TRex]);
        // Tied at 2.
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::KING), 7);
        assert!(ScoringEngine::is_majority(&board, Species::TRex));
    }

    #[test]
    fn test_island() {
        let mut board = Board::new();
        fill(&mut board, EnclosureId::ISLAND, &[Species::Parasaurolophus]);
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::ISLAND), 7);

        fill(&mut board, EnclosureId::RIVER, &[Species::Parasaurolophus]);
        assert_eq!(ScoringEngine::score_enclosure(&board, EnclosureId::ISLAND), 0);
    }

    #[test]
    fn test_river_and_trex_bonus() {
        let mut board = Board::new();
        fill(&mut board, EnclosureId::RIVER, &[Species::TRex, Species::TRex, Species::Stegosaurus]);

        let score = ScoringEngine::score_board(&board);
        assert_eq!(score.river(), 3);
        assert_eq!(score.trex_bonus, 0);
        assert_eq!(score.trex_count, 2);
        assert_eq!(score.total, 3);
    }

    #[test]
    fn test_trex_bonus_outside_river() {
        let mut board = Board::new();
        fill(&mut board, EnclosureId::TRIO, &[Species::TRex, Species::TRex, Species::TRex]);

        let score = ScoringEngine::score_board(&board);
        assert_eq!(score.enclosure(EnclosureId::TRIO), 7);
        assert_eq!(score.trex_bonus, 3);
        // Trio 7 + bonus 3; king/island empty.
        assert_eq!(score.total, 10);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let score = ScoringEngine::score_board(&Board::new());
        assert_eq!(score, BoardScore::default());
        assert_eq!(ScoringEngine::majority_count(&Board::new()), 0);
        assert!(!ScoringEngine::is_majority(&Board::new(), Species::TRex));
    }
}
