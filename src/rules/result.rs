//! Final standings and game result.

use serde::{Deserialize, Serialize};

use crate::core::seat::{SeatId, SeatMap};
use crate::core::state::FinalScore;

/// Outcome of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(SeatId),
    /// Seats tied on both total points and T-Rex count share the win.
    Winners(Vec<SeatId>),
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: SeatId) -> bool {
        match self {
            GameResult::Winner(s) => *s == seat,
            GameResult::Winners(seats) => seats.contains(&seat),
        }
    }
}

/// One line of the final ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based; tied seats share a rank.
    pub rank: usize,
    pub seat: SeatId,
    pub total_points: u32,
    pub trex_tiebreak_count: u32,
}

/// Rank seats by total points, then by T-Rex count.
#[must_use]
pub fn standings(scores: &SeatMap<FinalScore>) -> Vec<Standing> {
    let mut ordered: Vec<&FinalScore> = scores.values().collect();
    ordered.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.trex_tiebreak_count.cmp(&a.trex_tiebreak_count))
            .then(a.seat.cmp(&b.seat))
    });

    let mut out: Vec<Standing> = Vec::with_capacity(ordered.len());
    for (i, score) in ordered.into_iter().enumerate() {
        let rank = match out.last() {
            Some(prev)
                if prev.total_points == score.total_points
                    && prev.trex_tiebreak_count == score.trex_tiebreak_count =>
            {
                prev.rank
            }
            _ => i + 1,
        };
        out.push(Standing {
            rank,
            seat: score.seat,
            total_points: score.total_points,
            trex_tiebreak_count: score.trex_tiebreak_count,
        });
    }
    out
}

/// Derive the result from accumulated scores.
#[must_use]
pub fn game_result(scores: &SeatMap<FinalScore>) -> GameResult {
    let mut winners: Vec<SeatId> = standings(scores)
        .into_iter()
        .take_while(|s| s.rank == 1)
        .map(|s| s.seat)
        .collect();

    if winners.len() == 1 {
        GameResult::Winner(winners.remove(0))
    } else {
        GameResult::Winners(winners)
    }
}
