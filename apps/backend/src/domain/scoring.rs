use serde::{Deserialize, Serialize};

use crate::domain::rules::WINNING_SCORE;
use crate::domain::state::{PlayerState, Seat};

/// Base score for one round from declared target and captured piles.
pub fn base_score(declared: u8, captured: u8) -> i32 {
    let (d, a) = (declared as i32, captured as i32);
    match (d, a) {
        (0, 0) => 3,
        (0, a) => -a,
        (d, a) if d == a => d + 5,
        (d, a) => -(d - a).abs(),
    }
}

pub fn round_score(declared: u8, captured: u8, multiplier: u32) -> i32 {
    base_score(declared, captured) * multiplier as i32
}

/// One seat's scoring breakdown for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub seat: Seat,
    pub declared: u8,
    pub captured: u8,
    pub base: i32,
    pub round_score: i32,
    /// Cumulative score after this round.
    pub total: i32,
}

/// Score every player for the round. An undeclared player counts as 0.
pub fn score_round(players: &[PlayerState], multiplier: u32) -> Vec<ScoreLine> {
    players
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let declared = p.declared.unwrap_or(0);
            let base = base_score(declared, p.captured);
            let round_score = base * multiplier as i32;
            ScoreLine {
                seat: seat as Seat,
                declared,
                captured: p.captured,
                base,
                round_score,
                total: p.score + round_score,
            }
        })
        .collect()
}

pub fn is_game_over(totals: &[i32]) -> bool {
    totals.iter().any(|t| *t >= WINNING_SCORE)
}

/// Every seat tied at the maximum, or nothing if the game goes on.
pub fn winners(totals: &[i32]) -> Vec<Seat> {
    if !is_game_over(totals) {
        return Vec::new();
    }
    let Some(max) = totals.iter().copied().max() else {
        return Vec::new();
    };
    totals
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == max)
        .map(|(seat, _)| seat as Seat)
        .collect()
}
