//! Heuristic - a deterministic baseline that plays for its declaration.
//!
//! Declaration:
//! - Count the pieces likely to win a single-piece turn: 12 points and up
//!   count fully, 10 and 11 count half.
//! - Declare the legal value closest to that estimate, lower on ties.
//!
//! Play:
//! - Opening: still short of the declaration, lead the strongest single;
//!   otherwise lead the weakest single.
//! - Following: when short by at least the turn's piece count, take the
//!   turn with the cheapest shape that beats everything played so far.
//!   Otherwise shed pieces, preferring a set that forms no shape (a forfeit
//!   never wins) and the lowest points.
//!
//! Redeals are always declined. No randomness is used; the seed is kept so
//! the constructor matches the other strategies.

use super::trait_def::{AiError, BotStrategy};
use crate::domain::combos::combinations;
use crate::domain::phase_data::PhaseData;
use crate::domain::pieces::{total_points, Piece};
use crate::domain::player_view::ObservedState;
use crate::domain::turns::PlayStrength;

#[derive(Clone)]
pub struct Heuristic {
    _seed: Option<u64>,
}

impl Heuristic {
    pub const NAME: &'static str = "heuristic";

    pub fn new(seed: Option<u64>) -> Self {
        Self { _seed: seed }
    }

    fn estimate_piles(hand: &[Piece]) -> f32 {
        hand.iter()
            .map(|p| match p.points() {
                points if points >= 12 => 1.0,
                10 | 11 => 0.5,
                _ => 0.0,
            })
            .sum()
    }

    /// Piles still wanted this round; zero or negative once the target is met.
    fn shortfall(state: &ObservedState) -> i32 {
        state
            .players
            .get(state.seat as usize)
            .map(|p| p.declared.unwrap_or(0) as i32 - p.captured as i32)
            .unwrap_or(0)
    }

    fn ids(pieces: &[Piece]) -> Vec<u8> {
        pieces.iter().map(|p| p.id).collect()
    }

    fn open(hand: &[Piece], shortfall: i32) -> Option<Piece> {
        if shortfall > 0 {
            hand.iter().copied().max_by_key(|p| (p.points(), std::cmp::Reverse(p.id)))
        } else {
            hand.iter().copied().min_by_key(|p| (p.points(), p.id))
        }
    }

    fn follow(hand: &[Piece], required: usize, shortfall: i32, state: &ObservedState) -> Vec<Piece> {
        let subsets = combinations(hand, required);

        if shortfall >= required as i32 {
            let to_beat = match &state.phase_data {
                PhaseData::Turn(t) => t
                    .plays
                    .iter()
                    .filter(|p| p.is_valid())
                    .map(|p| p.strength())
                    .max(),
                _ => None,
            };
            let cheapest_win = subsets
                .iter()
                .filter(|c| state.is_valid_play(c))
                .filter(|c| to_beat.as_ref().map_or(true, |best| PlayStrength::of(c) > *best))
                .min_by_key(|c| PlayStrength::of(c));
            if let Some(win) = cheapest_win {
                return win.clone();
            }
        }

        let forfeit = subsets
            .iter()
            .filter(|c| !state.is_valid_play(c))
            .min_by_key(|c| total_points(c));
        match forfeit {
            Some(c) => c.clone(),
            None => subsets
                .into_iter()
                .min_by_key(|c| PlayStrength::of(c))
                .unwrap_or_default(),
        }
    }
}

impl BotStrategy for Heuristic {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_redeal(&self, _state: &ObservedState) -> Result<bool, AiError> {
        Ok(false)
    }

    fn choose_declaration(&self, state: &ObservedState) -> Result<u8, AiError> {
        let estimate = Self::estimate_piles(state.hand());
        state
            .legal_declarations()
            .into_iter()
            .min_by(|a, b| {
                let da = (*a as f32 - estimate).abs();
                let db = (*b as f32 - estimate).abs();
                da.total_cmp(&db).then(a.cmp(b))
            })
            .ok_or_else(|| AiError::InvalidMove("No legal declarations available".into()))
    }

    fn choose_play(&self, state: &ObservedState) -> Result<Vec<u8>, AiError> {
        let hand = state.hand();
        if hand.is_empty() {
            return Err(AiError::InvalidMove("Hand is empty".into()));
        }
        let shortfall = Self::shortfall(state);

        let chosen = match state.required_piece_count() {
            None => Self::open(hand, shortfall).into_iter().collect::<Vec<_>>(),
            Some(k) if k > hand.len() => {
                return Err(AiError::InvalidMove(format!(
                    "must play {k} pieces but only {} held",
                    hand.len()
                )));
            }
            Some(k) => Self::follow(hand, k, shortfall, state),
        };
        Ok(Self::ids(&chosen))
    }
}
