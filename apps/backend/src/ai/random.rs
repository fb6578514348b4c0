//! Random bot strategy - picks uniformly among legal actions.

use std::sync::Mutex;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::trait_def::{AiError, BotStrategy};
use crate::domain::combos::valid_combinations;
use crate::domain::player_view::ObservedState;
use crate::domain::rules::MAX_PLAY_PIECES;

/// Reference strategy: any legal move, chosen at random.
///
/// Seeded instances are deterministic for a given sequence of observations,
/// which the self-play binary and tests rely on.
pub struct RandomPlayer {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "random";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> Result<T, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(f(&mut *rng))
    }
}

impl BotStrategy for RandomPlayer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_redeal(&self, _state: &ObservedState) -> Result<bool, AiError> {
        self.with_rng(|rng| rng.random_bool(0.5))
    }

    fn choose_declaration(&self, state: &ObservedState) -> Result<u8, AiError> {
        let legal = state.legal_declarations();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal declarations available".into()));
        }
        self.with_rng(|rng| legal.choose(rng).copied())?
            .ok_or_else(|| AiError::Internal("Failed to choose random declaration".into()))
    }

    fn choose_play(&self, state: &ObservedState) -> Result<Vec<u8>, AiError> {
        let hand = state.hand();
        if hand.is_empty() {
            return Err(AiError::InvalidMove("Hand is empty".into()));
        }

        let candidates = match state.required_piece_count() {
            Some(k) if k > hand.len() => {
                return Err(AiError::InvalidMove(format!(
                    "must play {k} pieces but only {} held",
                    hand.len()
                )));
            }
            Some(k) => valid_combinations(hand, k),
            None => (1..=MAX_PLAY_PIECES.min(hand.len()))
                .flat_map(|size| valid_combinations(hand, size))
                .collect(),
        };

        let chosen = self.with_rng(|rng| {
            if let Some(combo) = candidates.choose(rng) {
                return combo.iter().map(|p| p.id).collect::<Vec<u8>>();
            }
            // No valid shape of the required size: forfeit with any pieces.
            let k = state.required_piece_count().unwrap_or(1);
            let mut ids: Vec<u8> = hand.iter().map(|p| p.id).collect();
            ids.shuffle(rng);
            ids.truncate(k);
            ids
        })?;
        Ok(chosen)
    }
}
