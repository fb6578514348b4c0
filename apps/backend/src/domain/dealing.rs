//! Deterministic dealing and weak-hand detection.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::pieces::{full_catalog, max_points, sort_strongest_first, Piece};
use crate::domain::rules::{PIECES_PER_HAND, PLAYERS, WEAK_HAND_THRESHOLD};
use crate::domain::state::Seat;

/// Shuffle the whole catalog with `seed` and deal 8 pieces to each seat.
///
/// Hands come back sorted strongest first; nothing re-orders them afterwards.
pub fn deal_hands(seed: u64) -> [Vec<Piece>; PLAYERS] {
    let mut deck = full_catalog();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Piece>; PLAYERS] = Default::default();
    for (idx, chunk) in deck.chunks(PIECES_PER_HAND).enumerate() {
        let mut hand = chunk.to_vec();
        sort_strongest_first(&mut hand);
        hands[idx] = hand;
    }
    hands
}

/// A hand is weak when it holds no piece above the threshold.
pub fn is_weak_hand(hand: &[Piece]) -> bool {
    max_points(hand) <= WEAK_HAND_THRESHOLD
}

/// Seats holding a weak hand, in seat order.
pub fn weak_seats(hands: &[Vec<Piece>]) -> Vec<Seat> {
    hands
        .iter()
        .enumerate()
        .filter(|(_, hand)| is_weak_hand(hand))
        .map(|(seat, _)| seat as Seat)
        .collect()
}

/// Seat holding the single highest-valued piece across all hands.
pub fn holder_of_strongest_piece(hands: &[Vec<Piece>]) -> Option<Seat> {
    hands
        .iter()
        .enumerate()
        .filter_map(|(seat, hand)| hand.iter().map(|p| (p.points(), seat)).max())
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, seat)| seat as Seat)
}
