// Proptest generators for domain types.
// Pieces are drawn from the real catalog so ids stay unique.

use proptest::prelude::*;
use proptest::sample::subsequence;

use crate::domain::combos::classify;
use crate::domain::pieces::{full_catalog, Piece};
use crate::domain::state::Seat;
use crate::domain::turns::TurnPlay;

/// Any catalog piece.
pub fn piece() -> impl Strategy<Value = Piece> {
    prop::sample::select(full_catalog())
}

/// 1..=6 distinct catalog pieces.
pub fn piece_set() -> impl Strategy<Value = Vec<Piece>> {
    (1usize..=6).prop_flat_map(|n| subsequence(full_catalog(), n))
}

/// 1..=6 distinct pieces with no special among them.
pub fn plain_piece_set() -> impl Strategy<Value = Vec<Piece>> {
    let plain: Vec<Piece> = full_catalog().into_iter().filter(|p| !p.is_special()).collect();
    (1usize..=6).prop_flat_map(move |n| subsequence(plain.clone(), n))
}

/// Distinct pieces including at least one special piece.
pub fn special_piece_set() -> impl Strategy<Value = Vec<Piece>> {
    piece_set().prop_filter("needs a special piece", |ps| ps.iter().any(|p| p.is_special()))
}

/// A play for `seat` from arbitrary distinct pieces, classified for real.
pub fn turn_play(seat: Seat) -> impl Strategy<Value = TurnPlay> {
    piece_set().prop_map(move |pieces| {
        let play_type = classify(&pieces);
        TurnPlay {
            seat,
            pieces,
            play_type,
        }
    })
}

/// Four plays in seat order 0..4. Pieces may repeat across plays; the
/// resolver never looks at identity.
pub fn four_plays() -> impl Strategy<Value = Vec<TurnPlay>> {
    (turn_play(0), turn_play(1), turn_play(2), turn_play(3))
        .prop_map(|(a, b, c, d)| vec![a, b, c, d])
}
