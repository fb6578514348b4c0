//! Combination shapes a turn may be opened with.

use serde::{Deserialize, Serialize};

use crate::domain::pieces::{Piece, PieceKind};
use crate::domain::rules::{MAX_PLAY_PIECES, MIN_PLAY_PIECES};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayType {
    Single,
    Pair,
    ThreeOfAKind,
    Straight,
    FourOfAKind,
    ExtendedStraight,
    FiveOfAKind,
    DoubleStraight,
}

impl PlayType {
    pub const fn piece_count(self) -> usize {
        match self {
            PlayType::Single => 1,
            PlayType::Pair => 2,
            PlayType::ThreeOfAKind | PlayType::Straight => 3,
            PlayType::FourOfAKind | PlayType::ExtendedStraight => 4,
            PlayType::FiveOfAKind => 5,
            PlayType::DoubleStraight => 6,
        }
    }
}

const HIGH_GROUP: [PieceKind; 3] = [PieceKind::General, PieceKind::Advisor, PieceKind::Elephant];
const LOW_GROUP: [PieceKind; 3] = [PieceKind::Chariot, PieceKind::Horse, PieceKind::Cannon];

/// Recognize the shape formed by `pieces`, if any.
pub fn classify(pieces: &[Piece]) -> Option<PlayType> {
    if pieces.len() < MIN_PLAY_PIECES || pieces.len() > MAX_PLAY_PIECES {
        return None;
    }
    let color = pieces[0].color;
    if pieces.iter().any(|p| p.color != color) {
        return None;
    }

    match pieces.len() {
        1 => Some(PlayType::Single),
        2 => pieces[0].same_face(&pieces[1]).then_some(PlayType::Pair),
        3 if all_soldiers(pieces) => Some(PlayType::ThreeOfAKind),
        3 => is_straight(pieces, 1).then_some(PlayType::Straight),
        4 if all_soldiers(pieces) => Some(PlayType::FourOfAKind),
        4 => is_straight(pieces, 2).then_some(PlayType::ExtendedStraight),
        5 => all_soldiers(pieces).then_some(PlayType::FiveOfAKind),
        6 => is_double_straight(pieces).then_some(PlayType::DoubleStraight),
        _ => None,
    }
}

/// True when `pieces` form some shape with exactly `required` pieces.
pub fn is_valid_play_of_size(pieces: &[Piece], required: usize) -> bool {
    pieces.len() == required && classify(pieces).is_some()
}

/// Every subset of `hand` with `size` pieces, shape or not, in hand order.
pub fn combinations(hand: &[Piece], size: usize) -> Vec<Vec<Piece>> {
    if size == 0 || size > hand.len() || hand.len() >= u32::BITS as usize {
        return Vec::new();
    }
    (0u32..(1 << hand.len()))
        .filter(|mask| mask.count_ones() as usize == size)
        .map(|mask| {
            hand.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, p)| *p)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Every subset of `hand` with `size` pieces that forms a shape, in
/// hand order.
pub fn valid_combinations(hand: &[Piece], size: usize) -> Vec<Vec<Piece>> {
    combinations(hand, size)
        .into_iter()
        .filter(|combo| classify(combo).is_some())
        .collect()
}

fn all_soldiers(pieces: &[Piece]) -> bool {
    pieces.iter().all(|p| p.kind == PieceKind::Soldier)
}

fn count_kind(pieces: &[Piece], kind: PieceKind) -> usize {
    pieces.iter().filter(|p| p.kind == kind).count()
}

/// Every kind of one straight group present, no kind more than
/// `max_copies_of_one` times, at most one kind doubled.
fn is_straight(pieces: &[Piece], max_copies_of_one: usize) -> bool {
    [HIGH_GROUP, LOW_GROUP].iter().any(|group| {
        if pieces.iter().any(|p| !group.contains(&p.kind)) {
            return false;
        }
        let counts: Vec<usize> = group.iter().map(|k| count_kind(pieces, *k)).collect();
        let all_present = counts.iter().all(|c| *c >= 1);
        let doubled = counts.iter().filter(|c| **c > 1).count();
        let within = counts.iter().all(|c| *c <= max_copies_of_one);
        all_present && within && doubled <= 1
    })
}

fn is_double_straight(pieces: &[Piece]) -> bool {
    LOW_GROUP.iter().all(|k| count_kind(pieces, *k) == 2)
}
