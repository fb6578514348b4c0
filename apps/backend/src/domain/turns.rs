//! Turn resolution: who wins a completed turn.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::combos::PlayType;
use crate::domain::pieces::{max_points, total_points, Piece};
use crate::domain::state::Seat;

/// One submission within a turn, in play order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPlay {
    pub seat: Seat,
    pub pieces: Vec<Piece>,
    /// `None` marks a forfeit: the pieces are spent but cannot win.
    pub play_type: Option<PlayType>,
}

impl TurnPlay {
    pub fn is_valid(&self) -> bool {
        self.play_type.is_some()
    }

    pub fn strength(&self) -> PlayStrength {
        PlayStrength::of(&self.pieces)
    }
}

/// Comparable strength of a submission.
///
/// Field order is the comparison order: any special piece beats none, then
/// special values (descending) compared lexicographically, then total, then
/// the single highest piece. Plain plays have empty `special_values`, so for
/// them the comparison falls through to total and highest piece.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayStrength {
    pub has_special: bool,
    pub special_values: Vec<u8>,
    pub total: u32,
    pub max_single: u8,
}

impl PlayStrength {
    pub fn of(pieces: &[Piece]) -> Self {
        let mut special_values: Vec<u8> = pieces
            .iter()
            .filter(|p| p.is_special())
            .map(|p| p.points())
            .collect();
        special_values.sort_unstable_by(|a, b| b.cmp(a));
        Self {
            has_special: !special_values.is_empty(),
            special_values,
            total: total_points(pieces),
            max_single: max_points(pieces),
        }
    }
}

/// Index into `plays` of the winning submission.
///
/// Forfeits never win. Equal strength goes to the earlier position.
/// Returns `None` only when no play is valid.
pub fn resolve_turn(plays: &[TurnPlay]) -> Option<usize> {
    let mut best: Option<(usize, PlayStrength)> = None;
    for (idx, play) in plays.iter().enumerate() {
        if !play.is_valid() {
            continue;
        }
        let strength = play.strength();
        let better = match &best {
            None => true,
            Some((_, current)) => strength.cmp(current) == Ordering::Greater,
        };
        if better {
            best = Some((idx, strength));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::combos::classify;
    use crate::domain::pieces::piece_by_id;

    fn play(seat: Seat, ids: &[u8]) -> TurnPlay {
        let pieces: Vec<Piece> = ids.iter().filter_map(|id| piece_by_id(*id)).collect();
        let play_type = classify(&pieces);
        TurnPlay {
            seat,
            pieces,
            play_type,
        }
    }

    #[test]
    fn special_beats_higher_plain_total() {
        // black advisor (11) vs red chariot (8) -- single pieces
        let plays = vec![play(0, &[5]), play(1, &[17])];
        assert_eq!(resolve_turn(&plays), Some(1));
    }

    #[test]
    fn special_pair_beats_plain_pair_with_higher_total() {
        // black advisors 11+11 vs red chariots 8+8: special wins regardless
        let plays = vec![play(0, &[5, 6]), play(1, &[17, 18])];
        assert_eq!(resolve_turn(&plays), Some(1));
    }

    #[test]
    fn plain_total_then_earlier_position() {
        // red horse (6) vs red horse (6) vs black chariot (7)
        let plays = vec![play(0, &[7]), play(1, &[8]), play(2, &[21])];
        assert_eq!(resolve_turn(&plays), Some(2));

        let tied = vec![play(3, &[7]), play(0, &[8])];
        assert_eq!(resolve_turn(&tied), Some(0), "earlier play wins a tie");
    }

    #[test]
    fn forfeit_never_wins() {
        // starter: red soldier pair; follower: red general + black soldier (no shape)
        let plays = vec![play(0, &[11, 12]), play(1, &[0, 27])];
        assert!(!plays[1].is_valid());
        assert_eq!(resolve_turn(&plays), Some(0));
    }

    #[test]
    fn specials_compare_by_top_special_first() {
        // red straight G-A-E (14,12,10) vs black straight G-A-E (13,11,9)
        let plays = vec![play(0, &[16, 17, 19]), play(1, &[0, 1, 3])];
        assert_eq!(resolve_turn(&plays), Some(1));
    }

    #[test]
    fn strength_ordering_is_lexicographic_on_specials() {
        let a = PlayStrength {
            has_special: true,
            special_values: vec![12, 11],
            total: 23,
            max_single: 12,
        };
        let b = PlayStrength {
            has_special: true,
            special_values: vec![12],
            total: 30,
            max_single: 12,
        };
        assert!(a > b);
    }
}
