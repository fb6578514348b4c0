use std::ops::RangeInclusive;

pub const PLAYERS: usize = 4;
pub const PIECES_PER_HAND: usize = 8;

/// A hand whose best piece is worth this much or less is weak.
pub const WEAK_HAND_THRESHOLD: u8 = 9;

/// Declarations may never sum to this once everyone has declared.
pub const FORBIDDEN_DECLARATION_TOTAL: u8 = 8;

/// A player who has declared zero this many rounds in a row must declare at least one.
pub const MAX_CONSECUTIVE_ZERO_DECLARATIONS: u8 = 2;

pub const WINNING_SCORE: i32 = 50;

pub const MIN_PLAY_PIECES: usize = 1;
pub const MAX_PLAY_PIECES: usize = 6;

pub fn valid_declaration_range() -> RangeInclusive<u8> {
    0..=PIECES_PER_HAND as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_range_covers_whole_hand() {
        let r = valid_declaration_range();
        assert_eq!(*r.start(), 0);
        assert_eq!(*r.end(), 8);
    }

    #[test]
    fn whole_catalog_is_dealt() {
        assert_eq!(PLAYERS * PIECES_PER_HAND, crate::domain::pieces::CATALOG_SIZE);
    }
}
