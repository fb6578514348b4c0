//! Error codes surfaced to action submitters.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in rejection payloads.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string; the serde
/// form and `as_str` always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Action validation
    /// Action could not be parsed or is structurally invalid
    MalformedAction,
    /// Sender is not seated in this room
    UnknownPlayer,
    /// Only the host may start the game
    NotHost,
    /// Action does not belong to the current phase
    PhaseMismatch,
    /// Another player is expected to act
    OutOfTurn,
    /// Declaration outside 0..=8
    InvalidDeclaration,
    /// Last declaration would make the total exactly 8
    ForbiddenDeclarationTotal,
    /// Too many zero declarations in a row
    ZeroDeclarationStreak,
    /// Piece id not in the sender's hand
    PieceNotInHand,
    /// Same piece listed twice
    DuplicatePiece,
    /// Wrong number of pieces for this turn
    InvalidPieceCount,
    /// Turn starter's pieces form no recognized shape
    InvalidCombination,
    /// Redeal offered only to weak hands
    NotWeakHand,
    /// Redeal decision already given
    AlreadyDecided,
    /// Redeal window is closed
    DecisionWindowClosed,
    /// Room has finished
    GameOver,

    // Room access
    /// Room actor is gone
    RoomUnavailable,

    // System errors
    TransitionError,
    IntegrityError,
    SerializationError,
    StoreError,
    ReplayError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Action validation
            Self::MalformedAction => "MALFORMED_ACTION",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::NotHost => "NOT_HOST",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::InvalidDeclaration => "INVALID_DECLARATION",
            Self::ForbiddenDeclarationTotal => "FORBIDDEN_DECLARATION_TOTAL",
            Self::ZeroDeclarationStreak => "ZERO_DECLARATION_STREAK",
            Self::PieceNotInHand => "PIECE_NOT_IN_HAND",
            Self::DuplicatePiece => "DUPLICATE_PIECE",
            Self::InvalidPieceCount => "INVALID_PIECE_COUNT",
            Self::InvalidCombination => "INVALID_COMBINATION",
            Self::NotWeakHand => "NOT_WEAK_HAND",
            Self::AlreadyDecided => "ALREADY_DECIDED",
            Self::DecisionWindowClosed => "DECISION_WINDOW_CLOSED",
            Self::GameOver => "GAME_OVER",

            // Room access
            Self::RoomUnavailable => "ROOM_UNAVAILABLE",

            // System errors
            Self::TransitionError => "TRANSITION_ERROR",
            Self::IntegrityError => "INTEGRITY_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::StoreError => "STORE_ERROR",
            Self::ReplayError => "REPLAY_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::MalformedAction.as_str(), "MALFORMED_ACTION");
        assert_eq!(ErrorCode::OutOfTurn.as_str(), "OUT_OF_TURN");
        assert_eq!(
            ErrorCode::ForbiddenDeclarationTotal.as_str(),
            "FORBIDDEN_DECLARATION_TOTAL"
        );
        assert_eq!(ErrorCode::DecisionWindowClosed.as_str(), "DECISION_WINDOW_CLOSED");
        assert_eq!(ErrorCode::GameOver.as_str(), "GAME_OVER");
        assert_eq!(ErrorCode::RoomUnavailable.as_str(), "ROOM_UNAVAILABLE");
    }

    #[test]
    fn test_serde_matches_as_str() {
        for code in [
            ErrorCode::InvalidPieceCount,
            ErrorCode::ZeroDeclarationStreak,
            ErrorCode::TransitionError,
            ErrorCode::StoreError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::NotHost), "NOT_HOST");
        assert_eq!(format!("{}", ErrorCode::PieceNotInHand), "PIECE_NOT_IN_HAND");
    }
}
