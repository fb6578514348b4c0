//! Domain-level error type used across the engine, room actors and replay.
//!
//! This error type is transport-agnostic. Submitters only ever see a
//! `RejectReason`, built from a `DomainError` via `RejectReason::from`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::error_code::ErrorCode;
use crate::events::store::StoreError;

/// Why an action was refused before touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationKind {
    Malformed,
    UnknownPlayer,
    NotHost,
    PhaseMismatch,
    OutOfTurn,
    InvalidDeclaration,
    ForbiddenDeclarationTotal,
    ZeroDeclarationStreak,
    PieceNotInHand,
    DuplicatePiece,
    InvalidPieceCount,
    InvalidCombination,
    NotWeakHand,
    AlreadyDecided,
    DecisionWindowClosed,
    GameOver,
}

impl ValidationKind {
    pub const fn code(self) -> ErrorCode {
        match self {
            ValidationKind::Malformed => ErrorCode::MalformedAction,
            ValidationKind::UnknownPlayer => ErrorCode::UnknownPlayer,
            ValidationKind::NotHost => ErrorCode::NotHost,
            ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
            ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
            ValidationKind::InvalidDeclaration => ErrorCode::InvalidDeclaration,
            ValidationKind::ForbiddenDeclarationTotal => ErrorCode::ForbiddenDeclarationTotal,
            ValidationKind::ZeroDeclarationStreak => ErrorCode::ZeroDeclarationStreak,
            ValidationKind::PieceNotInHand => ErrorCode::PieceNotInHand,
            ValidationKind::DuplicatePiece => ErrorCode::DuplicatePiece,
            ValidationKind::InvalidPieceCount => ErrorCode::InvalidPieceCount,
            ValidationKind::InvalidCombination => ErrorCode::InvalidCombination,
            ValidationKind::NotWeakHand => ErrorCode::NotWeakHand,
            ValidationKind::AlreadyDecided => ErrorCode::AlreadyDecided,
            ValidationKind::DecisionWindowClosed => ErrorCode::DecisionWindowClosed,
            ValidationKind::GameOver => ErrorCode::GameOver,
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input validation or rule violation; nothing was mutated.
    #[error("validation error {kind:?}: {detail}")]
    Validation { kind: ValidationKind, detail: String },
    /// A transition was expected but is not on the table.
    #[error("transition error: {0}")]
    Transition(String),
    /// A delta does not fit the state it is applied to.
    #[error("integrity error: {0}")]
    Integrity(String),
    /// A delta or payload could not be encoded/decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The stored log cannot be folded into a state.
    #[error("replay error: {0}")]
    Replay(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }
    pub fn transition(detail: impl Into<String>) -> Self {
        Self::Transition(detail.into())
    }
    pub fn integrity(detail: impl Into<String>) -> Self {
        Self::Integrity(detail.into())
    }
    pub fn replay(detail: impl Into<String>) -> Self {
        Self::Replay(detail.into())
    }

    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation { kind, .. } => kind.code(),
            DomainError::Transition(_) => ErrorCode::TransitionError,
            DomainError::Integrity(_) => ErrorCode::IntegrityError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Store(_) => ErrorCode::StoreError,
            DomainError::Replay(_) => ErrorCode::ReplayError,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Serialization(e.to_string())
    }
}

/// What a submitter sees when an action is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct RejectReason {
    pub code: ErrorCode,
    pub message: String,
}

impl RejectReason {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<DomainError> for RejectReason {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { kind, detail } => RejectReason::new(kind.code(), detail),
            other => RejectReason::new(other.code(), other.to_string()),
        }
    }
}
