//! Error handling for the room core.

pub mod domain;
pub mod error_code;

pub use domain::{DomainError, RejectReason, ValidationKind};
pub use error_code::ErrorCode;
