//! Declaration rules: what a player may declare given what came before.

use crate::domain::rules::{
    valid_declaration_range, FORBIDDEN_DECLARATION_TOTAL, MAX_CONSECUTIVE_ZERO_DECLARATIONS,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Context a single declaration is checked against.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationContext {
    /// Sum of declarations already made this round.
    pub total_so_far: u8,
    pub is_last: bool,
    /// Declarer's consecutive-zero counter before this declaration.
    pub zero_streak: u8,
}

pub fn validate_declaration(value: u8, ctx: DeclarationContext) -> Result<(), DomainError> {
    if !valid_declaration_range().contains(&value) {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeclaration,
            format!("declaration {value} is outside 0..=8"),
        ));
    }
    if ctx.is_last && ctx.total_so_far + value == FORBIDDEN_DECLARATION_TOTAL {
        return Err(DomainError::validation(
            ValidationKind::ForbiddenDeclarationTotal,
            format!(
                "last declaration cannot bring the total to {FORBIDDEN_DECLARATION_TOTAL}"
            ),
        ));
    }
    if value == 0 && ctx.zero_streak >= MAX_CONSECUTIVE_ZERO_DECLARATIONS {
        return Err(DomainError::validation(
            ValidationKind::ZeroDeclarationStreak,
            format!("zero declared {} rounds in a row", ctx.zero_streak),
        ));
    }
    Ok(())
}

/// Every value `validate_declaration` accepts, ascending.
pub fn legal_declarations(ctx: DeclarationContext) -> Vec<u8> {
    valid_declaration_range()
        .filter(|v| validate_declaration(*v, ctx).is_ok())
        .collect()
}

/// Streak after declaring `value`.
pub fn next_zero_streak(current: u8, value: u8) -> u8 {
    if value == 0 {
        current.saturating_add(1)
    } else {
        0
    }
}
