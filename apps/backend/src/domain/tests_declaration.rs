use crate::domain::declaration::{
    legal_declarations, next_zero_streak, validate_declaration, DeclarationContext,
};
use crate::errors::domain::ValidationKind;

fn last_after(total_so_far: u8) -> DeclarationContext {
    DeclarationContext {
        total_so_far,
        is_last: true,
        zero_streak: 0,
    }
}

#[test]
fn last_declarer_cannot_make_eight() {
    let ctx = last_after(6);
    let err = validate_declaration(2, ctx).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ForbiddenDeclarationTotal));

    for v in [0, 1, 3, 4, 5, 6, 7, 8] {
        assert!(validate_declaration(v, ctx).is_ok(), "{v} should be accepted");
    }
    assert_eq!(legal_declarations(ctx), vec![0, 1, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn earlier_declarers_may_reach_eight() {
    let ctx = DeclarationContext {
        total_so_far: 6,
        is_last: false,
        zero_streak: 0,
    };
    assert!(validate_declaration(2, ctx).is_ok());
}

#[test]
fn total_above_eight_is_fine_for_last() {
    assert_eq!(legal_declarations(last_after(9)).len(), 9);
}

#[test]
fn out_of_range_is_rejected() {
    let err = validate_declaration(9, last_after(0)).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidDeclaration));
}

#[test]
fn third_zero_in_a_row_is_rejected() {
    let ctx = DeclarationContext {
        total_so_far: 0,
        is_last: false,
        zero_streak: 2,
    };
    let err = validate_declaration(0, ctx).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ZeroDeclarationStreak));
    assert!(validate_declaration(1, ctx).is_ok());
    assert!(!legal_declarations(ctx).contains(&0));
}

#[test]
fn zero_streak_counts_and_resets() {
    assert_eq!(next_zero_streak(0, 0), 1);
    assert_eq!(next_zero_streak(1, 0), 2);
    assert_eq!(next_zero_streak(2, 3), 0);
}
