use crate::domain::scoring::{base_score, round_score, score_round, winners};
use crate::domain::state::{PlayerState, SeatSpec};

fn player(declared: Option<u8>, captured: u8, score: i32) -> PlayerState {
    let mut p = PlayerState::new(&SeatSpec::human("p"));
    p.declared = declared;
    p.captured = captured;
    p.score = score;
    p
}

#[test]
fn exact_declaration_earns_bonus_times_multiplier() {
    assert_eq!(round_score(3, 3, 2), 16);
}

#[test]
fn zero_declared_zero_captured_is_three() {
    assert_eq!(round_score(0, 0, 1), 3);
}

#[test]
fn zero_declared_but_captured_is_penalized_by_captures() {
    assert_eq!(round_score(0, 2, 3), -6);
    assert_eq!(base_score(0, 5), -5);
}

#[test]
fn miss_costs_the_distance() {
    assert_eq!(base_score(4, 1), -3);
    assert_eq!(base_score(1, 4), -3);
    assert_eq!(base_score(2, 0), -2);
}

#[test]
fn score_round_accumulates_totals() {
    let players = vec![
        player(Some(3), 3, 10),
        player(Some(0), 0, -2),
        player(Some(2), 5, 0),
        player(None, 0, 4),
    ];
    let lines = score_round(&players, 2);
    let totals: Vec<i32> = lines.iter().map(|l| l.total).collect();
    assert_eq!(totals, vec![26, 4, -6, 10]);
    assert_eq!(lines[2].base, -3);
    assert_eq!(lines[3].declared, 0, "undeclared counts as zero");
}

#[test]
fn winners_only_once_threshold_reached() {
    assert!(winners(&[49, 10, 0, 48]).is_empty());
    assert_eq!(winners(&[50, 10, 0, 48]), vec![0]);
    assert_eq!(winners(&[52, 52, 51, -3]), vec![0, 1]);
}
