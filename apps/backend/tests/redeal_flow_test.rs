mod common;

use common::{heuristic_bots, step, Harness};
use liap_backend::domain::dealing::{deal_hands, weak_seats};
use liap_backend::domain::phase_data::{PhaseData, PreparationData, StarterRule};
use liap_backend::domain::seed_derivation::derive_dealing_seed;
use liap_backend::{ActionKind, EventStore, Phase, PhaseChange, Seat, ValidationKind};

fn weak_in_deal(seed: u64, deal_no: u16) -> Vec<Seat> {
    weak_seats(&deal_hands(derive_dealing_seed(seed, 1, deal_no)))
}

/// Room seed whose first deal has two weak hands and whose second deal
/// leaves the second of them weak again.
fn seed_with_repeat_weak_hand() -> (u64, Seat, Seat) {
    (0..200_000u64)
        .find_map(|seed| {
            let first = weak_in_deal(seed, 1);
            if first.len() < 2 {
                return None;
            }
            let (a, b) = (first[0], first[1]);
            weak_in_deal(seed, 2).contains(&b).then_some((seed, a, b))
        })
        .expect("some seed repeats a weak hand")
}

fn preparation(h: &Harness) -> PreparationData {
    match &h.engine.state().phase_data {
        PhaseData::Preparation(p) => p.clone(),
        other => panic!("expected preparation, got {other:?}"),
    }
}

/// Last broadcast preparation payload that named a starter.
fn chosen_starter(changes: &[PhaseChange]) -> PreparationData {
    changes
        .iter()
        .rev()
        .find_map(|c| match &c.data.phase_data {
            PhaseData::Preparation(p) if p.starter.is_some() => Some(p.clone()),
            _ => None,
        })
        .expect("a starter was broadcast")
}

fn decide(deal_no: u16, accept: bool) -> ActionKind {
    ActionKind::RedealDecision { deal_no, accept }
}

#[test]
fn first_acceptance_makes_later_ones_moot() {
    let (seed, first, second) = seed_with_repeat_weak_hand();
    let mut h = Harness::open("redeal-twice", seed);
    h.play(0, ActionKind::StartGame).unwrap();

    let prep = preparation(&h);
    assert_eq!(prep.deal_no, 1);
    assert!(prep.weak_seats.contains(&first) && prep.weak_seats.contains(&second));

    h.play(first, decide(1, true)).unwrap();
    let prep = preparation(&h);
    assert_eq!(prep.deal_no, 2);
    assert_eq!(prep.weak_seats, weak_in_deal(seed, 2));
    assert!(prep.weak_seats.contains(&second));

    let before = h.store.latest_sequence("redeal-twice");
    let err = h.play(second, decide(1, true)).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::DecisionWindowClosed));
    assert_eq!(h.store.latest_sequence("redeal-twice"), before);

    let round = &h.engine.state().round;
    assert_eq!(round.multiplier, 2);
    assert_eq!(round.redeal_starter, Some(first));
}

#[test]
fn accepted_redeal_sets_starter_and_doubles_the_round() {
    let (seed, first, _) = seed_with_repeat_weak_hand();
    let mut h = Harness::open("redeal-round", seed);
    h.play(0, ActionKind::StartGame).unwrap();
    h.play(first, decide(1, true)).unwrap();

    for seat in preparation(&h).weak_seats {
        h.play(seat, decide(2, false)).unwrap();
    }
    assert_eq!(h.engine.state().phase(), Phase::Declaration);
    let prep = chosen_starter(&h.drain());
    assert_eq!(prep.starter, Some(first));
    assert_eq!(prep.starter_rule, Some(StarterRule::RedealAccepter));
    assert_eq!(h.engine.state().round.starter, Some(first));

    let bots = heuristic_bots();
    while !matches!(&h.engine.state().phase_data, PhaseData::Scoring(s) if s.applied) {
        assert!(step(&mut h.engine, &bots), "game ended before round 1 was scored");
    }
    let PhaseData::Scoring(scoring) = h.engine.state().phase_data.clone() else {
        unreachable!()
    };
    assert_eq!(scoring.multiplier, 2);
    for line in &scoring.lines {
        assert_eq!(line.round_score, line.base * 2);
        assert_eq!(h.engine.state().players[line.seat as usize].score, line.total);
    }
}

#[test]
fn later_rounds_open_with_the_last_turn_winner() {
    let mut h = Harness::open("redeal-next-round", 31);
    let bots = heuristic_bots();
    while !matches!(&h.engine.state().phase_data, PhaseData::Scoring(s) if s.applied) {
        assert!(step(&mut h.engine, &bots));
    }
    let winner = h.engine.state().round.last_turn_winner;
    assert!(winner.is_some());
    h.drain();

    while h.engine.state().phase() != Phase::Declaration {
        assert!(step(&mut h.engine, &bots));
    }
    assert_eq!(h.engine.state().round.round_no, 2);
    let prep = chosen_starter(&h.drain());
    assert_eq!(prep.round_no, 2);
    assert_eq!(prep.starter_rule, Some(StarterRule::PreviousRoundWinner));
    assert_eq!(prep.starter, winner);
}
