use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, PreparationData, StarterRule};
use crate::domain::state::{Phase, RoomState};
use crate::domain::test_state_helpers::{dealt_state, opened_state, pieces, turn_state};
use crate::errors::domain::DomainError;

#[test]
fn nothing_applies_before_room_opened() {
    let mut state = RoomState::empty();
    let err = Delta::GameStarted { by: 0 }.apply(&mut state).unwrap_err();
    assert!(matches!(err, DomainError::Integrity(_)));
}

#[test]
fn room_opens_once() {
    let mut state = opened_state();
    assert_eq!(state.phase(), Phase::Waiting);
    assert_eq!(state.players.len(), 4);
    let again = Delta::RoomOpened {
        room_id: "x".into(),
        seed: 1,
        seats: Vec::new(),
    };
    assert!(again.apply(&mut state).is_err());
}

#[test]
fn phase_entered_follows_the_table() {
    let mut state = opened_state();
    let skip = Delta::PhaseEntered {
        data: PhaseData::Scoring(crate::domain::phase_data::ScoringData {
            round_no: 1,
            multiplier: 1,
            lines: Vec::new(),
            game_over: false,
            winners: Vec::new(),
            applied: false,
            acknowledged: false,
        }),
    };
    assert!(matches!(skip.apply(&mut state), Err(DomainError::Transition(_))));
    assert_eq!(state.phase(), Phase::Waiting);

    let ok = Delta::PhaseEntered {
        data: PhaseData::Preparation(PreparationData::new(1)),
    };
    ok.apply(&mut state).unwrap();
    assert_eq!(state.phase(), Phase::Preparation);
}

#[test]
fn delta_outside_its_phase_is_integrity_error() {
    let mut state = opened_state();
    let err = Delta::Declared { seat: 0, value: 1 }
        .apply(&mut state)
        .unwrap_err();
    assert!(matches!(err, DomainError::Integrity(_)));
}

#[test]
fn round_start_resets_per_round_fields() {
    let state = dealt_state();
    assert_eq!(state.round.round_no, 1);
    assert_eq!(state.round.multiplier, 1);
    assert!(state.players.iter().all(|p| p.hand.len() == 8));
}

#[test]
fn redeal_accept_bumps_multiplier_and_clears_deal() {
    let mut state = dealt_state();
    if let PhaseData::Preparation(d) = &mut state.phase_data {
        d.weak_seats = vec![3];
    }
    Delta::RedealAccepted { seat: 3, deal_no: 1 }.apply(&mut state).unwrap();
    assert_eq!(state.round.multiplier, 2);
    assert_eq!(state.round.redeal_starter, Some(3));
    let PhaseData::Preparation(d) = &state.phase_data else {
        panic!("still preparing");
    };
    assert!(!d.dealt);

    // second accept of the same window is impossible: no window now
    assert!(Delta::RedealAccepted { seat: 3, deal_no: 1 }.apply(&mut state).is_err());
}

#[test]
fn decisions_for_another_deal_do_not_apply() {
    let mut state = dealt_state();
    if let PhaseData::Preparation(d) = &mut state.phase_data {
        d.weak_seats = vec![1, 3];
    }
    for stale in [
        Delta::RedealAccepted { seat: 3, deal_no: 2 },
        Delta::RedealDeclined { seat: 1, deal_no: 0 },
    ] {
        let err = stale.apply(&mut state.clone()).unwrap_err();
        assert!(matches!(err, DomainError::Integrity(_)));
    }
    assert_eq!(state.round.multiplier, 1);
}

#[test]
fn starter_waits_for_open_window() {
    let mut state = dealt_state();
    if let PhaseData::Preparation(d) = &mut state.phase_data {
        d.weak_seats = vec![1];
    }
    let choose = Delta::StarterChosen {
        seat: 0,
        rule: StarterRule::StrongestPiece,
    };
    assert!(choose.apply(&mut state.clone()).is_err());

    Delta::RedealDeclined { seat: 1, deal_no: 1 }.apply(&mut state).unwrap();
    choose.apply(&mut state).unwrap();
    assert_eq!(state.round.starter, Some(0));
}

#[test]
fn pieces_played_fix_required_count_and_leave_hand() {
    let mut state = turn_state(0);
    // seat 0 holds ids 0..8: advisors 1 and 2 form a pair
    Delta::PiecesPlayed {
        seat: 0,
        pieces: pieces(&[1, 2]),
        play_type: Some(crate::domain::combos::PlayType::Pair),
    }
    .apply(&mut state)
    .unwrap();
    assert_eq!(state.players[0].hand.len(), 6);
    let PhaseData::Turn(t) = &state.phase_data else {
        panic!("turn phase");
    };
    assert_eq!(t.required, Some(2));

    // seat 1 (ids 8..16) plays three: wrong count
    let wrong = Delta::PiecesPlayed {
        seat: 1,
        pieces: pieces(&[8, 9, 10]),
        play_type: None,
    };
    assert!(wrong.apply(&mut state.clone()).is_err());

    // seat 2 is not next
    let early = Delta::PiecesPlayed {
        seat: 2,
        pieces: pieces(&[16, 17]),
        play_type: None,
    };
    assert!(early.apply(&mut state).is_err());
}

#[test]
fn delta_payload_round_trips_through_json() {
    let delta = Delta::PiecesPlayed {
        seat: 1,
        pieces: pieces(&[11, 12]),
        play_type: None,
    };
    let json = serde_json::to_string(&delta).unwrap();
    assert!(json.contains("\"type\":\"pieces_played\""));
    let back: Delta = serde_json::from_str(&json).unwrap();
    assert_eq!(back, delta);
}
