//! Helpers to build room states for unit tests by applying real deltas.

use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, PreparationData, TurnData};
use crate::domain::pieces::{piece_by_id, Piece};
use crate::domain::state::{seat_order_from, RoomState, Seat, SeatSpec};

pub fn seats() -> Vec<SeatSpec> {
    vec![
        SeatSpec::human("alice"),
        SeatSpec::human("bob"),
        SeatSpec::bot("carol"),
        SeatSpec::bot("dave"),
    ]
}

pub fn apply_all(state: &mut RoomState, deltas: &[Delta]) {
    for delta in deltas {
        delta.apply(state).unwrap();
        state.sequence += 1;
    }
}

pub fn opened_state() -> RoomState {
    let mut state = RoomState::empty();
    apply_all(
        &mut state,
        &[Delta::RoomOpened {
            room_id: "room-1".into(),
            seed: 42,
            seats: seats(),
        }],
    );
    state
}

pub fn pieces(ids: &[u8]) -> Vec<Piece> {
    ids.iter().filter_map(|id| piece_by_id(*id)).collect()
}

/// Room in round 1 preparation with fixed hands (catalog order, 8 each)
/// and no redeal pending.
pub fn dealt_state() -> RoomState {
    let mut state = opened_state();
    let hands: Vec<Vec<Piece>> = (0..4u8)
        .map(|seat| pieces(&(seat * 8..seat * 8 + 8).collect::<Vec<u8>>()))
        .collect();
    apply_all(
        &mut state,
        &[
            Delta::GameStarted { by: 0 },
            Delta::PhaseEntered {
                data: PhaseData::Preparation(PreparationData::new(1)),
            },
            Delta::RoundStarted { round_no: 1 },
            Delta::HandsDealt {
                deal_no: 1,
                hands,
                weak_seats: Vec::new(),
            },
        ],
    );
    state
}

/// Force a turn in progress starting at `starter` (skips declaration).
pub fn turn_state(starter: Seat) -> RoomState {
    let mut state = dealt_state();
    state.phase_data = PhaseData::Turn(TurnData {
        turn_no: 1,
        starter,
        order: seat_order_from(starter),
        required: None,
        plays: Vec::new(),
    });
    state
}
