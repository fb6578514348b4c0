use std::collections::HashSet;

use super::{out_of_turn, payload_mismatch, phase_mismatch, PhaseHandler};
use crate::domain::combos::classify;
use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, TurnData};
use crate::domain::pieces::Piece;
use crate::domain::rules::{MAX_PLAY_PIECES, MIN_PLAY_PIECES};
use crate::domain::state::{seat_order_from, Phase, RoomState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::ws::protocol::ActionKind;

pub struct TurnPhase;

impl TurnPhase {
    fn data<'a>(&self, state: &'a RoomState) -> Result<&'a TurnData, DomainError> {
        match &state.phase_data {
            PhaseData::Turn(d) => Ok(d),
            _ => Err(payload_mismatch(self.phase(), state)),
        }
    }
}

impl PhaseHandler for TurnPhase {
    fn phase(&self) -> Phase {
        Phase::Turn
    }

    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError> {
        let starter = if state.round.turns_played == 0 {
            state.round.starter
        } else {
            state.round.last_turn_winner
        }
        .ok_or_else(|| DomainError::integrity("turn entered without a starter"))?;

        Ok(PhaseData::Turn(TurnData {
            turn_no: state.round.turns_played + 1,
            starter,
            order: seat_order_from(starter),
            required: None,
            plays: Vec::new(),
        }))
    }

    fn validate(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<(), DomainError> {
        let ActionKind::Play { pieces } = action else {
            return Err(phase_mismatch(self.phase(), action));
        };
        let data = self.data(state)?;
        let next = data.next_to_act();
        if next != Some(seat) {
            return Err(out_of_turn(seat, next));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = pieces.iter().find(|id| !seen.insert(**id)) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePiece,
                format!("piece {dup} listed twice"),
            ));
        }
        let hand = resolve_pieces(state, seat, pieces)?;

        match data.required {
            None => {
                if !(MIN_PLAY_PIECES..=MAX_PLAY_PIECES).contains(&hand.len()) {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidPieceCount,
                        format!(
                            "a turn opens with {MIN_PLAY_PIECES} to {MAX_PLAY_PIECES} pieces, got {}",
                            hand.len()
                        ),
                    ));
                }
                if classify(&hand).is_none() {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidCombination,
                        "opening pieces do not form a combination",
                    ));
                }
            }
            Some(k) if k as usize != hand.len() => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPieceCount,
                    format!("this turn requires {k} piece(s), got {}", hand.len()),
                ));
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn handle(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError> {
        let ActionKind::Play { pieces } = action else {
            return Err(phase_mismatch(self.phase(), action));
        };
        let pieces = resolve_pieces(state, seat, pieces)?;
        // Followers with the right count but no shape forfeit.
        let play_type = classify(&pieces);
        Ok(vec![Delta::PiecesPlayed {
            seat,
            pieces,
            play_type,
        }])
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase> {
        match &state.phase_data {
            PhaseData::Turn(d) if d.is_complete() => Some(Phase::TurnResults),
            _ => None,
        }
    }
}

/// Look the ids up in the seat's hand, keeping the submitted order.
fn resolve_pieces(state: &RoomState, seat: Seat, ids: &[u8]) -> Result<Vec<Piece>, DomainError> {
    let player = state.player(seat).ok_or_else(|| {
        DomainError::validation(ValidationKind::UnknownPlayer, format!("no seat {seat}"))
    })?;
    ids.iter()
        .map(|id| {
            player
                .hand
                .iter()
                .find(|p| p.id == *id)
                .copied()
                .ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::PieceNotInHand,
                        format!("piece {id} is not in seat {seat}'s hand"),
                    )
                })
        })
        .collect()
}
