use super::{out_of_turn, payload_mismatch, phase_mismatch, PhaseHandler};
use crate::domain::declaration::{validate_declaration, DeclarationContext};
use crate::domain::delta::Delta;
use crate::domain::phase_data::{DeclarationData, PhaseData};
use crate::domain::state::{seat_order_from, Phase, RoomState, Seat};
use crate::errors::domain::DomainError;
use crate::ws::protocol::ActionKind;

pub struct DeclarationPhase;

impl PhaseHandler for DeclarationPhase {
    fn phase(&self) -> Phase {
        Phase::Declaration
    }

    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError> {
        let starter = state
            .round
            .starter
            .ok_or_else(|| DomainError::integrity("declaration entered without a starter"))?;
        Ok(PhaseData::Declaration(DeclarationData {
            order: seat_order_from(starter),
            declarations: Vec::new(),
        }))
    }

    fn validate(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<(), DomainError> {
        let ActionKind::Declare { value } = action else {
            return Err(phase_mismatch(self.phase(), action));
        };
        let PhaseData::Declaration(data) = &state.phase_data else {
            return Err(payload_mismatch(self.phase(), state));
        };
        let next = data.next_to_act();
        if next != Some(seat) {
            return Err(out_of_turn(seat, next));
        }
        let zero_streak = state
            .player(seat)
            .map(|p| p.zero_declare_streak)
            .unwrap_or(0);
        validate_declaration(
            *value,
            DeclarationContext {
                total_so_far: data.total(),
                is_last: data.next_is_last(),
                zero_streak,
            },
        )
    }

    fn handle(
        &self,
        _state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError> {
        match action {
            ActionKind::Declare { value } => Ok(vec![Delta::Declared {
                seat,
                value: *value,
            }]),
            other => Err(phase_mismatch(self.phase(), other)),
        }
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase> {
        match &state.phase_data {
            PhaseData::Declaration(d) if d.is_complete() => Some(Phase::Turn),
            _ => None,
        }
    }
}
