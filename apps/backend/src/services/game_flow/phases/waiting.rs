use super::{payload_mismatch, phase_mismatch, PhaseHandler};
use crate::domain::delta::Delta;
use crate::domain::phase_data::PhaseData;
use crate::domain::state::{Phase, RoomState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::ws::protocol::ActionKind;

pub struct WaitingPhase;

impl PhaseHandler for WaitingPhase {
    fn phase(&self) -> Phase {
        Phase::Waiting
    }

    fn enter(&self, _state: &RoomState) -> Result<PhaseData, DomainError> {
        Err(DomainError::transition("waiting is only installed by room_opened"))
    }

    fn validate(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<(), DomainError> {
        let PhaseData::Waiting(data) = &state.phase_data else {
            return Err(payload_mismatch(self.phase(), state));
        };
        if *action != ActionKind::StartGame || data.started {
            return Err(phase_mismatch(self.phase(), action));
        }
        if seat != data.host {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                format!("only seat {} can start the game", data.host),
            ));
        }
        Ok(())
    }

    fn handle(
        &self,
        _state: &RoomState,
        seat: Seat,
        _action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError> {
        Ok(vec![Delta::GameStarted { by: seat }])
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase> {
        match &state.phase_data {
            PhaseData::Waiting(d) if d.started => Some(Phase::Preparation),
            _ => None,
        }
    }
}
