use super::{payload_mismatch, phase_mismatch, PhaseHandler};
use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, TimerKey, TimerKind, TurnResultsData};
use crate::domain::state::{Phase, RoomState, Seat};
use crate::domain::turns::resolve_turn;
use crate::errors::domain::DomainError;
use crate::ws::protocol::ActionKind;

pub struct TurnResultsPhase;

impl PhaseHandler for TurnResultsPhase {
    fn phase(&self) -> Phase {
        Phase::TurnResults
    }

    /// Resolve the completed turn held in the outgoing `Turn` payload.
    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError> {
        let PhaseData::Turn(turn) = &state.phase_data else {
            return Err(DomainError::transition(format!(
                "turn results entered from {}",
                state.phase()
            )));
        };
        let winner_idx = resolve_turn(&turn.plays)
            .ok_or_else(|| DomainError::integrity("turn has no valid play"))?;
        let pile_size = turn
            .required
            .ok_or_else(|| DomainError::integrity("turn has no required piece count"))?;

        Ok(PhaseData::TurnResults(TurnResultsData {
            turn_no: turn.turn_no,
            plays: turn.plays.clone(),
            winner: turn.plays[winner_idx].seat,
            pile_size,
            awarded: false,
            acknowledged: false,
        }))
    }

    fn validate(
        &self,
        _state: &RoomState,
        _seat: Seat,
        action: &ActionKind,
    ) -> Result<(), DomainError> {
        Err(phase_mismatch(self.phase(), action))
    }

    fn handle(
        &self,
        _state: &RoomState,
        _seat: Seat,
        action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError> {
        Err(phase_mismatch(self.phase(), action))
    }

    fn on_timeout(&self, _state: &RoomState, key: TimerKey) -> Result<Vec<Delta>, DomainError> {
        if key.kind != TimerKind::TurnResults {
            return Ok(Vec::new());
        }
        Ok(vec![Delta::TurnResultsAcknowledged])
    }

    fn progress(&self, state: &RoomState) -> Result<Option<Delta>, DomainError> {
        let PhaseData::TurnResults(data) = &state.phase_data else {
            return Err(payload_mismatch(self.phase(), state));
        };
        if data.awarded {
            return Ok(None);
        }
        Ok(Some(Delta::PilesAwarded {
            seat: data.winner,
            count: data.pile_size,
        }))
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase> {
        match &state.phase_data {
            PhaseData::TurnResults(d) if d.acknowledged => {
                if state.all_hands_empty() {
                    Some(Phase::Scoring)
                } else {
                    Some(Phase::Turn)
                }
            }
            _ => None,
        }
    }
}
