use tracing::info;

use super::{payload_mismatch, phase_mismatch, PhaseHandler};
use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, ScoringData, TimerKey, TimerKind};
use crate::domain::scoring::{is_game_over, score_round, winners};
use crate::domain::state::{Phase, RoomState, Seat};
use crate::errors::domain::DomainError;
use crate::ws::protocol::ActionKind;

pub struct ScoringPhase;

impl PhaseHandler for ScoringPhase {
    fn phase(&self) -> Phase {
        Phase::Scoring
    }

    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError> {
        let lines = score_round(&state.players, state.round.multiplier);
        let totals: Vec<i32> = lines.iter().map(|l| l.total).collect();
        let game_over = is_game_over(&totals);
        let winners = winners(&totals);
        info!(
            room_id = %state.room_id,
            round_no = state.round.round_no,
            multiplier = state.round.multiplier,
            ?totals,
            game_over,
            "round scored"
        );
        Ok(PhaseData::Scoring(ScoringData {
            round_no: state.round.round_no,
            multiplier: state.round.multiplier,
            lines,
            game_over,
            winners,
            applied: false,
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
        if key.kind != TimerKind::Scoring {
            return Ok(Vec::new());
        }
        Ok(vec![Delta::ScoringAcknowledged])
    }

    fn progress(&self, state: &RoomState) -> Result<Option<Delta>, DomainError> {
        let PhaseData::Scoring(data) = &state.phase_data else {
            return Err(payload_mismatch(self.phase(), state));
        };
        if data.applied {
            return Ok(None);
        }
        Ok(Some(Delta::ScoresApplied {
            round_scores: data.lines.iter().map(|l| l.round_score).collect(),
        }))
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase> {
        match &state.phase_data {
            PhaseData::Scoring(d) if d.acknowledged && d.game_over => Some(Phase::GameOver),
            PhaseData::Scoring(d) if d.acknowledged => Some(Phase::Preparation),
            _ => None,
        }
    }
}
