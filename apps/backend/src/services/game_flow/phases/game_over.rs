use tracing::info;

use super::PhaseHandler;
use crate::domain::delta::Delta;
use crate::domain::phase_data::{GameOverData, PhaseData};
use crate::domain::state::{Phase, RoomState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::ws::protocol::ActionKind;

pub struct GameOverPhase;

impl PhaseHandler for GameOverPhase {
    fn phase(&self) -> Phase {
        Phase::GameOver
    }

    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError> {
        let PhaseData::Scoring(scoring) = &state.phase_data else {
            return Err(DomainError::transition(format!(
                "game over entered from {}",
                state.phase()
            )));
        };
        let final_scores: Vec<i32> = state.players.iter().map(|p| p.score).collect();
        info!(
            room_id = %state.room_id,
            winners = ?scoring.winners,
            ?final_scores,
            "game over"
        );
        Ok(PhaseData::GameOver(GameOverData {
            winners: scoring.winners.clone(),
            final_scores,
            rounds_played: state.round.round_no,
        }))
    }

    fn validate(
        &self,
        _state: &RoomState,
        _seat: Seat,
        action: &ActionKind,
    ) -> Result<(), DomainError> {
        Err(DomainError::validation(
            ValidationKind::GameOver,
            format!("{} rejected: the game is over", action.type_name()),
        ))
    }

    fn handle(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError> {
        self.validate(state, seat, action).map(|_| Vec::new())
    }

    fn check_transition(&self, _state: &RoomState) -> Option<Phase> {
        None
    }
}
