//! One handler per phase.
//!
//! Handlers are stateless: everything they need is in `RoomState`. The
//! engine calls `validate` then `handle` for player input, `on_timeout` for
//! elapsed waits, and after every input keeps calling `progress` and
//! `check_transition` until the room settles.

mod declaration;
mod game_over;
mod preparation;
mod scoring;
mod turn;
mod turn_results;
mod waiting;

use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, TimerKey};
use crate::domain::state::{Phase, RoomState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::ws::protocol::ActionKind;

pub use declaration::DeclarationPhase;
pub use game_over::GameOverPhase;
pub use preparation::PreparationPhase;
pub use scoring::ScoringPhase;
pub use turn::TurnPhase;
pub use turn_results::TurnResultsPhase;
pub use waiting::WaitingPhase;

pub trait PhaseHandler: Sync {
    fn phase(&self) -> Phase;

    /// Initial payload when the phase is entered from `state`.
    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError>;

    /// Reject anything this phase cannot accept from `seat` right now.
    fn validate(&self, state: &RoomState, seat: Seat, action: &ActionKind)
        -> Result<(), DomainError>;

    /// Deltas for an action that passed `validate`.
    fn handle(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError>;

    /// Deltas for the phase's current wait elapsing.
    fn on_timeout(&self, _state: &RoomState, _key: TimerKey) -> Result<Vec<Delta>, DomainError> {
        Ok(Vec::new())
    }

    /// Next automatic step that needs no input, if any.
    fn progress(&self, _state: &RoomState) -> Result<Option<Delta>, DomainError> {
        Ok(None)
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase>;
}

pub fn handler_for(phase: Phase) -> &'static dyn PhaseHandler {
    match phase {
        Phase::Waiting => &WaitingPhase,
        Phase::Preparation => &PreparationPhase,
        Phase::Declaration => &DeclarationPhase,
        Phase::Turn => &TurnPhase,
        Phase::TurnResults => &TurnResultsPhase,
        Phase::Scoring => &ScoringPhase,
        Phase::GameOver => &GameOverPhase,
    }
}

pub(super) fn phase_mismatch(phase: Phase, action: &ActionKind) -> DomainError {
    DomainError::validation(
        ValidationKind::PhaseMismatch,
        format!("{} is not accepted during {phase}", action.type_name()),
    )
}

pub(super) fn out_of_turn(seat: Seat, expected: Option<Seat>) -> DomainError {
    let detail = match expected {
        Some(next) => format!("seat {seat} acted but seat {next} is next"),
        None => format!("seat {seat} acted but nobody is expected to"),
    };
    DomainError::validation(ValidationKind::OutOfTurn, detail)
}

pub(super) fn payload_mismatch(phase: Phase, state: &RoomState) -> DomainError {
    DomainError::integrity(format!(
        "{phase} handler called with {} payload",
        state.phase()
    ))
}
