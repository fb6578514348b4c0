//! Bot strategy trait definition.

use thiserror::Error;

use crate::domain::phase_data::PhaseData;
use crate::domain::player_view::ObservedState;
use crate::ws::protocol::ActionKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("AI internal error: {0}")]
    Internal(String),
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

/// Decision maker for one seat.
///
/// Implementations only see an [`ObservedState`]; they never touch the room.
/// The driver calls [`BotStrategy::decide`] after every broadcast.
pub trait BotStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Accept (`true`) or decline a redeal of a weak hand.
    fn choose_redeal(&self, state: &ObservedState) -> Result<bool, AiError>;

    fn choose_declaration(&self, state: &ObservedState) -> Result<u8, AiError>;

    /// Piece ids to play. When following, must have the required count.
    fn choose_play(&self, state: &ObservedState) -> Result<Vec<u8>, AiError>;

    /// Action for this seat in `state`, or `None` when nothing is owed.
    fn decide(&self, state: &ObservedState) -> Result<Option<ActionKind>, AiError> {
        if !state.is_my_move() {
            return Ok(None);
        }
        let kind = match &state.phase_data {
            PhaseData::Preparation(d) => ActionKind::RedealDecision {
                deal_no: d.deal_no,
                accept: self.choose_redeal(state)?,
            },
            PhaseData::Declaration(_) => ActionKind::Declare {
                value: self.choose_declaration(state)?,
            },
            PhaseData::Turn(_) => ActionKind::Play {
                pieces: self.choose_play(state)?,
            },
            _ => return Ok(None),
        };
        Ok(Some(kind))
    }
}
