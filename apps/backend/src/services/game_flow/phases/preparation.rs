//! Round start: deal, redeal window, starter choice.

use tracing::debug;

use super::{payload_mismatch, phase_mismatch, PhaseHandler};
use crate::domain::dealing::{deal_hands, holder_of_strongest_piece, weak_seats};
use crate::domain::delta::Delta;
use crate::domain::phase_data::{PhaseData, PreparationData, StarterRule, TimerKey, TimerKind};
use crate::domain::pieces::Piece;
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{Phase, RoomState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::ws::protocol::ActionKind;

pub struct PreparationPhase;

impl PreparationPhase {
    fn data<'a>(&self, state: &'a RoomState) -> Result<&'a PreparationData, DomainError> {
        match &state.phase_data {
            PhaseData::Preparation(d) => Ok(d),
            _ => Err(payload_mismatch(self.phase(), state)),
        }
    }
}

impl PhaseHandler for PreparationPhase {
    fn phase(&self) -> Phase {
        Phase::Preparation
    }

    fn enter(&self, state: &RoomState) -> Result<PhaseData, DomainError> {
        Ok(PhaseData::Preparation(PreparationData::new(
            state.round.round_no + 1,
        )))
    }

    fn validate(
        &self,
        state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<(), DomainError> {
        let ActionKind::RedealDecision { deal_no, .. } = action else {
            return Err(phase_mismatch(self.phase(), action));
        };
        let data = self.data(state)?;
        if !data.window_open() {
            return Err(DomainError::validation(
                ValidationKind::DecisionWindowClosed,
                "no redeal decision is open",
            ));
        }
        // An answer to an earlier deal is moot once that deal was replaced.
        if *deal_no != data.deal_no {
            return Err(DomainError::validation(
                ValidationKind::DecisionWindowClosed,
                format!(
                    "decision for deal {deal_no}, but deal {} is on the table",
                    data.deal_no
                ),
            ));
        }
        if !data.weak_seats.contains(&seat) {
            return Err(DomainError::validation(
                ValidationKind::NotWeakHand,
                format!("seat {seat} does not hold a weak hand"),
            ));
        }
        if data.declined.contains(&seat) {
            return Err(DomainError::validation(
                ValidationKind::AlreadyDecided,
                format!("seat {seat} already declined"),
            ));
        }
        Ok(())
    }

    fn handle(
        &self,
        _state: &RoomState,
        seat: Seat,
        action: &ActionKind,
    ) -> Result<Vec<Delta>, DomainError> {
        match action {
            ActionKind::RedealDecision {
                deal_no,
                accept: true,
            } => Ok(vec![Delta::RedealAccepted {
                seat,
                deal_no: *deal_no,
            }]),
            ActionKind::RedealDecision {
                deal_no,
                accept: false,
            } => Ok(vec![Delta::RedealDeclined {
                seat,
                deal_no: *deal_no,
            }]),
            other => Err(phase_mismatch(self.phase(), other)),
        }
    }

    fn on_timeout(&self, state: &RoomState, key: TimerKey) -> Result<Vec<Delta>, DomainError> {
        if key.kind != TimerKind::RedealWindow {
            return Ok(Vec::new());
        }
        let data = self.data(state)?;
        Ok(vec![Delta::RedealWindowExpired {
            deal_no: data.deal_no,
        }])
    }

    fn progress(&self, state: &RoomState) -> Result<Option<Delta>, DomainError> {
        let data = self.data(state)?;

        if state.round.round_no < data.round_no {
            return Ok(Some(Delta::RoundStarted {
                round_no: data.round_no,
            }));
        }

        if !data.dealt {
            let deal_no = data.deal_no + 1;
            let seed = derive_dealing_seed(state.seed, data.round_no, deal_no);
            let hands = deal_hands(seed);
            let weak = weak_seats(&hands);
            debug!(
                room_id = %state.room_id,
                round_no = data.round_no,
                deal_no,
                weak = ?weak,
                "dealing"
            );
            return Ok(Some(Delta::HandsDealt {
                deal_no,
                hands: hands.to_vec(),
                weak_seats: weak,
            }));
        }

        if data.ready_for_starter() {
            let (seat, rule) = choose_starter(state)?;
            return Ok(Some(Delta::StarterChosen { seat, rule }));
        }

        Ok(None)
    }

    fn check_transition(&self, state: &RoomState) -> Option<Phase> {
        match &state.phase_data {
            PhaseData::Preparation(d) if d.starter.is_some() => Some(Phase::Declaration),
            _ => None,
        }
    }
}

/// Redeal accepter first, then the previous round's last winner, then the
/// holder of the strongest piece (always the case in round 1).
fn choose_starter(state: &RoomState) -> Result<(Seat, StarterRule), DomainError> {
    if let Some(seat) = state.round.redeal_starter {
        return Ok((seat, StarterRule::RedealAccepter));
    }
    if state.round.round_no > 1 {
        if let Some(seat) = state.round.previous_round_winner {
            return Ok((seat, StarterRule::PreviousRoundWinner));
        }
    }
    let hands: Vec<Vec<Piece>> = state.players.iter().map(|p| p.hand.clone()).collect();
    holder_of_strongest_piece(&hands)
        .map(|seat| (seat, StarterRule::StrongestPiece))
        .ok_or_else(|| DomainError::integrity("no pieces dealt to choose a starter from"))
}
