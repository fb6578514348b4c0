//! Room engine - the per-room phase state machine.
//!
//! Synchronous and I/O free: the owning room actor feeds it inputs one at a
//! time. Every state change goes through `commit` (see `mutation`), which
//! appends the event and broadcasts it before the next change is computed.

mod mutation;
pub mod phases;

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::delta::Delta;
use crate::domain::phase_data::TimerKey;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{RoomState, Seat, SeatSpec};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::events::replay::replay_room;
use crate::events::store::EventStore;
use crate::ws::hub::BroadcastDispatcher;
use crate::ws::protocol::ActionKind;

/// Upper bound on automatic steps after one input. A full redeal chain is
/// well below this; hitting it means a handler never settles.
const MAX_ADVANCE_STEPS: usize = 64;

/// One item from the room's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Player { seat: Seat, action: ActionKind },
    /// A scheduled wait elapsed. Only ever produced by the room's own timers.
    Timeout(TimerKey),
}

pub struct RoomEngine {
    state: RoomState,
    store: Arc<dyn EventStore>,
    dispatcher: Arc<BroadcastDispatcher>,
}

impl RoomEngine {
    /// Open a fresh room. Commits `room_opened` as sequence 1.
    pub fn open(
        room_id: &str,
        seed: u64,
        seats: Vec<SeatSpec>,
        store: Arc<dyn EventStore>,
        dispatcher: Arc<BroadcastDispatcher>,
    ) -> Result<Self, DomainError> {
        validate_seats(&seats)?;
        if store.latest_sequence(room_id) != 0 {
            return Err(DomainError::validation(
                ValidationKind::Malformed,
                format!("room {room_id} already exists"),
            ));
        }

        let mut engine = Self {
            state: RoomState::empty(),
            store,
            dispatcher,
        };
        engine.commit(Delta::RoomOpened {
            room_id: room_id.to_string(),
            seed,
            seats,
        })?;
        info!(room_id, seed, "room opened");
        Ok(engine)
    }

    /// Rebuild a room from its log and finish any automatic steps that were
    /// cut short.
    pub fn restore(
        room_id: &str,
        store: Arc<dyn EventStore>,
        dispatcher: Arc<BroadcastDispatcher>,
    ) -> Result<Self, DomainError> {
        let state = replay_room(store.as_ref(), room_id)?;
        info!(room_id, sequence = state.sequence, phase = %state.phase(), "room restored");
        let mut engine = Self {
            state,
            store,
            dispatcher,
        };
        engine.settle();
        Ok(engine)
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn room_id(&self) -> &str {
        &self.state.room_id
    }

    pub fn pending_timer(&self) -> Option<TimerKey> {
        self.state.pending_timer()
    }

    /// Validate and apply one input, then run automatic steps and
    /// transitions until the room waits for input again.
    ///
    /// An error means the input was rejected and nothing was written. Once
    /// the input's own events are committed the call succeeds; a failure in
    /// the automatic steps after it is logged and leaves the room at the
    /// last committed event.
    pub fn handle(&mut self, input: Input) -> Result<(), DomainError> {
        let handler = phases::handler_for(self.state.phase());
        match input {
            Input::Player { seat, action } => {
                handler.validate(&self.state, seat, &action)?;
                for delta in handler.handle(&self.state, seat, &action)? {
                    self.commit(delta)?;
                }
            }
            Input::Timeout(key) => {
                if self.state.pending_timer() != Some(key) {
                    debug!(room_id = %self.state.room_id, ?key, "ignoring stale timeout");
                    return Ok(());
                }
                for delta in handler.on_timeout(&self.state, key)? {
                    self.commit(delta)?;
                }
            }
        }
        self.settle();
        Ok(())
    }

    fn settle(&mut self) {
        if let Err(err) = self.advance() {
            error!(
                room_id = %self.state.room_id,
                sequence = self.state.sequence,
                phase = %self.state.phase(),
                error = %err,
                "automatic steps stopped"
            );
        }
    }

    fn advance(&mut self) -> Result<(), DomainError> {
        for _ in 0..MAX_ADVANCE_STEPS {
            let handler = phases::handler_for(self.state.phase());
            if let Some(delta) = handler.progress(&self.state)? {
                self.commit(delta)?;
                continue;
            }

            let Some(next) = handler.check_transition(&self.state) else {
                return Ok(());
            };
            let from = self.state.phase();
            if !from.can_transition_to(next) {
                return Err(DomainError::transition(format!(
                    "{from} handler asked for {next}"
                )));
            }
            let data = phases::handler_for(next).enter(&self.state)?;
            self.commit(Delta::PhaseEntered { data })?;
            info!(
                room_id = %self.state.room_id,
                sequence = self.state.sequence,
                phase = %next,
                "phase entered"
            );
        }
        Err(DomainError::transition(format!(
            "room {} did not settle after {MAX_ADVANCE_STEPS} steps",
            self.state.room_id
        )))
    }
}

fn validate_seats(seats: &[SeatSpec]) -> Result<(), DomainError> {
    if seats.len() != PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::Malformed,
            format!("a room needs exactly {PLAYERS} seats"),
        ));
    }
    for (idx, seat) in seats.iter().enumerate() {
        if seat.name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Malformed,
                format!("seat {idx} has no name"),
            ));
        }
        if seats[..idx].iter().any(|s| s.name == seat.name) {
            return Err(DomainError::validation(
                ValidationKind::Malformed,
                format!("player name {} is taken", seat.name),
            ));
        }
    }
    Ok(())
}
