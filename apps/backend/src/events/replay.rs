//! Rebuild room state from its event log.
//!
//! Replay folds the decoded deltas from `RoomState::empty()` with the same
//! `Delta::apply` used by live commits. It never touches the RNG: dealt
//! hands live in the `hands_dealt` payload.

use tracing::debug;

use crate::domain::delta::Delta;
use crate::domain::state::RoomState;
use crate::errors::domain::DomainError;
use crate::events::store::{EventStore, StoredEvent};

/// Fold `events` (one room, sequence order) into a state.
pub fn replay(events: &[StoredEvent]) -> Result<RoomState, DomainError> {
    let mut state = RoomState::empty();
    for event in events {
        let expected = state.sequence + 1;
        if event.sequence != expected {
            return Err(DomainError::replay(format!(
                "gap in log: expected sequence {expected}, found {}",
                event.sequence
            )));
        }
        if state.sequence > 0 && event.room_id != state.room_id {
            return Err(DomainError::replay(format!(
                "event {} belongs to room {}, not {}",
                event.sequence, event.room_id, state.room_id
            )));
        }
        let delta: Delta = serde_json::from_str(&event.payload)?;
        if delta.event_type() != event.event_type {
            return Err(DomainError::replay(format!(
                "event {} is tagged {} but carries {}",
                event.sequence,
                event.event_type,
                delta.event_type()
            )));
        }
        delta.apply(&mut state)?;
        state.sequence = event.sequence;
    }
    debug!(room_id = %state.room_id, sequence = state.sequence, "replayed room");
    Ok(state)
}

/// Replay a stored room. Unknown rooms are an error.
pub fn replay_room(store: &dyn EventStore, room_id: &str) -> Result<RoomState, DomainError> {
    let events = store.events(room_id);
    if events.is_empty() {
        return Err(DomainError::replay(format!("no events for room {room_id}")));
    }
    let state = replay(&events)?;
    if state.room_id != room_id {
        return Err(DomainError::replay(format!(
            "log for {room_id} opened room {}",
            state.room_id
        )));
    }
    Ok(state)
}
