//! Event log schema and the in-memory store.
//!
//! The log is keyed by (room_id, sequence). Sequences start at 1 and grow by
//! exactly one per committed event; `append` refuses anything else.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One persisted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub sequence: u64,
    pub room_id: String,
    pub event_type: String,
    /// JSON encoding of the delta.
    pub payload: String,
    /// Name of the player whose action produced the event.
    pub player_id: Option<String>,
    /// Unix seconds.
    pub timestamp: f64,
    /// RFC 3339.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("room {room_id}: expected sequence {expected}, got {got}")]
    SequenceMismatch {
        room_id: String,
        expected: u64,
        got: u64,
    },
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only event log.
///
/// Writes for one room come from that room's actor only; reads may come
/// from anywhere.
pub trait EventStore: Send + Sync {
    fn append(&self, event: StoredEvent) -> Result<(), StoreError>;

    /// All events for a room, in sequence order.
    fn events(&self, room_id: &str) -> Vec<StoredEvent>;

    /// Events with sequence strictly greater than `after`.
    fn events_since(&self, room_id: &str, after: u64) -> Vec<StoredEvent>;

    /// Sequence of the newest event, 0 for an unknown room.
    fn latest_sequence(&self, room_id: &str) -> u64;

    fn room_ids(&self) -> Vec<String>;
}

type RoomLog = Arc<RwLock<Vec<StoredEvent>>>;

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    rooms: DashMap<String, RoomLog>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, room_id: &str) -> Option<RoomLog> {
        self.rooms.get(room_id).map(|entry| entry.value().clone())
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, event: StoredEvent) -> Result<(), StoreError> {
        let log = self
            .rooms
            .entry(event.room_id.clone())
            .or_default()
            .value()
            .clone();

        let mut events = log.write();
        let expected = events.last().map(|e| e.sequence).unwrap_or(0) + 1;
        if event.sequence != expected {
            return Err(StoreError::SequenceMismatch {
                room_id: event.room_id,
                expected,
                got: event.sequence,
            });
        }
        events.push(event);
        Ok(())
    }

    fn events(&self, room_id: &str) -> Vec<StoredEvent> {
        self.log(room_id)
            .map(|log| log.read().clone())
            .unwrap_or_default()
    }

    fn events_since(&self, room_id: &str, after: u64) -> Vec<StoredEvent> {
        self.log(room_id)
            .map(|log| {
                log.read()
                    .iter()
                    .filter(|e| e.sequence > after)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn latest_sequence(&self, room_id: &str) -> u64 {
        self.log(room_id)
            .and_then(|log| log.read().last().map(|e| e.sequence))
            .unwrap_or(0)
    }

    fn room_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.rooms.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}
