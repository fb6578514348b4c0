//! Append-only per-room event log and replay.

pub mod replay;
pub mod store;

pub use replay::{replay, replay_room};
pub use store::{EventStore, InMemoryEventStore, StoreError, StoredEvent};
