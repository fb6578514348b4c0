#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod rooms;
pub mod services;
pub mod telemetry;
pub mod ws;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{ConfigError, GameConfig};
pub use domain::{Phase, PhaseData, RoomState, Seat, SeatSpec};
pub use errors::{DomainError, ErrorCode, RejectReason, ValidationKind};
pub use events::{EventStore, InMemoryEventStore, StoredEvent};
pub use rooms::RoomHandle;
pub use services::{RoomDirectory, RoomEngine};
pub use ws::{Action, ActionKind, BroadcastDispatcher, PhaseChange};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
