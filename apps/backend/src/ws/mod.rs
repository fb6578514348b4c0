pub mod hub;
pub mod protocol;

pub use hub::{BroadcastDispatcher, StateSubscriber};
pub use protocol::{Action, ActionKind, PhaseChange, PhaseChangeData};
