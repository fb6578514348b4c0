//! Room actors and the handles transports use to reach them.

pub mod actor;
pub mod handle;

pub use actor::{GetSnapshot, RoomActor, StopRoom, Submit};
pub use handle::{structural_check, RoomHandle};
