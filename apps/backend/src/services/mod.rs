//! Room services: the phase engine and the directory of running rooms.

pub mod game_flow;
pub mod rooms;

pub use game_flow::{Input, RoomEngine};
pub use rooms::RoomDirectory;
