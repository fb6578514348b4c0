//! Bot players - strategies and the actor that drives them.
//!
//! This module provides:
//! - `BotStrategy`, the decision trait bots implement
//! - `RandomPlayer`: picks random legal moves (seedable for tests)
//! - `Heuristic`: deterministic, plays to hit its declaration
//! - `BotDriver`: plays a seat by reacting to room broadcasts

mod bot_driver;
mod heuristic;
mod random;
mod trait_def;

pub use bot_driver::BotDriver;
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use trait_def::{AiError, BotStrategy};

/// Names accepted by [`create_ai`].
pub const AVAILABLE_AIS: &[&str] = &[RandomPlayer::NAME, Heuristic::NAME];

/// Build a strategy by name. `None` when the name is unknown.
pub fn create_ai(name: &str, seed: Option<u64>) -> Option<Box<dyn BotStrategy>> {
    match name {
        RandomPlayer::NAME => Some(Box::new(RandomPlayer::new(seed))),
        Heuristic::NAME => Some(Box::new(Heuristic::new(seed))),
        _ => None,
    }
}
