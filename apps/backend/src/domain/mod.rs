//! Domain layer: pure game logic types and helpers.

pub mod combos;
pub mod dealing;
pub mod declaration;
pub mod delta;
pub mod phase_data;
pub mod pieces;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod turns;

#[cfg(test)]
pub(crate) mod test_gens;
#[cfg(test)]
pub(crate) mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_declaration;
#[cfg(test)]
mod tests_delta;
#[cfg(test)]
mod tests_props_resolution;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use combos::{classify, PlayType};
pub use dealing::{deal_hands, is_weak_hand};
pub use delta::Delta;
pub use phase_data::{PhaseData, TimerKey, TimerKind};
pub use pieces::{Color, Piece, PieceKind};
pub use player_view::{ObservedState, PlayerView};
pub use seed_derivation::derive_dealing_seed;
pub use state::{Phase, RoomState, Seat, SeatSpec};
