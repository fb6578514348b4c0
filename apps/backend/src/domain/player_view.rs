//! Player views of room state - what is visible to a seat.
//!
//! `PlayerView` is the public per-player record carried in every broadcast.
//! `ObservedState` is what a decision maker (human client or bot strategy)
//! sees at a decision point, with helpers for the legal moves.
//!
//! Views carry hands; redacting other seats' hands per viewer is left to
//! the transport.

use serde::{Deserialize, Serialize};

use crate::domain::combos::{classify, is_valid_play_of_size};
use crate::domain::declaration::{legal_declarations, DeclarationContext};
use crate::domain::phase_data::PhaseData;
use crate::domain::pieces::Piece;
use crate::domain::state::{Phase, RoomState, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: Seat,
    pub name: String,
    pub is_bot: bool,
    pub hand: Vec<Piece>,
    pub hand_size: usize,
    pub declared: Option<u8>,
    pub captured: u8,
    pub score: i32,
    pub zero_declare_streak: u8,
}

pub fn player_views(state: &RoomState) -> Vec<PlayerView> {
    state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| PlayerView {
            seat: seat as Seat,
            name: p.name.clone(),
            is_bot: p.is_bot,
            hand: p.hand.clone(),
            hand_size: p.hand.len(),
            declared: p.declared,
            captured: p.captured,
            score: p.score,
            zero_declare_streak: p.zero_declare_streak,
        })
        .collect()
}

/// Room as seen by one seat at a decision point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedState {
    pub seat: Seat,
    pub sequence: u64,
    pub phase_data: PhaseData,
    pub players: Vec<PlayerView>,
}

impl ObservedState {
    pub fn new(seat: Seat, sequence: u64, phase_data: PhaseData, players: Vec<PlayerView>) -> Self {
        Self {
            seat,
            sequence,
            phase_data,
            players,
        }
    }

    pub fn from_state(state: &RoomState, seat: Seat) -> Self {
        Self::new(
            seat,
            state.sequence,
            state.phase_data.clone(),
            player_views(state),
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase_data.phase()
    }

    pub fn hand(&self) -> &[Piece] {
        self.players
            .get(self.seat as usize)
            .map(|p| p.hand.as_slice())
            .unwrap_or(&[])
    }

    /// True when the room is waiting on this seat.
    pub fn is_my_move(&self) -> bool {
        self.phase_data.awaiting().contains(&self.seat)
    }

    /// Declarations this seat may make right now; empty when not its turn.
    pub fn legal_declarations(&self) -> Vec<u8> {
        let PhaseData::Declaration(d) = &self.phase_data else {
            return Vec::new();
        };
        if d.next_to_act() != Some(self.seat) {
            return Vec::new();
        }
        let zero_streak = self
            .players
            .get(self.seat as usize)
            .map(|p| p.zero_declare_streak)
            .unwrap_or(0);
        legal_declarations(DeclarationContext {
            total_so_far: d.total(),
            is_last: d.next_is_last(),
            zero_streak,
        })
    }

    /// Piece count this seat must play, `None` when it opens the turn.
    pub fn required_piece_count(&self) -> Option<usize> {
        match &self.phase_data {
            PhaseData::Turn(t) => t.required.map(|r| r as usize),
            _ => None,
        }
    }

    /// Whether `pieces` would be accepted as a valid (non-forfeit) play.
    pub fn is_valid_play(&self, pieces: &[Piece]) -> bool {
        match self.required_piece_count() {
            Some(k) => is_valid_play_of_size(pieces, k),
            None => classify(pieces).is_some(),
        }
    }
}
