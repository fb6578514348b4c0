use serde::{Deserialize, Serialize};

use crate::domain::phase_data::PhaseData;
use crate::domain::pieces::Piece;
use crate::domain::rules::PLAYERS;

pub type Seat = u8; // 0..=3

/// Overall room progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Seats filled, waiting for the host to start.
    Waiting,
    /// Dealing, redeal window and starter selection.
    Preparation,
    /// Players declare target pile counts from the starter onward.
    Declaration,
    /// Pieces are being played for the current turn.
    Turn,
    /// Resolved turn stays on display until acknowledged.
    TurnResults,
    /// Round scores applied and displayed.
    Scoring,
    /// Terminal.
    GameOver,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Preparation => "preparation",
            Phase::Declaration => "declaration",
            Phase::Turn => "turn",
            Phase::TurnResults => "turn_results",
            Phase::Scoring => "scoring",
            Phase::GameOver => "game_over",
        }
    }

    /// Edges of the fixed transition table.
    pub fn can_transition_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Waiting, Preparation)
                | (Preparation, Declaration)
                | (Declaration, Turn)
                | (Turn, TurnResults)
                | (TurnResults, Turn)
                | (TurnResults, Scoring)
                | (Scoring, Preparation)
                | (Scoring, GameOver)
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat assignment fixed when the room opens.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatSpec {
    pub name: String,
    pub is_bot: bool,
}

impl SeatSpec {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bot: true,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub is_bot: bool,
    pub hand: Vec<Piece>,
    /// Target pile count for the current round.
    pub declared: Option<u8>,
    /// Pieces won this round.
    pub captured: u8,
    /// Cumulative across rounds.
    pub score: i32,
    /// Rounds in a row this player declared zero.
    pub zero_declare_streak: u8,
}

impl PlayerState {
    pub fn new(spec: &SeatSpec) -> Self {
        Self {
            name: spec.name.clone(),
            is_bot: spec.is_bot,
            hand: Vec::new(),
            declared: None,
            captured: 0,
            score: 0,
            zero_declare_streak: 0,
        }
    }

    pub fn holds(&self, piece_id: u8) -> bool {
        self.hand.iter().any(|p| p.id == piece_id)
    }
}

/// Per-round bookkeeping outside the phase payload.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// 1-based; 0 before the first round starts.
    pub round_no: u16,
    /// Redeal multiplier, starts at 1 and only goes up within a round.
    pub multiplier: u32,
    pub starter: Option<Seat>,
    pub turns_played: u8,
    /// Winner of the latest resolved turn this round.
    pub last_turn_winner: Option<Seat>,
    /// Last player who accepted a redeal this round.
    pub redeal_starter: Option<Seat>,
    /// Winner of the previous round's final turn.
    pub previous_round_winner: Option<Seat>,
}

impl RoundInfo {
    pub fn empty() -> Self {
        Self {
            round_no: 0,
            multiplier: 1,
            starter: None,
            turns_played: 0,
            last_turn_winner: None,
            redeal_starter: None,
            previous_round_winner: None,
        }
    }
}

/// Entire room container, sufficient for pure domain operations and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    pub room_id: String,
    /// Base seed every deal in this room is derived from.
    pub seed: u64,
    pub players: Vec<PlayerState>,
    pub round: RoundInfo,
    pub phase_data: PhaseData,
    /// Sequence of the last applied event, 0 before any.
    pub sequence: u64,
}

impl RoomState {
    /// State before the first event. Replay folds from here.
    pub fn empty() -> Self {
        Self {
            room_id: String::new(),
            seed: 0,
            players: Vec::new(),
            round: RoundInfo::empty(),
            phase_data: PhaseData::initial(),
            sequence: 0,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.players.len() == PLAYERS
    }

    pub fn phase(&self) -> Phase {
        self.phase_data.phase()
    }

    pub fn seat_of(&self, name: &str) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .map(|idx| idx as Seat)
    }

    pub fn player(&self, seat: Seat) -> Option<&PlayerState> {
        self.players.get(seat as usize)
    }

    pub fn all_hands_empty(&self) -> bool {
        self.players.iter().all(|p| p.hand.is_empty())
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    ((seat as i16 + delta as i16).rem_euclid(PLAYERS as i16)) as Seat
}

#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// All four seats in play order starting at `start`.
pub fn seat_order_from(start: Seat) -> Vec<Seat> {
    (0..PLAYERS as i8).map(|n| seat_offset(start, n)).collect()
}
