//! Typed per-phase payloads.
//!
//! `PhaseData` is replaced wholesale when a phase is entered and otherwise
//! only patched by the deltas belonging to that phase (see `delta`).

use serde::{Deserialize, Serialize};

use crate::domain::rules::PLAYERS;
use crate::domain::scoring::ScoreLine;
use crate::domain::state::{Phase, RoomState, Seat};
use crate::domain::turns::TurnPlay;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseData {
    Waiting(WaitingData),
    Preparation(PreparationData),
    Declaration(DeclarationData),
    Turn(TurnData),
    TurnResults(TurnResultsData),
    Scoring(ScoringData),
    GameOver(GameOverData),
}

impl PhaseData {
    pub fn initial() -> Self {
        PhaseData::Waiting(WaitingData {
            host: 0,
            started: false,
        })
    }

    pub fn phase(&self) -> Phase {
        match self {
            PhaseData::Waiting(_) => Phase::Waiting,
            PhaseData::Preparation(_) => Phase::Preparation,
            PhaseData::Declaration(_) => Phase::Declaration,
            PhaseData::Turn(_) => Phase::Turn,
            PhaseData::TurnResults(_) => Phase::TurnResults,
            PhaseData::Scoring(_) => Phase::Scoring,
            PhaseData::GameOver(_) => Phase::GameOver,
        }
    }

    /// Seats whose input the room is currently waiting on.
    pub fn awaiting(&self) -> Vec<Seat> {
        match self {
            PhaseData::Waiting(d) if !d.started => vec![d.host],
            PhaseData::Preparation(d) => d.undecided(),
            PhaseData::Declaration(d) => d.next_to_act().into_iter().collect(),
            PhaseData::Turn(d) => d.next_to_act().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingData {
    pub host: Seat,
    pub started: bool,
}

/// How the round starter was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterRule {
    /// Last player to accept a redeal this round.
    RedealAccepter,
    /// Holder of the strongest piece (first round).
    StrongestPiece,
    /// Winner of the previous round's final turn.
    PreviousRoundWinner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationData {
    pub round_no: u16,
    /// Deals made this round; 1 after the first deal, +1 per redeal.
    pub deal_no: u16,
    pub dealt: bool,
    pub weak_seats: Vec<Seat>,
    pub declined: Vec<Seat>,
    pub window_expired: bool,
    pub starter: Option<Seat>,
    pub starter_rule: Option<StarterRule>,
}

impl PreparationData {
    pub fn new(round_no: u16) -> Self {
        Self {
            round_no,
            deal_no: 0,
            dealt: false,
            weak_seats: Vec::new(),
            declined: Vec::new(),
            window_expired: false,
            starter: None,
            starter_rule: None,
        }
    }

    /// Weak players who have not answered yet.
    pub fn undecided(&self) -> Vec<Seat> {
        if !self.window_open() {
            return Vec::new();
        }
        self.weak_seats
            .iter()
            .copied()
            .filter(|s| !self.declined.contains(s))
            .collect()
    }

    /// The redeal window is open between a deal with weak hands and the
    /// first of: an acceptance, every weak player declining, the timeout.
    pub fn window_open(&self) -> bool {
        self.dealt
            && self.starter.is_none()
            && !self.window_expired
            && !self.weak_seats.is_empty()
            && self.declined.len() < self.weak_seats.len()
    }

    /// Ready to pick the starter: dealt and no redeal pending.
    pub fn ready_for_starter(&self) -> bool {
        self.dealt && self.starter.is_none() && !self.window_open()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationEntry {
    pub seat: Seat,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationData {
    pub order: Vec<Seat>,
    pub declarations: Vec<DeclarationEntry>,
}

impl DeclarationData {
    pub fn next_to_act(&self) -> Option<Seat> {
        self.order.get(self.declarations.len()).copied()
    }

    pub fn total(&self) -> u8 {
        self.declarations.iter().map(|d| d.value).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.declarations.len() == PLAYERS
    }

    /// Whether the seat about to act is the last declarer.
    pub fn next_is_last(&self) -> bool {
        self.declarations.len() + 1 == PLAYERS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnData {
    /// 1-based within the round.
    pub turn_no: u8,
    pub starter: Seat,
    pub order: Vec<Seat>,
    /// Piece count fixed by the starter's play.
    pub required: Option<u8>,
    pub plays: Vec<TurnPlay>,
}

impl TurnData {
    pub fn next_to_act(&self) -> Option<Seat> {
        self.order.get(self.plays.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYERS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResultsData {
    pub turn_no: u8,
    pub plays: Vec<TurnPlay>,
    pub winner: Seat,
    pub pile_size: u8,
    pub awarded: bool,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringData {
    pub round_no: u16,
    pub multiplier: u32,
    pub lines: Vec<ScoreLine>,
    pub game_over: bool,
    pub winners: Vec<Seat>,
    pub applied: bool,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverData {
    pub winners: Vec<Seat>,
    pub final_scores: Vec<i32>,
    pub rounds_played: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    RedealWindow,
    TurnResults,
    Scoring,
}

/// Identifies one scheduled wait. A timeout whose key no longer matches
/// `RoomState::pending_timer` is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerKey {
    pub kind: TimerKind,
    pub round_no: u16,
    /// Deal number for redeal windows, turn number for turn results.
    pub counter: u16,
}

impl RoomState {
    /// The wait the room is currently in, if any.
    pub fn pending_timer(&self) -> Option<TimerKey> {
        let round_no = self.round.round_no;
        match &self.phase_data {
            PhaseData::Preparation(d) if d.window_open() => Some(TimerKey {
                kind: TimerKind::RedealWindow,
                round_no,
                counter: d.deal_no,
            }),
            PhaseData::TurnResults(d) if d.awarded && !d.acknowledged => Some(TimerKey {
                kind: TimerKind::TurnResults,
                round_no,
                counter: d.turn_no as u16,
            }),
            PhaseData::Scoring(d) if d.applied && !d.acknowledged => Some(TimerKey {
                kind: TimerKind::Scoring,
                round_no,
                counter: 0,
            }),
            _ => None,
        }
    }
}
