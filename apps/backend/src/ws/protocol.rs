//! Wire shapes between the room core and its transports.
//!
//! Inbound: `Action` (`{"type", "player", "payload"}`).
//! Outbound: `PhaseChange` (`{"event": "phase_change", "data": {...}}`),
//! one per committed event.

use actix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::phase_data::PhaseData;
use crate::domain::player_view::{ObservedState, PlayerView};
use crate::domain::state::{Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

pub const PHASE_CHANGE_EVENT: &str = "phase_change";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    StartGame,
    /// Answer to the redeal offer made with deal `deal_no` of the round.
    RedealDecision { deal_no: u16, accept: bool },
    Declare { value: u8 },
    Play { pieces: Vec<u8> },
}

impl ActionKind {
    pub const fn type_name(&self) -> &'static str {
        match self {
            ActionKind::StartGame => "start_game",
            ActionKind::RedealDecision { .. } => "redeal_decision",
            ActionKind::Declare { .. } => "declare",
            ActionKind::Play { .. } => "play",
        }
    }
}

/// A player's request, the same for humans and bots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    action_type: String,
    player: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct RedealPayload {
    deal_no: u16,
    accept: bool,
}

#[derive(Deserialize)]
struct DeclarePayload {
    value: u8,
}

#[derive(Deserialize)]
struct PlayPayload {
    pieces: Vec<u8>,
}

#[derive(Serialize)]
struct WireAction<'a> {
    #[serde(rename = "type")]
    action_type: &'static str,
    player: &'a str,
    payload: serde_json::Value,
}

impl Action {
    pub fn new(player: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
        }
    }

    /// Parse the wire form. Any shape problem is a `Malformed` rejection.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let raw: RawAction = serde_json::from_str(raw).map_err(malformed)?;
        let kind = match raw.action_type.as_str() {
            "start_game" => ActionKind::StartGame,
            "redeal_decision" => {
                let p: RedealPayload = serde_json::from_value(raw.payload).map_err(malformed)?;
                ActionKind::RedealDecision {
                    deal_no: p.deal_no,
                    accept: p.accept,
                }
            }
            "declare" => {
                let p: DeclarePayload = serde_json::from_value(raw.payload).map_err(malformed)?;
                ActionKind::Declare { value: p.value }
            }
            "play" => {
                let p: PlayPayload = serde_json::from_value(raw.payload).map_err(malformed)?;
                ActionKind::Play { pieces: p.pieces }
            }
            other => {
                return Err(DomainError::validation(
                    ValidationKind::Malformed,
                    format!("unknown action type {other}"),
                ))
            }
        };
        Ok(Self {
            player: raw.player,
            kind,
        })
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        let payload = match &self.kind {
            ActionKind::StartGame => serde_json::json!({}),
            ActionKind::RedealDecision { deal_no, accept } => {
                serde_json::json!({ "deal_no": deal_no, "accept": accept })
            }
            ActionKind::Declare { value } => serde_json::json!({ "value": value }),
            ActionKind::Play { pieces } => serde_json::json!({ "pieces": pieces }),
        };
        Ok(serde_json::to_string(&WireAction {
            action_type: self.kind.type_name(),
            player: &self.player,
            payload,
        })?)
    }
}

fn malformed(err: serde_json::Error) -> DomainError {
    DomainError::validation(ValidationKind::Malformed, err.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseChangeData {
    pub room_id: String,
    pub phase: Phase,
    pub phase_data: PhaseData,
    pub players: Vec<PlayerView>,
    pub sequence: u64,
    /// Unix seconds of the commit.
    pub timestamp: f64,
    pub reason: String,
}

/// Broadcast envelope emitted once per committed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Message)]
#[rtype(result = "()")]
pub struct PhaseChange {
    pub event: String,
    pub data: PhaseChangeData,
}

impl PhaseChange {
    pub fn new(data: PhaseChangeData) -> Self {
        Self {
            event: PHASE_CHANGE_EVENT.to_string(),
            data,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.data.room_id
    }

    pub fn sequence(&self) -> u64 {
        self.data.sequence
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }

    /// What `seat` can see in this envelope.
    pub fn observed_by(&self, seat: Seat) -> ObservedState {
        ObservedState::new(
            seat,
            self.data.sequence,
            self.data.phase_data.clone(),
            self.data.players.clone(),
        )
    }
}
