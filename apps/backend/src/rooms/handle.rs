//! Cloneable handle to a running room.
//!
//! The handle resolves the player's seat and rejects structurally broken
//! actions before they reach the room's mailbox. Everything that depends on
//! room state is checked by the room itself.

use std::collections::HashSet;
use std::sync::Arc;

use actix::prelude::*;

use super::actor::{GetSnapshot, RoomActor, StopRoom, Submit};
use crate::domain::pieces::piece_by_id;
use crate::domain::rules::{valid_declaration_range, MAX_PLAY_PIECES};
use crate::domain::state::{RoomState, Seat};
use crate::errors::domain::{DomainError, RejectReason, ValidationKind};
use crate::errors::ErrorCode;
use crate::ws::protocol::{Action, ActionKind};

#[derive(Clone)]
pub struct RoomHandle {
    room_id: String,
    names: Arc<Vec<String>>,
    addr: Addr<RoomActor>,
}

impl RoomHandle {
    pub fn new(room_id: impl Into<String>, names: Vec<String>, addr: Addr<RoomActor>) -> Self {
        Self {
            room_id: room_id.into(),
            names: Arc::new(names),
            addr,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn seat_of(&self, player: &str) -> Option<Seat> {
        self.names
            .iter()
            .position(|n| n == player)
            .map(|idx| idx as Seat)
    }

    pub fn player_name(&self, seat: Seat) -> Option<&str> {
        self.names.get(seat as usize).map(String::as_str)
    }

    pub fn is_running(&self) -> bool {
        self.addr.connected()
    }

    pub async fn submit(&self, action: Action) -> Result<(), RejectReason> {
        self.submit_tracked(action).await.map(|_| ())
    }

    /// Like [`RoomHandle::submit`], also returning the room sequence after
    /// the action and every automatic step it caused.
    pub async fn submit_tracked(&self, action: Action) -> Result<u64, RejectReason> {
        let seat = structural_check(&self.names, &action)?;
        self.addr
            .send(Submit {
                seat,
                action: action.kind,
            })
            .await
            .map_err(|e| self.unavailable(e))?
    }

    /// Parse a wire action and submit it.
    pub async fn submit_json(&self, raw: &str) -> Result<(), RejectReason> {
        let action = Action::from_json(raw)?;
        self.submit(action).await
    }

    pub async fn snapshot(&self) -> Result<RoomState, RejectReason> {
        self.addr
            .send(GetSnapshot)
            .await
            .map_err(|e| self.unavailable(e))
    }

    /// Ask the room actor to stop. Pending waits are dropped.
    pub fn close(&self) {
        self.addr.do_send(StopRoom);
    }

    fn unavailable(&self, err: MailboxError) -> RejectReason {
        RejectReason::new(
            ErrorCode::RoomUnavailable,
            format!("room {} is not accepting actions: {err}", self.room_id),
        )
    }
}

/// Checks that need no room state: a known sender and a well-formed
/// payload. Returns the sender's seat.
pub fn structural_check(names: &[String], action: &Action) -> Result<Seat, DomainError> {
    let seat = names
        .iter()
        .position(|n| *n == action.player)
        .map(|idx| idx as Seat)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("{} is not seated in this room", action.player),
            )
        })?;

    match &action.kind {
        ActionKind::Declare { value } if !valid_declaration_range().contains(value) => {
            Err(DomainError::validation(
                ValidationKind::InvalidDeclaration,
                format!("declaration {value} is outside 0..=8"),
            ))
        }
        ActionKind::Play { pieces } => {
            if pieces.is_empty() || pieces.len() > MAX_PLAY_PIECES {
                return Err(DomainError::validation(
                    ValidationKind::InvalidPieceCount,
                    format!("a play has 1 to {MAX_PLAY_PIECES} pieces, got {}", pieces.len()),
                ));
            }
            if let Some(id) = pieces.iter().find(|id| piece_by_id(**id).is_none()) {
                return Err(DomainError::validation(
                    ValidationKind::Malformed,
                    format!("no piece with id {id}"),
                ));
            }
            let mut seen = HashSet::new();
            if let Some(id) = pieces.iter().find(|id| !seen.insert(**id)) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicatePiece,
                    format!("piece {id} listed twice"),
                ));
            }
            Ok(seat)
        }
        _ => Ok(seat),
    }
}
