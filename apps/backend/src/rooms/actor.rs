//! Room actor - owns one room engine and serializes everything that
//! touches it.
//!
//! Player actions and timer expiries share the actor's mailbox, so they are
//! handled strictly one at a time. Waits are `notify_later` messages into
//! that same mailbox and are reconciled against the engine after every
//! message.

use std::collections::HashMap;
use std::time::Duration;

use actix::prelude::*;
use tracing::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::domain::phase_data::{TimerKey, TimerKind};
use crate::domain::state::{RoomState, Seat};
use crate::errors::domain::{DomainError, RejectReason};
use crate::services::game_flow::{Input, RoomEngine};
use crate::ws::protocol::ActionKind;

/// A seated player's action. Answers with the room sequence once the room
/// has settled.
#[derive(Message)]
#[rtype(result = "Result<u64, RejectReason>")]
pub struct Submit {
    pub seat: Seat,
    pub action: ActionKind,
}

/// Clone of the current room state.
#[derive(Message)]
#[rtype(result = "RoomState")]
pub struct GetSnapshot;

#[derive(Message)]
#[rtype(result = "()")]
pub struct StopRoom;

#[derive(Message)]
#[rtype(result = "()")]
struct TimerFired {
    key: TimerKey,
}

pub struct RoomActor {
    engine: RoomEngine,
    config: GameConfig,
    timers: HashMap<TimerKey, SpawnHandle>,
}

impl RoomActor {
    pub fn new(engine: RoomEngine, config: GameConfig) -> Self {
        Self {
            engine,
            config,
            timers: HashMap::new(),
        }
    }

    fn delay_for(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::RedealWindow => self.config.redeal_decision_timeout,
            TimerKind::TurnResults => self.config.turn_results_delay,
            TimerKind::Scoring => self.config.scoring_delay,
        }
    }

    /// Keep exactly the engine's pending wait scheduled.
    fn sync_timers(&mut self, ctx: &mut Context<Self>) {
        let wanted = self.engine.pending_timer();

        let stale: Vec<TimerKey> = self
            .timers
            .keys()
            .filter(|key| Some(**key) != wanted)
            .copied()
            .collect();
        for key in stale {
            if let Some(handle) = self.timers.remove(&key) {
                ctx.cancel_future(handle);
                debug!(room_id = %self.engine.room_id(), ?key, "timer cancelled");
            }
        }

        if let Some(key) = wanted {
            if !self.timers.contains_key(&key) {
                let delay = self.delay_for(key.kind);
                let handle = ctx.notify_later(TimerFired { key }, delay);
                self.timers.insert(key, handle);
                debug!(
                    room_id = %self.engine.room_id(),
                    ?key,
                    delay_ms = delay.as_millis() as u64,
                    "timer scheduled"
                );
            }
        }
    }

    fn log_failure(&self, err: &DomainError, seat: Option<Seat>) {
        let room_id = self.engine.room_id();
        let sequence = self.engine.state().sequence;
        match err {
            DomainError::Validation { kind, detail } => {
                debug!(room_id, ?seat, sequence, ?kind, detail, "action rejected");
            }
            DomainError::Store(e) => {
                error!(room_id, ?seat, sequence, error = %e, "event store refused commit");
            }
            other => {
                error!(room_id, ?seat, sequence, error = %other, "room failed to apply input");
            }
        }
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            room_id = %self.engine.room_id(),
            sequence = self.engine.state().sequence,
            phase = %self.engine.state().phase(),
            "room actor started"
        );
        self.sync_timers(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            room_id = %self.engine.room_id(),
            sequence = self.engine.state().sequence,
            "room actor stopped"
        );
    }
}

impl Handler<Submit> for RoomActor {
    type Result = Result<u64, RejectReason>;

    fn handle(&mut self, msg: Submit, ctx: &mut Self::Context) -> Self::Result {
        let action_type = msg.action.type_name();
        let result = self.engine.handle(Input::Player {
            seat: msg.seat,
            action: msg.action,
        });
        self.sync_timers(ctx);

        match result {
            Ok(()) => {
                debug!(
                    room_id = %self.engine.room_id(),
                    seat = msg.seat,
                    action_type,
                    sequence = self.engine.state().sequence,
                    "action accepted"
                );
                Ok(self.engine.state().sequence)
            }
            Err(err) => {
                self.log_failure(&err, Some(msg.seat));
                Err(err.into())
            }
        }
    }
}

impl Handler<TimerFired> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: TimerFired, ctx: &mut Self::Context) -> Self::Result {
        if self.timers.remove(&msg.key).is_none() {
            warn!(room_id = %self.engine.room_id(), key = ?msg.key, "unscheduled timer fired");
        }
        debug!(room_id = %self.engine.room_id(), key = ?msg.key, "timer fired");
        if let Err(err) = self.engine.handle(Input::Timeout(msg.key)) {
            self.log_failure(&err, None);
        }
        self.sync_timers(ctx);
    }
}

impl Handler<GetSnapshot> for RoomActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.engine.state().clone())
    }
}

impl Handler<StopRoom> for RoomActor {
    type Result = ();

    fn handle(&mut self, _msg: StopRoom, ctx: &mut Self::Context) -> Self::Result {
        for (_, handle) in self.timers.drain() {
            ctx.cancel_future(handle);
        }
        ctx.stop();
    }
}
