//! Bot driver - an actor that plays one seat through the public paths.
//!
//! It subscribes to the room's broadcasts like any transport, asks its
//! strategy what to do with each new state, and submits through the
//! [`RoomHandle`]. While a submission is in flight the driver's mailbox is
//! paused, so it never acts twice on the same state.

use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::trait_def::BotStrategy;
use crate::domain::player_view::ObservedState;
use crate::domain::state::{Phase, Seat};
use crate::rooms::RoomHandle;
use crate::ws::hub::BroadcastDispatcher;
use crate::ws::protocol::{Action, PhaseChange};

pub struct BotDriver {
    room: RoomHandle,
    seat: Seat,
    strategy: Box<dyn BotStrategy>,
    dispatcher: Arc<BroadcastDispatcher>,
    think_delay: Duration,
    token: Option<Uuid>,
    /// Broadcasts older than this describe states already acted on.
    resume_after: u64,
}

impl BotDriver {
    pub fn new(
        room: RoomHandle,
        seat: Seat,
        strategy: Box<dyn BotStrategy>,
        dispatcher: Arc<BroadcastDispatcher>,
        think_delay: Duration,
    ) -> Self {
        Self {
            room,
            seat,
            strategy,
            dispatcher,
            think_delay,
            token: None,
            resume_after: 0,
        }
    }

    fn consider(&mut self, observed: ObservedState, ctx: &mut Context<Self>) {
        self.resume_after = self.resume_after.max(observed.sequence);

        if observed.phase() == Phase::GameOver {
            debug!(room_id = %self.room.room_id(), seat = self.seat, "game over, bot leaving");
            ctx.stop();
            return;
        }

        let kind = match self.strategy.decide(&observed) {
            Ok(Some(kind)) => kind,
            Ok(None) => return,
            Err(err) => {
                warn!(
                    room_id = %self.room.room_id(),
                    seat = self.seat,
                    strategy = self.strategy.name(),
                    error = %err,
                    "bot could not decide"
                );
                return;
            }
        };

        let Some(player) = self.room.player_name(self.seat) else {
            warn!(room_id = %self.room.room_id(), seat = self.seat, "bot seat has no player");
            return;
        };
        let action = Action::new(player, kind);
        let room = self.room.clone();
        let delay = self.think_delay;

        ctx.wait(
            async move {
                if !delay.is_zero() {
                    actix::clock::sleep(delay).await;
                }
                room.submit_tracked(action).await
            }
            .into_actor(self)
            .map(|result, actor, _ctx| match result {
                Ok(sequence) => {
                    actor.resume_after = actor.resume_after.max(sequence);
                }
                Err(reason) => {
                    warn!(
                        room_id = %actor.room.room_id(),
                        seat = actor.seat,
                        code = %reason.code,
                        message = %reason.message,
                        "bot action rejected"
                    );
                }
            }),
        );
    }
}

impl Actor for BotDriver {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let recipient = ctx.address().recipient::<PhaseChange>();
        self.token = Some(
            self.dispatcher
                .subscribe_recipient(self.room.room_id(), recipient),
        );
        info!(
            room_id = %self.room.room_id(),
            seat = self.seat,
            strategy = self.strategy.name(),
            "bot joined"
        );

        // Catch up with whatever the room is waiting on right now.
        let room = self.room.clone();
        let seat = self.seat;
        ctx.wait(
            async move { room.snapshot().await }
                .into_actor(self)
                .map(move |result, actor, ctx| match result {
                    Ok(state) => actor.consider(ObservedState::from_state(&state, seat), ctx),
                    Err(reason) => {
                        warn!(
                            room_id = %actor.room.room_id(),
                            seat,
                            message = %reason.message,
                            "bot could not read room"
                        );
                        ctx.stop();
                    }
                }),
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(token) = self.token.take() {
            self.dispatcher.unsubscribe(self.room.room_id(), token);
        }
        debug!(room_id = %self.room.room_id(), seat = self.seat, "bot stopped");
    }
}

impl Handler<PhaseChange> for BotDriver {
    type Result = ();

    fn handle(&mut self, msg: PhaseChange, ctx: &mut Self::Context) -> Self::Result {
        if msg.sequence() < self.resume_after {
            return;
        }
        self.consider(msg.observed_by(self.seat), ctx);
    }
}
