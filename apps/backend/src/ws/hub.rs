//! Per-room fan-out of committed events.
//!
//! Transports and bot drivers subscribe the same way; there is no
//! privileged path. Subscribers whose channel has closed are pruned on the
//! next dispatch.

use actix::prelude::*;
use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ws::protocol::PhaseChange;

/// Anything that can receive room broadcasts.
pub trait StateSubscriber: Send + Sync {
    /// Hand over one envelope. `false` means the subscriber is gone.
    fn deliver(&self, change: &PhaseChange) -> bool;
}

impl StateSubscriber for Recipient<PhaseChange> {
    fn deliver(&self, change: &PhaseChange) -> bool {
        if !self.connected() {
            return false;
        }
        self.do_send(change.clone());
        true
    }
}

impl StateSubscriber for UnboundedSender<PhaseChange> {
    fn deliver(&self, change: &PhaseChange) -> bool {
        self.send(change.clone()).is_ok()
    }
}

#[derive(Default)]
pub struct BroadcastDispatcher {
    rooms: DashMap<String, DashMap<Uuid, Box<dyn StateSubscriber>>>,
}

impl BroadcastDispatcher {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn subscribe(&self, room_id: &str, subscriber: Box<dyn StateSubscriber>) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(DashMap::new);
        entry.insert(token, subscriber);
        debug!(room_id, %token, "subscriber added");
        token
    }

    pub fn subscribe_recipient(&self, room_id: &str, recipient: Recipient<PhaseChange>) -> Uuid {
        self.subscribe(room_id, Box::new(recipient))
    }

    pub fn subscribe_channel(&self, room_id: &str, sender: UnboundedSender<PhaseChange>) -> Uuid {
        self.subscribe(room_id, Box::new(sender))
    }

    pub fn unsubscribe(&self, room_id: &str, token: Uuid) {
        if let Some(entry) = self.rooms.get(room_id) {
            entry.remove(&token);
        }
        self.rooms.remove_if(room_id, |_, subs| subs.is_empty());
    }

    pub fn subscriber_count(&self, room_id: &str) -> usize {
        self.rooms.get(room_id).map(|e| e.len()).unwrap_or(0)
    }

    /// Deliver to every subscriber of the envelope's room. Returns how many
    /// accepted it.
    pub fn dispatch(&self, change: &PhaseChange) -> usize {
        let room_id = change.room_id();
        let Some(entry) = self.rooms.get(room_id) else {
            return 0;
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for sub in entry.iter() {
            if sub.value().deliver(change) {
                delivered += 1;
            } else {
                closed.push(*sub.key());
            }
        }
        for token in closed {
            warn!(room_id, %token, sequence = change.sequence(), "pruning closed subscriber");
            entry.remove(&token);
        }
        delivered
    }

    /// Drop every subscriber of a room.
    pub fn close_room(&self, room_id: &str) {
        self.rooms.remove(room_id);
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc::unbounded_channel;

    use super::*;
    use crate::domain::phase_data::PhaseData;
    use crate::domain::state::Phase;
    use crate::ws::protocol::PhaseChangeData;

    fn change(room: &str, sequence: u64) -> PhaseChange {
        PhaseChange::new(PhaseChangeData {
            room_id: room.into(),
            phase: Phase::Waiting,
            phase_data: PhaseData::initial(),
            players: Vec::new(),
            sequence,
            timestamp: 0.0,
            reason: String::new(),
        })
    }

    #[test]
    fn delivers_only_to_the_room() {
        let hub = BroadcastDispatcher::new();
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        hub.subscribe_channel("a", tx_a);
        hub.subscribe_channel("b", tx_b);

        assert_eq!(hub.dispatch(&change("a", 1)), 1);
        assert_eq!(rx_a.try_recv().unwrap().sequence(), 1);
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn closed_subscribers_are_pruned() {
        let hub = BroadcastDispatcher::new();
        let (tx, rx) = unbounded_channel();
        let (tx_live, mut rx_live) = unbounded_channel();
        hub.subscribe_channel("a", tx);
        hub.subscribe_channel("a", tx_live);
        drop(rx);

        assert_eq!(hub.dispatch(&change("a", 1)), 1);
        assert_eq!(hub.subscriber_count("a"), 1);
        assert_eq!(rx_live.try_recv().unwrap().sequence(), 1);
    }

    #[test]
    fn unsubscribe_removes_empty_rooms() {
        let hub = BroadcastDispatcher::new();
        let (tx, _rx) = unbounded_channel();
        let token = hub.subscribe_channel("a", tx);
        hub.unsubscribe("a", token);
        assert_eq!(hub.subscriber_count("a"), 0);
        assert_eq!(hub.dispatch(&change("a", 1)), 0);
    }
}
