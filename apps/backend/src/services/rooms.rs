//! Room directory - opens, restores and looks up running rooms.
//!
//! Room actors are spread round-robin over a fixed pool of arbiters, so a
//! busy room never stalls rooms on other workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::state::SeatSpec;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::events::store::{EventStore, InMemoryEventStore};
use crate::rooms::{RoomActor, RoomHandle};
use crate::services::game_flow::RoomEngine;
use crate::ws::hub::BroadcastDispatcher;

pub struct RoomDirectory {
    store: Arc<dyn EventStore>,
    dispatcher: Arc<BroadcastDispatcher>,
    config: GameConfig,
    arbiters: Vec<Arbiter>,
    next: AtomicUsize,
    rooms: DashMap<String, RoomHandle>,
}

impl RoomDirectory {
    /// Must be called from inside a running actix system.
    pub fn new(
        store: Arc<dyn EventStore>,
        dispatcher: Arc<BroadcastDispatcher>,
        config: GameConfig,
    ) -> Self {
        let workers = config.room_workers.max(1);
        let arbiters = (0..workers).map(|_| Arbiter::new()).collect();
        info!(workers, "room directory started");
        Self {
            store,
            dispatcher,
            config,
            arbiters,
            next: AtomicUsize::new(0),
            rooms: DashMap::new(),
        }
    }

    /// Directory backed by a fresh in-memory store and dispatcher.
    pub fn in_memory(config: GameConfig) -> Self {
        Self::new(
            Arc::new(InMemoryEventStore::new()),
            Arc::new(BroadcastDispatcher::new()),
            config,
        )
    }

    pub fn store(&self) -> Arc<dyn EventStore> {
        self.store.clone()
    }

    pub fn dispatcher(&self) -> Arc<BroadcastDispatcher> {
        self.dispatcher.clone()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Open a new room and start its actor. Commits `room_opened`.
    pub fn open_room(
        &self,
        room_id: &str,
        seed: u64,
        seats: Vec<SeatSpec>,
    ) -> Result<RoomHandle, DomainError> {
        if self.rooms.contains_key(room_id) {
            return Err(DomainError::validation(
                ValidationKind::Malformed,
                format!("room {room_id} is already open"),
            ));
        }
        let engine = RoomEngine::open(
            room_id,
            seed,
            seats,
            self.store.clone(),
            self.dispatcher.clone(),
        )?;
        Ok(self.spawn(engine))
    }

    /// Rebuild a room from its log and start its actor.
    pub fn restore_room(&self, room_id: &str) -> Result<RoomHandle, DomainError> {
        if let Some(existing) = self.rooms.get(room_id) {
            if existing.is_running() {
                return Ok(existing.clone());
            }
        }
        let engine = RoomEngine::restore(room_id, self.store.clone(), self.dispatcher.clone())?;
        Ok(self.spawn(engine))
    }

    /// Restore every room in the store that is not running. Rooms whose
    /// log fails to replay are skipped.
    pub fn restore_all(&self) -> Vec<RoomHandle> {
        let mut restored = Vec::new();
        for room_id in self.store.room_ids() {
            match self.restore_room(&room_id) {
                Ok(handle) => restored.push(handle),
                Err(err) => warn!(room_id = %room_id, error = %err, "room could not be restored"),
            }
        }
        restored
    }

    pub fn get(&self, room_id: &str) -> Option<RoomHandle> {
        self.rooms.get(room_id).map(|entry| entry.value().clone())
    }

    pub fn room_ids(&self) -> Vec<String> {
        self.rooms.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Stop every room and the worker arbiters.
    pub fn shutdown(&self) {
        for entry in self.rooms.iter() {
            entry.value().close();
            self.dispatcher.close_room(entry.key());
        }
        self.rooms.clear();
        for arbiter in &self.arbiters {
            arbiter.stop();
        }
        info!("room directory shut down");
    }

    fn spawn(&self, engine: RoomEngine) -> RoomHandle {
        let room_id = engine.room_id().to_string();
        let names = engine
            .state()
            .players
            .iter()
            .map(|p| p.name.clone())
            .collect();
        let worker = self.next.fetch_add(1, Ordering::Relaxed) % self.arbiters.len();
        let actor = RoomActor::new(engine, self.config.clone());
        let addr = RoomActor::start_in_arbiter(&self.arbiters[worker].handle(), move |_| actor);

        let handle = RoomHandle::new(room_id.clone(), names, addr);
        self.rooms.insert(room_id.clone(), handle.clone());
        info!(room_id = %room_id, worker, "room actor spawned");
        handle
    }
}
