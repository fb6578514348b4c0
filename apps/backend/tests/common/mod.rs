#![allow(dead_code)]

// tests/common/mod.rs
pub mod proptest_prelude;

use std::sync::Arc;

use liap_backend::ai::{BotStrategy, Heuristic, RandomPlayer};
use liap_backend::domain::phase_data::PhaseData;
use liap_backend::domain::player_view::ObservedState;
use liap_backend::domain::seed_derivation::derive_bot_seed;
use liap_backend::domain::state::Seat;
use liap_backend::services::game_flow::Input;
use liap_backend::{
    ActionKind, BroadcastDispatcher, EventStore, InMemoryEventStore, Phase, PhaseChange,
    RoomEngine, SeatSpec,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    liap_test_support::logging::init();
}

pub const NAMES: [&str; 4] = ["alice", "bob", "carol", "dave"];

/// Two humans then two bots; alice hosts.
pub fn seats() -> Vec<SeatSpec> {
    vec![
        SeatSpec::human(NAMES[0]),
        SeatSpec::human(NAMES[1]),
        SeatSpec::bot(NAMES[2]),
        SeatSpec::bot(NAMES[3]),
    ]
}

pub fn bot_seats() -> Vec<SeatSpec> {
    NAMES.iter().map(|n| SeatSpec::bot(*n)).collect()
}

/// Engine plus everything needed to look at what it did.
pub struct Harness {
    pub engine: RoomEngine,
    pub store: Arc<InMemoryEventStore>,
    pub dispatcher: Arc<BroadcastDispatcher>,
    pub rx: UnboundedReceiver<PhaseChange>,
}

impl Harness {
    /// Open a room with a channel subscribed before `room_opened`.
    pub fn open(room_id: &str, seed: u64) -> Self {
        let store = Arc::new(InMemoryEventStore::new());
        let dispatcher = Arc::new(BroadcastDispatcher::new());
        let (tx, rx) = unbounded_channel();
        dispatcher.subscribe_channel(room_id, tx);
        let engine = RoomEngine::open(
            room_id,
            seed,
            seats(),
            store.clone() as Arc<dyn EventStore>,
            dispatcher.clone(),
        )
        .expect("open room");
        Self {
            engine,
            store,
            dispatcher,
            rx,
        }
    }

    pub fn store_dyn(&self) -> Arc<dyn EventStore> {
        self.store.clone()
    }

    pub fn play(&mut self, seat: Seat, action: ActionKind) -> Result<(), liap_backend::DomainError> {
        self.engine.handle(Input::Player { seat, action })
    }

    /// Host starts; redeal windows lapse until declarations open.
    pub fn start_to_declaration(&mut self) {
        self.play(0, ActionKind::StartGame).expect("host starts");
        while self.engine.state().phase() == Phase::Preparation {
            let key = self
                .engine
                .pending_timer()
                .expect("preparation without a declaration must have a window open");
            self.engine.handle(Input::Timeout(key)).expect("window lapses");
        }
        assert_eq!(self.engine.state().phase(), Phase::Declaration);
    }

    /// Every broadcast received so far.
    pub fn drain(&mut self) -> Vec<PhaseChange> {
        let mut out = Vec::new();
        while let Ok(change) = self.rx.try_recv() {
            out.push(change);
        }
        out
    }

    pub fn observed(&self, seat: Seat) -> ObservedState {
        ObservedState::from_state(self.engine.state(), seat)
    }
}

/// Deterministic bots that play for their declarations; games end.
pub fn heuristic_bots() -> Vec<Box<dyn BotStrategy>> {
    (0..4)
        .map(|_| Box::new(Heuristic::new(None)) as Box<dyn BotStrategy>)
        .collect()
}

/// Bots that pick any legal move. Their scores drift down, so drive them
/// with [`play_rounds`] rather than to game over.
pub fn random_bots(seed: u64) -> Vec<Box<dyn BotStrategy>> {
    (0..4u8)
        .map(|seat| Box::new(RandomPlayer::new(Some(derive_bot_seed(seed, seat)))) as Box<dyn BotStrategy>)
        .collect()
}

/// Feed one input: the host's start, a bot decision, or the pending
/// timeout. Returns `false` once the game is over.
pub fn step(engine: &mut RoomEngine, bots: &[Box<dyn BotStrategy>]) -> bool {
    let state = engine.state();
    if state.phase() == Phase::GameOver {
        return false;
    }

    let input = match &state.phase_data {
        PhaseData::Waiting(w) if !w.started => Some(Input::Player {
            seat: w.host,
            action: ActionKind::StartGame,
        }),
        other => other.awaiting().into_iter().find_map(|seat| {
            let observed = ObservedState::from_state(state, seat);
            bots[seat as usize]
                .decide(&observed)
                .expect("bot decides")
                .map(|action| Input::Player { seat, action })
        }),
    };
    let input = match input {
        Some(input) => input,
        None => Input::Timeout(
            engine
                .pending_timer()
                .expect("room is stuck: nobody owes an action and no wait is pending"),
        ),
    };
    engine.handle(input).expect("input accepted");
    true
}

/// Drive the engine until game over; returns the number of inputs fed.
pub fn play_to_game_over(engine: &mut RoomEngine, bots: &[Box<dyn BotStrategy>]) -> usize {
    let mut steps = 0;
    while step(engine, bots) {
        steps += 1;
        assert!(steps < 50_000, "game did not finish");
    }
    steps
}

/// Drive the engine until `rounds` rounds have been scored or the game
/// ends, whichever comes first.
pub fn play_rounds(engine: &mut RoomEngine, bots: &[Box<dyn BotStrategy>], rounds: u16) {
    let mut steps = 0;
    loop {
        let state = engine.state();
        let scored = matches!(&state.phase_data, PhaseData::Scoring(s) if s.applied);
        if scored && state.round.round_no >= rounds {
            return;
        }
        if !step(engine, bots) {
            return;
        }
        steps += 1;
        assert!(steps < 50_000, "rounds did not finish");
    }
}
