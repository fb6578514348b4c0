//! liap-selfplay: runs bot-only rooms to game over and checks that each
//! room's log replays to the live state.
//!
//! Waits default to zero here; any `LIAP_*` variable still overrides them.
//!
//! ```bash
//! LIAP_SELFPLAY_ROOMS=8 LIAP_SELFPLAY_SEED=7 LIAP_SELFPLAY_AI=heuristic cargo run --bin liap-selfplay
//! ```

use std::env;
use std::process;
use std::time::Duration;

use actix::prelude::*;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info};

use liap_backend::ai::{create_ai, BotDriver, Heuristic, AVAILABLE_AIS};
use liap_backend::config::game::ROOM_WORKERS_VAR;
use liap_backend::domain::rules::PLAYERS;
use liap_backend::domain::seed_derivation::derive_bot_seed;
use liap_backend::domain::state::Seat;
use liap_backend::events::replay_room;
use liap_backend::telemetry;
use liap_backend::{Action, ActionKind, GameConfig, Phase, RoomDirectory, SeatSpec};

const ROOMS_VAR: &str = "LIAP_SELFPLAY_ROOMS";
const SEED_VAR: &str = "LIAP_SELFPLAY_SEED";
const AI_VAR: &str = "LIAP_SELFPLAY_AI";
const GAME_TIMEOUT: Duration = Duration::from_secs(300);

fn env_u64(var: &str, default: u64) -> u64 {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            eprintln!("❌ {var} must be a non-negative integer, got {raw:?}");
            process::exit(2);
        }),
        Err(_) => default,
    }
}

#[actix::main]
async fn main() {
    telemetry::init_tracing();

    let config = GameConfig::from_lookup(|var| {
        env::var(var)
            .ok()
            .or_else(|| (var != ROOM_WORKERS_VAR).then(|| "0".to_string()))
    })
    .unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        process::exit(2);
    });
    let rooms = env_u64(ROOMS_VAR, 1);
    let base_seed = env_u64(SEED_VAR, 42);
    let ai_name = env::var(AI_VAR).unwrap_or_else(|_| Heuristic::NAME.to_string());
    if !AVAILABLE_AIS.contains(&ai_name.as_str()) {
        eprintln!("❌ {AI_VAR} must be one of {AVAILABLE_AIS:?}, got {ai_name:?}");
        process::exit(2);
    }

    let directory = RoomDirectory::in_memory(config.clone());
    let dispatcher = directory.dispatcher();

    let mut failures = 0;
    for n in 0..rooms {
        let room_id = format!("selfplay-{n}");
        let seed = base_seed.wrapping_add(n);
        let seats = (0..PLAYERS).map(|s| SeatSpec::bot(format!("bot-{s}"))).collect();

        let handle = match directory.open_room(&room_id, seed, seats) {
            Ok(handle) => handle,
            Err(e) => {
                error!(room_id = %room_id, error = %e, "could not open room");
                failures += 1;
                continue;
            }
        };

        let (tx, mut rx) = unbounded_channel();
        let watcher = dispatcher.subscribe_channel(&room_id, tx);

        for seat in 0..PLAYERS as Seat {
            let Some(strategy) = create_ai(&ai_name, Some(derive_bot_seed(seed, seat))) else {
                continue;
            };
            BotDriver::new(
                handle.clone(),
                seat,
                strategy,
                dispatcher.clone(),
                config.bot_think_delay,
            )
            .start();
        }

        if let Err(reason) = handle.submit(Action::new("bot-0", ActionKind::StartGame)).await {
            error!(room_id = %room_id, %reason, "host could not start the game");
            failures += 1;
            continue;
        }

        let finished = tokio::time::timeout(GAME_TIMEOUT, async {
            while let Some(change) = rx.recv().await {
                if change.data.phase == Phase::GameOver {
                    return Some(change);
                }
            }
            None
        })
        .await;
        dispatcher.unsubscribe(&room_id, watcher);

        let Ok(Some(last)) = finished else {
            error!(room_id = %room_id, "room did not reach game over");
            failures += 1;
            continue;
        };

        let live = match handle.snapshot().await {
            Ok(state) => state,
            Err(reason) => {
                error!(room_id = %room_id, %reason, "could not read room state");
                failures += 1;
                continue;
            }
        };
        match replay_room(directory.store().as_ref(), &room_id) {
            Ok(replayed) if replayed == live => {
                info!(
                    room_id = %room_id,
                    seed,
                    sequence = last.data.sequence,
                    rounds = live.round.round_no,
                    "room finished and replay matches"
                );
            }
            Ok(_) => {
                error!(room_id = %room_id, seed, "replayed state differs from live state");
                failures += 1;
            }
            Err(e) => {
                error!(room_id = %room_id, seed, error = %e, "replay failed");
                failures += 1;
            }
        }
    }

    directory.shutdown();
    System::current().stop();

    if failures > 0 {
        eprintln!("❌ {failures} of {rooms} rooms failed");
        process::exit(1);
    }
    println!("✅ {rooms} rooms played to game over");
}
