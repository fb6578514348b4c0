//! Room timing and worker configuration.
//!
//! Defaults suit interactive play; every value can be overridden from the
//! environment (`LIAP_*`, milliseconds for durations).

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REDEAL_TIMEOUT_VAR: &str = "LIAP_REDEAL_TIMEOUT_MS";
pub const TURN_RESULTS_DELAY_VAR: &str = "LIAP_TURN_RESULTS_DELAY_MS";
pub const SCORING_DELAY_VAR: &str = "LIAP_SCORING_DELAY_MS";
pub const BOT_THINK_DELAY_VAR: &str = "LIAP_BOT_THINK_DELAY_MS";
pub const ROOM_WORKERS_VAR: &str = "LIAP_ROOM_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Shared window for weak hands to ask for a redeal.
    pub redeal_decision_timeout: Duration,
    /// How long a resolved turn stays on display.
    pub turn_results_delay: Duration,
    /// How long round scores stay on display.
    pub scoring_delay: Duration,
    /// Pause before a bot submits its decision.
    pub bot_think_delay: Duration,
    /// Arbiters room actors are spread over.
    pub room_workers: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            redeal_decision_timeout: Duration::from_secs(30),
            turn_results_delay: Duration::from_secs(2),
            scoring_delay: Duration::from_secs(3),
            bot_think_delay: Duration::ZERO,
            room_workers: num_cpus::get().max(1),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset or blank keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(ms) = parse_u64(&lookup, REDEAL_TIMEOUT_VAR)? {
            config.redeal_decision_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, TURN_RESULTS_DELAY_VAR)? {
            config.turn_results_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, SCORING_DELAY_VAR)? {
            config.scoring_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, BOT_THINK_DELAY_VAR)? {
            config.bot_think_delay = Duration::from_millis(ms);
        }
        if let Some(workers) = parse_u64(&lookup, ROOM_WORKERS_VAR)? {
            if workers == 0 {
                return Err(ConfigError::Zero(ROOM_WORKERS_VAR));
            }
            config.room_workers = workers as usize;
        }
        Ok(config)
    }

    /// All waits zero; for tests and self-play.
    pub fn instant() -> Self {
        Self {
            redeal_decision_timeout: Duration::ZERO,
            turn_results_delay: Duration::ZERO,
            scoring_delay: Duration::ZERO,
            bot_think_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

pub(crate) fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
}
