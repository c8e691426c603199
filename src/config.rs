//! Server configuration, read from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_QUESTION_BANK_PATH: &str = "questions.json";
const DEFAULT_GAME_IDLE_TTL_SECS: u64 = 6 * 60 * 60;
const DEFAULT_GAME_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_MAX_TEAMS: usize = 16;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON file every new game draws its questions from
    pub question_bank_path: PathBuf,
    /// Games untouched for this long are dropped
    pub game_idle_ttl: Duration,
    pub game_sweep_interval: Duration,
    /// Upper bound on teams per game
    pub max_teams: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            question_bank_path: PathBuf::from(DEFAULT_QUESTION_BANK_PATH),
            game_idle_ttl: Duration::from_secs(DEFAULT_GAME_IDLE_TTL_SECS),
            game_sweep_interval: Duration::from_secs(DEFAULT_GAME_SWEEP_INTERVAL_SECS),
            max_teams: DEFAULT_MAX_TEAMS,
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let question_bank_path = std::env::var("QUESTION_BANK_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUESTION_BANK_PATH));

        Self {
            port: env_or("PORT", DEFAULT_PORT),
            question_bank_path,
            game_idle_ttl: Duration::from_secs(env_or(
                "GAME_IDLE_TTL_SECS",
                DEFAULT_GAME_IDLE_TTL_SECS,
            )),
            game_sweep_interval: Duration::from_secs(env_or(
                "GAME_SWEEP_INTERVAL_SECS",
                DEFAULT_GAME_SWEEP_INTERVAL_SECS,
            )),
            max_teams: env_or("MAX_TEAMS", DEFAULT_MAX_TEAMS),
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or invalid
fn env_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("Invalid value {:?} for {}, using {}", value, key, default);
                default
            }
        },
        Err(_) => default,
    }
}
