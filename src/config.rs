//! Process configuration from environment variables
//!
//! - `BLANKDASH_PORT` (default 8080)
//! - `BLANKDASH_QUOTES_FILE` (default `quotes.json`)
//! - `BLANKDASH_EXPECTED_PLAYERS` static player count; unset means the
//!   count is estimated from player activity
//! - `BLANKDASH_MIN_PLAYERS` (default 3) floor of the estimate
//! - `BLANKDASH_LIVENESS_SECS` (default 30, at most one day) how long a
//!   player counts as present
//! - `BLANKDASH_SHUFFLE_QUOTES` (default true)
//!
//! Malformed values never abort startup: they are logged and replaced by
//! the default.

use std::path::PathBuf;
use std::time::Duration;

use crate::liveness::{FixedPlayerCount, HeartbeatEstimator, PlayerCountEstimator};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_QUOTES_FILE: &str = "quotes.json";
pub const DEFAULT_MIN_PLAYERS: usize = 3;
pub const DEFAULT_LIVENESS_SECS: u64 = 30;
pub const MAX_LIVENESS_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub quotes_file: PathBuf,
    /// Fixed player count; `None` estimates from heartbeats
    pub expected_players: Option<usize>,
    pub min_players: usize,
    pub liveness_window: Duration,
    pub shuffle_quotes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            quotes_file: PathBuf::from(DEFAULT_QUOTES_FILE),
            expected_players: None,
            min_players: DEFAULT_MIN_PLAYERS,
            liveness_window: Duration::from_secs(DEFAULT_LIVENESS_SECS),
            shuffle_quotes: true,
        }
    }
}

/// Parse a numeric variable, falling back to `default` with a warning when
/// it is malformed
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(var = name, value = %raw, "Malformed value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(default)
}

impl AppConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let port = parse_var("BLANKDASH_PORT", DEFAULT_PORT);

        let quotes_file = std::env::var("BLANKDASH_QUOTES_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUOTES_FILE));

        let expected_players = match std::env::var("BLANKDASH_EXPECTED_PLAYERS") {
            Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "Invalid BLANKDASH_EXPECTED_PLAYERS, estimating from activity instead"
                    );
                    None
                }
            },
            _ => None,
        };

        let min_players = parse_var("BLANKDASH_MIN_PLAYERS", DEFAULT_MIN_PLAYERS).max(1);
        let mut liveness_secs = parse_var("BLANKDASH_LIVENESS_SECS", DEFAULT_LIVENESS_SECS);
        if liveness_secs > MAX_LIVENESS_SECS {
            tracing::warn!(
                value = liveness_secs,
                max = MAX_LIVENESS_SECS,
                "BLANKDASH_LIVENESS_SECS too large, capping"
            );
            liveness_secs = MAX_LIVENESS_SECS;
        }
        let shuffle_quotes = parse_flag("BLANKDASH_SHUFFLE_QUOTES", true);

        let config = Self {
            port,
            quotes_file,
            expected_players,
            min_players,
            liveness_window: Duration::from_secs(liveness_secs),
            shuffle_quotes,
        };

        tracing::info!(
            port = config.port,
            quotes_file = %config.quotes_file.display(),
            expected_players = ?config.expected_players,
            min_players = config.min_players,
            liveness_secs,
            shuffle_quotes,
            "Config loaded"
        );

        config
    }

    /// Build the player count estimator this config describes
    pub fn player_estimator(&self) -> Box<dyn PlayerCountEstimator> {
        match self.expected_players {
            Some(n) => Box::new(FixedPlayerCount::new(n)),
            None => Box::new(HeartbeatEstimator::new(
                self.liveness_window,
                self.min_players,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BLANKDASH_PORT",
        "BLANKDASH_QUOTES_FILE",
        "BLANKDASH_EXPECTED_PLAYERS",
        "BLANKDASH_MIN_PLAYERS",
        "BLANKDASH_LIVENESS_SECS",
        "BLANKDASH_SHUFFLE_QUOTES",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::from_env();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.player_estimator().expected_players(), DEFAULT_MIN_PLAYERS);
    }

    #[test]
    #[serial]
    fn test_reads_values() {
        clear_env();
        std::env::set_var("BLANKDASH_PORT", "9000");
        std::env::set_var("BLANKDASH_QUOTES_FILE", "data/quotes.json");
        std::env::set_var("BLANKDASH_EXPECTED_PLAYERS", "5");
        std::env::set_var("BLANKDASH_LIVENESS_SECS", "45");
        std::env::set_var("BLANKDASH_SHUFFLE_QUOTES", "false");

        let config = AppConfig::from_env();
        assert_eq!(config.port, 9000);
        assert_eq!(config.quotes_file, PathBuf::from("data/quotes.json"));
        assert_eq!(config.expected_players, Some(5));
        assert_eq!(config.liveness_window, Duration::from_secs(45));
        assert!(!config.shuffle_quotes);
        assert_eq!(config.player_estimator().expected_players(), 5);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_expected_players_falls_back() {
        clear_env();
        std::env::set_var("BLANKDASH_EXPECTED_PLAYERS", "lots");
        std::env::set_var("BLANKDASH_MIN_PLAYERS", "2");

        let config = AppConfig::from_env();
        assert_eq!(config.expected_players, None);
        assert_eq!(config.player_estimator().expected_players(), 2);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_expected_players_falls_back() {
        clear_env();
        std::env::set_var("BLANKDASH_EXPECTED_PLAYERS", "0");
        assert_eq!(AppConfig::from_env().expected_players, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_numbers_use_defaults() {
        clear_env();
        std::env::set_var("BLANKDASH_PORT", "eighty");
        std::env::set_var("BLANKDASH_MIN_PLAYERS", "-1");
        std::env::set_var("BLANKDASH_LIVENESS_SECS", "soon");

        let config = AppConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.min_players, DEFAULT_MIN_PLAYERS);
        assert_eq!(
            config.liveness_window,
            Duration::from_secs(DEFAULT_LIVENESS_SECS)
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_huge_liveness_window_is_capped() {
        clear_env();
        std::env::set_var("BLANKDASH_LIVENESS_SECS", u64::MAX.to_string());

        let config = AppConfig::from_env();
        assert_eq!(
            config.liveness_window,
            Duration::from_secs(MAX_LIVENESS_SECS)
        );
        let mut estimator = config.player_estimator();
        estimator.touch("alice");
        estimator.prune();
        assert_eq!(estimator.expected_players(), DEFAULT_MIN_PLAYERS);
        clear_env();
    }
}
