//! Expected player count for the round barriers.
//!
//! The game never owns the player count. It asks an estimator on every
//! barrier check and tells it whenever a player shows activity.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::PlayerId;

pub trait PlayerCountEstimator: Send + Sync {
    /// How many players a barrier waits for (at least 1)
    fn expected_players(&self) -> usize;

    /// Record activity from a player
    fn touch(&mut self, _player: &str) {}

    /// Drop bookkeeping that can no longer affect the estimate
    fn prune(&mut self) {}
}

/// Static player count from configuration
#[derive(Debug, Clone, Copy)]
pub struct FixedPlayerCount(usize);

impl FixedPlayerCount {
    pub fn new(players: usize) -> Self {
        Self(players.max(1))
    }
}

impl PlayerCountEstimator for FixedPlayerCount {
    fn expected_players(&self) -> usize {
        self.0
    }
}

/// Counts players seen within a freshness window, never fewer than
/// `min_players`
#[derive(Debug, Clone)]
pub struct HeartbeatEstimator {
    last_seen: HashMap<PlayerId, Instant>,
    window: Duration,
    min_players: usize,
}

impl Default for HeartbeatEstimator {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), 3)
    }
}

impl HeartbeatEstimator {
    pub fn new(window: Duration, min_players: usize) -> Self {
        Self {
            last_seen: HashMap::new(),
            window,
            min_players: min_players.max(1),
        }
    }

    /// Record activity at a given instant
    pub fn touch_at(&mut self, player: &str, now: Instant) {
        if player.is_empty() {
            return;
        }
        self.last_seen.insert(player.to_string(), now);
    }

    /// Estimate as of a given instant
    pub fn expected_players_at(&self, now: Instant) -> usize {
        let fresh = self
            .last_seen
            .values()
            .filter(|seen| now.saturating_duration_since(**seen) < self.window)
            .count();
        fresh.max(self.min_players)
    }

    pub fn tracked(&self) -> usize {
        self.last_seen.len()
    }
}

impl PlayerCountEstimator for HeartbeatEstimator {
    fn expected_players(&self) -> usize {
        self.expected_players_at(Instant::now())
    }

    fn touch(&mut self, player: &str) {
        self.touch_at(player, Instant::now());
    }

    fn prune(&mut self) {
        let now = Instant::now();
        let keep = self.window.saturating_mul(2);
        self.last_seen
            .retain(|_, seen| now.saturating_duration_since(*seen) < keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_count_is_at_least_one() {
        assert_eq!(FixedPlayerCount::new(0).expected_players(), 1);
        assert_eq!(FixedPlayerCount::new(4).expected_players(), 4);
    }

    #[test]
    fn test_fixed_count_ignores_touch() {
        let mut fixed = FixedPlayerCount::new(2);
        fixed.touch("alice");
        fixed.touch("bob");
        fixed.touch("carol");
        assert_eq!(fixed.expected_players(), 2);
    }

    #[test]
    fn test_heartbeat_floor() {
        let mut estimator = HeartbeatEstimator::new(Duration::from_secs(30), 3);
        assert_eq!(estimator.expected_players(), 3);

        estimator.touch("alice");
        assert_eq!(estimator.expected_players(), 3);
    }

    #[test]
    fn test_heartbeat_counts_fresh_players() {
        let mut estimator = HeartbeatEstimator::new(Duration::from_secs(30), 1);
        let now = Instant::now();
        for name in ["alice", "bob", "carol", "dave"] {
            estimator.touch_at(name, now);
        }
        assert_eq!(estimator.expected_players_at(now), 4);
    }

    #[test]
    fn test_heartbeat_expires_stale_players() {
        let mut estimator = HeartbeatEstimator::new(Duration::from_secs(30), 1);
        let start = Instant::now();
        estimator.touch_at("alice", start);
        estimator.touch_at("bob", start + Duration::from_secs(20));

        assert_eq!(
            estimator.expected_players_at(start + Duration::from_secs(25)),
            2
        );

        let later = start + Duration::from_secs(40);
        assert_eq!(estimator.expected_players_at(later), 1);
        assert_eq!(
            estimator.expected_players_at(later + Duration::from_secs(30)),
            1
        );
    }

    #[test]
    fn test_heartbeat_ignores_anonymous_touch() {
        let mut estimator = HeartbeatEstimator::new(Duration::from_secs(30), 1);
        let now = Instant::now();
        estimator.touch_at("", now);
        estimator.touch_at("alice", now);
        estimator.touch_at("alice", now);
        assert_eq!(estimator.expected_players_at(now), 1);
        assert_eq!(estimator.tracked(), 1);
    }

    #[test]
    fn test_heartbeat_prune_keeps_recent() {
        let mut estimator = HeartbeatEstimator::new(Duration::from_secs(30), 1);
        estimator.touch("alice");
        estimator.prune();
        assert_eq!(estimator.tracked(), 1);
    }

    #[test]
    fn test_heartbeat_prune_with_huge_window() {
        let mut estimator = HeartbeatEstimator::new(Duration::from_secs(u64::MAX), 3);
        estimator.touch("alice");
        estimator.prune();
        assert_eq!(estimator.tracked(), 1);
        assert_eq!(estimator.expected_players(), 3);
    }
}
