use std::collections::HashMap;

use crate::types::{PlayerId, RankedPlayer};

/// Game-wide points, kept in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    entries: Vec<RankedPlayer>,
    index: HashMap<PlayerId, usize>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player with zero points if unseen, so players without
    /// points still show up in the standings
    pub fn register(&mut self, player: &str) {
        if self.index.contains_key(player) {
            return;
        }
        self.index.insert(player.to_string(), self.entries.len());
        self.entries.push(RankedPlayer {
            player: player.to_string(),
            points: 0,
        });
    }

    pub fn award(&mut self, player: &str) {
        self.register(player);
        if let Some(&i) = self.index.get(player) {
            self.entries[i].points += 1;
        }
    }

    pub fn points(&self, player: &str) -> Option<u32> {
        self.index.get(player).map(|&i| self.entries[i].points)
    }

    /// Players that have ever submitted an answer or been awarded a point
    pub fn players(&self) -> usize {
        self.entries.len()
    }

    /// Sorted by points descending; equal scores keep first-seen order
    pub fn standings(&self) -> Vec<RankedPlayer> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ranked: &[RankedPlayer]) -> Vec<&str> {
        ranked.iter().map(|r| r.player.as_str()).collect()
    }

    #[test]
    fn test_register_seeds_zero() {
        let mut board = Scoreboard::new();
        board.register("alice");
        board.register("alice");

        assert_eq!(board.players(), 1);
        assert_eq!(board.points("alice"), Some(0));
        assert_eq!(board.points("bob"), None);
    }

    #[test]
    fn test_award_registers_unseen_player() {
        let mut board = Scoreboard::new();
        board.award("bob");
        board.award("bob");
        assert_eq!(board.points("bob"), Some(2));
    }

    #[test]
    fn test_standings_sorted_descending() {
        let mut board = Scoreboard::new();
        board.register("alice");
        board.award("bob");
        board.award("carol");
        board.award("carol");

        let standings = board.standings();
        assert_eq!(names(&standings), vec!["carol", "bob", "alice"]);
        assert_eq!(standings[0].points, 2);
        assert_eq!(standings[2].points, 0);
    }

    #[test]
    fn test_standings_ties_keep_first_seen_order() {
        let mut board = Scoreboard::new();
        for name in ["dave", "alice", "carol", "bob"] {
            board.register(name);
        }
        board.award("carol");
        board.award("bob");

        assert_eq!(
            names(&board.standings()),
            vec!["carol", "bob", "dave", "alice"]
        );
    }
}
