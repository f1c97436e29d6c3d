use super::round::{Round, RoundHost};
use super::score::Scoreboard;
use super::{AppState, GameError};
use crate::corpus::{Quote, QuoteDeck};
use crate::liveness::PlayerCountEstimator;
use crate::types::*;

/// The parts of a game a round is allowed to touch: the quote deck and the
/// player count
pub struct Table {
    deck: QuoteDeck,
    players: Box<dyn PlayerCountEstimator>,
}

impl Table {
    pub fn new(deck: QuoteDeck, players: Box<dyn PlayerCountEstimator>) -> Self {
        Self { deck, players }
    }

    pub fn deck(&self) -> &QuoteDeck {
        &self.deck
    }

    fn touch(&mut self, player: &str) {
        self.players.touch(player);
    }
}

impl RoundHost for Table {
    fn advance_quote(&mut self) -> Result<&Quote, GameError> {
        self.deck.next()
    }

    fn current_quote(&self) -> Option<&Quote> {
        self.deck.current()
    }

    fn expected_players(&self) -> usize {
        self.players.expected_players()
    }
}

/// Owns the sequence of rounds and the points across them
pub struct Game {
    pub id: String,
    table: Table,
    round: Round,
    scores: Scoreboard,
}

impl Game {
    /// Create a game and start its first round
    pub fn new(
        deck: QuoteDeck,
        players: Box<dyn PlayerCountEstimator>,
    ) -> Result<Self, GameError> {
        let mut table = Table::new(deck, players);
        let round = Round::new(&mut table, 1)?;
        let game = Self {
            id: ulid::Ulid::new().to_string(),
            table,
            round,
            scores: Scoreboard::new(),
        };
        tracing::info!(
            game_id = %game.id,
            quotes = game.table.deck.total(),
            "Game created"
        );
        Ok(game)
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn current_quote(&self) -> &Quote {
        self.round.quote()
    }

    pub fn expected_players(&self) -> usize {
        self.table.expected_players()
    }

    /// Handle a player arriving at the answer screen. With `clear` set, a
    /// player from the current round asks for the next one; that only
    /// happens once every expected player has seen the results.
    ///
    /// Returns false when the current round is still running, so the caller
    /// can send the player back to it.
    pub fn new_round(&mut self, player: &str, clear: bool) -> Result<bool, GameError> {
        if clear && self.round.is_playing(player) {
            let expected = self.table.expected_players();
            if !self.round.barrier(PlayerStatus::SeenResult, expected) {
                tracing::debug!(
                    player,
                    seen = self.round.count_at_or_above(PlayerStatus::SeenResult),
                    expected,
                    "Round not finished, staying"
                );
                return Ok(false);
            }
            let next = Round::new(&mut self.table, self.round.number + 1)?;
            tracing::info!(
                player,
                retired = %self.round.id,
                round_id = %next.id,
                "Advanced to next round"
            );
            self.round = next;
        }
        if !player.is_empty() {
            self.table.touch(player);
        }
        Ok(true)
    }

    pub fn submit_answer(&mut self, player: &str, answer: &str) -> AnswerOutcome {
        self.table.touch(player);
        self.scores.register(player);
        self.round.submit_answer(&self.table, player, answer)
    }

    pub fn choices(&self, player: &str, tentative: &str) -> Vec<String> {
        self.round.choices(player, tentative)
    }

    pub fn single_choice(&self, player: &str, tentative: &str) -> SingleChoice {
        self.round.single_choice(player, tentative)
    }

    pub fn submit_vote(&mut self, player: &str, choice: &str) -> VoteOutcome {
        self.table.touch(player);
        self.scores.register(player);
        let outcome = self.round.submit_vote(&self.table, player, choice);
        for pointed in &outcome.pointed {
            self.scores.award(pointed);
        }
        if !outcome.pointed.is_empty() {
            tracing::info!(player, pointed = ?outcome.pointed, "Points awarded");
        }
        outcome
    }

    pub fn results(&mut self, player: &str) -> RoundResults {
        self.round.results(player)
    }

    pub fn standings(&self) -> Vec<RankedPlayer> {
        self.scores.standings()
    }

    pub fn points(&self, player: &str) -> Option<u32> {
        self.scores.points(player)
    }

    /// Every quote has been played and everyone has seen the last results
    pub fn is_over(&self) -> bool {
        self.table.deck.remaining() == 0
            && self
                .round
                .barrier(PlayerStatus::SeenResult, self.table.expected_players())
    }

    pub fn status(&self, player: &str) -> GameStatus {
        GameStatus {
            round_id: self.round.id.clone(),
            round_no: self.round.number,
            quote_text: self.round.quote().text.clone(),
            expected_players: self.table.expected_players(),
            round_status: self.round.round_status(&self.table),
            player_status: self.round.status_of(player),
            answered: self.round.count_at_or_above(PlayerStatus::Answered),
            chosen: self.round.count_at_or_above(PlayerStatus::Chosen),
            seen_result: self.round.count_at_or_above(PlayerStatus::SeenResult),
            quotes_remaining: self.table.deck.remaining(),
            registered_players: self.scores.players(),
            server_now: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn prune_liveness(&mut self) {
        self.table.players.prune();
    }
}

impl AppState {
    pub async fn current_quote(&self) -> Quote {
        self.game.read().await.current_quote().clone()
    }

    /// Run `Game::new_round` and report the round the player ends up in
    pub async fn new_round(&self, player: &str, clear: bool) -> Result<RoundEntry, GameError> {
        let mut game = self.game.write().await;
        let ready = game.new_round(player, clear)?;
        let round = game.round();
        Ok(RoundEntry {
            ready,
            round_id: round.id.clone(),
            round_no: round.number,
            quote: round.quote().text.clone(),
        })
    }

    pub async fn submit_answer(&self, player: &str, answer: &str) -> AnswerOutcome {
        self.game.write().await.submit_answer(player, answer)
    }

    pub async fn choices(&self, player: &str, tentative: &str) -> (Vec<String>, SingleChoice) {
        let game = self.game.read().await;
        (
            game.choices(player, tentative),
            game.single_choice(player, tentative),
        )
    }

    pub async fn submit_vote(&self, player: &str, choice: &str) -> VoteOutcome {
        self.game.write().await.submit_vote(player, choice)
    }

    /// Results for the current round plus standings from the same snapshot
    pub async fn results(&self, player: &str) -> (RoundResults, Vec<RankedPlayer>) {
        let mut game = self.game.write().await;
        let results = game.results(player);
        (results, game.standings())
    }

    pub async fn standings(&self) -> Vec<RankedPlayer> {
        self.game.read().await.standings()
    }

    pub async fn status(&self, player: &str) -> GameStatus {
        self.game.read().await.status(player)
    }

    pub async fn prune_liveness(&self) {
        self.game.write().await.prune_liveness();
    }
}
