use rand::Rng;
use std::collections::HashMap;

use super::choices::{candidate_answers, shuffled_candidates};
use super::GameError;
use crate::corpus::Quote;
use crate::types::*;

/// What a round needs from the game that owns it
pub trait RoundHost {
    /// Move to the next quote; called exactly once per round creation
    fn advance_quote(&mut self) -> Result<&Quote, GameError>;

    fn current_quote(&self) -> Option<&Quote>;

    /// Player count every barrier waits for
    fn expected_players(&self) -> usize;
}

/// Phase state machine for a single quote
#[derive(Debug, Clone)]
pub struct Round {
    pub id: RoundId,
    pub number: u32,
    quote: Quote,
    submissions: Vec<Submission>,
    status: HashMap<PlayerId, PlayerStatus>,
    /// A mapping from each answer to the players that voted on it, in vote order
    voters: HashMap<String, Vec<PlayerId>>,
}

impl Round {
    /// Start a round on the host's next quote
    pub fn new<H: RoundHost + ?Sized>(host: &mut H, number: u32) -> Result<Self, GameError> {
        let quote = host.advance_quote()?.clone();
        let round = Self {
            id: ulid::Ulid::new().to_string(),
            number,
            quote,
            submissions: Vec::new(),
            status: HashMap::new(),
            voters: HashMap::new(),
        };
        tracing::info!(round_id = %round.id, round_no = number, "Round created");
        Ok(round)
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Voters for an exact (normalized) answer text
    pub fn voters_for(&self, answer: &str) -> &[PlayerId] {
        self.voters
            .get(&normalize(answer))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_playing(&self, player: &str) -> bool {
        self.status.contains_key(player)
    }

    pub fn status_of(&self, player: &str) -> PlayerStatus {
        self.status.get(player).copied().unwrap_or_default()
    }

    /// Players whose status is at least `status`, sorted by name
    pub fn players_at_or_above(&self, status: PlayerStatus) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self
            .status
            .iter()
            .filter(|(_, s)| **s >= status)
            .map(|(p, _)| p.clone())
            .collect();
        players.sort();
        players
    }

    pub fn count_at_or_above(&self, status: PlayerStatus) -> usize {
        self.status.values().filter(|s| **s >= status).count()
    }

    /// Whether `expected` players have reached `status`
    pub fn barrier(&self, status: PlayerStatus, expected: usize) -> bool {
        self.count_at_or_above(status) >= expected
    }

    /// Minimum status across tracked players, or `NotAnswered` while fewer
    /// players than expected are tracked
    pub fn round_status<H: RoundHost + ?Sized>(&self, host: &H) -> PlayerStatus {
        if self.status.len() < host.expected_players() {
            return PlayerStatus::NotAnswered;
        }
        self.status
            .values()
            .copied()
            .min()
            .unwrap_or(PlayerStatus::NotAnswered)
    }

    /// Move a player forward; never backwards
    fn advance(&mut self, player: &str, to: PlayerStatus) {
        let status = self.status.entry(player.to_string()).or_default();
        if *status < to {
            *status = to;
        }
    }

    /// Record a player's guess. The first answer wins; later calls only
    /// report the barrier.
    pub fn submit_answer<H: RoundHost + ?Sized>(
        &mut self,
        host: &H,
        player: &str,
        answer: &str,
    ) -> AnswerOutcome {
        let accepted = self.status_of(player) < PlayerStatus::Answered;
        if accepted {
            self.advance(player, PlayerStatus::Answered);
            self.submissions.push(Submission {
                player: player.to_string(),
                answer: normalize(answer),
            });
            tracing::debug!(round_id = %self.id, player, "Answer recorded");
        } else {
            tracing::debug!(round_id = %self.id, player, "Repeated answer ignored");
        }

        AnswerOutcome {
            accepted,
            barrier_satisfied: self.barrier(PlayerStatus::Answered, host.expected_players()),
        }
    }

    /// Ballot for a player, shuffled
    pub fn choices(&self, player: &str, tentative: &str) -> Vec<String> {
        self.choices_with(player, tentative, &mut rand::rng())
    }

    pub fn choices_with<R: Rng + ?Sized>(
        &self,
        player: &str,
        tentative: &str,
        rng: &mut R,
    ) -> Vec<String> {
        shuffled_candidates(
            &self.quote.truth,
            tentative,
            &self.submissions,
            player,
            rng,
        )
    }

    pub fn single_choice(&self, player: &str, tentative: &str) -> SingleChoice {
        let candidates = candidate_answers(&self.quote.truth, tentative, &self.submissions, player);
        SingleChoice::from_choices(&candidates)
    }

    /// Record a vote and return who scores from it. A player votes once;
    /// repeated votes score nothing.
    pub fn submit_vote<H: RoundHost + ?Sized>(
        &mut self,
        host: &H,
        player: &str,
        choice: &str,
    ) -> VoteOutcome {
        let mut pointed = Vec::new();

        if self.status_of(player) < PlayerStatus::Chosen {
            let choice = normalize(choice);
            self.advance(player, PlayerStatus::Chosen);
            self.voters
                .entry(choice.clone())
                .or_default()
                .push(player.to_string());

            let truth = &self.quote.truth;
            if choice == *truth {
                pointed.push(player.to_string());
            }
            for submission in &self.submissions {
                if submission.player == player {
                    // Writing the truth earns a point, since it was kept off the ballot
                    if submission.answer == *truth && choice != *truth {
                        pointed.push(player.to_string());
                    }
                    continue;
                }
                // A submission matching the truth deceived nobody
                if submission.answer == choice && choice != *truth {
                    pointed.push(submission.player.clone());
                }
            }

            tracing::debug!(
                round_id = %self.id,
                player,
                pointed = pointed.len(),
                "Vote recorded"
            );
        } else {
            tracing::debug!(round_id = %self.id, player, "Repeated vote ignored");
        }

        VoteOutcome {
            pointed,
            barrier_satisfied: self.barrier(PlayerStatus::Chosen, host.expected_players()),
        }
    }

    /// Acknowledge that `player` has seen the results and return them.
    /// Duplicate submission texts are grouped under one entry.
    pub fn results(&mut self, player: &str) -> RoundResults {
        self.advance(player, PlayerStatus::SeenResult);

        let mut answers: Vec<VotedAnswer> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for submission in &self.submissions {
            match positions.get(submission.answer.as_str()) {
                Some(&i) => answers[i].authors.push(submission.player.clone()),
                None => {
                    positions.insert(submission.answer.as_str(), answers.len());
                    answers.push(VotedAnswer {
                        answer: submission.answer.clone(),
                        authors: vec![submission.player.clone()],
                        voters: self.voters_for(&submission.answer).to_vec(),
                        is_truth: submission.answer == self.quote.truth,
                    });
                }
            }
        }

        RoundResults {
            round_id: self.id.clone(),
            round_no: self.number,
            quote_text: self.quote.text.clone(),
            truth: self.quote.truth.clone(),
            answers,
            truth_voters: self.voters_for(&self.quote.truth).to_vec(),
        }
    }
}
