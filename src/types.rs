use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type PlayerId = String;
pub type RoundId = String;

/// Normalize text for comparison (trim whitespace, lowercase)
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A player's progress marker within a round. Ordered: a player's status
/// only ever moves forward.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    #[default]
    NotAnswered,
    Answered,
    Chosen,
    SeenResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub player: PlayerId,
    /// Stored normalized
    pub answer: String,
}

/// One distinct answer text with everyone who wrote it and everyone who
/// voted for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VotedAnswer {
    pub answer: String,
    pub authors: Vec<PlayerId>,
    pub voters: Vec<PlayerId>,
    /// The submission text matches the truth
    pub is_truth: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundResults {
    pub round_id: RoundId,
    pub round_no: u32,
    pub quote_text: String,
    pub truth: String,
    pub answers: Vec<VotedAnswer>,
    pub truth_voters: Vec<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedPlayer {
    pub player: PlayerId,
    pub points: u32,
}

/// Where a player lands after arriving at the answer screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEntry {
    /// False when the player should go back to the round still in progress
    pub ready: bool,
    pub round_id: RoundId,
    pub round_no: u32,
    pub quote: String,
}

/// Outcome of an answer submission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// False when the player had already answered this round
    pub accepted: bool,
    /// Enough players have answered to open voting
    pub barrier_satisfied: bool,
}

/// Outcome of a vote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Players that earned a point from this vote (empty on a repeated vote)
    pub pointed: Vec<PlayerId>,
    /// Enough players have voted to show results
    pub barrier_satisfied: bool,
}

/// Result of asking whether a player's ballot is degenerate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleChoice {
    /// Exactly one candidate; the vote can be cast without asking
    AutoResolved(String),
    /// No candidates at all; the caller should vote the tentative answer
    NoCandidates,
    /// Two or more candidates; present the ballot
    Ballot,
}

impl SingleChoice {
    pub fn from_choices(choices: &[String]) -> Self {
        match choices {
            [] => SingleChoice::NoCandidates,
            [only] => SingleChoice::AutoResolved(only.clone()),
            _ => SingleChoice::Ballot,
        }
    }

    /// The forced answer, or an empty string when there is none
    pub fn answer(&self) -> &str {
        match self {
            SingleChoice::AutoResolved(answer) => answer,
            _ => "",
        }
    }

    pub fn is_auto_resolved(&self) -> bool {
        matches!(self, SingleChoice::AutoResolved(_))
    }
}

/// Point-in-time view of the game for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatus {
    pub round_id: RoundId,
    pub round_no: u32,
    pub quote_text: String,
    pub expected_players: usize,
    pub round_status: PlayerStatus,
    pub player_status: PlayerStatus,
    pub answered: usize,
    pub chosen: usize,
    pub seen_result: usize,
    pub quotes_remaining: usize,
    /// Players on the scoreboard across all rounds
    pub registered_players: usize,
    pub server_now: String,
}
