use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoundRequest {
    #[serde(default)]
    pub player: PlayerId,
    /// Ask to move on to the next quote
    #[serde(default)]
    pub clear: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoundResponse {
    /// False when the player should go back to the round still in progress
    pub ready: bool,
    pub round_id: RoundId,
    pub round_no: u32,
    pub quote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub player: PlayerId,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub accepted: bool,
    pub all_answered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoicesQuery {
    #[serde(default)]
    pub player: PlayerId,
    /// The player's own answer
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoicesResponse {
    pub choices: Vec<String>,
    /// Set when the ballot has exactly one option
    pub auto_choice: Option<String>,
    /// Nothing to choose from; vote the own answer
    pub no_candidates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub player: PlayerId,
    pub choice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResponse {
    pub pointed: Vec<PlayerId>,
    pub all_voted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerQuery {
    #[serde(default)]
    pub player: PlayerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub results: RoundResults,
    pub standings: Vec<RankedPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub msg: String,
}

impl From<RoundEntry> for NewRoundResponse {
    fn from(entry: RoundEntry) -> Self {
        Self {
            ready: entry.ready,
            round_id: entry.round_id,
            round_no: entry.round_no,
            quote: entry.quote,
        }
    }
}

impl From<AnswerOutcome> for AnswerResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        Self {
            accepted: outcome.accepted,
            all_answered: outcome.barrier_satisfied,
        }
    }
}

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            pointed: outcome.pointed,
            all_voted: outcome.barrier_satisfied,
        }
    }
}

impl ChoicesResponse {
    pub fn new(choices: Vec<String>, single: SingleChoice) -> Self {
        let no_candidates = single == SingleChoice::NoCandidates;
        let auto_choice = match single {
            SingleChoice::AutoResolved(answer) => Some(answer),
            _ => None,
        };
        Self {
            choices,
            auto_choice,
            no_candidates,
        }
    }
}
