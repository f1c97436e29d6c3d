mod choices;
mod game;
mod round;
mod score;

pub use choices::{candidate_answers, shuffled_candidates};
pub use game::{Game, Table};
pub use round::{Round, RoundHost};
pub use score::Scoreboard;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Errors from driving a game past its defined lifecycle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("No quote left to play (index {index})")]
    QuotesExhausted { index: usize },
}

/// Shared application state. Every operation on the game goes through the
/// single lock around it.
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<RwLock<Game>>,
}

impl AppState {
    pub fn new(game: Game) -> Self {
        Self {
            game: Arc::new(RwLock::new(game)),
        }
    }
}
