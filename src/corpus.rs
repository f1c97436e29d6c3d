//! Quote corpus loading and the deck that hands quotes to rounds.
//!
//! The corpus is a JSON array where every entry is either an object
//! `{"text": "...", "truth": "..."}` or a two-element `["text", "truth"]` pair.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::state::GameError;
use crate::types::normalize;

/// A fill-in-the-blank text together with its correct answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    /// Stored normalized so comparisons never re-normalize
    pub truth: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, truth: &str) -> Self {
        Self {
            text: text.into(),
            truth: normalize(truth),
        }
    }
}

/// Errors that can occur while loading the corpus
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Failed to read quotes file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse quotes file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Quotes file contains no quotes")]
    Empty,

    #[error("Invalid quote at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuote {
    Object { text: String, truth: String },
    Pair(String, String),
}

/// Parse a corpus from its JSON source
pub fn parse_quotes(source: &str) -> Result<Vec<Quote>, CorpusError> {
    let raw: Vec<RawQuote> = serde_json::from_str(source)?;
    if raw.is_empty() {
        return Err(CorpusError::Empty);
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let (text, truth) = match entry {
                RawQuote::Object { text, truth } => (text, truth),
                RawQuote::Pair(text, truth) => (text, truth),
            };
            if text.trim().is_empty() {
                return Err(CorpusError::InvalidEntry {
                    index,
                    reason: "empty text".to_string(),
                });
            }
            if truth.trim().is_empty() {
                return Err(CorpusError::InvalidEntry {
                    index,
                    reason: "empty truth".to_string(),
                });
            }
            Ok(Quote::new(text, &truth))
        })
        .collect()
}

/// Load the corpus from a JSON file
pub fn load_quotes(path: impl AsRef<Path>) -> Result<Vec<Quote>, CorpusError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let quotes = parse_quotes(&source)?;
    tracing::info!(count = quotes.len(), path = %path.display(), "Loaded quotes");
    Ok(quotes)
}

/// Ordered quote sequence with a cursor that only moves forward.
///
/// The cursor starts before the first quote; every round creation calls
/// [`QuoteDeck::next`] exactly once.
#[derive(Debug, Clone)]
pub struct QuoteDeck {
    quotes: Vec<Quote>,
    cursor: Option<usize>,
}

impl QuoteDeck {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            cursor: None,
        }
    }

    /// Deck with a uniformly random play order
    pub fn shuffled(mut quotes: Vec<Quote>) -> Self {
        quotes.shuffle(&mut rand::rng());
        Self::new(quotes)
    }

    /// Advance to the next quote
    pub fn next(&mut self) -> Result<&Quote, GameError> {
        let index = self.cursor.map_or(0, |i| i + 1);
        if index >= self.quotes.len() {
            return Err(GameError::QuotesExhausted { index });
        }
        self.cursor = Some(index);
        Ok(&self.quotes[index])
    }

    pub fn current(&self) -> Option<&Quote> {
        self.cursor.and_then(|i| self.quotes.get(i))
    }

    /// Quotes not yet played
    pub fn remaining(&self) -> usize {
        let played = self.cursor.map_or(0, |i| i + 1);
        self.quotes.len().saturating_sub(played)
    }

    /// Quotes in the deck, played or not
    pub fn total(&self) -> usize {
        self.quotes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_quote_truth_is_normalized() {
        let quote = Quote::new("All that glitters is not ___", "  Gold ");
        assert_eq!(quote.truth, "gold");
        assert_eq!(quote.text, "All that glitters is not ___");
    }

    #[test]
    fn test_parse_objects_and_pairs() {
        let quotes = parse_quotes(
            r#"[{"text": "Time is ___", "truth": "Money"}, ["A penny saved is a penny ___", "EARNED"]]"#,
        )
        .unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].truth, "money");
        assert_eq!(quotes[1].text, "A penny saved is a penny ___");
        assert_eq!(quotes[1].truth, "earned");
    }

    #[test]
    fn test_parse_rejects_empty_corpus() {
        assert!(matches!(parse_quotes("[]"), Err(CorpusError::Empty)));
    }

    #[test]
    fn test_parse_rejects_blank_truth() {
        let result = parse_quotes(r#"[["ok", "fine"], ["text", "   "]]"#);
        match result {
            Err(CorpusError::InvalidEntry { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("truth"));
            }
            other => panic!("Expected InvalidEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_quotes("{not json"),
            Err(CorpusError::Parse(_))
        ));
    }

    #[test]
    fn test_load_quotes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[["The early bird gets the ___", "Worm"]]"#).unwrap();

        let quotes = load_quotes(file.path()).unwrap();
        assert_eq!(quotes, vec![Quote::new("The early bird gets the ___", "worm")]);
    }

    #[test]
    fn test_load_quotes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_quotes(dir.path().join("missing.json"));
        assert!(matches!(result, Err(CorpusError::Io(_))));
    }

    #[test]
    fn test_deck_advances_in_order() {
        let mut deck = QuoteDeck::new(vec![Quote::new("a", "1"), Quote::new("b", "2")]);
        assert!(deck.current().is_none());
        assert_eq!(deck.remaining(), 2);

        assert_eq!(deck.next().unwrap().text, "a");
        assert_eq!(deck.current().unwrap().text, "a");
        assert_eq!(deck.remaining(), 1);

        assert_eq!(deck.next().unwrap().text, "b");
        assert_eq!(deck.current().unwrap().truth, "2");
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_deck_exhaustion_keeps_cursor() {
        let mut deck = QuoteDeck::new(vec![Quote::new("a", "1")]);
        deck.next().unwrap();

        let err = deck.next().unwrap_err();
        assert!(matches!(err, GameError::QuotesExhausted { index: 1 }));
        assert_eq!(deck.current().unwrap().text, "a");
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_shuffled_deck_keeps_all_quotes() {
        let quotes: Vec<Quote> = (0..20).map(|i| Quote::new(format!("q{i}"), "t")).collect();
        let mut deck = QuoteDeck::shuffled(quotes.clone());
        assert_eq!(deck.total(), 20);

        let mut seen = Vec::new();
        while let Ok(q) = deck.next() {
            seen.push(q.text.clone());
        }
        seen.sort();
        let mut expected: Vec<String> = quotes.into_iter().map(|q| q.text).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }
}
