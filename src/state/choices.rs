//! Ballot construction.
//!
//! Several exclusion rules interact here:
//! - the truth is left out when it equals the voter's tentative answer
//! - any text the voter submitted is left out, even when another player
//!   wrote it too or it is the truth
//! - answers equal to the tentative answer are left out
//! - duplicate texts appear once
//!
//! All comparisons are on normalized text.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::types::{normalize, Submission};

/// Candidate answers for `excluded_author` in submission order, truth first
/// when present. Not shuffled.
pub fn candidate_answers(
    truth: &str,
    tentative: &str,
    submissions: &[Submission],
    excluded_author: &str,
) -> Vec<String> {
    let truth = normalize(truth);
    let tentative = normalize(tentative);

    let mut answers = Vec::new();
    // Pre-seeding with the voter's own texts keeps them off the ballot
    let mut seen: HashSet<String> = submissions
        .iter()
        .filter(|s| s.player == excluded_author)
        .map(|s| normalize(&s.answer))
        .collect();

    if truth != tentative && !seen.contains(&truth) {
        seen.insert(truth.clone());
        answers.push(truth);
    }

    for submission in submissions {
        let answer = normalize(&submission.answer);
        if answer == tentative || seen.contains(&answer) {
            continue;
        }
        seen.insert(answer.clone());
        answers.push(answer);
    }

    answers
}

/// Candidate answers in a uniformly random order
pub fn shuffled_candidates<R: Rng + ?Sized>(
    truth: &str,
    tentative: &str,
    submissions: &[Submission],
    excluded_author: &str,
    rng: &mut R,
) -> Vec<String> {
    let mut answers = candidate_answers(truth, tentative, submissions, excluded_author);
    answers.shuffle(rng);
    answers
}
