//! Evaluating a single letter guess against the target word.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Whether a guessed letter occurs in the target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The letter is part of the word.
    Correct,
    /// The letter is not part of the word.
    Incorrect,
}

impl GuessOutcome {
    /// Returns `true` for [`GuessOutcome::Correct`].
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Result of evaluating one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Whether the letter is in the word.
    pub outcome: GuessOutcome,
    /// Whether every letter of the word has now been guessed.
    pub word_complete: bool,
}

/// Evaluates `letter` against the target segments.
///
/// Matching is by set membership, so a letter that occurs twice in the
/// word is satisfied by one guess. `guessed_so_far` is not modified.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use hangman_core::guess::{evaluate, GuessOutcome};
///
/// let target = vec!["க".to_string(), "ண்".to_string()];
/// let mut guessed = BTreeSet::new();
///
/// let first = evaluate("க", &target, &guessed);
/// assert_eq!(first.outcome, GuessOutcome::Correct);
/// assert!(!first.word_complete);
///
/// guessed.insert("க".to_string());
/// let second = evaluate("ண்", &target, &guessed);
/// assert!(second.word_complete);
/// ```
#[must_use]
pub fn evaluate(letter: &str, target: &[String], guessed_so_far: &BTreeSet<String>) -> Evaluation {
    let outcome = if target.iter().any(|s| s == letter) {
        GuessOutcome::Correct
    } else {
        GuessOutcome::Incorrect
    };

    let word_complete = target
        .iter()
        .all(|s| s == letter || guessed_so_far.contains(s));

    Evaluation {
        outcome,
        word_complete,
    }
}

/// Returns `true` if every segment of `target` is in `guessed`.
#[must_use]
pub fn is_word_complete(target: &[String], guessed: &BTreeSet<String>) -> bool {
    target.iter().all(|s| guessed.contains(s))
}
