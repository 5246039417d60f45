//! On-screen keyboard composition.
//!
//! The keyboard holds every letter of the target word plus the provider's
//! decoy letters, shuffled once per word record. It is composed when a
//! round's content arrives and kept with that round, so it never changes
//! while the same word is being played.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::segment::{letter_set, unique_in_order};

/// Shuffled, duplicate-free set of guessable letters for one word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    letters: Vec<String>,
}

/// A single key as presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// The letter on the key.
    pub letter: String,
    /// Whether the key was already pressed this round.
    pub disabled: bool,
}

impl Keyboard {
    /// Composes the keyboard for a target segment sequence.
    ///
    /// Decoy letters that collide with the target's letters are dropped
    /// (each letter appears once), then the whole set is shuffled with
    /// `rng`.
    pub fn compose<R>(target_segments: &[String], distractor_letters: &[String], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let targets = letter_set(target_segments);
        let decoys: Vec<String> = distractor_letters
            .iter()
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty() && !targets.contains(l))
            .collect();

        let mut letters = unique_in_order(target_segments);
        letters.extend(unique_in_order(&decoys));
        letters.shuffle(rng);

        tracing::debug!(
            keys = letters.len(),
            targets = targets.len(),
            "Keyboard composed"
        );

        Self { letters }
    }

    /// Letters in presentation order.
    #[must_use]
    pub fn letters(&self) -> &[String] {
        &self.letters
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` if the keyboard has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns `true` if `letter` is one of the keys.
    #[must_use]
    pub fn contains(&self, letter: &str) -> bool {
        self.letters.iter().any(|l| l == letter)
    }

    /// Keys in presentation order, with already-guessed ones disabled.
    #[must_use]
    pub fn key_states(&self, guessed: &BTreeSet<String>) -> Vec<KeyState> {
        self.letters
            .iter()
            .map(|letter| KeyState {
                letter: letter.clone(),
                disabled: guessed.contains(letter),
            })
            .collect()
    }
}
