//! Round state machine for the Hangman game.
//!
//! This module owns the status of the current round, the letters guessed
//! so far and the wrong-guess counter, and enforces which transitions are
//! legal between them.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::difficulty::Difficulty;
use crate::error::{GameError, InvalidGuessReason, Result};
use crate::guess::{evaluate, Evaluation, GuessOutcome};

// ============================================================================
// RoundStatus
// ============================================================================

/// Current status of the game.
///
/// The status transitions through these states:
/// - `Idle` -> `DifficultySelect` -> `Loading`
/// - `Loading` -> `Playing` (content arrived) or `Error` (fetch failed)
/// - `Error` -> `Loading` (manual retry)
/// - `Playing` -> `Won` | `Lost`
/// - `Won` | `Lost` -> `Loading` (next round) or `SeriesOver` (tournament done)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Nothing has started yet.
    #[default]
    Idle,
    /// The player is choosing a difficulty.
    DifficultySelect,
    /// Round content is being fetched.
    Loading,
    /// The player is guessing letters.
    Playing,
    /// Every letter of the word was found.
    Won,
    /// The wrong-guess budget ran out.
    Lost,
    /// Round content could not be fetched.
    Error,
    /// The last round of a tournament has finished.
    SeriesOver,
}

impl RoundStatus {
    /// Returns `true` if the round has been decided.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangman_core::RoundStatus;
    ///
    /// assert!(RoundStatus::Won.is_round_over());
    /// assert!(RoundStatus::Lost.is_round_over());
    /// assert!(!RoundStatus::Playing.is_round_over());
    /// ```
    #[must_use]
    pub const fn is_round_over(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Returns `true` if a new round may be started from this status.
    #[must_use]
    pub const fn can_start_round(&self) -> bool {
        matches!(
            self,
            Self::Idle | Self::DifficultySelect | Self::Error | Self::Won | Self::Lost
        )
    }

    /// Returns `true` if a difficulty may be (re)chosen from this status.
    #[must_use]
    pub const fn can_select_difficulty(&self) -> bool {
        matches!(
            self,
            Self::Idle
                | Self::DifficultySelect
                | Self::Error
                | Self::Won
                | Self::Lost
                | Self::SeriesOver
        )
    }
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::DifficultySelect => "difficulty_select",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Error => "error",
            Self::SeriesOver => "series_over",
        };
        f.write_str(name)
    }
}

// ============================================================================
// GuessResult
// ============================================================================

/// What an accepted guess did to the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    /// The letter that was guessed.
    pub letter: String,
    /// Correctness and completion of the word.
    pub evaluation: Evaluation,
    /// Wrong guesses so far, including this one.
    pub wrong_guesses: u32,
    /// Status after the guess (`Playing`, `Won` or `Lost`).
    pub status: RoundStatus,
}

// ============================================================================
// RoundState
// ============================================================================

/// State of the round in flight.
///
/// Guessed letters only grow within a round and the wrong-guess counter
/// only goes up; both reset when a new round starts.
#[derive(Debug, Clone)]
pub struct RoundState {
    status: RoundStatus,
    round_id: u64,
    difficulty: Difficulty,
    target: Vec<String>,
    guessed: BTreeSet<String>,
    wrong_guesses: u32,
    error_message: Option<String>,
    started_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    /// Creates a new `RoundState` in the `Idle` status.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangman_core::{RoundState, RoundStatus};
    ///
    /// let state = RoundState::new();
    /// assert_eq!(state.status(), RoundStatus::Idle);
    /// assert_eq!(state.wrong_guesses(), 0);
    /// assert!(state.guessed().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            status: RoundStatus::Idle,
            round_id: 0,
            difficulty: Difficulty::default(),
            target: Vec::new(),
            guessed: BTreeSet::new(),
            wrong_guesses: 0,
            error_message: None,
            started_at: now,
            updated_at: now,
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.status
    }

    /// Identity of the most recently started round (0 before the first).
    #[must_use]
    pub const fn round_id(&self) -> u64 {
        self.round_id
    }

    /// Difficulty of the current round.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Target segment sequence (empty until the round is playable).
    #[must_use]
    pub fn target(&self) -> &[String] {
        &self.target
    }

    /// Letters guessed so far this round.
    #[must_use]
    pub const fn guessed(&self) -> &BTreeSet<String> {
        &self.guessed
    }

    /// Wrong guesses so far this round.
    #[must_use]
    pub const fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    /// The attempt budget of the current difficulty.
    #[must_use]
    pub const fn max_wrong_guesses(&self) -> u32 {
        self.difficulty.max_wrong_guesses()
    }

    /// Wrong guesses still allowed before the round is lost.
    #[must_use]
    pub const fn remaining_attempts(&self) -> u32 {
        self.max_wrong_guesses().saturating_sub(self.wrong_guesses)
    }

    /// Message to show while in `Error`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// When the current round started loading.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the state last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` if `segment` has been guessed.
    #[must_use]
    pub fn is_revealed(&self, segment: &str) -> bool {
        self.guessed.contains(segment)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn transition(&mut self, to: RoundStatus) {
        tracing::debug!(from = %self.status, to = %to, round = self.round_id, "Round transition");
        self.status = to;
        self.touch();
    }

    fn ensure_current(&self, round_id: u64) -> Result<()> {
        if round_id == self.round_id {
            Ok(())
        } else {
            Err(GameError::stale_round(round_id, self.round_id))
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Moves to `DifficultySelect`.
    pub fn select_difficulty(&mut self) -> Result<()> {
        if !self.status.can_select_difficulty() {
            return Err(GameError::invalid_transition(
                self.status,
                RoundStatus::DifficultySelect,
            ));
        }
        self.transition(RoundStatus::DifficultySelect);
        Ok(())
    }

    /// Starts a new round and returns its identity.
    ///
    /// Valid from `Idle`, `DifficultySelect`, `Error`, `Won` and `Lost`.
    /// Clears guessed letters, the wrong-guess counter, the target and any
    /// error message, then enters `Loading`.
    pub fn start_round(&mut self, difficulty: Difficulty) -> Result<u64> {
        if !self.status.can_start_round() {
            return Err(GameError::invalid_transition(self.status, RoundStatus::Loading));
        }

        self.round_id += 1;
        self.difficulty = difficulty;
        self.target.clear();
        self.guessed.clear();
        self.wrong_guesses = 0;
        self.error_message = None;
        self.started_at = Utc::now();
        self.transition(RoundStatus::Loading);
        Ok(self.round_id)
    }

    /// Content for `round_id` arrived: `Loading` -> `Playing`.
    pub fn begin_play(&mut self, round_id: u64, target: Vec<String>) -> Result<()> {
        self.ensure_current(round_id)?;
        if self.status != RoundStatus::Loading {
            return Err(GameError::invalid_transition(self.status, RoundStatus::Playing));
        }
        if target.is_empty() {
            return Err(GameError::invalid_content("target word has no letters"));
        }

        self.target = target;
        self.transition(RoundStatus::Playing);
        Ok(())
    }

    /// Content for `round_id` could not be fetched: `Loading` -> `Error`.
    pub fn fail_load(&mut self, round_id: u64, message: impl Into<String>) -> Result<()> {
        self.ensure_current(round_id)?;
        if self.status != RoundStatus::Loading {
            return Err(GameError::invalid_transition(self.status, RoundStatus::Error));
        }

        self.target.clear();
        self.error_message = Some(message.into());
        self.transition(RoundStatus::Error);
        Ok(())
    }

    /// Applies a letter guess.
    ///
    /// Rejected guesses (wrong status, empty input, more than one letter, or
    /// a repeated letter) leave the state untouched.
    pub fn submit_guess(&mut self, letter: &str) -> Result<GuessResult> {
        if self.status != RoundStatus::Playing {
            return Err(GameError::invalid_guess(InvalidGuessReason::NotPlaying));
        }
        let letter = letter.trim();
        if letter.is_empty() {
            return Err(GameError::invalid_guess(InvalidGuessReason::Empty));
        }
        if letter.graphemes(true).nth(1).is_some() {
            return Err(GameError::invalid_guess(InvalidGuessReason::NotALetter));
        }
        if self.guessed.contains(letter) {
            return Err(GameError::invalid_guess(InvalidGuessReason::AlreadyGuessed));
        }

        let evaluation = evaluate(letter, &self.target, &self.guessed);
        self.guessed.insert(letter.to_owned());

        if evaluation.outcome == GuessOutcome::Incorrect {
            self.wrong_guesses += 1;
        }

        if evaluation.word_complete {
            self.transition(RoundStatus::Won);
        } else if self.wrong_guesses >= self.max_wrong_guesses() {
            self.transition(RoundStatus::Lost);
        } else {
            self.touch();
        }

        Ok(GuessResult {
            letter: letter.to_owned(),
            evaluation,
            wrong_guesses: self.wrong_guesses,
            status: self.status,
        })
    }

    /// Ends the series after a decided round: `Won` | `Lost` -> `SeriesOver`.
    pub fn finish_series(&mut self) -> Result<()> {
        if !self.status.is_round_over() {
            return Err(GameError::invalid_transition(
                self.status,
                RoundStatus::SeriesOver,
            ));
        }
        self.transition(RoundStatus::SeriesOver);
        Ok(())
    }

    /// Drops back to `Idle` from anywhere.
    ///
    /// The round identity advances, so results still in flight for the
    /// abandoned round are treated as stale.
    pub fn abandon(&mut self) {
        self.round_id += 1;
        self.target.clear();
        self.guessed.clear();
        self.wrong_guesses = 0;
        self.error_message = None;
        self.transition(RoundStatus::Idle);
    }
}

// ============================================================================
// Tests
// ============================================================================
