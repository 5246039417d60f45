//! Read-only snapshot of a session for renderers.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::keyboard::KeyState;
use crate::round::RoundStatus;
use crate::tournament::{SeriesResult, Team};
use crate::word::GameImage;

/// One letter slot of the target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentView {
    /// The letter, present once guessed or once the round is over.
    pub letter: Option<String>,
    /// Whether the player found this letter.
    pub revealed: bool,
}

/// Tournament progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentView {
    /// Team entitled to guess.
    pub current_team: Team,
    /// Team A's score.
    pub score_a: u32,
    /// Team B's score.
    pub score_b: u32,
    /// Current round (1-indexed).
    pub round_number: u32,
    /// Rounds in the series.
    pub total_rounds: u32,
}

/// The solution, shown once a round is decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerView {
    /// The word in Tamil script.
    pub word: String,
    /// English gloss.
    pub english: String,
    /// Romanized transliteration.
    pub transliteration: String,
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Current status.
    pub status: RoundStatus,
    /// Difficulty of the current round.
    pub difficulty: Difficulty,
    /// Round number within the session (1-indexed).
    pub round_number: u32,
    /// Target word slots, in order.
    pub segments: Vec<SegmentView>,
    /// Letters guessed so far, sorted.
    pub guessed: Vec<String>,
    /// Wrong guesses so far.
    pub wrong_guesses: u32,
    /// Attempt budget of the current difficulty.
    pub max_wrong_guesses: u32,
    /// Keys in presentation order.
    pub keyboard: Vec<KeyState>,
    /// The round's three pictures in presentation order.
    pub images: Vec<GameImage>,
    /// Whether a pronunciation can be played.
    pub has_audio: bool,
    /// Team scores and turn (tournament only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<TournamentView>,
    /// Retry prompt while in `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Final result once a tournament is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_result: Option<SeriesResult>,
    /// The solution once the round is decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerView>,
}

impl SessionView {
    /// The word with unknown letters replaced by `placeholder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangman_core::view::{SegmentView, SessionView};
    /// # use hangman_core::{Difficulty, RoundStatus};
    /// # let mut view = SessionView {
    /// #     status: RoundStatus::Playing, difficulty: Difficulty::Easy, round_number: 1,
    /// #     segments: Vec::new(), guessed: Vec::new(), wrong_guesses: 0, max_wrong_guesses: 8,
    /// #     keyboard: Vec::new(), images: Vec::new(), has_audio: false, tournament: None,
    /// #     error_message: None, series_result: None, answer: None,
    /// # };
    /// view.segments = vec![
    ///     SegmentView { letter: Some("க".to_string()), revealed: true },
    ///     SegmentView { letter: None, revealed: false },
    /// ];
    /// assert_eq!(view.masked_word("_"), "க _");
    /// ```
    #[must_use]
    pub fn masked_word(&self, placeholder: &str) -> String {
        self.segments
            .iter()
            .map(|s| s.letter.as_deref().unwrap_or(placeholder))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns `true` if the image at `index` depicts the target word.
    #[must_use]
    pub fn is_target_image(&self, index: usize) -> bool {
        self.images.get(index).is_some_and(|i| i.is_target)
    }
}
