//! Error types for the Hangman game core.
//!
//! This module defines the error hierarchy for round loading, guess
//! handling, state transitions and configuration loading.

use std::path::PathBuf;

/// A specialized `Result` type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// The one message shown to the player whenever a round fails to load.
///
/// Network failures and malformed content collapse to the same prompt; the
/// detailed cause is only logged.
pub const LOAD_FAILED_MESSAGE: &str =
    "Something went wrong while preparing the puzzle. Please try again.";

/// Errors that can occur while running a game session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    // ========================================================================
    // Content Provider Errors
    // ========================================================================
    /// A word or image request failed, or returned content of the wrong shape.
    ///
    /// Fatal to the current round-load.
    #[error("Content provider error ({kind}): {message}")]
    Provider {
        /// What went wrong upstream.
        kind: ProviderErrorKind,
        /// Detail for logs; never shown to the player.
        message: String,
    },

    // ========================================================================
    // Guess Errors
    // ========================================================================
    /// A guess was rejected without touching round state.
    #[error("Guess rejected: {reason}")]
    InvalidGuess {
        /// Why the guess was rejected.
        reason: InvalidGuessReason,
    },

    // ========================================================================
    // State Machine Errors
    // ========================================================================
    /// Invalid state transition attempted.
    #[error("Invalid state transition: cannot go from {from} to {to}")]
    InvalidStateTransition {
        /// The current state.
        from: String,
        /// The attempted target state.
        to: String,
    },

    /// A load result arrived for a round that has since been superseded.
    #[error("Stale result for round {round} (current round is {current})")]
    StaleRound {
        /// Identity of the round the result belongs to.
        round: u64,
        /// Identity of the round currently in flight.
        current: u64,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your hangman.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Categories of content provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The provider could not be reached.
    Network,
    /// The provider answered with an error.
    Upstream,
    /// The provider answered, but the payload is missing required fields.
    InvalidContent,
    /// Nothing suitable was found (no image, no unused word).
    NotFound,
    /// The round-load did not finish in time.
    Timeout,
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Upstream => write!(f, "upstream"),
            Self::InvalidContent => write!(f, "invalid_content"),
            Self::NotFound => write!(f, "not_found"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// Reasons a guess can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGuessReason {
    /// The round is not in `Playing`.
    NotPlaying,
    /// The letter was already guessed this round.
    AlreadyGuessed,
    /// The submitted letter is empty.
    Empty,
    /// The input is more than one letter.
    NotALetter,
}

impl std::fmt::Display for InvalidGuessReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPlaying => write!(f, "round is not being played"),
            Self::AlreadyGuessed => write!(f, "letter already guessed"),
            Self::Empty => write!(f, "empty letter"),
            Self::NotALetter => write!(f, "not a single letter"),
        }
    }
}

impl GameError {
    /// Creates a new `Provider` error.
    #[must_use]
    pub fn provider(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self::Provider {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `Provider` error for schema-invalid content.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::provider(ProviderErrorKind::InvalidContent, message)
    }

    /// Creates a new `InvalidGuess` error.
    #[must_use]
    pub const fn invalid_guess(reason: InvalidGuessReason) -> Self {
        Self::InvalidGuess { reason }
    }

    /// Creates a new `InvalidStateTransition` error.
    #[must_use]
    pub fn invalid_transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Creates a new `StaleRound` error.
    #[must_use]
    pub const fn stale_round(round: u64, current: u64) -> Self {
        Self::StaleRound { round, current }
    }

    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Returns `true` if retrying the same request may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Provider {
                kind: ProviderErrorKind::Network
                    | ProviderErrorKind::Upstream
                    | ProviderErrorKind::Timeout,
                ..
            }
        )
    }
}
