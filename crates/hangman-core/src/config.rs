//! Configuration types for the Hangman game.
//!
//! Settings live in an optional `hangman.json`; every field has a default
//! so an absent or partial file is fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::tournament::DEFAULT_TOTAL_ROUNDS;

/// The default config file name.
const CONFIG_FILE_NAME: &str = "hangman.json";

/// Default number of tournament rounds.
const fn default_total_rounds() -> u32 {
    DEFAULT_TOTAL_ROUNDS
}

/// Default bound on a whole round-load, in seconds.
const fn default_load_timeout() -> u64 {
    30
}

/// Upper bound on `loadTimeoutSecs`: one hour.
pub const MAX_LOAD_TIMEOUT_SECS: u64 = 3600;

/// Default broadcast buffer per event subscriber.
const fn default_event_capacity() -> usize {
    64
}

/// How a session is played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameMode {
    /// One player, rounds continue until they stop (default).
    #[default]
    Classic,
    /// Two teams alternate over a fixed number of rounds.
    Tournament,
}

impl GameMode {
    /// Parses a mode name, case-insensitively.
    fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "tournament" => Some(Self::Tournament),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GameMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_case_insensitive(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid game mode '{s}': expected one of 'classic', 'tournament'"
            ))
        })
    }
}

impl Serialize for GameMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self {
            Self::Classic => "classic",
            Self::Tournament => "tournament",
        };
        serializer.serialize_str(s)
    }
}

/// Main configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Difficulty used when the player does not pick one.
    #[serde(default)]
    pub default_difficulty: Difficulty,

    /// Classic or tournament play.
    #[serde(default)]
    pub mode: GameMode,

    /// Rounds in a tournament.
    #[serde(default = "default_total_rounds")]
    pub total_rounds: u32,

    /// Upper bound on one round-load (word plus assets), in seconds.
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,

    /// Events buffered per subscriber before the oldest are dropped.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Fixed seed for keyboard and image shuffles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,

    /// Path to a JSON word list for the offline provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_bank: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            mode: GameMode::default(),
            total_rounds: default_total_rounds(),
            load_timeout_secs: default_load_timeout(),
            event_capacity: default_event_capacity(),
            rng_seed: None,
            word_bank: None,
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `hangman.json`; returns defaults when it is absent.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from `hangman.json` in a specific directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        Self::load_from_file(&config_path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Io` if the file exists but cannot be read.
    ///
    /// Returns `GameError::ConfigParseError` if the file is not valid JSON
    /// or holds an unknown enum value.
    ///
    /// Returns `GameError::ConfigValidationError` if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| GameError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// - `total_rounds` must be greater than 0
    /// - `load_timeout_secs` must be between 1 and [`MAX_LOAD_TIMEOUT_SECS`]
    /// - `event_capacity` must be greater than 0
    /// - `word_bank`, when set, must not be blank
    pub fn validate(&self) -> Result<()> {
        if self.total_rounds == 0 {
            return Err(GameError::config_validation(
                "totalRounds must be greater than 0",
                "Set totalRounds to at least 1 in your hangman.json",
            ));
        }

        if self.load_timeout_secs == 0 {
            return Err(GameError::config_validation(
                "loadTimeoutSecs must be greater than 0",
                "Set loadTimeoutSecs to at least 1 second in your hangman.json",
            ));
        }

        if self.load_timeout_secs > MAX_LOAD_TIMEOUT_SECS {
            return Err(GameError::config_validation(
                format!(
                    "loadTimeoutSecs must be at most {MAX_LOAD_TIMEOUT_SECS}, got {}",
                    self.load_timeout_secs
                ),
                "Use a timeout of a few seconds; the default is 30",
            ));
        }

        if self.event_capacity == 0 {
            return Err(GameError::config_validation(
                "eventCapacity must be greater than 0",
                "Set eventCapacity to at least 1 in your hangman.json",
            ));
        }

        if self.word_bank.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(GameError::config_validation(
                "wordBank path must not be empty",
                "Remove wordBank from your hangman.json or point it at a word list file",
            ));
        }

        Ok(())
    }

    /// The round-load timeout as a `Duration`.
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}
