//! Difficulty tiers and the attempt budget bound to each.

use serde::{Deserialize, Serialize};

/// Difficulty tier chosen before a round or series.
///
/// Each tier fixes how many wrong guesses are allowed and carries a hint
/// the content provider uses to pick a suitably complex word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Short, common words and the most forgiving budget.
    Easy,
    /// Everyday words of moderate length (default).
    #[default]
    Medium,
    /// Longer words and the tightest budget.
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Maximum number of wrong guesses before the round is lost.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangman_core::Difficulty;
    ///
    /// assert_eq!(Difficulty::Easy.max_wrong_guesses(), 8);
    /// assert_eq!(Difficulty::Medium.max_wrong_guesses(), 6);
    /// assert_eq!(Difficulty::Hard.max_wrong_guesses(), 4);
    /// ```
    #[must_use]
    pub const fn max_wrong_guesses(self) -> u32 {
        match self {
            Self::Easy => 8,
            Self::Medium => 6,
            Self::Hard => 4,
        }
    }

    /// Word-complexity hint handed to the content provider.
    #[must_use]
    pub const fn complexity_hint(self) -> &'static str {
        match self {
            Self::Easy => "a very common two or three letter word a young child knows",
            Self::Medium => "a familiar everyday noun of three to five letters",
            Self::Hard => "a longer noun of five or more letters",
        }
    }

    /// Lowercase name used in config files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parses a tier name, case-insensitively.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// The attempt budget for a tier.
#[must_use]
pub const fn attempt_budget(difficulty: Difficulty) -> u32 {
    difficulty.max_wrong_guesses()
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_case_insensitive(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid difficulty '{s}': expected one of 'easy', 'medium', 'hard'"
            ))
        })
    }
}

impl Serialize for Difficulty {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
