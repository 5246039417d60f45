//! Error types for word bank loading.

use std::path::PathBuf;

use hangman_core::GameError;

/// A specialized `Result` type for word bank operations.
pub type Result<T> = std::result::Result<T, WordBankError>;

/// Errors that can occur while loading a word list.
#[derive(Debug, thiserror::Error)]
pub enum WordBankError {
    // ========================================================================
    // File Errors
    // ========================================================================
    /// Word list file not found at the specified path.
    #[error("Word list not found: {path}")]
    NotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Word list file exceeds the size limit.
    #[error("Word list too large: {path} ({size_kb}KB exceeds 1024KB limit)")]
    TooLarge {
        /// Path to the oversized file.
        path: PathBuf,
        /// Actual file size in kilobytes.
        size_kb: u64,
    },

    /// Word list file is not valid UTF-8.
    #[error("Word list encoding error: {path} is not valid UTF-8")]
    Encoding {
        /// Path to the file.
        path: PathBuf,
    },

    // ========================================================================
    // Content Errors
    // ========================================================================
    /// The word list is not valid JSON of the expected shape.
    #[error("Invalid word list JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry is missing fields a round needs.
    #[error("Invalid word list entry #{index} ('{word}'): {source}")]
    InvalidEntry {
        /// Position of the entry in the list (0-indexed).
        index: usize,
        /// The entry's word, possibly blank.
        word: String,
        /// What is wrong with it.
        #[source]
        source: GameError,
    },

    /// The same word appears twice.
    #[error("Duplicate word in word list: '{word}'")]
    DuplicateWord {
        /// The repeated word.
        word: String,
    },

    /// The word list has no entries.
    #[error("Word list is empty")]
    Empty,

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WordBankError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a new `TooLarge` error.
    #[must_use]
    pub fn too_large(path: impl Into<PathBuf>, size_kb: u64) -> Self {
        Self::TooLarge {
            path: path.into(),
            size_kb,
        }
    }

    /// Creates a new `Encoding` error.
    #[must_use]
    pub fn encoding(path: impl Into<PathBuf>) -> Self {
        Self::Encoding { path: path.into() }
    }
}
