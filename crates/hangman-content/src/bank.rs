//! The offline word bank.
//!
//! A word list is a JSON object with a `words` array. Each entry is a word
//! record plus the difficulty it belongs to:
//!
//! ```json
//! { "words": [
//!   { "word": "கண்", "english": "eye", "transliteration": "kan",
//!     "difficulty": "easy", "distractors": ["tree", "moon"],
//!     "distractorLetters": ["ம", "ப", "த"] }
//! ] }
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use hangman_core::segment::{letter_set, GraphemeSegmenter, Segmenter};
use hangman_core::{
    AudioData, ContentProvider, Difficulty, GameError, ImageSource, ProviderErrorKind, WordRecord,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::card;
use crate::error::{Result, WordBankError};

/// Maximum allowed word list file size in bytes (1MB).
pub const MAX_WORD_LIST_SIZE: u64 = 1024 * 1024;

const BUILTIN_WORDS: &str = include_str!("../data/words.json");

/// One word of the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    /// Difficulty tier the word is offered at.
    pub difficulty: Difficulty,
    /// The puzzle content.
    #[serde(flatten)]
    pub record: WordRecord,
}

#[derive(Debug, Deserialize)]
struct WordList {
    words: Vec<BankEntry>,
}

/// Content provider backed by a fixed word list.
///
/// Words are drawn at random among unused entries of the requested
/// difficulty. Images are generated label cards; there is no audio.
pub struct WordBank {
    entries: Vec<BankEntry>,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for WordBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordBank")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl WordBank {
    /// The word list compiled into the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded list is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_WORDS)
    }

    /// Parses and validates a word list.
    ///
    /// # Errors
    ///
    /// Returns `WordBankError::Parse` for malformed JSON,
    /// `WordBankError::InvalidEntry` for an entry a round could not use,
    /// `WordBankError::DuplicateWord` for a repeated word and
    /// `WordBankError::Empty` for a list without entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let list: WordList = serde_json::from_str(json)?;
        Self::from_entries(list.words)
    }

    /// Loads a word list file.
    ///
    /// Validates that the file exists, is at most 1MB and is UTF-8, then
    /// parses it with [`WordBank::from_json`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WordBankError::not_found(path)
            } else {
                WordBankError::Io(e)
            }
        })?;

        let file_size = metadata.len();
        if file_size > MAX_WORD_LIST_SIZE {
            return Err(WordBankError::too_large(path, file_size / 1024));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                WordBankError::encoding(path)
            } else {
                WordBankError::Io(e)
            }
        })?;

        let bank = Self::from_json(&content)?;
        info!(path = %path.display(), words = bank.len(), "Word list loaded");
        Ok(bank)
    }

    /// Builds a bank from already-parsed entries.
    pub fn from_entries(entries: Vec<BankEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(WordBankError::Empty);
        }

        let mut seen = BTreeSet::new();
        for (index, entry) in entries.iter().enumerate() {
            entry
                .record
                .validate()
                .map_err(|source| WordBankError::InvalidEntry {
                    index,
                    word: entry.record.word.clone(),
                    source,
                })?;

            if !seen.insert(entry.record.word.as_str()) {
                return Err(WordBankError::DuplicateWord {
                    word: entry.record.word.clone(),
                });
            }

            let letters = letter_set(&GraphemeSegmenter.segment(&entry.record.word));
            let colliding: Vec<&str> = entry
                .record
                .distractor_letters
                .iter()
                .map(|l| l.trim())
                .filter(|l| letters.contains(*l))
                .collect();
            if !colliding.is_empty() {
                warn!(
                    word = %entry.record.word,
                    ?colliding,
                    "Distractor letters also occur in the word and will be dropped"
                );
            }
        }

        Ok(Self {
            entries,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Fixes the random source used to pick words.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bank has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries offered at `difficulty`.
    #[must_use]
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .count()
    }

    fn pick(&self, difficulty: Difficulty, exclude: &[String]) -> hangman_core::Result<WordRecord> {
        let candidates: Vec<&BankEntry> = self
            .entries
            .iter()
            .filter(|e| e.difficulty == difficulty && !exclude.contains(&e.record.word))
            .collect();

        let mut rng = self.rng.lock().map_err(|e| {
            GameError::provider(ProviderErrorKind::Upstream, format!("word bank lock poisoned: {e}"))
        })?;
        candidates
            .choose(&mut *rng)
            .map(|entry| entry.record.clone())
            .ok_or_else(|| {
                GameError::provider(
                    ProviderErrorKind::NotFound,
                    format!("no unused {difficulty} words left"),
                )
            })
    }
}

#[async_trait]
impl ContentProvider for WordBank {
    async fn fetch_word(
        &self,
        difficulty: Difficulty,
        exclude: &[String],
    ) -> hangman_core::Result<WordRecord> {
        let record = self.pick(difficulty, exclude)?;
        debug!(word = %record.word, %difficulty, excluded = exclude.len(), "Word drawn from bank");
        Ok(record)
    }

    async fn fetch_image(&self, label: &str) -> hangman_core::Result<ImageSource> {
        if label.trim().is_empty() {
            return Err(GameError::provider(
                ProviderErrorKind::NotFound,
                "no image for a blank label",
            ));
        }
        Ok(ImageSource::encoded(card::SVG_MIME_TYPE, card::render(label)))
    }

    async fn fetch_audio(&self, word: &str) -> Option<AudioData> {
        debug!(word, "Word bank has no pronunciations");
        None
    }
}
