//! Puzzle payload types: the word record, its illustrations and audio.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Number of decoy image labels every word record must carry.
pub const DISTRACTOR_LABEL_COUNT: usize = 2;

/// Number of images shown per round (the target plus its decoys).
pub const IMAGES_PER_ROUND: usize = DISTRACTOR_LABEL_COUNT + 1;

/// The puzzle fetched from the content provider for one round.
///
/// Immutable once fetched; a new round replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    /// The target word in Tamil script.
    pub word: String,

    /// English gloss of the target word (also the target image label).
    pub english: String,

    /// Romanized transliteration of the target word.
    pub transliteration: String,

    /// Decoy image labels: English nouns different from `english`.
    pub distractors: Vec<String>,

    /// Decoy keyboard letters, supposed to be absent from the target word.
    pub distractor_letters: Vec<String>,
}

impl WordRecord {
    /// Checks that the record has every field a round needs.
    ///
    /// A record failing this check is treated as a provider failure, not
    /// patched up with fallbacks.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Provider` with kind `InvalidContent` when:
    /// - `word`, `english` or `transliteration` is blank
    /// - there are not exactly two distractor labels, or one is blank
    /// - a distractor label repeats the target gloss or the other decoy
    /// - `distractor_letters` is empty
    pub fn validate(&self) -> Result<()> {
        if self.word.trim().is_empty() {
            return Err(GameError::invalid_content("word record has an empty word"));
        }
        if self.english.trim().is_empty() {
            return Err(GameError::invalid_content(format!(
                "word '{}' has no English gloss",
                self.word
            )));
        }
        if self.transliteration.trim().is_empty() {
            return Err(GameError::invalid_content(format!(
                "word '{}' has no transliteration",
                self.word
            )));
        }
        if self.distractors.len() != DISTRACTOR_LABEL_COUNT {
            return Err(GameError::invalid_content(format!(
                "word '{}' has {} distractor labels, expected {DISTRACTOR_LABEL_COUNT}",
                self.word,
                self.distractors.len()
            )));
        }

        let gloss = self.english.trim().to_lowercase();
        let mut seen = vec![gloss];
        for label in &self.distractors {
            let label = label.trim().to_lowercase();
            if label.is_empty() {
                return Err(GameError::invalid_content(format!(
                    "word '{}' has a blank distractor label",
                    self.word
                )));
            }
            if seen.contains(&label) {
                return Err(GameError::invalid_content(format!(
                    "word '{}' repeats image label '{label}'",
                    self.word
                )));
            }
            seen.push(label);
        }

        if self.distractor_letters.iter().all(|l| l.trim().is_empty()) {
            return Err(GameError::invalid_content(format!(
                "word '{}' has no distractor letters",
                self.word
            )));
        }

        Ok(())
    }

    /// Labels to fetch images for, target first.
    #[must_use]
    pub fn image_labels(&self) -> Vec<(&str, bool)> {
        std::iter::once((self.english.as_str(), true))
            .chain(self.distractors.iter().map(|d| (d.as_str(), false)))
            .collect()
    }
}

/// Opaque reference to image content returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    /// A URL the renderer can load directly.
    Url {
        /// The image location.
        url: String,
    },
    /// Encoded image bytes held in memory.
    Encoded {
        /// MIME type, e.g. `image/png`.
        mime_type: String,
        /// The encoded image.
        #[serde(skip)]
        data: Vec<u8>,
    },
}

impl ImageSource {
    /// Creates an in-memory image source.
    #[must_use]
    pub fn encoded(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Encoded {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Creates a URL image source.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }
}

/// One of the three pictures shown during a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameImage {
    /// English label the image illustrates.
    pub label: String,
    /// Where the image content lives.
    pub source: ImageSource,
    /// Whether this image depicts the target word.
    pub is_target: bool,
}

/// Synthesized pronunciation of the target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    /// Raw audio bytes as produced by the provider.
    pub bytes: Vec<u8>,
    /// Sample rate of `bytes`, in Hz.
    pub sample_rate_hz: u32,
}

impl AudioData {
    /// Creates audio data from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>, sample_rate_hz: u32) -> Self {
        Self {
            bytes: bytes.into(),
            sample_rate_hz,
        }
    }

    /// Returns `true` if there is nothing to play.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
