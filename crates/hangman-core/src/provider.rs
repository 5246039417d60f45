//! The content provider contract.
//!
//! Words, illustrations and pronunciations come from an outside service
//! (a generative model in production, a word list offline). The session
//! only talks to it through [`ContentProvider`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::word::{AudioData, ImageSource, WordRecord};

/// Source of puzzle content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetches a word record for `difficulty` that is not in `exclude`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Provider` when the upstream call fails or the
    /// payload is missing required fields.
    async fn fetch_word(&self, difficulty: Difficulty, exclude: &[String]) -> Result<WordRecord>;

    /// Fetches an illustration for an English `label`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Provider` when no image is found or the upstream
    /// call fails.
    async fn fetch_image(&self, label: &str) -> Result<ImageSource>;

    /// Fetches a spoken pronunciation of `word`.
    ///
    /// Audio is best-effort: failures yield `None` rather than an error.
    async fn fetch_audio(&self, word: &str) -> Option<AudioData>;
}

#[async_trait]
impl<P: ContentProvider + ?Sized> ContentProvider for Arc<P> {
    async fn fetch_word(&self, difficulty: Difficulty, exclude: &[String]) -> Result<WordRecord> {
        (**self).fetch_word(difficulty, exclude).await
    }

    async fn fetch_image(&self, label: &str) -> Result<ImageSource> {
        (**self).fetch_image(label).await
    }

    async fn fetch_audio(&self, word: &str) -> Option<AudioData> {
        (**self).fetch_audio(word).await
    }
}
