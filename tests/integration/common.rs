//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hangman_core::{
    AudioData, Config, ContentProvider, Difficulty, GameError, GameSession, ImageSource,
    ProviderErrorKind, Result, WordRecord,
};
use tokio::sync::Notify;

/// Standalone vowels; none of the test words contain them.
pub const MISSES: [&str; 8] = ["அ", "ஆ", "இ", "ஈ", "உ", "ஊ", "எ", "ஏ"];

/// A content provider driven by a script of word records.
#[derive(Default)]
pub struct ScriptedProvider {
    words: Mutex<VecDeque<Result<WordRecord>>>,
    failing_labels: Mutex<Vec<String>>,
    audio: Option<AudioData>,
    word_delay: Option<Duration>,
    asset_delay: Option<Duration>,
    gate: Mutex<Option<Arc<Notify>>>,
    excludes: Mutex<Vec<Vec<String>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    words_served: AtomicUsize,
    assets_before_word: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(records: Vec<WordRecord>) -> Self {
        Self {
            words: Mutex::new(records.into_iter().map(Ok).collect()),
            ..Default::default()
        }
    }

    pub fn with_audio(mut self) -> Self {
        self.audio = Some(AudioData::new(vec![0u8; 32], 24_000));
        self
    }

    pub fn with_word_delay(mut self, delay: Duration) -> Self {
        self.word_delay = Some(delay);
        self
    }

    pub fn with_asset_delay(mut self, delay: Duration) -> Self {
        self.asset_delay = Some(delay);
        self
    }

    /// The next word request waits until `gate` is notified.
    pub fn gated(self, gate: Arc<Notify>) -> Self {
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn fail_label(&self, label: &str) {
        self.failing_labels.lock().unwrap().push(label.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing_labels.lock().unwrap().clear();
    }

    pub fn push_word(&self, word: Result<WordRecord>) {
        self.words.lock().unwrap().push_back(word);
    }

    /// Exclusion lists received, one per word request.
    pub fn excludes(&self) -> Vec<Vec<String>> {
        self.excludes.lock().unwrap().clone()
    }

    /// Most asset requests that were in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Asset requests made while no word had been served yet.
    pub fn assets_before_word(&self) -> usize {
        self.assets_before_word.load(Ordering::SeqCst)
    }

    async fn asset_request(&self) {
        if self.words_served.load(Ordering::SeqCst) == 0 {
            self.assets_before_word.fetch_add(1, Ordering::SeqCst);
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.asset_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentProvider for ScriptedProvider {
    async fn fetch_word(&self, _difficulty: Difficulty, exclude: &[String]) -> Result<WordRecord> {
        self.excludes.lock().unwrap().push(exclude.to_vec());

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(delay) = self.word_delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.words.lock().unwrap().pop_front();
        let word = next.unwrap_or_else(|| {
            Err(GameError::provider(
                ProviderErrorKind::NotFound,
                "script exhausted",
            ))
        });
        if word.is_ok() {
            self.words_served.fetch_add(1, Ordering::SeqCst);
        }
        word
    }

    async fn fetch_image(&self, label: &str) -> Result<ImageSource> {
        self.asset_request().await;
        if self.failing_labels.lock().unwrap().iter().any(|l| l == label) {
            return Err(GameError::provider(
                ProviderErrorKind::NotFound,
                format!("no image for '{label}'"),
            ));
        }
        Ok(ImageSource::url(format!("https://images.test/{label}.png")))
    }

    async fn fetch_audio(&self, _word: &str) -> Option<AudioData> {
        self.asset_request().await;
        self.audio.clone()
    }
}

/// A valid record whose decoy labels are "kite" and "ball".
pub fn word(word: &str, english: &str) -> WordRecord {
    WordRecord {
        word: word.to_string(),
        english: english.to_string(),
        transliteration: format!("{english} (romanized)"),
        distractors: vec!["kite".to_string(), "ball".to_string()],
        distractor_letters: vec!["ஔ".to_string(), "ஃ".to_string()],
    }
}

/// Six distinct words for a full tournament.
pub fn six_words() -> Vec<WordRecord> {
    vec![
        word("கண்", "eye"),
        word("பூனை", "cat"),
        word("மரம்", "tree"),
        word("கடல்", "sea"),
        word("யானை", "elephant"),
        word("நிலா", "moon"),
    ]
}

pub fn config() -> Config {
    Config {
        rng_seed: Some(2024),
        ..Config::default()
    }
}

/// Guesses every letter of the current word.
pub fn solve<P: ContentProvider>(session: &mut GameSession<P>) {
    let segments = session
        .puzzle()
        .map(|p| p.segments().to_vec())
        .unwrap_or_default();
    for segment in segments {
        if !session.round().is_revealed(&segment) {
            session.submit_guess(&segment).unwrap();
        }
    }
}

/// Makes `count` wrong guesses.
pub fn miss<P: ContentProvider>(session: &mut GameSession<P>, count: usize) {
    for letter in MISSES.iter().take(count) {
        session.submit_guess(letter).unwrap();
    }
}
