//! Pronunciation playback.
//!
//! Playback is fire-and-forget: the game never waits on it and never
//! changes state because of it. Failures are logged and dropped.

use std::sync::Mutex;

use crate::word::AudioData;

/// Plays pronunciation audio.
pub trait AudioPlayer: Send + Sync {
    /// Starts playing `audio`. Never reports failure to the caller.
    fn play(&self, audio: &AudioData);
}

/// Failure inside an audio backend.
#[derive(Debug, thiserror::Error)]
#[error("audio backend error: {0}")]
pub struct AudioError(pub String);

/// A concrete output device.
pub trait AudioBackend: Send {
    /// Returns `true` if the device has been suspended (e.g. by the platform).
    fn is_suspended(&self) -> bool;

    /// Resumes a suspended device.
    fn resume(&mut self) -> Result<(), AudioError>;

    /// Plays the audio.
    fn play(&mut self, audio: &AudioData) -> Result<(), AudioError>;
}

type BackendFactory = Box<dyn Fn() -> Result<Box<dyn AudioBackend>, AudioError> + Send + Sync>;

/// [`AudioPlayer`] that opens its backend on first use.
///
/// The backend is created lazily, resumed whenever it is found suspended,
/// and reused for every later sound.
pub struct LazyAudioPlayer {
    factory: BackendFactory,
    backend: Mutex<Option<Box<dyn AudioBackend>>>,
}

impl std::fmt::Debug for LazyAudioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initialized = self.backend.lock().map(|b| b.is_some()).unwrap_or(false);
        f.debug_struct("LazyAudioPlayer")
            .field("initialized", &initialized)
            .finish_non_exhaustive()
    }
}

impl LazyAudioPlayer {
    /// Creates a player that will call `factory` the first time it plays.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn AudioBackend>, AudioError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            backend: Mutex::new(None),
        }
    }

    /// Returns `true` once a backend has been opened.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.backend.lock().map(|b| b.is_some()).unwrap_or(false)
    }

    fn try_play(&self, audio: &AudioData) -> Result<(), AudioError> {
        let mut slot = self
            .backend
            .lock()
            .map_err(|e| AudioError(format!("backend lock poisoned: {e}")))?;

        if slot.is_none() {
            tracing::debug!("Opening audio backend");
            *slot = Some((self.factory)()?);
        }

        let Some(backend) = slot.as_mut() else {
            return Err(AudioError("backend unavailable".to_string()));
        };

        if backend.is_suspended() {
            tracing::debug!("Resuming suspended audio backend");
            backend.resume()?;
        }
        backend.play(audio)
    }
}

impl AudioPlayer for LazyAudioPlayer {
    fn play(&self, audio: &AudioData) {
        if audio.is_empty() {
            tracing::debug!("Skipping empty audio");
            return;
        }
        if let Err(e) = self.try_play(audio) {
            tracing::warn!(error = %e, "Pronunciation playback failed");
        }
    }
}
