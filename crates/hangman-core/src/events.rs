//! Game event types and broadcasting.
//!
//! Every observable transition of a session is published as a
//! [`GameEvent`] so renderers, loggers and tests can follow along without
//! polling the session.
//!
//! # Event Types
//!
//! - `round_loading` - A round started fetching content
//! - `round_ready` - Content arrived and the round is playable
//! - `load_failed` - The round-load failed; a retry is possible
//! - `guess` - A guess was accepted
//! - `round_won` / `round_lost` - The round was decided
//! - `series_over` - The last tournament round finished
//!
//! # Example
//!
//! ```
//! use hangman_core::events::{EventBroadcaster, GameEvent};
//! use hangman_core::Difficulty;
//!
//! # async fn example() {
//! let broadcaster = EventBroadcaster::new(16);
//! let mut receiver = broadcaster.subscribe();
//!
//! broadcaster.send(GameEvent::round_loading(1, Difficulty::Easy));
//!
//! if let Ok(event) = receiver.recv().await {
//!     assert_eq!(event.event_name(), "round_loading");
//! }
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::difficulty::Difficulty;
use crate::guess::GuessOutcome;
use crate::tournament::{SeriesResult, Team};

// ============================================================================
// Event Payloads
// ============================================================================

/// Payload for the `round_loading` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLoadingPayload {
    /// Identity of the round being loaded.
    pub round: u64,
    /// Requested difficulty.
    pub difficulty: Difficulty,
    /// When loading started.
    pub timestamp: DateTime<Utc>,
}

/// Payload for the `round_ready` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReadyPayload {
    /// Identity of the round.
    pub round: u64,
    /// Number of letters to find.
    pub segments: usize,
    /// Number of keys on the keyboard.
    pub keys: usize,
    /// Whether a pronunciation is available.
    pub has_audio: bool,
}

/// Payload for the `load_failed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailedPayload {
    /// Identity of the round that failed.
    pub round: u64,
    /// The player-facing retry message.
    pub message: String,
}

/// Payload for the `guess` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessPayload {
    /// The guessed letter.
    pub letter: String,
    /// Whether it was in the word.
    pub outcome: GuessOutcome,
    /// Wrong guesses so far this round.
    pub wrong_guesses: u32,
    /// Team holding the turn after the guess (tournament only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<Team>,
}

/// Payload for the `round_won` and `round_lost` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOverPayload {
    /// Identity of the round.
    pub round: u64,
    /// The answer.
    pub word: String,
    /// Team credited with the point, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored_by: Option<Team>,
}

/// Payload for the `series_over` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOverPayload {
    /// Winner or tie.
    pub result: SeriesResult,
    /// Final score of team A.
    pub score_a: u32,
    /// Final score of team B.
    pub score_b: u32,
}

// ============================================================================
// Event Enum
// ============================================================================

/// Session events.
///
/// All events are serialized as JSON objects with "event" and "payload" fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum GameEvent {
    /// A round started loading.
    RoundLoading(RoundLoadingPayload),
    /// A round became playable.
    RoundReady(RoundReadyPayload),
    /// A round-load failed.
    LoadFailed(LoadFailedPayload),
    /// A guess was applied.
    Guess(GuessPayload),
    /// The word was completed.
    RoundWon(RoundOverPayload),
    /// The attempt budget ran out.
    RoundLost(RoundOverPayload),
    /// The tournament finished.
    SeriesOver(SeriesOverPayload),
}

impl GameEvent {
    /// Creates a `RoundLoading` event.
    #[must_use]
    pub fn round_loading(round: u64, difficulty: Difficulty) -> Self {
        Self::RoundLoading(RoundLoadingPayload {
            round,
            difficulty,
            timestamp: Utc::now(),
        })
    }

    /// Creates a `RoundReady` event.
    #[must_use]
    pub const fn round_ready(round: u64, segments: usize, keys: usize, has_audio: bool) -> Self {
        Self::RoundReady(RoundReadyPayload {
            round,
            segments,
            keys,
            has_audio,
        })
    }

    /// Creates a `LoadFailed` event.
    #[must_use]
    pub fn load_failed(round: u64, message: impl Into<String>) -> Self {
        Self::LoadFailed(LoadFailedPayload {
            round,
            message: message.into(),
        })
    }

    /// Creates a `Guess` event.
    #[must_use]
    pub const fn guess(
        letter: String,
        outcome: GuessOutcome,
        wrong_guesses: u32,
        turn: Option<Team>,
    ) -> Self {
        Self::Guess(GuessPayload {
            letter,
            outcome,
            wrong_guesses,
            turn,
        })
    }

    /// Creates a `RoundWon` event.
    #[must_use]
    pub const fn round_won(round: u64, word: String, scored_by: Option<Team>) -> Self {
        Self::RoundWon(RoundOverPayload {
            round,
            word,
            scored_by,
        })
    }

    /// Creates a `RoundLost` event.
    #[must_use]
    pub const fn round_lost(round: u64, word: String) -> Self {
        Self::RoundLost(RoundOverPayload {
            round,
            word,
            scored_by: None,
        })
    }

    /// Creates a `SeriesOver` event.
    #[must_use]
    pub const fn series_over(result: SeriesResult, score_a: u32, score_b: u32) -> Self {
        Self::SeriesOver(SeriesOverPayload {
            result,
            score_a,
            score_b,
        })
    }

    /// Returns the event name as a string.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::RoundLoading(_) => "round_loading",
            Self::RoundReady(_) => "round_ready",
            Self::LoadFailed(_) => "load_failed",
            Self::Guess(_) => "guess",
            Self::RoundWon(_) => "round_won",
            Self::RoundLost(_) => "round_lost",
            Self::SeriesOver(_) => "series_over",
        }
    }
}

// ============================================================================
// Event Broadcaster
// ============================================================================

/// Broadcasts game events to every subscriber.
///
/// Uses a tokio broadcast channel. Events are not kept for subscribers that
/// join later.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBroadcaster {
    /// Creates a new `EventBroadcaster` with the specified buffer capacity.
    ///
    /// The buffer determines how many events can be queued per subscriber
    /// before old events are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Creates a new subscriber.
    ///
    /// A subscriber that falls behind receives a `Lagged` error and misses
    /// some events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    /// Broadcasts an event and returns how many subscribers will see it.
    pub fn send(&self, event: GameEvent) -> usize {
        // Err only means nobody is listening
        self.sender.send(event).unwrap_or(0)
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}
