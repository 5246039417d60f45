//! Tamil Hangman game core
//!
//! Round lifecycle, guess evaluation, tournament turns and scoring, and the
//! session that loads content from a [`ContentProvider`].

pub mod audio;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod events;
pub mod guess;
pub mod keyboard;
pub mod provider;
pub mod round;
pub mod segment;
pub mod session;
pub mod tournament;
pub mod view;
pub mod word;

pub use audio::{AudioBackend, AudioError, AudioPlayer, LazyAudioPlayer};
pub use config::{Config, GameMode, MAX_LOAD_TIMEOUT_SECS};
pub use difficulty::{attempt_budget, Difficulty};
pub use error::{GameError, InvalidGuessReason, ProviderErrorKind, Result, LOAD_FAILED_MESSAGE};
pub use events::{EventBroadcaster, GameEvent};
pub use guess::{evaluate, is_word_complete, Evaluation, GuessOutcome};
pub use keyboard::{KeyState, Keyboard};
pub use provider::ContentProvider;
pub use round::{GuessResult, RoundState, RoundStatus};
pub use segment::{GraphemeSegmenter, Segmenter};
pub use session::{
    fetch_round, FetchFailure, FetchResult, FetchedRound, GameSession, LoadOutcome, LoadTicket,
    Progress, Puzzle, RoundRecord,
};
pub use tournament::{SeriesResult, Team, DEFAULT_TOTAL_ROUNDS};
pub use view::SessionView;
pub use word::{AudioData, GameImage, ImageSource, WordRecord, IMAGES_PER_ROUND};
