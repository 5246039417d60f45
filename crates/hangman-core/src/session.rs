//! Session orchestration: loading rounds and routing guesses.
//!
//! A [`GameSession`] owns everything that lives for one series: the round
//! state machine, the fetched puzzle, the used-word history, team turn and
//! scores, and the random source used for shuffling.
//!
//! Loading is split in three so a round can be superseded while its
//! content is still in flight:
//!
//! 1. [`GameSession::begin_load`] enters `Loading` and hands out a
//!    [`LoadTicket`] naming the round.
//! 2. [`fetch_round`] talks to the provider. It only borrows the provider,
//!    never the session.
//! 3. [`GameSession::complete_load`] applies the result, or drops it if the
//!    ticket no longer names the current round.
//!
//! [`GameSession::load_puzzle`] runs all three in order.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::audio::AudioPlayer;
use crate::config::{Config, GameMode};
use crate::difficulty::Difficulty;
use crate::error::{GameError, ProviderErrorKind, Result, LOAD_FAILED_MESSAGE};
use crate::events::{EventBroadcaster, GameEvent};
use crate::keyboard::Keyboard;
use crate::provider::ContentProvider;
use crate::round::{GuessResult, RoundState, RoundStatus};
use crate::segment::{GraphemeSegmenter, Segmenter};
use crate::tournament::{Advance, Scoreboard, SeriesResult, Team, TurnCoordinator};
use crate::view::{AnswerView, SegmentView, SessionView, TournamentView};
use crate::word::{AudioData, GameImage, WordRecord};

// ============================================================================
// Loading
// ============================================================================

/// Claim on a round-load, issued by [`GameSession::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    round_id: u64,
    difficulty: Difficulty,
    exclude: Vec<String>,
}

impl LoadTicket {
    /// Identity of the round this ticket loads.
    #[must_use]
    pub const fn round_id(&self) -> u64 {
        self.round_id
    }

    /// Difficulty requested from the provider.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Words the provider must not return.
    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }
}

/// Content for one round, fully fetched.
#[derive(Debug, Clone)]
pub struct FetchedRound {
    /// The validated word record.
    pub record: WordRecord,
    /// Target image first, then the decoys.
    pub images: Vec<GameImage>,
    /// Pronunciation, if the provider produced one.
    pub audio: Option<AudioData>,
}

/// A round-load that did not produce a playable round.
#[derive(Debug, thiserror::Error)]
#[error("round content fetch failed: {error}")]
pub struct FetchFailure {
    /// The word, if it was fetched before an asset request failed.
    pub word: Option<String>,
    /// What went wrong.
    #[source]
    pub error: GameError,
}

impl FetchFailure {
    fn before_word(error: GameError) -> Self {
        Self { word: None, error }
    }

    fn after_word(word: String, error: GameError) -> Self {
        Self {
            word: Some(word),
            error,
        }
    }
}

/// Outcome of [`fetch_round`].
pub type FetchResult = std::result::Result<FetchedRound, FetchFailure>;

/// What [`GameSession::complete_load`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The round is now `Playing`.
    Ready,
    /// The round is now in `Error`.
    Failed,
    /// The result belonged to a superseded round and was dropped.
    Stale,
}

fn timeout_error(limit: Duration) -> GameError {
    GameError::provider(
        ProviderErrorKind::Timeout,
        format!("round load exceeded {}s", limit.as_secs()),
    )
}

/// Fetches everything a round needs.
///
/// The word is fetched first; the three images and the audio are then
/// requested concurrently. Any word or image failure fails the whole load.
/// Missing audio does not. The entire load is bounded by `limit`.
pub async fn fetch_round<P>(provider: &P, ticket: &LoadTicket, limit: Duration) -> FetchResult
where
    P: ContentProvider + ?Sized,
{
    // A limit too large to represent means no deadline.
    let deadline = Instant::now().checked_add(limit);

    debug!(round = ticket.round_id, difficulty = %ticket.difficulty, "Fetching word");
    let record = match until(
        deadline,
        provider.fetch_word(ticket.difficulty, &ticket.exclude),
    )
    .await
    {
        Some(Ok(record)) => record,
        Some(Err(e)) => return Err(FetchFailure::before_word(e)),
        None => return Err(FetchFailure::before_word(timeout_error(limit))),
    };
    if let Err(e) = record.validate() {
        return Err(FetchFailure::before_word(e));
    }

    debug!(round = ticket.round_id, word = %record.word, "Fetching images and audio");
    let images = future::try_join_all(record.image_labels().into_iter().map(
        |(label, is_target)| async move {
            provider.fetch_image(label).await.map(|source| GameImage {
                label: label.to_owned(),
                source,
                is_target,
            })
        },
    ));
    let assets = async { futures::join!(images, provider.fetch_audio(&record.word)) };
    let settled = until(deadline, assets).await;

    match settled {
        Some((Ok(images), audio)) => Ok(FetchedRound {
            record,
            images,
            audio,
        }),
        Some((Err(e), _)) => Err(FetchFailure::after_word(record.word, e)),
        None => Err(FetchFailure::after_word(record.word, timeout_error(limit))),
    }
}

/// Runs `fut` to completion, or until `deadline` when there is one.
async fn until<F: Future>(deadline: Option<Instant>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => time::timeout_at(deadline, fut).await.ok(),
        None => Some(fut.await),
    }
}

// ============================================================================
// Puzzle
// ============================================================================

/// The playable content of the current round.
///
/// The keyboard and image order are fixed when the round becomes playable
/// and stay the same for as long as this word is played.
#[derive(Debug, Clone)]
pub struct Puzzle {
    record: WordRecord,
    segments: Vec<String>,
    images: Vec<GameImage>,
    audio: Option<AudioData>,
    keyboard: Keyboard,
}

impl Puzzle {
    /// The word record.
    #[must_use]
    pub const fn record(&self) -> &WordRecord {
        &self.record
    }

    /// Target segment sequence.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Images in presentation order.
    #[must_use]
    pub fn images(&self) -> &[GameImage] {
        &self.images
    }

    /// Pronunciation, if any.
    #[must_use]
    pub const fn audio(&self) -> Option<&AudioData> {
        self.audio.as_ref()
    }

    /// The composed keyboard.
    #[must_use]
    pub const fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }
}

// ============================================================================
// History
// ============================================================================

/// A decided round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// Round number within the session.
    pub round_number: u32,
    /// The answer.
    pub word: String,
    /// English gloss of the answer.
    pub english: String,
    /// Whether the word was found.
    pub won: bool,
    /// Wrong guesses made.
    pub wrong_guesses: u32,
    /// Team credited with the point (tournament wins only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored_by: Option<Team>,
    /// When the round started loading.
    pub started_at: DateTime<Utc>,
    /// When it was decided.
    pub finished_at: DateTime<Utc>,
}

/// Where the session goes after a decided round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Another round is loading.
    NextRound(LoadTicket),
    /// The tournament is finished.
    SeriesOver(SeriesResult),
}

#[derive(Debug, Clone)]
enum Series {
    Classic {
        round_number: u32,
    },
    Tournament {
        scoreboard: Scoreboard,
        turn: TurnCoordinator,
    },
}

impl Series {
    fn new(mode: GameMode, total_rounds: u32) -> Self {
        match mode {
            GameMode::Classic => Self::Classic { round_number: 1 },
            GameMode::Tournament => {
                let scoreboard = Scoreboard::new(total_rounds);
                let turn = TurnCoordinator::new(scoreboard.round_starter());
                Self::Tournament { scoreboard, turn }
            }
        }
    }

    const fn round_number(&self) -> u32 {
        match self {
            Self::Classic { round_number } => *round_number,
            Self::Tournament { scoreboard, .. } => scoreboard.round_number(),
        }
    }
}

// ============================================================================
// GameSession
// ============================================================================

/// One player's (or two teams') run of rounds.
pub struct GameSession<P> {
    config: Config,
    provider: P,
    segmenter: Box<dyn Segmenter>,
    rng: StdRng,
    round: RoundState,
    difficulty: Difficulty,
    mode: GameMode,
    puzzle: Option<Puzzle>,
    series: Series,
    series_result: Option<SeriesResult>,
    used_words: Vec<String>,
    history: Vec<RoundRecord>,
    events: EventBroadcaster,
}

impl<P> std::fmt::Debug for GameSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("mode", &self.mode)
            .field("difficulty", &self.difficulty)
            .field("round", &self.round)
            .field("used_words", &self.used_words)
            .finish_non_exhaustive()
    }
}

impl<P: ContentProvider> GameSession<P> {
    /// Creates an idle session.
    ///
    /// Shuffles are seeded from `config.rng_seed` when set.
    pub fn new(config: Config, provider: P) -> Self {
        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let series = Series::new(config.mode, config.total_rounds);

        Self {
            difficulty: config.default_difficulty,
            mode: config.mode,
            events: EventBroadcaster::new(config.event_capacity),
            config,
            provider,
            segmenter: Box::new(GraphemeSegmenter),
            rng,
            round: RoundState::new(),
            puzzle: None,
            series,
            series_result: None,
            used_words: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Replaces the grapheme segmenter.
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The content provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.round.status()
    }

    /// The round state machine.
    #[must_use]
    pub const fn round(&self) -> &RoundState {
        &self.round
    }

    /// Difficulty used for the next load.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Classic or tournament.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Content of the current round, once playable.
    #[must_use]
    pub const fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Words already used this series, oldest first.
    #[must_use]
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    /// Decided rounds, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Current round number (1-indexed).
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.series.round_number()
    }

    /// Tournament scores, if playing a tournament.
    #[must_use]
    pub const fn scoreboard(&self) -> Option<&Scoreboard> {
        match &self.series {
            Series::Tournament { scoreboard, .. } => Some(scoreboard),
            Series::Classic { .. } => None,
        }
    }

    /// Team holding the turn, if playing a tournament.
    #[must_use]
    pub const fn current_team(&self) -> Option<Team> {
        match &self.series {
            Series::Tournament { turn, .. } => Some(turn.current()),
            Series::Classic { .. } => None,
        }
    }

    /// Final tournament result, once the series is over.
    #[must_use]
    pub const fn series_result(&self) -> Option<SeriesResult> {
        self.series_result
    }

    /// Subscribes to session events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    // ------------------------------------------------------------------------
    // Series lifecycle
    // ------------------------------------------------------------------------

    /// Enters difficulty selection.
    ///
    /// Valid from `Idle`, `DifficultySelect`, `Error` and `SeriesOver`.
    /// Leaving `SeriesOver` starts a fresh series. A decided round moves on
    /// only through [`Self::advance_round`].
    pub fn select_difficulty(&mut self) -> Result<()> {
        let status = self.round.status();
        match status {
            RoundStatus::Idle | RoundStatus::DifficultySelect | RoundStatus::Error => {
                self.round.select_difficulty()
            }
            RoundStatus::SeriesOver => {
                self.round.select_difficulty()?;
                self.reset_series();
                info!(mode = ?self.mode, "Series reset after completion");
                Ok(())
            }
            _ => Err(GameError::invalid_transition(
                status,
                RoundStatus::DifficultySelect,
            )),
        }
    }

    /// Starts a fresh series at `difficulty`.
    ///
    /// Clears used words, history and scores and leaves the session in
    /// `DifficultySelect`, ready for [`Self::load_puzzle`]. Not allowed
    /// while a round is loading or being played.
    pub fn start_series(&mut self, difficulty: Difficulty) -> Result<()> {
        self.round.select_difficulty()?;
        self.difficulty = difficulty;
        self.reset_series();
        info!(mode = ?self.mode, difficulty = %difficulty, "Series started");
        Ok(())
    }

    fn reset_series(&mut self) {
        self.series = Series::new(self.mode, self.config.total_rounds);
        self.series_result = None;
        self.used_words.clear();
        self.history.clear();
        self.puzzle = None;
    }

    /// Drops back to `Idle`.
    ///
    /// The series is torn down (scores, used words and history) and any
    /// load still in flight becomes stale.
    pub fn abandon(&mut self) {
        info!(round = self.round.round_id(), "Session abandoned");
        self.round.abandon();
        self.reset_series();
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Enters `Loading` for a new round and returns its ticket.
    ///
    /// Valid from `Idle`, `DifficultySelect` and `Error`. Use
    /// [`Self::advance_round`] after a decided round.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        let status = self.round.status();
        match status {
            RoundStatus::Idle => self.reset_series(),
            RoundStatus::DifficultySelect | RoundStatus::Error => {}
            _ => return Err(GameError::invalid_transition(status, RoundStatus::Loading)),
        }
        self.start_load()
    }

    fn start_load(&mut self) -> Result<LoadTicket> {
        let round_id = self.round.start_round(self.difficulty)?;
        self.puzzle = None;

        info!(
            round = round_id,
            round_number = self.series.round_number(),
            difficulty = %self.difficulty,
            "Round loading"
        );
        self.events
            .send(GameEvent::round_loading(round_id, self.difficulty));

        Ok(LoadTicket {
            round_id,
            difficulty: self.difficulty,
            exclude: self.used_words.clone(),
        })
    }

    /// Applies the result of [`fetch_round`] for `ticket`.
    ///
    /// Results for a superseded round are dropped and leave the session
    /// untouched. Otherwise the fetched word joins the used-word history
    /// (even when an asset fetch failed) and the round moves to `Playing`
    /// or `Error`.
    pub fn complete_load(&mut self, ticket: &LoadTicket, fetched: FetchResult) -> Result<LoadOutcome> {
        if ticket.round_id != self.round.round_id() {
            warn!(
                round = ticket.round_id,
                current = self.round.round_id(),
                "Discarding content for superseded round"
            );
            return Ok(LoadOutcome::Stale);
        }

        match fetched {
            Ok(round) => {
                self.remember_word(&round.record.word);
                self.install(ticket.round_id, round)
            }
            Err(failure) => {
                if let Some(word) = &failure.word {
                    self.remember_word(word);
                }
                self.fail(ticket.round_id, &failure.error)
            }
        }
    }

    /// Loads a round: [`Self::begin_load`], [`fetch_round`], then
    /// [`Self::complete_load`].
    ///
    /// From `Error` this is the manual retry: the whole sequence runs again
    /// at the same difficulty and round number.
    pub async fn load_puzzle(&mut self) -> Result<LoadOutcome> {
        let ticket = self.begin_load()?;
        self.fetch_and_complete(ticket).await
    }

    /// Retries a failed round-load.
    pub async fn retry(&mut self) -> Result<LoadOutcome> {
        let status = self.round.status();
        if status != RoundStatus::Error {
            return Err(GameError::invalid_transition(status, RoundStatus::Loading));
        }
        self.load_puzzle().await
    }

    async fn fetch_and_complete(&mut self, ticket: LoadTicket) -> Result<LoadOutcome> {
        let fetched = fetch_round(&self.provider, &ticket, self.config.load_timeout()).await;
        self.complete_load(&ticket, fetched)
    }

    fn remember_word(&mut self, word: &str) {
        if !self.used_words.iter().any(|w| w == word) {
            self.used_words.push(word.to_owned());
        }
    }

    fn install(&mut self, round_id: u64, fetched: FetchedRound) -> Result<LoadOutcome> {
        let FetchedRound {
            record,
            mut images,
            audio,
        } = fetched;

        let segments = self.segmenter.segment(&record.word);
        if segments.is_empty() {
            return self.fail(round_id, &GameError::invalid_content("word has no letters"));
        }
        self.round.begin_play(round_id, segments.clone())?;

        let keyboard = Keyboard::compose(&segments, &record.distractor_letters, &mut self.rng);
        images.shuffle(&mut self.rng);

        if audio.is_none() {
            warn!(round = round_id, word = %record.word, "Pronunciation unavailable, continuing without audio");
        }
        info!(
            round = round_id,
            letters = segments.len(),
            keys = keyboard.len(),
            "Round ready"
        );
        self.events.send(GameEvent::round_ready(
            round_id,
            segments.len(),
            keyboard.len(),
            audio.is_some(),
        ));

        self.puzzle = Some(Puzzle {
            record,
            segments,
            images,
            audio,
            keyboard,
        });
        Ok(LoadOutcome::Ready)
    }

    fn fail(&mut self, round_id: u64, error: &GameError) -> Result<LoadOutcome> {
        self.round.fail_load(round_id, LOAD_FAILED_MESSAGE)?;
        self.puzzle = None;

        warn!(
            round = round_id,
            error = %error,
            transient = error.is_transient(),
            "Round load failed"
        );
        self.events
            .send(GameEvent::load_failed(round_id, LOAD_FAILED_MESSAGE));
        Ok(LoadOutcome::Failed)
    }

    // ------------------------------------------------------------------------
    // Play
    // ------------------------------------------------------------------------

    /// Applies a letter guess.
    ///
    /// In a tournament the turn passes on a wrong guess and a won round
    /// scores for the team holding the turn.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidGuess` when not `Playing` or when the
    /// letter was already guessed; nothing changes in that case.
    pub fn submit_guess(&mut self, letter: &str) -> Result<GuessResult> {
        let result = match self.round.submit_guess(letter) {
            Ok(result) => result,
            Err(e) => {
                debug!(letter, error = %e, "Guess rejected");
                return Err(e);
            }
        };

        let mut scored_by = None;
        let turn = match &mut self.series {
            Series::Tournament { scoreboard, turn } => {
                if result.status == RoundStatus::Won {
                    let team = turn.current();
                    scoreboard.award(team);
                    scored_by = Some(team);
                }
                Some(turn.record(
                    result.evaluation.outcome,
                    result.status == RoundStatus::Lost,
                ))
            }
            Series::Classic { .. } => None,
        };

        debug!(
            letter = %result.letter,
            outcome = ?result.evaluation.outcome,
            wrong_guesses = result.wrong_guesses,
            "Guess applied"
        );
        self.events.send(GameEvent::guess(
            result.letter.clone(),
            result.evaluation.outcome,
            result.wrong_guesses,
            turn,
        ));

        if result.status.is_round_over() {
            self.finish_round(scored_by);
        }
        Ok(result)
    }

    fn finish_round(&mut self, scored_by: Option<Team>) {
        let won = self.round.status() == RoundStatus::Won;
        let (word, english) = self
            .puzzle
            .as_ref()
            .map(|p| (p.record.word.clone(), p.record.english.clone()))
            .unwrap_or_default();
        let round_id = self.round.round_id();

        info!(
            round = round_id,
            won,
            word = %word,
            wrong_guesses = self.round.wrong_guesses(),
            "Round decided"
        );
        let event = if won {
            GameEvent::round_won(round_id, word.clone(), scored_by)
        } else {
            GameEvent::round_lost(round_id, word.clone())
        };
        self.events.send(event);

        self.history.push(RoundRecord {
            round_number: self.series.round_number(),
            word,
            english,
            won,
            wrong_guesses: self.round.wrong_guesses(),
            scored_by,
            started_at: self.round.started_at(),
            finished_at: Utc::now(),
        });
    }

    /// Moves past a decided round.
    ///
    /// After the final tournament round this enters `SeriesOver` and
    /// resolves the winner. Otherwise the next round starts loading with
    /// the next starting team.
    pub fn advance_round(&mut self) -> Result<Progress> {
        let status = self.round.status();
        if !status.is_round_over() {
            return Err(GameError::invalid_transition(status, RoundStatus::Loading));
        }

        match &mut self.series {
            Series::Classic { round_number } => *round_number += 1,
            Series::Tournament { scoreboard, turn } => match scoreboard.advance() {
                Advance::NextRound { starter, .. } => *turn = TurnCoordinator::new(starter),
                Advance::SeriesComplete(result) => {
                    let (score_a, score_b) = (scoreboard.score(Team::A), scoreboard.score(Team::B));
                    self.round.finish_series()?;
                    self.series_result = Some(result);
                    info!(?result, score_a, score_b, "Series over");
                    self.events
                        .send(GameEvent::series_over(result, score_a, score_b));
                    return Ok(Progress::SeriesOver(result));
                }
            },
        }

        self.start_load().map(Progress::NextRound)
    }

    /// [`Self::advance_round`] followed by the load of the next round.
    ///
    /// Returns `None` once the series is over.
    pub async fn next_round(&mut self) -> Result<Option<LoadOutcome>> {
        match self.advance_round()? {
            Progress::NextRound(ticket) => self.fetch_and_complete(ticket).await.map(Some),
            Progress::SeriesOver(_) => Ok(None),
        }
    }

    /// Plays the pronunciation of the current word.
    ///
    /// Returns `false` when the round has no audio.
    pub fn play_pronunciation(&self, player: &dyn AudioPlayer) -> bool {
        match self.puzzle.as_ref().and_then(Puzzle::audio) {
            Some(audio) => {
                player.play(audio);
                true
            }
            None => {
                debug!("No pronunciation for this round");
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    /// Snapshot of everything a renderer shows.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let status = self.round.status();
        let decided = status.is_round_over() || status == RoundStatus::SeriesOver;

        let segments = self
            .round
            .target()
            .iter()
            .map(|s| {
                let revealed = self.round.is_revealed(s);
                SegmentView {
                    letter: (revealed || decided).then(|| s.clone()),
                    revealed,
                }
            })
            .collect();

        let tournament = match &self.series {
            Series::Tournament { scoreboard, turn } => Some(TournamentView {
                current_team: turn.current(),
                score_a: scoreboard.score(Team::A),
                score_b: scoreboard.score(Team::B),
                round_number: scoreboard.round_number(),
                total_rounds: scoreboard.total_rounds(),
            }),
            Series::Classic { .. } => None,
        };

        let answer = self.puzzle.as_ref().filter(|_| decided).map(|p| AnswerView {
            word: p.record.word.clone(),
            english: p.record.english.clone(),
            transliteration: p.record.transliteration.clone(),
        });

        SessionView {
            status,
            difficulty: self.round.difficulty(),
            round_number: self.series.round_number(),
            segments,
            guessed: self.round.guessed().iter().cloned().collect(),
            wrong_guesses: self.round.wrong_guesses(),
            max_wrong_guesses: self.round.max_wrong_guesses(),
            keyboard: self
                .puzzle
                .as_ref()
                .map(|p| p.keyboard.key_states(self.round.guessed()))
                .unwrap_or_default(),
            images: self
                .puzzle
                .as_ref()
                .map(|p| p.images.clone())
                .unwrap_or_default(),
            has_audio: self.puzzle.as_ref().is_some_and(|p| p.audio.is_some()),
            tournament,
            error_message: self.round.error_message().map(str::to_owned),
            series_result: self.series_result,
            answer,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
