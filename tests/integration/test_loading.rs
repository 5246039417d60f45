//! End-to-end tests for round loading.
//!
//! These cover the paths where content arrives late, partially or not at
//! all, plus a session backed by the built-in word bank.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{config, solve, word, ScriptedProvider};
use hangman_content::WordBank;
use hangman_core::{
    fetch_round, Config, Difficulty, GameSession, LoadOutcome, RoundStatus, LOAD_FAILED_MESSAGE,
};
use tokio::sync::Notify;

/// A word without pronunciation still becomes playable.
#[tokio::test]
async fn test_missing_audio_still_playable() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye")]);
    let mut session = GameSession::new(config(), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    let outcome = session.load_puzzle().await.expect("Load should run");

    assert_eq!(outcome, LoadOutcome::Ready);
    assert_eq!(session.status(), RoundStatus::Playing);
    let view = session.view();
    assert!(!view.has_audio);
    assert_eq!(view.images.len(), 3);
    assert_eq!(view.images.iter().filter(|i| i.is_target).count(), 1);
}

/// Pronunciation is offered when the provider has it.
#[tokio::test]
async fn test_audio_available() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye")]).with_audio();
    let mut session = GameSession::new(config(), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");

    assert!(session.view().has_audio);
    let audio = session
        .puzzle()
        .and_then(|p| p.audio())
        .expect("Puzzle should carry audio");
    assert_eq!(audio.sample_rate_hz, 24_000);
}

/// A failed image aborts the round; a retry at the same difficulty
/// recovers.
#[tokio::test]
async fn test_image_failure_then_retry() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye"), word("பூனை", "cat")]);
    provider.fail_label("kite");
    let mut session = GameSession::new(config(), provider);
    let mut events = session.subscribe();

    session.start_series(Difficulty::Hard).expect("Series should start");
    let outcome = session.load_puzzle().await.expect("Load should run");

    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(session.status(), RoundStatus::Error);
    assert!(session.puzzle().is_none());
    let view = session.view();
    assert_eq!(view.error_message.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(view.images.is_empty());

    // The failed word is not offered again
    assert_eq!(session.used_words(), ["கண்".to_string()]);
    assert!(session.submit_guess("க").is_err());

    session.provider().clear_failures();
    let outcome = session.retry().await.expect("Retry should run");

    assert_eq!(outcome, LoadOutcome::Ready);
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(session.difficulty(), Difficulty::Hard);
    assert_eq!(session.round_number(), 1);
    assert_eq!(session.provider().excludes()[1], vec!["கண்".to_string()]);
    assert_eq!(
        session.puzzle().map(|p| p.record().word.as_str()),
        Some("பூனை")
    );

    let mut names = Vec::new();
    while let Ok(event) = events.try_recv() {
        names.push(event.event_name());
    }
    assert_eq!(
        names,
        vec!["round_loading", "load_failed", "round_loading", "round_ready"]
    );
}

/// Retrying is only possible from the error state.
#[tokio::test]
async fn test_retry_requires_error() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye")]);
    let mut session = GameSession::new(config(), provider);

    assert!(session.retry().await.is_err());
    session.start_series(Difficulty::Easy).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");
    assert!(session.retry().await.is_err());
    assert_eq!(session.status(), RoundStatus::Playing);
}

/// A provider that runs out of words leaves the session in `Error`.
#[tokio::test]
async fn test_word_failure() {
    let provider = ScriptedProvider::new(Vec::new());
    let mut session = GameSession::new(config(), provider);

    session.start_series(Difficulty::Medium).expect("Series should start");
    let outcome = session.load_puzzle().await.expect("Load should run");

    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(session.status(), RoundStatus::Error);
    assert!(session.used_words().is_empty());
    assert_eq!(session.provider().assets_before_word(), 0);
}

/// A record missing its decoys is rejected before any asset is fetched.
#[tokio::test]
async fn test_incomplete_record_rejected() {
    let mut record = word("கண்", "eye");
    record.distractors.pop();
    let provider = ScriptedProvider::new(vec![record]);
    let mut session = GameSession::new(config(), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    let outcome = session.load_puzzle().await.expect("Load should run");

    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(session.provider().max_in_flight(), 0);
}

/// Images and audio are fetched together once the word is known.
#[tokio::test]
async fn test_assets_fetched_concurrently() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye")])
        .with_audio()
        .with_asset_delay(Duration::from_millis(50));
    let mut session = GameSession::new(config(), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");

    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(session.provider().assets_before_word(), 0);
    assert_eq!(session.provider().max_in_flight(), 4);
}

/// A provider slower than the load timeout fails the round.
#[tokio::test]
async fn test_slow_provider_times_out() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye")])
        .with_word_delay(Duration::from_secs(5));
    let config = Config {
        load_timeout_secs: 1,
        ..config()
    };
    let mut session = GameSession::new(config, provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    let outcome = session.load_puzzle().await.expect("Load should run");

    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(session.status(), RoundStatus::Error);
}

/// Content for an abandoned round never lands in the newer round.
#[tokio::test]
async fn test_stale_content_discarded() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(
        ScriptedProvider::new(vec![word("கண்", "eye"), word("பூனை", "cat")])
            .gated(Arc::clone(&gate)),
    );
    let mut session = GameSession::new(config(), Arc::clone(&provider));

    session.start_series(Difficulty::Easy).expect("Series should start");
    let first = session.begin_load().expect("Load should begin");

    let slow_provider = Arc::clone(&provider);
    let slow_ticket = first.clone();
    let slow = tokio::spawn(async move {
        fetch_round(&*slow_provider, &slow_ticket, Duration::from_secs(10)).await
    });

    // Wait until the first request is parked on the gate
    while provider.excludes().is_empty() {
        tokio::task::yield_now().await;
    }

    session.abandon();
    assert_eq!(session.status(), RoundStatus::Idle);
    session.start_series(Difficulty::Easy).expect("Series should restart");
    let outcome = session.load_puzzle().await.expect("Load should run");
    assert_eq!(outcome, LoadOutcome::Ready);
    let current = session
        .puzzle()
        .map(|p| p.record().word.clone())
        .expect("Round should be ready");

    gate.notify_one();
    let late = slow.await.expect("Fetch task should finish");
    let outcome = session.complete_load(&first, late).expect("Stale load is not an error");

    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(
        session.puzzle().map(|p| p.record().word.clone()),
        Some(current.clone())
    );
    assert_eq!(session.used_words(), [current]);
}

/// The built-in word bank can carry a session until its words run out.
#[tokio::test]
async fn test_builtin_word_bank_session() {
    let bank = WordBank::builtin().expect("Built-in list should load").with_seed(11);
    let easy_words = bank.count(Difficulty::Easy);
    assert!(easy_words > 0);

    let mut session = GameSession::new(config(), bank);
    session.start_series(Difficulty::Easy).expect("Series should start");
    assert_eq!(
        session.load_puzzle().await.expect("Load should run"),
        LoadOutcome::Ready
    );

    for _ in 1..easy_words {
        assert_eq!(session.view().images.len(), 3);
        let puzzle = session.puzzle().expect("Round should be ready");
        assert!(puzzle
            .segments()
            .iter()
            .all(|s| puzzle.keyboard().contains(s)));
        solve(&mut session);
        assert_eq!(session.status(), RoundStatus::Won);
        let next = session.next_round().await.expect("Advance should succeed");
        assert_eq!(next, Some(LoadOutcome::Ready));
    }

    solve(&mut session);
    assert_eq!(session.used_words().len(), easy_words);
    let mut unique = session.used_words().to_vec();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), easy_words);

    // Every easy word has been played
    let next = session.next_round().await.expect("Advance should succeed");
    assert_eq!(next, Some(LoadOutcome::Failed));
    assert_eq!(session.status(), RoundStatus::Error);
}
