//! End-to-end tests for whole series of rounds.
//!
//! Each test drives a [`GameSession`] through several rounds with a
//! scripted provider and checks turns, scores and the final result.

mod common;

use common::{config, miss, six_words, solve, word, ScriptedProvider};
use hangman_core::{
    Config, Difficulty, GameMode, GameSession, LoadOutcome, RoundStatus, SeriesResult, Team,
};

fn tournament(total_rounds: u32) -> Config {
    Config {
        mode: GameMode::Tournament,
        total_rounds,
        ..config()
    }
}

/// A six-round tournament alternates starters and ends with a winner.
#[tokio::test]
async fn test_full_tournament() {
    let provider = ScriptedProvider::new(six_words());
    let mut session = GameSession::new(tournament(6), provider);
    let mut events = session.subscribe();

    session
        .start_series(Difficulty::Medium)
        .expect("Series should start");
    let outcome = session.load_puzzle().await.expect("Load should run");
    assert_eq!(outcome, LoadOutcome::Ready);

    let starters = [Team::A, Team::B, Team::A, Team::B, Team::A, Team::B];
    for (index, starter) in starters.iter().enumerate() {
        let round_number = u32::try_from(index).expect("small index") + 1;
        assert_eq!(session.status(), RoundStatus::Playing);
        assert_eq!(session.round_number(), round_number);
        assert_eq!(
            session.current_team(),
            Some(*starter),
            "Round {round_number} should start with team {starter}"
        );

        match round_number {
            // Team A finds the word without a miss
            1 => solve(&mut session),
            // B misses, A takes over and finishes
            2 => {
                miss(&mut session, 1);
                assert_eq!(session.current_team(), Some(Team::A));
                solve(&mut session);
            }
            // Nobody finds it
            3 => miss(&mut session, 6),
            // A, B and A miss in turn, B finishes
            5 => {
                miss(&mut session, 3);
                assert_eq!(session.current_team(), Some(Team::B));
                solve(&mut session);
            }
            _ => solve(&mut session),
        }

        let expected = if round_number == 3 {
            RoundStatus::Lost
        } else {
            RoundStatus::Won
        };
        assert_eq!(session.status(), expected);

        let next = session.next_round().await.expect("Advance should succeed");
        if round_number < 6 {
            assert_eq!(next, Some(LoadOutcome::Ready));
        } else {
            assert_eq!(next, None);
        }
    }

    assert_eq!(session.status(), RoundStatus::SeriesOver);
    assert_eq!(session.series_result(), Some(SeriesResult::Winner(Team::B)));

    let scoreboard = session.scoreboard().expect("Tournament has a scoreboard");
    assert_eq!(scoreboard.score(Team::A), 2);
    assert_eq!(scoreboard.score(Team::B), 3);

    let scored: Vec<Option<Team>> = session.history().iter().map(|r| r.scored_by).collect();
    assert_eq!(
        scored,
        vec![
            Some(Team::A),
            Some(Team::A),
            None,
            Some(Team::B),
            Some(Team::B),
            Some(Team::B)
        ]
    );
    assert_eq!(session.history()[2].wrong_guesses, 6);

    // Every round excluded the words already played
    let excludes = session.provider().excludes();
    assert_eq!(excludes.len(), 6);
    for (index, exclude) in excludes.iter().enumerate() {
        assert_eq!(exclude.len(), index);
    }

    let mut names = Vec::new();
    while let Ok(event) = events.try_recv() {
        names.push(event.event_name());
    }
    assert_eq!(names.iter().filter(|n| **n == "round_ready").count(), 6);
    assert_eq!(names.iter().filter(|n| **n == "round_won").count(), 5);
    assert_eq!(names.iter().filter(|n| **n == "round_lost").count(), 1);
    assert_eq!(names.last(), Some(&"series_over"));

    let view = session.view();
    assert_eq!(view.series_result, Some(SeriesResult::Winner(Team::B)));
    let tournament = view.tournament.expect("Tournament view");
    assert_eq!((tournament.score_a, tournament.score_b), (2, 3));

    let json = serde_json::to_value(&view).expect("View should serialize");
    assert_eq!(json["status"], "series_over");
    assert_eq!(json["tournament"]["scoreB"], 3);
}

/// Equal scores after the final round end in a tie.
#[tokio::test]
async fn test_tournament_tie() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye"), word("பூனை", "cat")]);
    let mut session = GameSession::new(tournament(2), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");

    solve(&mut session);
    assert_eq!(session.history()[0].scored_by, Some(Team::A));
    session.next_round().await.expect("Advance should succeed");

    assert_eq!(session.current_team(), Some(Team::B));
    solve(&mut session);
    assert_eq!(session.history()[1].scored_by, Some(Team::B));

    let next = session.next_round().await.expect("Advance should succeed");
    assert!(next.is_none());
    assert_eq!(session.status(), RoundStatus::SeriesOver);
    assert_eq!(session.series_result(), Some(SeriesResult::Tie));

    // Nothing follows the final round
    assert!(session.next_round().await.is_err());
    assert!(session.submit_guess("க").is_err());
}

/// A new series after the last one starts from scratch.
#[tokio::test]
async fn test_new_series_after_series_over() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye"), word("பூனை", "cat")]);
    let mut session = GameSession::new(tournament(1), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");
    miss(&mut session, 1);
    solve(&mut session);
    assert_eq!(session.next_round().await.expect("Advance"), None);
    assert_eq!(session.series_result(), Some(SeriesResult::Winner(Team::B)));

    session.start_series(Difficulty::Hard).expect("Series should restart");
    assert_eq!(session.status(), RoundStatus::DifficultySelect);
    assert!(session.series_result().is_none());
    assert!(session.history().is_empty());
    assert!(session.used_words().is_empty());

    session.load_puzzle().await.expect("Load should run");
    assert_eq!(session.status(), RoundStatus::Playing);
    assert_eq!(session.difficulty(), Difficulty::Hard);
    assert_eq!(session.current_team(), Some(Team::A));
    let scoreboard = session.scoreboard().expect("Tournament has a scoreboard");
    assert_eq!((scoreboard.score(Team::A), scoreboard.score(Team::B)), (0, 0));

    // The second series does not carry the first series' words
    assert_eq!(session.provider().excludes()[1], Vec::<String>::new());
}

/// Classic play keeps going past the tournament length.
#[tokio::test]
async fn test_classic_rounds_never_end_series() {
    let mut words = six_words();
    words.push(word("பல்", "tooth"));
    words.push(word("வீடு", "house"));
    let provider = ScriptedProvider::new(words);
    let mut session = GameSession::new(config(), provider);

    session.start_series(Difficulty::Easy).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");

    for round_number in 1..=8 {
        assert_eq!(session.round_number(), round_number);
        assert!(session.current_team().is_none());
        if round_number % 2 == 0 {
            miss(&mut session, 8);
            assert_eq!(session.status(), RoundStatus::Lost);
        } else {
            solve(&mut session);
            assert_eq!(session.status(), RoundStatus::Won);
        }
        if round_number < 8 {
            let next = session.next_round().await.expect("Advance should succeed");
            assert_eq!(next, Some(LoadOutcome::Ready));
        }
    }

    assert!(session.series_result().is_none());
    assert!(session.scoreboard().is_none());
    assert_eq!(session.history().len(), 8);
    assert_eq!(session.history().iter().filter(|r| r.won).count(), 4);
    assert_eq!(session.used_words().len(), 8);
}

/// A wrong guess in the last attempt loses the round and does not
/// pass the turn.
#[tokio::test]
async fn test_losing_guess_keeps_turn() {
    let provider = ScriptedProvider::new(vec![word("கண்", "eye")]);
    let mut session = GameSession::new(tournament(6), provider);

    session.start_series(Difficulty::Hard).expect("Series should start");
    session.load_puzzle().await.expect("Load should run");

    miss(&mut session, 3);
    assert_eq!(session.current_team(), Some(Team::B));
    session.submit_guess("ஏ").expect("Guess should apply");
    assert_eq!(session.status(), RoundStatus::Lost);
    assert_eq!(session.current_team(), Some(Team::B));
}
