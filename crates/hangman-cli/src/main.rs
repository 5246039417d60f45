//! Tamil Hangman CLI
//!
//! Plays the game in a terminal using the offline word bank.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use hangman_content::WordBank;
use hangman_core::audio::{AudioBackend, AudioError};
use hangman_core::{
    AudioData, Config, Difficulty, GameError, GameMode, GameSession, LazyAudioPlayer,
    RoundStatus, SeriesResult, SessionView,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Tamil Hangman - guess the word letter by letter
///
/// Three pictures hint at the word; find its letters before the attempts
/// run out. Tournament mode pits two teams against each other.
#[derive(Parser, Debug)]
#[command(name = "hangman")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: hangman.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Difficulty: easy, medium or hard
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Play a two-team tournament
    #[arg(short, long)]
    tournament: bool,

    /// Number of tournament rounds
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Seed for reproducible word picks and shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON word list (default: built-in list)
    #[arg(short, long, value_name = "FILE")]
    word_bank: Option<String>,

    /// Print every game event as JSON on stderr
    #[arg(long)]
    events: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str_case_insensitive(s)
        .ok_or_else(|| format!("invalid difficulty '{s}': expected easy, medium or hard"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?args.config, "Config file");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Loads everything, then plays until the player quits or the series ends.
async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(difficulty) = args.difficulty {
        config.default_difficulty = difficulty;
    }
    if args.tournament {
        config.mode = GameMode::Tournament;
    }
    if let Some(rounds) = args.rounds {
        config.total_rounds = rounds;
    }
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    if let Some(ref word_bank) = args.word_bank {
        config.word_bank = Some(word_bank.clone());
    }

    // Re-validate after overrides
    config.validate()?;

    let bank = load_word_bank(config.word_bank.as_deref())?;
    let bank = match config.rng_seed {
        Some(seed) => bank.with_seed(seed),
        None => bank,
    };

    let difficulty = config.default_difficulty;
    let mut session = GameSession::new(config, bank);

    if args.events {
        spawn_event_printer(&session);
    }

    let player = LazyAudioPlayer::new(|| {
        let backend: Box<dyn AudioBackend> = Box::new(TerminalBell);
        Ok(backend)
    });

    print_banner(&session);
    session.start_series(difficulty)?;
    session.load_puzzle().await?;
    render(&session.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            Ok(()) = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":help" | ":h" => print_help(),
            ":retry" => {
                if let Err(e) = session.retry().await {
                    println!("Nothing to retry ({e})");
                }
            }
            ":next" => {
                if session.next_round().await.is_err() {
                    println!("Finish this round first.");
                }
            }
            ":hear" => {
                if !session.play_pronunciation(&player) {
                    println!("No pronunciation for this word.");
                }
                continue;
            }
            letter => guess(&mut session, letter),
        }

        let view = session.view();
        render(&view);
        if view.status == RoundStatus::SeriesOver {
            break;
        }
    }

    print_summary(&session);
    Ok(())
}

/// Loads configuration from a file or the current directory.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

fn load_word_bank(path: Option<&str>) -> anyhow::Result<WordBank> {
    let bank = match path {
        Some(path) => WordBank::load_from_file(path).map_err(|e| {
            anyhow::anyhow!("{e}\n\nSuggestion: Check the wordBank path or remove it to use the built-in list")
        })?,
        None => WordBank::builtin()?,
    };
    tracing::info!(words = bank.len(), "Word bank ready");
    Ok(bank)
}

fn spawn_event_printer<P>(session: &GameSession<P>)
where
    P: hangman_core::ContentProvider,
{
    let mut receiver = session.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = receiver.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => eprintln!("{json}"),
                Err(e) => tracing::warn!("Failed to serialize event: {}", e),
            }
        }
    });
}

fn guess<P: hangman_core::ContentProvider>(session: &mut GameSession<P>, letter: &str) {
    let on_keyboard = session
        .puzzle()
        .is_some_and(|p| p.keyboard().contains(letter));
    if session.status() == RoundStatus::Playing && !on_keyboard {
        println!("'{letter}' is not on the keyboard.");
        return;
    }

    match session.submit_guess(letter) {
        Ok(result) if result.evaluation.outcome.is_correct() => println!("Yes, '{letter}' is in the word."),
        Ok(_) => println!("No '{letter}' in this word."),
        Err(GameError::InvalidGuess { reason }) => println!("Guess ignored: {reason}."),
        Err(e) => println!("Guess ignored: {e}"),
    }
}

/// Audio output for a terminal: rings the bell.
struct TerminalBell;

impl AudioBackend for TerminalBell {
    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, _audio: &AudioData) -> Result<(), AudioError> {
        print!("\x07");
        Ok(())
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn print_banner<P: hangman_core::ContentProvider>(session: &GameSession<P>) {
    let config = session.config();
    println!("Tamil Hangman");
    match config.mode {
        GameMode::Classic => println!("  Mode: classic"),
        GameMode::Tournament => println!("  Mode: tournament, {} rounds", config.total_rounds),
    }
    println!(
        "  Difficulty: {} ({} wrong guesses allowed)",
        config.default_difficulty,
        config.default_difficulty.max_wrong_guesses()
    );
    println!("Type a letter and press Enter. :help lists commands.");
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  <letter>  guess a letter from the keyboard");
    println!("  :hear     play the pronunciation");
    println!("  :next     start the next round once this one is over");
    println!("  :retry    try loading again after an error");
    println!("  :quit     leave the game");
}

fn render(view: &SessionView) {
    println!();
    if let Some(t) = &view.tournament {
        println!(
            "Round {}/{}  |  Team A {} - Team B {}  |  Team {} to guess",
            t.round_number, t.total_rounds, t.score_a, t.score_b, t.current_team
        );
    } else {
        println!("Round {} ({})", view.round_number, view.difficulty);
    }

    match view.status {
        RoundStatus::Error => {
            if let Some(message) = &view.error_message {
                println!("{message}");
            }
            println!("Type :retry to try again.");
            return;
        }
        RoundStatus::Loading => {
            println!("Preparing the puzzle...");
            return;
        }
        _ => {}
    }

    let pictures: Vec<String> = view
        .images
        .iter()
        .enumerate()
        .map(|(i, image)| format!("[{}] {}", i + 1, image.label))
        .collect();
    println!("Pictures: {}", pictures.join("  "));
    println!("Word:     {}", view.masked_word("_"));
    println!(
        "Misses:   {}/{}",
        view.wrong_guesses, view.max_wrong_guesses
    );

    let keys: Vec<&str> = view
        .keyboard
        .iter()
        .map(|k| if k.disabled { "·" } else { k.letter.as_str() })
        .collect();
    println!("Keys:     {}", keys.join(" "));
    if view.has_audio {
        println!("          (:hear to listen)");
    }

    if let Some(answer) = &view.answer {
        let verdict = if view.status == RoundStatus::Won {
            "Well done!"
        } else {
            "Out of guesses."
        };
        println!(
            "{verdict} The word was {} ({}, \"{}\").",
            answer.word, answer.transliteration, answer.english
        );
        if view.status != RoundStatus::SeriesOver {
            println!("Type :next for another word.");
        }
    }

    match view.series_result {
        Some(SeriesResult::Winner(team)) => println!("Team {team} wins the tournament!"),
        Some(SeriesResult::Tie) => println!("The tournament is a tie!"),
        None => {}
    }
}

fn print_summary<P: hangman_core::ContentProvider>(session: &GameSession<P>) {
    let history = session.history();
    if history.is_empty() {
        return;
    }
    let won = history.iter().filter(|r| r.won).count();
    println!();
    println!("Rounds played: {}, words found: {won}", history.len());
    for record in history {
        let mark = if record.won { "+" } else { "-" };
        println!("  {mark} {} ({})", record.word, record.english);
    }
}
