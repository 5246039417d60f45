//! Two-team tournament: turn rotation and scoring across a fixed series.

use serde::{Deserialize, Serialize};

use crate::guess::GuessOutcome;

/// Default number of rounds in a tournament.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 6;

/// One of the two competing teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Team A, which starts the first round.
    A,
    /// Team B.
    B,
}

impl Team {
    /// The opposing team.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Team that starts round `round_number` (1-indexed): A on odd rounds, B on even.
///
/// # Examples
///
/// ```
/// use hangman_core::tournament::{starter_for_round, Team};
///
/// let starters: Vec<Team> = (1..=6).map(starter_for_round).collect();
/// assert_eq!(starters, [Team::A, Team::B, Team::A, Team::B, Team::A, Team::B]);
/// ```
#[must_use]
pub const fn starter_for_round(round_number: u32) -> Team {
    if round_number % 2 == 1 {
        Team::A
    } else {
        Team::B
    }
}

// ============================================================================
// TurnCoordinator
// ============================================================================

/// Tracks which team holds the turn within a round.
///
/// A correct guess keeps the turn; a wrong guess passes it, unless that
/// guess lost the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCoordinator {
    current: Team,
}

impl TurnCoordinator {
    /// Starts a round with `starter` holding the turn.
    #[must_use]
    pub const fn new(starter: Team) -> Self {
        Self { current: starter }
    }

    /// Team currently entitled to guess.
    #[must_use]
    pub const fn current(&self) -> Team {
        self.current
    }

    /// Updates the turn after a guess and returns the team now holding it.
    pub fn record(&mut self, outcome: GuessOutcome, round_lost: bool) -> Team {
        if outcome == GuessOutcome::Incorrect && !round_lost {
            self.current = self.current.other();
        }
        self.current
    }
}

// ============================================================================
// Scoreboard
// ============================================================================

/// Final result of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "team", rename_all = "snake_case")]
pub enum SeriesResult {
    /// One team finished with a strictly higher score.
    Winner(Team),
    /// Both teams finished level.
    Tie,
}

impl SeriesResult {
    /// Resolves the result from final scores.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangman_core::tournament::{SeriesResult, Team};
    ///
    /// assert_eq!(SeriesResult::from_scores(3, 2), SeriesResult::Winner(Team::A));
    /// assert_eq!(SeriesResult::from_scores(2, 2), SeriesResult::Tie);
    /// ```
    #[must_use]
    pub const fn from_scores(score_a: u32, score_b: u32) -> Self {
        if score_a > score_b {
            Self::Winner(Team::A)
        } else if score_b > score_a {
            Self::Winner(Team::B)
        } else {
            Self::Tie
        }
    }
}

/// What [`Scoreboard::advance`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new round begins with the given number and starting team.
    NextRound {
        /// The new round number.
        round_number: u32,
        /// Team that holds the first turn.
        starter: Team,
    },
    /// The final round has been played.
    SeriesComplete(SeriesResult),
}

/// Cumulative scores and round progress across a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    score_a: u32,
    score_b: u32,
    round_number: u32,
    total_rounds: u32,
    round_starter: Team,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_ROUNDS)
    }
}

impl Scoreboard {
    /// Creates a scoreboard at round 1 with both scores at zero.
    ///
    /// A `total_rounds` of zero is treated as one.
    #[must_use]
    pub fn new(total_rounds: u32) -> Self {
        Self {
            score_a: 0,
            score_b: 0,
            round_number: 1,
            total_rounds: total_rounds.max(1),
            round_starter: starter_for_round(1),
        }
    }

    /// Score of `team`.
    #[must_use]
    pub const fn score(&self, team: Team) -> u32 {
        match team {
            Team::A => self.score_a,
            Team::B => self.score_b,
        }
    }

    /// Current round number (1-indexed).
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Number of rounds in the series.
    #[must_use]
    pub const fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Team that started the current round.
    #[must_use]
    pub const fn round_starter(&self) -> Team {
        self.round_starter
    }

    /// Returns `true` if the current round is the last one.
    #[must_use]
    pub const fn is_final_round(&self) -> bool {
        self.round_number >= self.total_rounds
    }

    /// Awards the point for a won round to `team`.
    pub fn award(&mut self, team: Team) {
        match team {
            Team::A => self.score_a += 1,
            Team::B => self.score_b += 1,
        }
        tracing::info!(
            team = %team,
            score_a = self.score_a,
            score_b = self.score_b,
            "Point awarded"
        );
    }

    /// Moves past a decided round.
    ///
    /// On the final round the series is resolved and nothing changes;
    /// otherwise the round number increments and the starting team
    /// alternates.
    pub fn advance(&mut self) -> Advance {
        if self.is_final_round() {
            return Advance::SeriesComplete(self.result());
        }

        self.round_number += 1;
        self.round_starter = self.round_starter.other();
        Advance::NextRound {
            round_number: self.round_number,
            starter: self.round_starter,
        }
    }

    /// Result from the current scores.
    #[must_use]
    pub const fn result(&self) -> SeriesResult {
        SeriesResult::from_scores(self.score_a, self.score_b)
    }
}
