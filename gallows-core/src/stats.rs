//! Player records, finished games and aggregate statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::GameState;
use crate::types::{Difficulty, PlayerId, WordId};

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Row id.
    pub id: PlayerId,
    /// Unique display name.
    pub name: String,
    /// When the player was first seen.
    pub created_at: DateTime<Utc>,
}

/// Everything recorded about one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedGame {
    /// Who played.
    pub player: PlayerId,
    /// Which word.
    pub word_id: WordId,
    /// Setting the game was played on.
    pub difficulty: Difficulty,
    /// Outcome.
    pub won: bool,
    /// Misses at the end.
    pub wrong_guesses: u32,
    /// Letters tried, in order.
    pub guessed_letters: Vec<char>,
    /// Whole seconds from start to finish.
    pub duration_secs: u64,
    /// Final score (0 for a loss).
    pub score: u32,
    /// Whether the hint was spent.
    pub hint_used: bool,
    /// When the game ended.
    pub finished_at: DateTime<Utc>,
}

impl FinishedGame {
    /// Capture the final state of a game at `now`.
    #[must_use]
    pub fn from_state(
        player: PlayerId,
        difficulty: Difficulty,
        state: &GameState,
        now: DateTime<Utc>,
    ) -> Self {
        let won = state.is_won();
        Self {
            player,
            word_id: state.word_id(),
            difficulty,
            won,
            wrong_guesses: state.wrong_guesses(),
            guessed_letters: state.guessed_letters().to_vec(),
            duration_secs: state.duration_secs_at(now),
            score: state.score_at(won, now),
            hint_used: state.hint_used(),
            finished_at: now,
        }
    }
}

/// Aggregates over a player's recorded games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Games recorded.
    pub total_games: u32,
    /// Games won.
    pub wins: u32,
    /// Games lost.
    pub losses: u32,
    /// Wins as a percentage of games, 0 when nothing was played.
    pub win_rate: f64,
    /// Mean wrong guesses per game.
    pub avg_wrong_guesses: f64,
    /// Wins since the most recent loss.
    pub current_streak: u32,
    /// Longest run of wins ever.
    pub best_streak: u32,
    /// Seconds played in total.
    pub total_play_time: u64,
    /// Sum of all scores.
    pub total_score: u64,
    /// Quickest win in seconds.
    pub fastest_win: Option<u64>,
    /// Longest word ever solved.
    pub longest_word: Option<String>,
}

/// Current and best win streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    /// Wins before the first loss, counting from the newest game.
    pub current: u32,
    /// Longest run of consecutive wins.
    pub best: u32,
}

/// Streaks from game results ordered newest first.
///
/// A history without any loss is one streak as long as the history.
#[must_use]
pub fn streaks<I: IntoIterator<Item = bool>>(results_newest_first: I) -> Streaks {
    let mut run = 0;
    let mut best = 0;
    let mut current = None;
    for won in results_newest_first {
        if won {
            run += 1;
            best = best.max(run);
        } else {
            current.get_or_insert(run);
            run = 0;
        }
    }
    Streaks {
        current: current.unwrap_or(run),
        best,
    }
}

/// Percentage with a zero denominator mapped to 0.
#[must_use]
pub fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total) * 100.0
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Games recorded.
    pub total_games: u32,
    /// Games won.
    pub wins: u32,
    /// Win percentage, one decimal.
    pub win_rate: f64,
    /// Sum of scores.
    pub total_score: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streaks([]), Streaks::default());
    }

    #[test]
    fn all_wins_is_one_streak() {
        assert_eq!(streaks([true; 4]), Streaks { current: 4, best: 4 });
    }

    #[test]
    fn current_stops_at_latest_loss() {
        // newest first: W W L W W W L W
        let s = streaks([true, true, false, true, true, true, false, true]);
        assert_eq!(s, Streaks { current: 2, best: 3 });
    }

    #[test]
    fn latest_game_lost_means_no_current_streak() {
        let s = streaks([false, true, true]);
        assert_eq!(s, Streaks { current: 0, best: 2 });
    }

    #[test]
    fn win_rate_handles_zero_games() {
        assert!(win_rate(0, 0).abs() < f64::EPSILON);
        assert!((win_rate(1, 4) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn finished_game_snapshots_state() {
        let start = DateTime::parse_from_rfc3339("2026-01-01T12:00:00Z")
            .expect("ts")
            .with_timezone(&Utc);
        let state = GameState::started_at("ab", WordId(9), "knots", start)
            .guess('a')
            .guess('z')
            .guess('b');
        let now = start + chrono::Duration::seconds(40);
        let game = FinishedGame::from_state(PlayerId(2), Difficulty::Hard, &state, now);
        assert!(game.won);
        assert_eq!(game.word_id, WordId(9));
        assert_eq!(game.wrong_guesses, 1);
        assert_eq!(game.guessed_letters, vec!['a', 'z', 'b']);
        assert_eq!(game.duration_secs, 40);
        assert_eq!(game.score, state.score_at(true, now));
        assert!(game.score > 0);
    }
}
