//! Achievements: a fixed table and a pure unlock rule.
//!
//! Evaluation runs after each finished game, once the session is saved, so
//! the stats it sees already include that game.

use serde::Serialize;

use crate::narrator::memory::MAX_RESPECT;
use crate::stats::PlayerStats;

/// One achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    /// Stable storage key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What it takes.
    pub description: &'static str,
    /// Single glyph.
    pub icon: &'static str,
}

const fn def(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
) -> AchievementDef {
    AchievementDef {
        key,
        name,
        description,
        icon,
    }
}

/// Every achievement, in display order.
pub const ACHIEVEMENTS: &[AchievementDef] = &[
    def("first_win", "First Step", "Win your first game", "🎯"),
    def("campfire_master", "Campfire Master", "Win 10 games in a row", "🔥"),
    def("speed_devil", "Speed Devil", "Win a game in under 30 seconds", "⚡"),
    def("flawless", "Flawless", "Win without a single wrong letter", "💎"),
    def("persistent", "Persistent", "Play 50 games", "🏋️"),
    def("scouting_expert", "Scouting Expert", "Win in every category", "🏅"),
    def("executioner_beaten", "Executioner Beaten", "Reach maximum respect with the executioner", "👑"),
    def("knot_expert", "Knot Expert", "Solve 5 words about knots", "🪢"),
];

const STREAK_FOR_CAMPFIRE: u32 = 10;
const SPEED_LIMIT_SECS: u64 = 30;
const GAMES_FOR_PERSISTENT: u32 = 50;
const KNOT_WINS_FOR_EXPERT: u32 = 5;

/// Look up a definition by key.
#[must_use]
pub fn find(key: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.key == key)
}

/// Facts the unlock rules look at.
#[derive(Debug, Clone, Copy)]
pub struct AchievementInput<'a> {
    /// Stats including the game just finished.
    pub stats: &'a PlayerStats,
    /// Outcome of the game just finished.
    pub won: bool,
    /// Its wrong guesses.
    pub wrong_guesses: u32,
    /// Its duration.
    pub duration_secs: u64,
    /// Executioner respect after the game.
    pub respect_level: u8,
    /// Distinct categories the player has won in.
    pub categories_won: usize,
    /// Distinct categories in the word pool.
    pub categories_total: usize,
    /// Wins on words from the knots category.
    pub knot_wins: u32,
}

fn is_met(key: &str, input: &AchievementInput<'_>) -> bool {
    match key {
        "first_win" => input.stats.wins >= 1,
        "campfire_master" => input.stats.current_streak >= STREAK_FOR_CAMPFIRE,
        "speed_devil" => input.won && input.duration_secs < SPEED_LIMIT_SECS,
        "flawless" => input.won && input.wrong_guesses == 0,
        "persistent" => input.stats.total_games >= GAMES_FOR_PERSISTENT,
        "scouting_expert" => {
            input.categories_total > 0 && input.categories_won >= input.categories_total
        }
        "executioner_beaten" => input.respect_level >= MAX_RESPECT,
        "knot_expert" => input.knot_wins >= KNOT_WINS_FOR_EXPERT,
        _ => false,
    }
}

/// Achievements whose rule holds and that are not in `unlocked` yet.
#[must_use]
pub fn evaluate<S: AsRef<str>>(
    input: &AchievementInput<'_>,
    unlocked: &[S],
) -> Vec<&'static AchievementDef> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.iter().any(|k| k.as_ref() == a.key))
        .filter(|a| is_met(a.key, input))
        .collect()
}
