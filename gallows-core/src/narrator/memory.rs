//! The executioner's per-player memory.
//!
//! Only the respect level is durable state. The stored mood is a cache of the
//! last classification and is rewritten on every update.

use serde::{Deserialize, Serialize};

use crate::config::NarratorConfig;
use crate::error::Result;
use crate::types::{Difficulty, Mood, PlayerId};

use super::mood::determine_mood;

/// Upper bound of the respect scale.
pub const MAX_RESPECT: u8 = 100;

/// What the executioner remembers about one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratorMemory {
    /// Mood computed at the last update.
    pub mood: Mood,
    /// Respect in `0..=100`.
    pub respect_level: u8,
}

impl Default for NarratorMemory {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            respect_level: 50,
        }
    }
}

impl NarratorMemory {
    /// Memory for a player the executioner has never met.
    #[must_use]
    pub fn fresh(config: &NarratorConfig) -> Self {
        Self {
            mood: Mood::Neutral,
            respect_level: config.initial_respect.min(MAX_RESPECT),
        }
    }

    /// Memory after one finished game.
    ///
    /// Respect moves by the configured win or loss delta and is clamped to
    /// `0..=100`; the mood is reclassified from the new respect and the
    /// difficulty of the game just played.
    #[must_use]
    pub fn after_game(self, won: bool, difficulty: Difficulty, config: &NarratorConfig) -> Self {
        let delta = if won { config.win_delta } else { config.loss_delta };
        let respect_level = shift_respect(self.respect_level, delta);
        Self {
            mood: determine_mood(respect_level, difficulty),
            respect_level,
        }
    }
}

/// `respect + delta`, clamped to `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn shift_respect(respect: u8, delta: i32) -> u8 {
    // Clamped into 0..=100, so the narrowing cannot truncate.
    i32::from(respect)
        .saturating_add(delta)
        .clamp(0, i32::from(MAX_RESPECT)) as u8
}

/// Storage collaborator for narrator memory.
///
/// Implemented by [`crate::persistence::SqliteStore`]; tests use an in-memory
/// map.
pub trait NarratorStore {
    /// The stored memory for `player`, or `None` when there is no row yet.
    ///
    /// # Errors
    /// Any storage failure.
    fn narrator_memory(&self, player: PlayerId) -> Result<Option<NarratorMemory>>;

    /// Insert or replace the memory for `player`.
    ///
    /// # Errors
    /// Any storage failure.
    fn upsert_narrator_memory(&self, player: PlayerId, memory: &NarratorMemory) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respect_is_clamped() {
        assert_eq!(shift_respect(98, 5), 100);
        assert_eq!(shift_respect(2, -3), 0);
        assert_eq!(shift_respect(0, -3), 0);
        assert_eq!(shift_respect(100, 5), 100);
        assert_eq!(shift_respect(50, i32::MAX), 100);
        assert_eq!(shift_respect(50, i32::MIN), 0);
    }

    #[test]
    fn four_wins_then_a_loss() {
        let config = NarratorConfig::default();
        let mut memory = NarratorMemory::fresh(&config);
        for _ in 0..4 {
            memory = memory.after_game(true, Difficulty::Normal, &config);
        }
        assert_eq!(memory.respect_level, 70);
        assert_eq!(memory.mood, Mood::Impressed);
        memory = memory.after_game(false, Difficulty::Normal, &config);
        assert_eq!(memory.respect_level, 67);
        assert_eq!(memory.mood, Mood::Impressed);
    }

    #[test]
    fn mood_follows_difficulty_of_the_last_game() {
        let config = NarratorConfig::default();
        let memory = NarratorMemory::fresh(&config).after_game(true, Difficulty::Hard, &config);
        assert_eq!(memory.respect_level, 55);
        assert_eq!(memory.mood, Mood::Ruthless);
    }

    #[test]
    fn fresh_memory_uses_configured_respect() {
        let config = NarratorConfig {
            initial_respect: 200,
            ..NarratorConfig::default()
        };
        assert_eq!(NarratorMemory::fresh(&config).respect_level, 100);
        assert_eq!(NarratorMemory::fresh(&NarratorConfig::default()), NarratorMemory::default());
    }
}
