//! Core type definitions shared by the engine, the narrator and storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GallowsError;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Row id of a player in the local roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

/// Row id of a word in the word pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub i64);

/// Row id of a recorded game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// The difficulty setting chosen before a game.
///
/// Besides selecting the word pool, the setting can override the
/// narrator's mood entirely (see [`crate::narrator::mood::determine_mood`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Short words, friendly narrator.
    Easy,
    /// Medium words, mood driven by respect.
    #[default]
    Normal,
    /// Long words, ruthless narrator.
    Hard,
}

impl Difficulty {
    /// Every setting, in menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Stable lowercase name, as stored in the sessions table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// One-line menu description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Easy => "Short words, a friendly executioner",
            Self::Normal => "Medium words, a moody executioner",
            Self::Hard => "Long words, a merciless executioner",
        }
    }

    /// Word tiers drawn from for this setting.
    #[must_use]
    pub fn word_tiers(self) -> &'static [u8] {
        match self {
            Self::Easy => &[1],
            Self::Normal => &[1, 2],
            Self::Hard => &[2, 3],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GallowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            other => Err(GallowsError::Config(format!("unknown difficulty: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Narrator vocabulary
// ---------------------------------------------------------------------------

/// The executioner's disposition. Drives dialogue tone and avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Middle-of-the-road respect.
    #[default]
    Neutral,
    /// The player keeps winning.
    Impressed,
    /// The player keeps losing.
    Sarcastic,
    /// The player wins so much it hurts.
    Frustrated,
    /// Hard difficulty, regardless of respect.
    Ruthless,
    /// Easy difficulty, regardless of respect.
    ChildFriendly,
}

impl Mood {
    /// Every mood.
    pub const ALL: [Self; 6] = [
        Self::Neutral,
        Self::Impressed,
        Self::Sarcastic,
        Self::Frustrated,
        Self::Ruthless,
        Self::ChildFriendly,
    ];

    /// Stable snake_case name, as stored in the narrator memory table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Impressed => "impressed",
            Self::Sarcastic => "sarcastic",
            Self::Frustrated => "frustrated",
            Self::Ruthless => "ruthless",
            Self::ChildFriendly => "child_friendly",
        }
    }

    /// Parse a stored name. Unknown names come back as `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in the game lifecycle at which the narrator speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Moment {
    /// A fresh word is on the board.
    GameStart,
    /// The guessed letter is in the word.
    CorrectGuess,
    /// The guessed letter is not in the word (or a hint cost a life).
    WrongGuess,
    /// One life left.
    AlmostDead,
    /// Every letter revealed.
    Win,
    /// Out of lives.
    Loss,
    /// An achievement unlocked after the game.
    Achievement,
    /// The win streak hit a milestone.
    Streak,
}

impl Moment {
    /// Every moment.
    pub const ALL: [Self; 8] = [
        Self::GameStart,
        Self::CorrectGuess,
        Self::WrongGuess,
        Self::AlmostDead,
        Self::Win,
        Self::Loss,
        Self::Achievement,
        Self::Streak,
    ];

    /// Stable snake_case name, also usable as a template value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GameStart => "game_start",
            Self::CorrectGuess => "correct_guess",
            Self::WrongGuess => "wrong_guess",
            Self::AlmostDead => "almost_dead",
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Achievement => "achievement",
            Self::Streak => "streak",
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().expect("parse"), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().expect("parse"), Difficulty::Easy);
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn word_tiers_overlap_as_expected() {
        assert_eq!(Difficulty::Easy.word_tiers(), &[1]);
        assert!(Difficulty::Normal.word_tiers().contains(&2));
        assert!(!Difficulty::Hard.word_tiers().contains(&1));
    }

    #[test]
    fn mood_names_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_name(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::from_name("giddy"), None);
    }

    #[test]
    fn serde_uses_storage_names() {
        let json = serde_json::to_string(&Mood::ChildFriendly).expect("ser");
        assert_eq!(json, "\"child_friendly\"");
        let json = serde_json::to_string(&Difficulty::Normal).expect("ser");
        assert_eq!(json, "\"normal\"");
    }
}
