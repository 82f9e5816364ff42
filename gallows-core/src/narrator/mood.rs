//! Mood classification and the executioner's face.
//!
//! Mood is never stored authoritatively: it is recomputed from the persisted
//! respect level and the difficulty of the game being played.

use crate::types::{Difficulty, Mood};

/// Respect at or above which the executioner is frustrated.
pub const FRUSTRATED_AT: u8 = 80;
/// Respect at or above which the executioner is impressed.
pub const IMPRESSED_AT: u8 = 65;
/// Respect at or below which the executioner is sarcastic.
pub const SARCASTIC_AT: u8 = 30;

/// Classify the executioner's mood.
///
/// Easy and hard games force their own mood. On normal difficulty the
/// respect level decides, checked from the top down.
#[must_use]
pub fn determine_mood(respect_level: u8, difficulty: Difficulty) -> Mood {
    match difficulty {
        Difficulty::Easy => Mood::ChildFriendly,
        Difficulty::Hard => Mood::Ruthless,
        Difficulty::Normal => match respect_level {
            r if r >= FRUSTRATED_AT => Mood::Frustrated,
            r if r >= IMPRESSED_AT => Mood::Impressed,
            r if r <= SARCASTIC_AT => Mood::Sarcastic,
            _ => Mood::Neutral,
        },
    }
}

// ---------------------------------------------------------------------------
// Avatar
// ---------------------------------------------------------------------------

const BODY: [&str; 3] = ["╰──┬──╯", "  /│\\", "  / \\"];

fn face(mood: Mood) -> &'static str {
    match mood {
        Mood::Neutral => "│ •_• │",
        Mood::Impressed => "│ O_O │",
        Mood::Sarcastic => "│ ¬_¬ │",
        Mood::Frustrated => "│ >_< │",
        Mood::Ruthless => "│ ☠_☠ │",
        Mood::ChildFriendly => "│ ^_^ │",
    }
}

/// The five rows of the executioner glyph for a mood.
#[must_use]
pub fn avatar_rows(mood: Mood) -> [&'static str; 5] {
    ["╭─────╮", face(mood), BODY[0], BODY[1], BODY[2]]
}

/// The executioner glyph for a mood, rows joined with newlines.
#[must_use]
pub fn avatar(mood: Mood) -> String {
    avatar_rows(mood).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_overrides_respect() {
        assert_eq!(determine_mood(95, Difficulty::Easy), Mood::ChildFriendly);
        assert_eq!(determine_mood(5, Difficulty::Easy), Mood::ChildFriendly);
        assert_eq!(determine_mood(95, Difficulty::Hard), Mood::Ruthless);
        assert_eq!(determine_mood(50, Difficulty::Hard), Mood::Ruthless);
    }

    #[test]
    fn normal_difficulty_follows_respect() {
        assert_eq!(determine_mood(95, Difficulty::Normal), Mood::Frustrated);
        assert_eq!(determine_mood(80, Difficulty::Normal), Mood::Frustrated);
        assert_eq!(determine_mood(79, Difficulty::Normal), Mood::Impressed);
        assert_eq!(determine_mood(65, Difficulty::Normal), Mood::Impressed);
        assert_eq!(determine_mood(64, Difficulty::Normal), Mood::Neutral);
        assert_eq!(determine_mood(50, Difficulty::Normal), Mood::Neutral);
        assert_eq!(determine_mood(31, Difficulty::Normal), Mood::Neutral);
        assert_eq!(determine_mood(30, Difficulty::Normal), Mood::Sarcastic);
        assert_eq!(determine_mood(20, Difficulty::Normal), Mood::Sarcastic);
        assert_eq!(determine_mood(0, Difficulty::Normal), Mood::Sarcastic);
    }

    #[test]
    fn every_mood_has_a_distinct_face() {
        let faces: Vec<&str> = Mood::ALL.iter().map(|m| avatar_rows(*m)[1]).collect();
        for (i, a) in faces.iter().enumerate() {
            for b in &faces[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(avatar(Mood::Neutral).lines().count(), 5);
    }
}
