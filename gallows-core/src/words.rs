//! The word pool: records, difficulty tiers and the built-in scouting list.

use serde::{Deserialize, Serialize};

use crate::types::WordId;

/// A stored word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Row id.
    pub id: WordId,
    /// Lowercased text; may contain spaces.
    pub word: String,
    /// Category, e.g. `knots`.
    pub category: String,
    /// Difficulty tier, 1 to 3.
    pub tier: u8,
    /// Optional clue shown on request.
    pub hint: Option<String>,
    /// Games played with this word.
    pub times_played: u32,
    /// Games won with this word.
    pub times_won: u32,
}

/// Input for [`crate::persistence::SqliteStore::add_word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewWord<'a> {
    /// Text, lowercased on insert.
    pub word: &'a str,
    /// Category.
    pub category: &'a str,
    /// Tier; derived from the length when `None`.
    pub tier: Option<u8>,
    /// Optional clue.
    pub hint: Option<&'a str>,
}

impl<'a> NewWord<'a> {
    /// A word with a derived tier and no clue.
    #[must_use]
    pub fn new(word: &'a str, category: &'a str) -> Self {
        Self {
            word,
            category,
            tier: None,
            hint: None,
        }
    }

    /// Attach a clue.
    #[must_use]
    pub fn with_hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Force a tier.
    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = Some(tier);
        self
    }

    /// The tier that will be stored.
    #[must_use]
    pub fn effective_tier(&self) -> u8 {
        self.tier.unwrap_or_else(|| tier_for_length(self.word))
    }
}

/// Tier from the character count: up to 5 is tier 1, up to 9 is tier 2,
/// anything longer is tier 3.
#[must_use]
pub fn tier_for_length(word: &str) -> u8 {
    match word.chars().count() {
        0..=5 => 1,
        6..=9 => 2,
        _ => 3,
    }
}

// ---------------------------------------------------------------------------
// Built-in list
// ---------------------------------------------------------------------------

/// Category whose wins count towards the knot expert achievement.
pub const KNOTS_CATEGORY: &str = "knots";

/// Words inserted into an empty pool: `(word, category, hint)`.
pub const DEFAULT_WORDS: &[(&str, &str, &str)] = &[
    // knots
    ("bowline", KNOTS_CATEGORY, "A fixed loop that will not slip"),
    ("reef knot", KNOTS_CATEGORY, "Right over left, left over right"),
    ("clove hitch", KNOTS_CATEGORY, "Two turns around a pole, crossed"),
    ("sheet bend", KNOTS_CATEGORY, "Joins two ropes of different thickness"),
    ("half hitch", KNOTS_CATEGORY, "The simplest hitch there is"),
    ("lashing", KNOTS_CATEGORY, "Binds two spars together"),
    ("whipping", KNOTS_CATEGORY, "Stops a rope end from fraying"),
    ("figure eight", KNOTS_CATEGORY, "A stopper knot shaped like a number"),
    ("sheepshank", KNOTS_CATEGORY, "Shortens a rope without cutting it"),
    ("noose", KNOTS_CATEGORY, "The executioner's favourite"),
    // camping
    ("tent", "camping", "Your house for the weekend"),
    ("campfire", "camping", "Songs are sung around it"),
    ("sleeping bag", "camping", "Zip yourself in at night"),
    ("groundsheet", "camping", "Keeps the damp out from below"),
    ("tarp", "camping", "A roof without walls"),
    ("tent peg", "camping", "Hammer it into the ground"),
    ("mess tin", "camping", "Cook and eat from the same pot"),
    ("firewood", "camping", "Collect it before dark"),
    // nature
    ("oak", "nature", "Acorns grow on it"),
    ("badger", "nature", "Striped face, digs setts"),
    ("owl", "nature", "Hoots at night"),
    ("heather", "nature", "Purple on the moors"),
    ("woodpecker", "nature", "Knocks on trees for a living"),
    ("mushroom", "nature", "Never eat one you do not know"),
    ("squirrel", "nature", "Buries nuts and forgets them"),
    ("constellation", "nature", "A picture drawn in stars"),
    // orienteering
    ("compass", "orienteering", "The needle points north"),
    ("map", "orienteering", "Paper version of the land"),
    ("bearing", "orienteering", "An angle to walk along"),
    ("contour line", "orienteering", "Joins points of equal height"),
    ("grid reference", "orienteering", "Six digits to pin a spot"),
    ("landmark", "orienteering", "Something you can steer by"),
    // scouting
    ("woggle", "scouting", "Holds the neckerchief together"),
    ("neckerchief", "scouting", "Worn around the collar"),
    ("patrol", "scouting", "A small group within the troop"),
    ("badge", "scouting", "Sewn on the sleeve when earned"),
    ("jamboree", "scouting", "A gathering of scouts from everywhere"),
    ("troop", "scouting", "Your scout group"),
    ("promise", "scouting", "Made at your investiture"),
    ("first aid", "scouting", "Help before the doctor arrives"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_length() {
        assert_eq!(tier_for_length("tent"), 1);
        assert_eq!(tier_for_length("noose"), 1);
        assert_eq!(tier_for_length("bowline"), 2);
        assert_eq!(tier_for_length("reef knot"), 2);
        assert_eq!(tier_for_length("woodpecker"), 3);
    }

    #[test]
    fn explicit_tier_wins() {
        assert_eq!(NewWord::new("oak", "nature").effective_tier(), 1);
        assert_eq!(NewWord::new("oak", "nature").with_tier(3).effective_tier(), 3);
    }

    #[test]
    fn default_list_is_clean() {
        for (word, category, hint) in DEFAULT_WORDS {
            assert_eq!(*word, word.to_lowercase(), "{word}");
            assert!(word.chars().all(|c| c.is_ascii_lowercase() || c == ' '), "{word}");
            assert!(!category.is_empty() && !hint.is_empty());
        }
        let knots = DEFAULT_WORDS.iter().filter(|(_, c, _)| *c == KNOTS_CATEGORY).count();
        assert!(knots >= 5);
        for tier in 1..=3 {
            assert!(DEFAULT_WORDS.iter().any(|(w, _, _)| tier_for_length(w) == tier));
        }
    }
}
