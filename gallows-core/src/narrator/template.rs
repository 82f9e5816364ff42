//! Dialogue context and `{placeholder}` interpolation.
//!
//! A placeholder is `{name}` where `name` is made of ASCII letters, digits and
//! underscores. Names resolve through [`FIELDS`], a fixed table from field
//! name to accessor on [`DialogueContext`]. Unknown names are left in the text
//! untouched.

use crate::engine::MAX_WRONG_GUESSES;
use crate::types::{Difficulty, Mood, Moment};

/// Everything a dialogue line may mention or be gated on.
///
/// Build one with struct-update syntax over [`Default`]; the narrator fills in
/// `difficulty`, `respect_level`, `mood` and `moment` itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueContext {
    /// How the executioner addresses the player.
    pub player_name: String,
    /// Current win streak.
    pub streak: u32,
    /// Games won, all time.
    pub total_wins: u32,
    /// Games played, all time.
    pub total_games: u32,
    /// Win percentage, 0 to 100.
    pub win_rate: f64,
    /// Category of the current word; empty when unknown.
    pub category: String,
    /// Letters in the current word, spaces excluded.
    pub word_length: usize,
    /// Score of the finished game (0 while playing).
    pub score: u32,
    /// Difficulty of the current game.
    pub difficulty: Difficulty,
    /// Lives left.
    pub remaining_lives: u32,
    /// Wrong guesses so far.
    pub wrong_guesses: u32,
    /// Whether the hint was spent.
    pub hint_used: bool,
    /// Persisted respect of the executioner for this player.
    pub respect_level: u8,
    /// Mood resolved for this request.
    pub mood: Mood,
    /// Moment the line is requested for.
    pub moment: Moment,
}

impl Default for DialogueContext {
    fn default() -> Self {
        Self {
            player_name: "scout".to_string(),
            streak: 0,
            total_wins: 0,
            total_games: 0,
            win_rate: 0.0,
            category: String::new(),
            word_length: 0,
            score: 0,
            difficulty: Difficulty::Normal,
            remaining_lives: MAX_WRONG_GUESSES,
            wrong_guesses: 0,
            hint_used: false,
            respect_level: 50,
            mood: Mood::Neutral,
            moment: Moment::GameStart,
        }
    }
}

type Accessor = fn(&DialogueContext) -> String;

/// Placeholder name to value accessor.
pub const FIELDS: &[(&str, Accessor)] = &[
    ("player_name", |c| c.player_name.clone()),
    ("streak", |c| c.streak.to_string()),
    ("total_wins", |c| c.total_wins.to_string()),
    ("total_games", |c| c.total_games.to_string()),
    ("win_rate", |c| format!("{:.0}", c.win_rate)),
    ("category", |c| c.category.clone()),
    ("word_length", |c| c.word_length.to_string()),
    ("score", |c| c.score.to_string()),
    ("difficulty", |c| c.difficulty.as_str().to_string()),
    ("remaining_lives", |c| c.remaining_lives.to_string()),
    ("wrong_guesses", |c| c.wrong_guesses.to_string()),
    ("hint_used", |c| c.hint_used.to_string()),
    ("respect_level", |c| c.respect_level.to_string()),
    ("mood", |c| c.mood.as_str().to_string()),
    ("moment", |c| c.moment.as_str().to_string()),
];

impl DialogueContext {
    /// Value of a named field, or `None` for an unknown name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, get)| get(self))
    }
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Length in bytes of the placeholder name starting right after a `{`, when
/// it is a well-formed `{name}`.
fn placeholder_len(rest: &str) -> Option<usize> {
    let end = rest.find(|c: char| !is_ident(c))?;
    (end > 0 && rest[end..].starts_with('}')).then_some(end)
}

/// Names of all well-formed placeholders in `template`, in order.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        if let Some(len) = placeholder_len(after) {
            names.push(&after[..len]);
            rest = &after[len + 1..];
        } else {
            rest = after;
        }
    }
    names
}

/// Replace every `{name}` in `template` with the matching context field.
#[must_use]
pub fn interpolate(template: &str, ctx: &DialogueContext) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match placeholder_len(after) {
            Some(len) => {
                let name = &after[..len];
                match ctx.field(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> DialogueContext {
        DialogueContext {
            player_name: "Robin".to_string(),
            streak: 4,
            total_wins: 12,
            win_rate: 66.666,
            category: "knots".to_string(),
            ..DialogueContext::default()
        }
    }

    #[test]
    fn replaces_known_fields() {
        let text = interpolate("{player_name} has {total_wins} wins, streak {streak}.", &ctx());
        assert_eq!(text, "Robin has 12 wins, streak 4.");
    }

    #[test]
    fn win_rate_is_whole_percent() {
        assert_eq!(interpolate("{win_rate}%", &ctx()), "67%");
    }

    #[test]
    fn unknown_fields_stay_literal() {
        assert_eq!(interpolate("Hello {nickname}!", &ctx()), "Hello {nickname}!");
    }

    #[test]
    fn malformed_braces_are_kept() {
        assert_eq!(interpolate("{ } {} {streak", &ctx()), "{ } {} {streak");
        assert_eq!(interpolate("{{streak}}", &ctx()), "{4}");
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        assert_eq!(interpolate("The rope is fresh.", &ctx()), "The rope is fresh.");
    }

    #[test]
    fn non_ascii_text_survives() {
        assert_eq!(interpolate("Één {category}-woord ☠", &ctx()), "Één knots-woord ☠");
    }

    #[test]
    fn placeholder_scan() {
        assert_eq!(
            placeholders("{a} and {b_c} but not { d } or {"),
            vec!["a", "b_c"]
        );
    }

    #[test]
    fn every_field_resolves() {
        let c = DialogueContext::default();
        for (name, _) in FIELDS {
            assert!(c.field(name).is_some(), "{name}");
        }
        assert_eq!(c.field("remaining_lives").as_deref(), Some("8"));
        assert_eq!(c.field("hint_used").as_deref(), Some("false"));
    }
}
