//! Hangman game engine.
//!
//! [`GameState`] is a value: every transition (`guess`, `apply_hint`)
//! returns a new state and leaves the input untouched. A session can be
//! abandoned between any two transitions and the last state it holds is
//! still consistent.
//!
//! Win and loss are recomputed from the word and the guessed letters on
//! every call instead of being cached, so no transition can leave a stale
//! "remaining letters" counter behind.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use crate::dice;
use crate::types::WordId;

/// Wrong guesses allowed before the game is lost.
pub const MAX_WRONG_GUESSES: u32 = 8;

/// Placeholder glyph for an unrevealed letter.
pub const HIDDEN_GLYPH: char = '_';

const LETTER_POINTS: i64 = 10;
const LIFE_POINTS: i64 = 25;
const SPEED_WINDOW_SECS: i64 = 300;
const HINT_PENALTY: i64 = 50;

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Letters still hidden and lives left.
    InProgress,
    /// Every distinct non-space letter has been guessed.
    Won,
    /// Out of lives.
    Lost,
}

impl GameStatus {
    /// `true` for `Won` and `Lost`.
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Result of [`GameState::apply_hint`].
#[derive(Debug, Clone)]
pub struct HintOutcome {
    /// The state after the hint (identical to the input when nothing was revealed).
    pub state: GameState,
    /// The letter the hint revealed, if any.
    pub revealed: Option<char>,
}

/// The state of one hangman game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    word: String,
    word_id: WordId,
    category: String,
    guessed_letters: Vec<char>,
    wrong_guesses: u32,
    max_wrong_guesses: u32,
    hint_used: bool,
    start_time: DateTime<Utc>,
}

fn fold(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}

impl GameState {
    /// Start a game on `word` with the default life count.
    ///
    /// The word is lowercased; spaces are kept and are always visible.
    #[must_use]
    pub fn new(word: &str, word_id: WordId, category: impl Into<String>) -> Self {
        Self::started_at(word, word_id, category, Utc::now())
    }

    /// Like [`GameState::new`] with an explicit start time.
    #[must_use]
    pub fn started_at(
        word: &str,
        word_id: WordId,
        category: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            word: word.to_lowercase(),
            word_id,
            category: category.into(),
            guessed_letters: Vec::new(),
            wrong_guesses: 0,
            max_wrong_guesses: MAX_WRONG_GUESSES,
            hint_used: false,
            start_time,
        }
    }

    /// Override the life count (configuration hook). Zero is raised to one.
    #[must_use]
    pub fn with_max_wrong_guesses(mut self, max: u32) -> Self {
        self.max_wrong_guesses = max.max(1);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The lowercased target word.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Id of the source word.
    #[must_use]
    pub fn word_id(&self) -> WordId {
        self.word_id
    }

    /// Category of the source word.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Letters tried so far, in the order they were tried.
    #[must_use]
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    /// Guesses (and hints) that cost a life.
    #[must_use]
    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    /// Life count fixed at creation.
    #[must_use]
    pub fn max_wrong_guesses(&self) -> u32 {
        self.max_wrong_guesses
    }

    /// Lives left before the game is lost.
    #[must_use]
    pub fn remaining_lives(&self) -> u32 {
        self.max_wrong_guesses.saturating_sub(self.wrong_guesses)
    }

    /// Whether the one hint of this game has been spent.
    #[must_use]
    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    /// When the game started.
    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Whether `letter` (case-folded) has been tried.
    #[must_use]
    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&fold(letter))
    }

    /// Number of letters in the word, spaces excluded, repeats included.
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.word.chars().filter(|c| *c != ' ').count()
    }

    /// Distinct non-space letters of the word, in order of first appearance.
    fn distinct_letters(&self) -> Vec<char> {
        let mut seen = Vec::new();
        for c in self.word.chars() {
            if c != ' ' && !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Every distinct non-space letter has been guessed.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.word
            .chars()
            .filter(|c| *c != ' ')
            .all(|c| self.guessed_letters.contains(&c))
    }

    /// The wrong-guess count reached the ceiling.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.wrong_guesses >= self.max_wrong_guesses
    }

    /// Current status. A hint that reveals the last letter while spending
    /// the last life counts as a win.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.is_lost() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Guess a letter.
    ///
    /// No-op (returns an identical state) when the game is over, the letter
    /// was already tried, or the letter is a space.
    #[must_use]
    pub fn guess(&self, letter: char) -> Self {
        let letter = fold(letter);
        if letter == ' ' || self.guessed_letters.contains(&letter) || self.status().is_over() {
            return self.clone();
        }

        let correct = self.word.contains(letter);
        let mut next = self.clone();
        next.guessed_letters.push(letter);
        if !correct {
            next.wrong_guesses += 1;
        }

        debug!(
            word_id = %self.word_id,
            letter = %letter,
            correct,
            wrong_guesses = next.wrong_guesses,
            "Letter guessed"
        );
        next
    }

    /// Spend the hint: reveal one random unguessed letter at the cost of a life.
    ///
    /// Nothing is revealed when the hint was already used, the game is over,
    /// or no hidden letters remain. The revealed letter can cost the last
    /// life, so check [`GameState::status`] afterwards.
    pub fn apply_hint<R: Rng + ?Sized>(&self, rng: &mut R) -> HintOutcome {
        if self.hint_used || self.status().is_over() {
            return HintOutcome {
                state: self.clone(),
                revealed: None,
            };
        }

        let hidden: Vec<char> = self
            .distinct_letters()
            .into_iter()
            .filter(|c| !self.guessed_letters.contains(c))
            .collect();
        if hidden.is_empty() {
            return HintOutcome {
                state: self.clone(),
                revealed: None,
            };
        }

        let letter = hidden[dice::pick_index(rng, hidden.len())];
        let mut next = self.clone();
        next.guessed_letters.push(letter);
        next.wrong_guesses += 1;
        next.hint_used = true;

        debug!(
            word_id = %self.word_id,
            letter = %letter,
            wrong_guesses = next.wrong_guesses,
            "Hint revealed a letter"
        );
        HintOutcome {
            state: next,
            revealed: Some(letter),
        }
    }

    // ------------------------------------------------------------------
    // Presentation & scoring
    // ------------------------------------------------------------------

    /// One glyph per character: spaces stay, guessed letters are
    /// uppercased, the rest are [`HIDDEN_GLYPH`].
    #[must_use]
    pub fn display_word(&self) -> Vec<char> {
        self.word
            .chars()
            .map(|c| {
                if c == ' ' {
                    ' '
                } else if self.guessed_letters.contains(&c) {
                    c.to_uppercase().next().unwrap_or(c)
                } else {
                    HIDDEN_GLYPH
                }
            })
            .collect()
    }

    /// Whole seconds elapsed between the start and `now`; never negative.
    #[must_use]
    pub fn duration_secs_at(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.start_time).num_seconds()).unwrap_or(0)
    }

    /// Whole seconds elapsed since the start, by the wall clock.
    #[must_use]
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs_at(Utc::now())
    }

    /// Score of the game if it ended at `now`.
    ///
    /// Zero for a loss. A win earns 10 per letter, 25 per unused life and one
    /// point per second under five minutes, minus 50 when the hint was used,
    /// floored at zero.
    #[must_use]
    pub fn score_at(&self, won: bool, now: DateTime<Utc>) -> u32 {
        if !won {
            return 0;
        }
        let letters = i64::try_from(self.letter_count()).unwrap_or(i64::MAX / 2);
        let duration = i64::try_from(self.duration_secs_at(now)).unwrap_or(i64::MAX / 2);

        let word_bonus = letters * LETTER_POINTS;
        let accuracy_bonus =
            (i64::from(self.max_wrong_guesses) - i64::from(self.wrong_guesses)) * LIFE_POINTS;
        let speed_bonus = (SPEED_WINDOW_SECS - duration).max(0);
        let hint_penalty = if self.hint_used { -HINT_PENALTY } else { 0 };

        let total = (word_bonus + accuracy_bonus + speed_bonus + hint_penalty).max(0);
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Score of the game if it ended now, by the wall clock.
    #[must_use]
    pub fn score(&self, won: bool) -> u32 {
        self.score_at(won, Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(word: &str) -> GameState {
        GameState::new(word, WordId(1), "knots")
    }

    fn guess_all(state: &GameState, letters: &str) -> GameState {
        letters.chars().fold(state.clone(), |s, c| s.guess(c))
    }

    #[test]
    fn new_game_is_in_progress() {
        let state = game("Tent");
        assert_eq!(state.word(), "tent");
        assert!(state.guessed_letters().is_empty());
        assert_eq!(state.wrong_guesses(), 0);
        assert_eq!(state.max_wrong_guesses(), MAX_WRONG_GUESSES);
        assert!(!state.hint_used());
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn correct_guess_keeps_lives() {
        let state = game("tent").guess('t');
        assert_eq!(state.guessed_letters(), &['t']);
        assert_eq!(state.wrong_guesses(), 0);
    }

    #[test]
    fn wrong_guess_costs_a_life() {
        let state = game("tent").guess('z');
        assert_eq!(state.guessed_letters(), &['z']);
        assert_eq!(state.wrong_guesses(), 1);
        assert_eq!(state.remaining_lives(), 7);
    }

    #[test]
    fn guesses_are_case_folded() {
        let state = game("tent").guess('T');
        assert_eq!(state.guessed_letters(), &['t']);
        assert!(state.has_guessed('T'));
        assert_eq!(state.guess('t'), state);
    }

    #[test]
    fn repeated_guess_is_noop() {
        let once = game("tent").guess('k');
        let twice = once.guess('k');
        assert_eq!(once, twice);
        assert_eq!(twice.wrong_guesses(), 1);
    }

    #[test]
    fn detects_win() {
        let state = guess_all(&game("tent"), "ten");
        assert!(state.is_won());
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn detects_loss_after_eight_wrong_guesses() {
        let state = guess_all(&game("ab"), "zxqwydfg");
        assert!(state.is_lost());
        assert_eq!(state.wrong_guesses(), 8);
        let after = state.guess('h');
        assert_eq!(after.wrong_guesses(), 8);
        assert_eq!(after, state);
    }

    #[test]
    fn guess_after_win_is_noop() {
        let won = guess_all(&game("ab"), "ab");
        assert_eq!(won.guess('z'), won);
    }

    #[test]
    fn spaces_are_never_guessable() {
        let state = game("square knot").guess(' ');
        assert!(state.guessed_letters().is_empty());
        assert_eq!(state.wrong_guesses(), 0);
    }

    #[test]
    fn words_with_spaces_win_without_guessing_space() {
        let state = guess_all(&game("ab cd"), "abcd");
        assert!(state.is_won());
        assert_eq!(state.display_word(), vec!['A', 'B', ' ', 'C', 'D']);
    }

    #[test]
    fn display_hides_unguessed_letters() {
        let state = game("tent").guess('t');
        assert_eq!(state.display_word(), vec!['T', '_', '_', 'T']);
    }

    #[test]
    fn hint_reveals_and_costs_a_life() {
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = game("tent").apply_hint(&mut rng);
        let letter = outcome.revealed.expect("a letter");
        assert!("ten".contains(letter));
        assert!(outcome.state.hint_used());
        assert_eq!(outcome.state.wrong_guesses(), 1);
        assert!(outcome.state.has_guessed(letter));
    }

    #[test]
    fn second_hint_reveals_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = game("tent").apply_hint(&mut rng).state;
        let second = first.apply_hint(&mut rng);
        assert!(second.revealed.is_none());
        assert!(second.state.hint_used());
        assert_eq!(second.state, first);
    }

    #[test]
    fn hint_never_reveals_space() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = game("a b").apply_hint(&mut rng);
            assert_ne!(outcome.revealed, Some(' '));
        }
    }

    #[test]
    fn hint_can_end_the_game() {
        let state = guess_all(&game("abc"), "zxqwydf");
        assert_eq!(state.remaining_lives(), 1);
        let mut rng = StdRng::seed_from_u64(9);
        let outcome = state.apply_hint(&mut rng);
        assert!(outcome.revealed.is_some());
        assert!(outcome.state.is_lost());
        assert_eq!(outcome.state.status(), GameStatus::Lost);
    }

    #[test]
    fn hint_on_finished_game_is_noop() {
        let won = guess_all(&game("ab"), "ab");
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = won.apply_hint(&mut rng);
        assert!(outcome.revealed.is_none());
        assert!(!outcome.state.hint_used());
    }

    #[test]
    fn duration_uses_whole_seconds() {
        let start = Utc::now();
        let state = GameState::started_at("ab", WordId(1), "", start);
        assert_eq!(state.duration_secs_at(start + Duration::milliseconds(1_999)), 1);
        assert_eq!(state.duration_secs_at(start - Duration::seconds(5)), 0);
    }

    #[test]
    fn score_formula() {
        let start = Utc::now();
        let state = guess_all(&GameState::started_at("tent", WordId(1), "", start), "tezn");
        // 4 letters * 10 + 7 lives * 25 + (300 - 100) speed
        assert_eq!(state.wrong_guesses(), 1);
        assert_eq!(state.score_at(true, start + Duration::seconds(100)), 40 + 175 + 200);
        assert_eq!(state.score_at(false, start + Duration::seconds(100)), 0);
    }

    #[test]
    fn slow_hinted_game_is_floored_at_zero() {
        let start = Utc::now();
        let state = GameState::started_at("a", WordId(1), "", start).with_max_wrong_guesses(1);
        let mut rng = StdRng::seed_from_u64(0);
        let hinted = state.apply_hint(&mut rng).state;
        // 10 + 0 + 0 - 50 < 0
        assert_eq!(hinted.score_at(true, start + Duration::seconds(1_000)), 0);
    }

    #[test]
    fn accuracy_bonus_drops_with_mistakes() {
        let start = Utc::now();
        let end = start + Duration::seconds(30);
        let clean = guess_all(&GameState::started_at("ab", WordId(1), "", start), "ab");
        let sloppy = guess_all(&GameState::started_at("ab", WordId(1), "", start), "xyzab");
        assert!(clean.score_at(true, end) > sloppy.score_at(true, end));
        assert_eq!(clean.score_at(true, end) - sloppy.score_at(true, end), 75);
    }
}
