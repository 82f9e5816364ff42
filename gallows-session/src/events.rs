//! What a player action did, and which narrator moment it calls for.

use gallows_core::engine::{GameState, GameStatus};
use gallows_core::types::Moment;

/// Result of one player action on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing changed: not a letter, already tried, or the game is over.
    Ignored,
    /// The letter is in the word.
    Correct(char),
    /// The letter is not in the word; a life is gone.
    Wrong(char),
    /// The hint revealed this letter and cost a life.
    HintRevealed(char),
    /// The hint was spent already or there is nothing left to reveal.
    HintUnavailable,
}

impl TurnOutcome {
    /// Whether the board changed.
    #[must_use]
    pub fn changed_state(self) -> bool {
        !matches!(self, Self::Ignored | Self::HintUnavailable)
    }
}

/// Classify a guess by comparing the states around it.
#[must_use]
pub fn classify_guess(letter: char, before: &GameState, after: &GameState) -> TurnOutcome {
    if after == before {
        TurnOutcome::Ignored
    } else if after.wrong_guesses() > before.wrong_guesses() {
        TurnOutcome::Wrong(letter)
    } else {
        TurnOutcome::Correct(letter)
    }
}

/// The moment to narrate after `outcome` left the board at `state`.
///
/// A finished game always narrates its ending. Otherwise a miss with one
/// life left is *almost dead*, any other miss (or a revealed hint) is
/// *wrong guess*, and a hit is *correct guess*. Unchanged boards get no line.
#[must_use]
pub fn moment_for(outcome: TurnOutcome, state: &GameState) -> Option<Moment> {
    if !outcome.changed_state() {
        return None;
    }
    match state.status() {
        GameStatus::Won => return Some(Moment::Win),
        GameStatus::Lost => return Some(Moment::Loss),
        GameStatus::InProgress => {}
    }
    Some(match outcome {
        TurnOutcome::Wrong(_) if state.wrong_guesses() + 1 >= state.max_wrong_guesses() => {
            Moment::AlmostDead
        }
        TurnOutcome::Wrong(_) | TurnOutcome::HintRevealed(_) => Moment::WrongGuess,
        _ => Moment::CorrectGuess,
    })
}

/// Whether a win that left the streak at `streak` hits a milestone.
#[must_use]
pub fn is_streak_milestone(streak: u32, milestone: u32) -> bool {
    milestone > 0 && streak > 0 && streak % milestone == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallows_core::types::WordId;

    fn board(word: &str) -> GameState {
        GameState::new(word, WordId(1), "test")
    }

    #[test]
    fn guesses_are_classified() {
        let s = board("tent");
        assert_eq!(classify_guess('t', &s, &s.guess('t')), TurnOutcome::Correct('t'));
        assert_eq!(classify_guess('z', &s, &s.guess('z')), TurnOutcome::Wrong('z'));
        let s = s.guess('t');
        assert_eq!(classify_guess('t', &s, &s.guess('t')), TurnOutcome::Ignored);
    }

    #[test]
    fn moments_follow_the_board() {
        let s = board("tent").guess('t');
        assert_eq!(moment_for(TurnOutcome::Correct('t'), &s), Some(Moment::CorrectGuess));

        let s = s.guess('z');
        assert_eq!(moment_for(TurnOutcome::Wrong('z'), &s), Some(Moment::WrongGuess));

        let s = "abcdfg".chars().fold(s, |s, c| s.guess(c));
        assert_eq!(s.wrong_guesses(), 7);
        assert_eq!(moment_for(TurnOutcome::Wrong('g'), &s), Some(Moment::AlmostDead));

        let lost = s.guess('h');
        assert_eq!(moment_for(TurnOutcome::Wrong('h'), &lost), Some(Moment::Loss));

        let won = board("ab").guess('a').guess('b');
        assert_eq!(moment_for(TurnOutcome::Correct('b'), &won), Some(Moment::Win));
    }

    #[test]
    fn hints_narrate_as_misses() {
        let s = board("tent").guess('z');
        assert_eq!(moment_for(TurnOutcome::HintRevealed('n'), &s), Some(Moment::WrongGuess));
        assert_eq!(moment_for(TurnOutcome::HintUnavailable, &s), None);
        assert_eq!(moment_for(TurnOutcome::Ignored, &s), None);
    }

    #[test]
    fn streak_milestones() {
        assert!(is_streak_milestone(3, 3));
        assert!(is_streak_milestone(6, 3));
        assert!(!is_streak_milestone(4, 3));
        assert!(!is_streak_milestone(0, 3));
        assert!(!is_streak_milestone(3, 0));
    }
}
