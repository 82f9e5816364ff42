//! One game, from picking a word to recording the result.
//!
//! A [`GameSession`] owns the board, the random source and a snapshot of the
//! player's stats taken at the start. Every action returns the narrator's
//! reaction (if any). [`GameSession::finish`] consumes the session, so the
//! result is recorded and the executioner's respect moves exactly once per
//! game.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use gallows_core::achievements::{self, AchievementDef, AchievementInput};
use gallows_core::config::GallowsConfig;
use gallows_core::engine::{GameState, GameStatus, HintOutcome};
use gallows_core::error::{GallowsError, Result};
use gallows_core::narrator::{Dialogue, DialogueContext, Narrator, NarratorMemory};
use gallows_core::persistence::SqliteStore;
use gallows_core::stats::{FinishedGame, Player, PlayerStats};
use gallows_core::types::{Difficulty, Moment, SessionId};
use gallows_core::words::{KNOTS_CATEGORY, Word};

use crate::events::{TurnOutcome, classify_guess, is_streak_milestone, moment_for};

/// What one action did and what the executioner said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Effect on the board.
    pub outcome: TurnOutcome,
    /// The executioner's reaction; `None` when the board did not change.
    pub dialogue: Option<Dialogue>,
}

/// Everything produced when a game is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    /// The stored record.
    pub game: FinishedGame,
    /// Its row id.
    pub session_id: SessionId,
    /// The word that was played.
    pub word: String,
    /// The executioner's memory after this game.
    pub memory: NarratorMemory,
    /// Stats including this game.
    pub stats: PlayerStats,
    /// Achievements unlocked by this game.
    pub achievements: Vec<&'static AchievementDef>,
    /// Lines for unlocked achievements and streak milestones, in that order.
    pub closing: Vec<Dialogue>,
}

/// A game in progress.
#[derive(Debug)]
pub struct GameSession<'a, R: Rng> {
    store: &'a SqliteStore,
    config: &'a GallowsConfig,
    player: Player,
    difficulty: Difficulty,
    word: Word,
    state: GameState,
    stats: PlayerStats,
    rng: R,
}

impl<'a, R: Rng> GameSession<'a, R> {
    /// Pick a word for `difficulty` (optionally within `category`) and open
    /// the game. Returns the session and the executioner's opening line.
    ///
    /// # Errors
    ///
    /// [`GallowsError::NoWordAvailable`] when the pool has nothing matching;
    /// storage failures are propagated.
    pub fn start(
        store: &'a SqliteStore,
        config: &'a GallowsConfig,
        player: Player,
        difficulty: Difficulty,
        category: Option<&str>,
        rng: R,
    ) -> Result<(Self, Dialogue)> {
        Self::start_at(store, config, player, difficulty, category, rng, Utc::now())
    }

    /// [`GameSession::start`] with an explicit start time.
    ///
    /// # Errors
    ///
    /// See [`GameSession::start`].
    pub fn start_at(
        store: &'a SqliteStore,
        config: &'a GallowsConfig,
        player: Player,
        difficulty: Difficulty,
        category: Option<&str>,
        mut rng: R,
        now: DateTime<Utc>,
    ) -> Result<(Self, Dialogue)> {
        let word = store
            .random_word(difficulty.word_tiers(), category, &mut rng)?
            .ok_or(GallowsError::NoWordAvailable)?;
        let state = GameState::started_at(&word.word, word.id, word.category.clone(), now)
            .with_max_wrong_guesses(config.game.max_wrong_guesses);
        let stats = store.player_stats(player.id)?;

        info!(
            player = %player.id,
            %difficulty,
            word_id = %word.id,
            category = %word.category,
            "Game started"
        );

        let mut session = Self {
            store,
            config,
            player,
            difficulty,
            word,
            state,
            stats,
            rng,
        };
        let opening = session.narrate(Moment::GameStart, 0)?;
        Ok((session, opening))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The board.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Who is playing.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The setting of this game.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The word record (including its clue).
    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Stats as of the start of the game.
    #[must_use]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Where the game stands.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Guess a letter. Anything that is not a letter is ignored.
    ///
    /// # Errors
    ///
    /// Storage failures while reading the narrator's memory.
    pub fn guess(&mut self, letter: char) -> Result<Turn> {
        self.guess_at(letter, Utc::now())
    }

    /// [`GameSession::guess`] at an explicit time; a winning guess is
    /// narrated with the score as of `now`.
    ///
    /// # Errors
    ///
    /// See [`GameSession::guess`].
    pub fn guess_at(&mut self, letter: char, now: DateTime<Utc>) -> Result<Turn> {
        if !letter.is_alphabetic() {
            return Ok(Turn {
                outcome: TurnOutcome::Ignored,
                dialogue: None,
            });
        }
        let folded = letter.to_lowercase().next().unwrap_or(letter);
        let next = self.state.guess(folded);
        let outcome = classify_guess(folded, &self.state, &next);
        self.state = next;
        self.react(outcome, now)
    }

    /// Spend the hint.
    ///
    /// The revealed letter costs a life, which can end the game.
    ///
    /// # Errors
    ///
    /// Storage failures while reading the narrator's memory.
    pub fn use_hint(&mut self) -> Result<Turn> {
        self.use_hint_at(Utc::now())
    }

    /// [`GameSession::use_hint`] at an explicit time.
    ///
    /// # Errors
    ///
    /// See [`GameSession::use_hint`].
    pub fn use_hint_at(&mut self, now: DateTime<Utc>) -> Result<Turn> {
        let HintOutcome { state, revealed } = self.state.apply_hint(&mut self.rng);
        self.state = state;
        let outcome = revealed.map_or(TurnOutcome::HintUnavailable, TurnOutcome::HintRevealed);
        self.react(outcome, now)
    }

    fn react(&mut self, outcome: TurnOutcome, now: DateTime<Utc>) -> Result<Turn> {
        let dialogue = match moment_for(outcome, &self.state) {
            Some(Moment::Win) => {
                let score = self.state.score_at(true, now);
                Some(self.narrate(Moment::Win, score)?)
            }
            Some(moment) => Some(self.narrate(moment, 0)?),
            None => None,
        };
        debug!(
            player = %self.player.id,
            ?outcome,
            wrong_guesses = self.state.wrong_guesses(),
            "Turn played"
        );
        Ok(Turn { outcome, dialogue })
    }

    // ------------------------------------------------------------------
    // Finishing
    // ------------------------------------------------------------------

    /// Record the game now. See [`GameSession::finish_at`].
    ///
    /// # Errors
    ///
    /// Storage failures are propagated.
    pub fn finish(self) -> Result<GameReport> {
        self.finish_at(Utc::now())
    }

    /// Record the game as ended at `now`.
    ///
    /// Saves the session, bumps the word counters, moves the executioner's
    /// respect, unlocks achievements and re-reads the stats. A game finished
    /// before it is won is recorded as a loss.
    ///
    /// # Errors
    ///
    /// Storage failures are propagated. The executioner's respect is only
    /// updated after the session row is written.
    pub fn finish_at(mut self, now: DateTime<Utc>) -> Result<GameReport> {
        let game = FinishedGame::from_state(self.player.id, self.difficulty, &self.state, now);
        let session_id = self.store.save_session(&game)?;
        self.store.record_word_played(self.word.id, game.won)?;

        let memory = Narrator::new(self.store, self.config.narrator).update_executioner_mood(
            self.player.id,
            game.won,
            self.difficulty,
        )?;
        self.stats = self.store.player_stats(self.player.id)?;

        let unlocked = self.unlock_achievements(&game, &memory)?;

        let mut closing = Vec::new();
        if !unlocked.is_empty() {
            closing.push(self.narrate(Moment::Achievement, game.score)?);
        }
        if game.won
            && is_streak_milestone(self.stats.current_streak, self.config.game.streak_milestone)
        {
            closing.push(self.narrate(Moment::Streak, game.score)?);
        }

        info!(
            player = %self.player.id,
            session = %session_id,
            won = game.won,
            score = game.score,
            duration_secs = game.duration_secs,
            respect = memory.respect_level,
            achievements = unlocked.len(),
            "Game finished"
        );

        Ok(GameReport {
            game,
            session_id,
            word: self.word.word,
            memory,
            stats: self.stats,
            achievements: unlocked,
            closing,
        })
    }

    fn unlock_achievements(
        &self,
        game: &FinishedGame,
        memory: &NarratorMemory,
    ) -> Result<Vec<&'static AchievementDef>> {
        let id = self.player.id;
        let input = AchievementInput {
            stats: &self.stats,
            won: game.won,
            wrong_guesses: game.wrong_guesses,
            duration_secs: game.duration_secs,
            respect_level: memory.respect_level,
            categories_won: self.store.categories_won(id)?,
            categories_total: self.store.categories()?.len(),
            knot_wins: self.store.wins_in_category(id, KNOTS_CATEGORY)?,
        };
        let already = self.store.unlocked_achievements(id)?;
        let fresh = achievements::evaluate(&input, &already);
        for def in &fresh {
            self.store.unlock_achievement(id, def.key)?;
        }
        Ok(fresh)
    }

    // ------------------------------------------------------------------
    // Narration
    // ------------------------------------------------------------------

    fn context(&self, score: u32) -> DialogueContext {
        DialogueContext {
            player_name: self.player.name.clone(),
            streak: self.stats.current_streak,
            total_wins: self.stats.wins,
            total_games: self.stats.total_games,
            win_rate: self.stats.win_rate,
            category: self.state.category().to_string(),
            word_length: self.state.letter_count(),
            score,
            remaining_lives: self.state.remaining_lives(),
            wrong_guesses: self.state.wrong_guesses(),
            hint_used: self.state.hint_used(),
            ..DialogueContext::default()
        }
    }

    fn narrate(&mut self, moment: Moment, score: u32) -> Result<Dialogue> {
        let ctx = self.context(score);
        Narrator::new(self.store, self.config.narrator).dialogue(
            self.player.id,
            moment,
            self.difficulty,
            ctx,
            &mut self.rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallows_core::config::PersistenceConfig;
    use gallows_core::words::NewWord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store_with(words: &[(&str, &str)]) -> SqliteStore {
        let config = PersistenceConfig {
            seed_default_words: false,
            ..PersistenceConfig::default()
        };
        let store = SqliteStore::open_in_memory(&config).expect("open");
        for (word, category) in words {
            store.add_word(&NewWord::new(word, category)).expect("add");
        }
        store
    }

    #[test]
    fn empty_pool_is_reported() {
        let store = store_with(&[]);
        let config = GallowsConfig::default();
        let player = store.get_or_create_player("Robin").expect("player");
        let err = GameSession::start(
            &store,
            &config,
            player,
            Difficulty::Normal,
            None,
            StdRng::seed_from_u64(1),
        )
        .expect_err("no words");
        assert!(matches!(err, GallowsError::NoWordAvailable));
    }

    #[test]
    fn non_letters_and_repeats_are_silent() {
        let store = store_with(&[("tent", "camping")]);
        let config = GallowsConfig::default();
        let player = store.get_or_create_player("Robin").expect("player");
        let (mut session, opening) = GameSession::start(
            &store,
            &config,
            player,
            Difficulty::Easy,
            None,
            StdRng::seed_from_u64(1),
        )
        .expect("start");
        assert!(!opening.text.is_empty());

        let turn = session.guess('7').expect("guess");
        assert_eq!(turn, Turn { outcome: TurnOutcome::Ignored, dialogue: None });

        let turn = session.guess('T').expect("guess");
        assert_eq!(turn.outcome, TurnOutcome::Correct('t'));
        assert!(turn.dialogue.is_some());
        assert_eq!(session.guess('t').expect("repeat").outcome, TurnOutcome::Ignored);
    }

    #[test]
    fn reported_letter_matches_the_stored_one() {
        let store = store_with(&[("café", "camping")]);
        let config = GallowsConfig::default();
        let player = store.get_or_create_player("Robin").expect("player");
        let (mut session, _) = GameSession::start(
            &store,
            &config,
            player,
            Difficulty::Easy,
            None,
            StdRng::seed_from_u64(1),
        )
        .expect("start");

        let turn = session.guess('É').expect("guess");
        assert_eq!(turn.outcome, TurnOutcome::Correct('é'));
        assert_eq!(session.state().guessed_letters(), &['é']);

        let turn = session.guess('Ø').expect("guess");
        assert_eq!(turn.outcome, TurnOutcome::Wrong('ø'));
        assert_eq!(session.guess('ø').expect("repeat").outcome, TurnOutcome::Ignored);
    }
}
