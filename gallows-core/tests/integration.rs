//! Integration tests: full games against a real SQLite store.
//!
//! These run the engine, the narrator and persistence together the way a
//! front end does: pick a word, play it, record the result, move the
//! executioner's respect, check achievements.

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gallows_core::achievements::{self, AchievementInput};
use gallows_core::config::{NarratorConfig, PersistenceConfig};
use gallows_core::engine::GameState;
use gallows_core::narrator::{DialogueContext, Narrator, NarratorStore};
use gallows_core::persistence::SqliteStore;
use gallows_core::stats::FinishedGame;
use gallows_core::types::{Difficulty, Moment, Mood, PlayerId, WordId};
use gallows_core::words::{KNOTS_CATEGORY, NewWord};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_767_225_600, 0).expect("valid timestamp")
}

fn bare_store() -> SqliteStore {
    let config = PersistenceConfig {
        seed_default_words: false,
        ..PersistenceConfig::default()
    };
    SqliteStore::open_in_memory(&config).expect("open")
}

/// Play `word` to a win by guessing its letters in order, then record it.
fn play_and_record(
    store: &SqliteStore,
    player: PlayerId,
    word_id: WordId,
    word: &str,
    started: DateTime<Utc>,
    won: bool,
) -> FinishedGame {
    let mut state = GameState::started_at(word, word_id, "test", started);
    if won {
        for c in word.chars() {
            state = state.guess(c);
        }
    } else {
        for c in "nopqrstuvwxyz".chars().filter(|c| !word.contains(*c)) {
            state = state.guess(c);
        }
    }
    assert_eq!(state.is_won(), won);
    assert_eq!(state.is_lost(), !won);

    let game = FinishedGame::from_state(player, Difficulty::Normal, &state, started + Duration::seconds(20));
    store.save_session(&game).expect("save");
    store.record_word_played(word_id, won).expect("counters");
    game
}

// ---------------------------------------------------------------------------
// End-to-end scenarios from the rules
// ---------------------------------------------------------------------------

#[test]
fn two_letter_word_win_and_loss() {
    let won = GameState::started_at("ab", WordId(1), "test", t0()).guess('a').guess('b');
    assert!(won.is_won());
    assert!(won.score_at(true, t0() + Duration::seconds(10)) > 0);

    let lost = "zxqwybdf".chars().fold(GameState::started_at("ab", WordId(1), "test", t0()), |s, c| s.guess(c));
    // 'b' is in the word, so only seven misses land.
    assert_eq!(lost.wrong_guesses(), 7);
    assert!(!lost.is_lost());
    let lost = lost.guess('k');
    assert!(lost.is_lost());
    assert_eq!(lost.score_at(false, t0()), 0);
}

#[test]
fn eight_misses_on_ab_lose() {
    let lost = "zxqwydfg".chars().fold(GameState::started_at("ab", WordId(1), "test", t0()), |s, c| s.guess(c));
    assert!(lost.is_lost());
    assert_eq!(lost.wrong_guesses(), 8);
    assert_eq!(lost.guess('h').wrong_guesses(), 8);
}

// ---------------------------------------------------------------------------
// Store + narrator
// ---------------------------------------------------------------------------

#[test]
fn respect_persists_across_store_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game.db");
    let config = PersistenceConfig {
        seed_default_words: false,
        ..PersistenceConfig::default()
    };

    let player = {
        let store = SqliteStore::open(&path, &config).expect("open");
        let player = store.get_or_create_player("Robin").expect("player").id;
        let narrator = Narrator::new(&store, NarratorConfig::default());
        for _ in 0..4 {
            narrator.update_executioner_mood(player, true, Difficulty::Normal).expect("win");
        }
        narrator.update_executioner_mood(player, false, Difficulty::Normal).expect("loss");
        player
    };

    let store = SqliteStore::open(&path, &config).expect("reopen");
    let memory = store.narrator_memory(player).expect("read").expect("row");
    assert_eq!(memory.respect_level, 67);
    assert_eq!(memory.mood, Mood::Impressed);
}

#[test]
fn narrator_reads_default_without_creating_rows() {
    let store = bare_store();
    let player = store.get_or_create_player("Robin").expect("player").id;
    let narrator = Narrator::new(&store, NarratorConfig::default());
    let mut rng = StdRng::seed_from_u64(1);

    let line = narrator
        .dialogue(player, Moment::GameStart, Difficulty::Normal, DialogueContext::default(), &mut rng)
        .expect("dialogue");
    assert_eq!(line.mood, Mood::Neutral);
    assert!(!line.text.is_empty());
    assert!(store.narrator_memory(player).expect("read").is_none());
}

#[test]
fn sarcastic_after_a_losing_run() {
    let store = bare_store();
    let player = store.get_or_create_player("Robin").expect("player").id;
    let narrator = Narrator::new(&store, NarratorConfig::default());
    for _ in 0..7 {
        narrator.update_executioner_mood(player, false, Difficulty::Normal).expect("loss");
    }
    // 50 - 7 * 3 = 29
    assert_eq!(narrator.memory(player).expect("memory").respect_level, 29);

    let mut rng = StdRng::seed_from_u64(2);
    let ctx = DialogueContext {
        player_name: "Robin".to_string(),
        ..DialogueContext::default()
    };
    let normal = narrator
        .dialogue(player, Moment::Loss, Difficulty::Normal, ctx.clone(), &mut rng)
        .expect("dialogue");
    assert_eq!(normal.mood, Mood::Sarcastic);
    let hard = narrator
        .dialogue(player, Moment::Loss, Difficulty::Hard, ctx, &mut rng)
        .expect("dialogue");
    assert_eq!(hard.mood, Mood::Ruthless);
}

// ---------------------------------------------------------------------------
// Records and achievements
// ---------------------------------------------------------------------------

#[test]
fn knot_expert_after_five_knot_wins() {
    let store = bare_store();
    let player = store.get_or_create_player("Robin").expect("player").id;
    let knots: Vec<(WordId, &str)> = ["bend", "hitch", "loop", "reef", "bight"]
        .into_iter()
        .map(|w| {
            let id = store
                .add_word(&NewWord::new(w, KNOTS_CATEGORY))
                .expect("add")
                .expect("new");
            (id, w)
        })
        .collect();
    store.add_word(&NewWord::new("tent", "camping")).expect("add");

    let mut unlocked_any = Vec::new();
    for (i, (id, word)) in knots.iter().enumerate() {
        let started = t0() + Duration::minutes(i64::try_from(i).expect("small"));
        let game = play_and_record(&store, player, *id, word, started, true);

        let stats = store.player_stats(player).expect("stats");
        let input = AchievementInput {
            stats: &stats,
            won: game.won,
            wrong_guesses: game.wrong_guesses,
            duration_secs: game.duration_secs,
            respect_level: 50,
            categories_won: store.categories_won(player).expect("won"),
            categories_total: store.categories().expect("cats").len(),
            knot_wins: store.wins_in_category(player, KNOTS_CATEGORY).expect("knots"),
        };
        let already = store.unlocked_achievements(player).expect("unlocked");
        for def in achievements::evaluate(&input, &already) {
            assert!(store.unlock_achievement(player, def.key).expect("unlock"));
            unlocked_any.push(def.key);
        }
    }

    assert_eq!(unlocked_any, vec!["first_win", "speed_devil", "flawless", "knot_expert"]);
    let stats = store.player_stats(player).expect("stats");
    assert_eq!(stats.current_streak, 5);
    assert_eq!(stats.fastest_win, Some(20));
    let word = store.word(knots[0].0).expect("get").expect("exists");
    assert_eq!((word.times_played, word.times_won), (1, 1));
}

#[test]
fn streak_resets_on_loss_and_reset_clears_everything() {
    let store = bare_store();
    let player = store.get_or_create_player("Robin").expect("player").id;
    let id = store.add_word(&NewWord::new("tent", "camping")).expect("add").expect("new");

    play_and_record(&store, player, id, "tent", t0(), true);
    play_and_record(&store, player, id, "tent", t0() + Duration::minutes(1), true);
    play_and_record(&store, player, id, "tent", t0() + Duration::minutes(2), false);
    play_and_record(&store, player, id, "tent", t0() + Duration::minutes(3), true);

    let stats = store.player_stats(player).expect("stats");
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.best_streak, 2);
    assert_eq!(stats.losses, 1);

    store.reset_player_stats(player).expect("reset");
    let stats = store.player_stats(player).expect("stats");
    assert_eq!(stats.total_games, 0);
    assert_eq!(stats.current_streak, 0);
}

#[test]
fn seeded_pool_serves_every_difficulty() {
    let store = SqliteStore::open_in_memory(&PersistenceConfig::default()).expect("open");
    let mut rng = StdRng::seed_from_u64(9);
    for difficulty in Difficulty::ALL {
        let word = store
            .random_word(difficulty.word_tiers(), None, &mut rng)
            .expect("query")
            .expect("seeded pool has a word");
        assert!(difficulty.word_tiers().contains(&word.tier));
    }
    let word = store
        .random_word(&[], Some(KNOTS_CATEGORY), &mut rng)
        .expect("query")
        .expect("knots seeded");
    assert_eq!(word.category, KNOTS_CATEGORY);
}
