//! SQLite persistence for players, words, game sessions, achievements and
//! the executioner's memory.
//!
//! ```sql
//! players            (id, name UNIQUE, created_at)
//! words              (id, word UNIQUE, category, difficulty, hint, times_played, times_won, created_at)
//! game_sessions      (id, player_id, word_id, difficulty, won, wrong_guesses, guessed_letters,
//!                     duration_seconds, score, hint_used, started_at, finished_at)
//! achievements       (id, player_id, achievement_key, unlocked_at, UNIQUE(player_id, achievement_key))
//! executioner_memory (id, player_id UNIQUE, mood, respect_level, last_interaction)
//! ```
//!
//! - Migration is idempotent and runs on every open. Databases created before
//!   scores and hints existed get the missing columns added.
//! - Guessed letters are a JSON array in a TEXT column.
//! - Timestamps are RFC 3339 text, so they sort chronologically.
//! - The word tier lives in the `difficulty` column.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::Rng;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row, params, params_from_iter};
use tracing::{debug, info, warn};

use crate::config::PersistenceConfig;
use crate::dice;
use crate::error::{GallowsError, Result};
use crate::narrator::memory::{NarratorMemory, NarratorStore};
use crate::stats::{self, FinishedGame, LeaderboardEntry, Player, PlayerStats};
use crate::types::{Mood, PlayerId, SessionId, WordId};
use crate::words::{DEFAULT_WORDS, NewWord, Word};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS players (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT UNIQUE NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS words (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        word         TEXT UNIQUE NOT NULL,
        category     TEXT NOT NULL,
        difficulty   INTEGER NOT NULL DEFAULT 1,
        hint         TEXT,
        times_played INTEGER NOT NULL DEFAULT 0,
        times_won    INTEGER NOT NULL DEFAULT 0,
        created_at   TEXT
    );

    CREATE TABLE IF NOT EXISTS game_sessions (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        player_id        INTEGER NOT NULL REFERENCES players(id),
        word_id          INTEGER NOT NULL REFERENCES words(id),
        difficulty       TEXT NOT NULL,
        won              BOOLEAN NOT NULL,
        wrong_guesses    INTEGER NOT NULL,
        guessed_letters  TEXT NOT NULL,
        duration_seconds INTEGER,
        started_at       TEXT,
        finished_at      TEXT
    );

    CREATE TABLE IF NOT EXISTS achievements (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        player_id       INTEGER NOT NULL REFERENCES players(id),
        achievement_key TEXT NOT NULL,
        unlocked_at     TEXT,
        UNIQUE(player_id, achievement_key)
    );

    CREATE TABLE IF NOT EXISTS executioner_memory (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        player_id        INTEGER NOT NULL UNIQUE REFERENCES players(id),
        mood             TEXT NOT NULL DEFAULT 'neutral',
        respect_level    INTEGER NOT NULL DEFAULT 50,
        last_interaction TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_game_sessions_player ON game_sessions(player_id);
    CREATE INDEX IF NOT EXISTS idx_game_sessions_word ON game_sessions(word_id);
    CREATE INDEX IF NOT EXISTS idx_achievements_player ON achievements(player_id);
    CREATE INDEX IF NOT EXISTS idx_words_category ON words(category);
    CREATE INDEX IF NOT EXISTS idx_words_difficulty ON words(difficulty);
";

/// Columns added after the first release: `(table, column, definition)`.
const LATE_COLUMNS: &[(&str, &str, &str)] = &[
    ("game_sessions", "score", "INTEGER NOT NULL DEFAULT 0"),
    ("game_sessions", "hint_used", "BOOLEAN NOT NULL DEFAULT 0"),
];

const WORD_COLUMNS: &str = "id, word, category, difficulty, hint, times_played, times_won";

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| GallowsError::Serialization(format!("bad timestamp {text:?}: {e}")))
}

fn word_from_row(row: &Row<'_>) -> rusqlite::Result<Word> {
    Ok(Word {
        id: WordId(row.get(0)?),
        word: row.get(1)?,
        category: row.get(2)?,
        tier: row.get(3)?,
        hint: row.get(4)?,
        times_played: row.get(5)?,
        times_won: row.get(6)?,
    })
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Handle to the game database.
///
/// # Usage
///
/// ```no_run
/// # use gallows_core::persistence::SqliteStore;
/// # use gallows_core::config::PersistenceConfig;
/// let store = SqliteStore::open("game.db", &PersistenceConfig::default())?;
/// let player = store.get_or_create_player("Robin")?;
/// let stats = store.player_stats(player.id)?;
/// assert_eq!(stats.total_games, 0);
/// # Ok::<(), gallows_core::error::GallowsError>(())
/// ```
pub struct SqliteStore {
    conn: Connection,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path`, creating its directory.
    ///
    /// Migrates the schema and, when configured, seeds an empty word pool.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::StorageUnavailable`] when the directory cannot
    /// be created or the file cannot be opened, and [`GallowsError::Database`]
    /// on other SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    GallowsError::StorageUnavailable(format!("{}: {e}", parent.display()))
                })?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags).map_err(|e| {
            GallowsError::StorageUnavailable(format!("{}: {e}", db_path.display()))
        })?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

        let store = Self::prepare(conn, config, db_path)?;
        info!(
            path = %store.db_path.display(),
            wal = config.wal_mode,
            "Game database opened"
        );
        Ok(store)
    }

    /// Open the database named by `config` ([`PersistenceConfig::db_path`]).
    ///
    /// # Errors
    ///
    /// See [`SqliteStore::open`].
    pub fn open_configured(config: &PersistenceConfig) -> Result<Self> {
        Self::open(config.db_path(), config)
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, config, PathBuf::from(":memory:"))
    }

    fn prepare(conn: Connection, config: &PersistenceConfig, db_path: PathBuf) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self {
            conn,
            config: config.clone(),
            db_path,
        };
        store.migrate()?;
        if config.seed_default_words && store.word_count()? == 0 {
            let inserted = store.seed_default_words()?;
            info!(inserted, "Seeded the built-in word list");
        }
        Ok(store)
    }

    /// Create missing tables, indexes and columns. Safe to re-run.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        for (table, column, definition) in LATE_COLUMNS {
            self.add_column_if_missing(table, column, definition)?;
        }
        Ok(())
    }

    fn add_column_if_missing(&self, table: &str, column: &str, definition: &str) -> Result<()> {
        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table})"))?;
        let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
        for name in names {
            if name? == column {
                return Ok(());
            }
        }
        self.conn
            .execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} {definition};"))?;
        info!(table, column, "Added missing column");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    /// The player called `name`, created when unknown.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn get_or_create_player(&self, name: &str) -> Result<Player> {
        let existing = self
            .conn
            .prepare_cached("SELECT id, name, created_at FROM players WHERE name = ?1")?
            .query_row(params![name], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })
            .optional()?;
        if let Some((id, name, created_at)) = existing {
            return Ok(Player {
                id: PlayerId(id),
                name,
                created_at: parse_timestamp(&created_at)?,
            });
        }

        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO players (name, created_at) VALUES (?1, ?2)",
            params![name, created_at.to_rfc3339()],
        )?;
        let id = PlayerId(self.conn.last_insert_rowid());
        info!(player = %id, name, "New player");
        Ok(Player {
            id,
            name: name.to_string(),
            created_at,
        })
    }

    /// A player by id.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::PlayerNotFound`] for an unknown id.
    pub fn player(&self, id: PlayerId) -> Result<Player> {
        let row = self
            .conn
            .prepare_cached("SELECT name, created_at FROM players WHERE id = ?1")?
            .query_row(params![id.0], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .optional()?;
        let (name, created_at) = row.ok_or(GallowsError::PlayerNotFound(id))?;
        Ok(Player {
            id,
            name,
            created_at: parse_timestamp(&created_at)?,
        })
    }

    /// Every player, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn all_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, created_at FROM players ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut players = Vec::new();
        for row in rows {
            let (id, name, created_at) = row?;
            players.push(Player {
                id: PlayerId(id),
                name,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(players)
    }

    /// Rename a player.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::NameTaken`] when another player already has
    /// `new_name` and [`GallowsError::PlayerNotFound`] for an unknown id.
    pub fn rename_player(&self, id: PlayerId, new_name: &str) -> Result<()> {
        let conflict = self
            .conn
            .prepare_cached("SELECT id FROM players WHERE name = ?1 AND id != ?2")?
            .query_row(params![new_name, id.0], |row| row.get::<_, i64>(0))
            .optional()?;
        if conflict.is_some() {
            return Err(GallowsError::NameTaken(new_name.to_string()));
        }

        let changed = self
            .conn
            .execute("UPDATE players SET name = ?1 WHERE id = ?2", params![new_name, id.0])?;
        if changed == 0 {
            return Err(GallowsError::PlayerNotFound(id));
        }
        info!(player = %id, name = new_name, "Player renamed");
        Ok(())
    }

    /// Forget every game and the executioner's memory of a player.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn reset_player_stats(&self, id: PlayerId) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let sessions = tx.execute("DELETE FROM game_sessions WHERE player_id = ?1", params![id.0])?;
        tx.execute("DELETE FROM executioner_memory WHERE player_id = ?1", params![id.0])?;
        tx.commit()?;
        info!(player = %id, sessions, "Player stats reset");
        Ok(())
    }

    /// Lock every achievement of a player again.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn reset_player_achievements(&self, id: PlayerId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM achievements WHERE player_id = ?1", params![id.0])?;
        info!(player = %id, removed, "Player achievements reset");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Words
    // ------------------------------------------------------------------

    /// Add a word to the pool. Returns `None` when the word already exists.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn add_word(&self, word: &NewWord<'_>) -> Result<Option<WordId>> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO words (word, category, difficulty, hint, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                word.word.to_lowercase(),
                word.category,
                word.effective_tier(),
                word.hint,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok((inserted > 0).then(|| WordId(self.conn.last_insert_rowid())))
    }

    /// Insert the built-in list. Existing words are skipped; returns how many
    /// were inserted.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn seed_default_words(&self) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        for (word, category, hint) in DEFAULT_WORDS {
            if self.add_word(&NewWord::new(word, category).with_hint(hint))?.is_some() {
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// A word by id.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn word(&self, id: WordId) -> Result<Option<Word>> {
        Ok(self
            .conn
            .prepare_cached(&format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?1"))?
            .query_row(params![id.0], word_from_row)
            .optional()?)
    }

    /// Number of words in the pool.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn word_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// A uniformly random word among those in one of `tiers` (any tier when
    /// empty) and, when given, in `category`.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn random_word<R: Rng + ?Sized>(
        &self,
        tiers: &[u8],
        category: Option<&str>,
        rng: &mut R,
    ) -> Result<Option<Word>> {
        let mut conditions = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if !tiers.is_empty() {
            conditions.push(format!("difficulty IN ({})", vec!["?"; tiers.len()].join(", ")));
            values.extend(tiers.iter().map(|t| Value::Integer(i64::from(*t))));
        }
        if let Some(category) = category {
            conditions.push("category = ?".to_string());
            values.push(Value::Text(category.to_string()));
        }
        let filter = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM words{filter}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;
        let Ok(count) = usize::try_from(count) else {
            return Ok(None);
        };
        if count == 0 {
            debug!(?tiers, ?category, "No word matches");
            return Ok(None);
        }

        let offset = dice::pick_index(rng, count);
        values.push(Value::Integer(i64::try_from(offset).unwrap_or(0)));
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {WORD_COLUMNS} FROM words{filter} ORDER BY id LIMIT 1 OFFSET ?"),
                params_from_iter(values.iter()),
                word_from_row,
            )
            .optional()?)
    }

    /// Distinct categories, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT DISTINCT category FROM words ORDER BY category")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Count one more play (and win) of a word.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn record_word_played(&self, id: WordId, won: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE words SET times_played = times_played + 1,
                              times_won = times_won + ?2
             WHERE id = ?1",
            params![id.0, i64::from(won)],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sessions & statistics
    // ------------------------------------------------------------------

    /// Record a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Serialization`] if the letters cannot be
    /// encoded, or [`GallowsError::Database`] on SQLite failures.
    pub fn save_session(&self, game: &FinishedGame) -> Result<SessionId> {
        let start = Instant::now();
        let letters = serde_json::to_string(&game.guessed_letters)
            .map_err(|e| GallowsError::Serialization(e.to_string()))?;
        let duration = i64::try_from(game.duration_secs).unwrap_or(i64::MAX);
        let started_at = game.finished_at - chrono::Duration::seconds(duration);

        self.conn.execute(
            "INSERT INTO game_sessions
                (player_id, word_id, difficulty, won, wrong_guesses, guessed_letters,
                 duration_seconds, score, hint_used, started_at, finished_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                game.player.0,
                game.word_id.0,
                game.difficulty.as_str(),
                game.won,
                game.wrong_guesses,
                letters,
                duration,
                game.score,
                game.hint_used,
                started_at.to_rfc3339(),
                game.finished_at.to_rfc3339()
            ],
        )?;
        let id = SessionId(self.conn.last_insert_rowid());

        debug!(
            session = %id,
            player = %game.player,
            won = game.won,
            score = game.score,
            elapsed_us = start.elapsed().as_micros(),
            "Saved game session"
        );
        Ok(id)
    }

    /// Guessed letters of a recorded session.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Serialization`] when the stored column is not
    /// a JSON list of letters.
    pub fn session_letters(&self, id: SessionId) -> Result<Option<Vec<char>>> {
        let text: Option<String> = self
            .conn
            .prepare_cached("SELECT guessed_letters FROM game_sessions WHERE id = ?1")?
            .query_row(params![id.0], |row| row.get(0))
            .optional()?;
        text.map(|t| {
            serde_json::from_str(&t).map_err(|e| GallowsError::Serialization(e.to_string()))
        })
        .transpose()
    }

    /// Aggregates over every recorded game of a player.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn player_stats(&self, id: PlayerId) -> Result<PlayerStats> {
        let (total, wins, losses, avg_wrong, play_time, total_score, fastest) = self
            .conn
            .prepare_cached(
                "SELECT
                    COUNT(*),
                    SUM(CASE WHEN won = 1 THEN 1 ELSE 0 END),
                    SUM(CASE WHEN won = 0 THEN 1 ELSE 0 END),
                    AVG(wrong_guesses),
                    SUM(duration_seconds),
                    COALESCE(SUM(score), 0),
                    MIN(CASE WHEN won = 1 THEN duration_seconds END)
                 FROM game_sessions WHERE player_id = ?1",
            )?
            .query_row(params![id.0], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, Option<u32>>(1)?,
                    row.get::<_, Option<u32>>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, Option<i64>>(6)?,
                ))
            })?;

        let longest_word: Option<String> = self
            .conn
            .prepare_cached(
                "SELECT w.word FROM game_sessions gs
                 JOIN words w ON gs.word_id = w.id
                 WHERE gs.player_id = ?1 AND gs.won = 1
                 ORDER BY LENGTH(w.word) DESC, gs.id DESC LIMIT 1",
            )?
            .query_row(params![id.0], |row| row.get(0))
            .optional()?;

        let streaks = stats::streaks(self.results_newest_first(id)?);
        let wins = wins.unwrap_or(0);

        Ok(PlayerStats {
            total_games: total,
            wins,
            losses: losses.unwrap_or(0),
            win_rate: stats::win_rate(wins, total),
            avg_wrong_guesses: avg_wrong.unwrap_or(0.0),
            current_streak: streaks.current,
            best_streak: streaks.best,
            total_play_time: play_time.map_or(0, to_u64),
            total_score: to_u64(total_score),
            fastest_win: fastest.map(to_u64),
            longest_word,
        })
    }

    fn results_newest_first(&self, id: PlayerId) -> Result<Vec<bool>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT won FROM game_sessions WHERE player_id = ?1
             ORDER BY finished_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![id.0], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Top `limit` players by total score, then wins, then win rate.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT
                p.name,
                COUNT(*) AS total_games,
                SUM(CASE WHEN gs.won = 1 THEN 1 ELSE 0 END) AS wins,
                ROUND(CAST(SUM(CASE WHEN gs.won = 1 THEN 1 ELSE 0 END) AS REAL) / COUNT(*) * 100, 1) AS win_rate,
                COALESCE(SUM(gs.score), 0) AS total_score
             FROM game_sessions gs
             JOIN players p ON gs.player_id = p.id
             GROUP BY p.id
             ORDER BY total_score DESC, wins DESC, win_rate DESC
             LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(LeaderboardEntry {
                name: row.get(0)?,
                total_games: row.get(1)?,
                wins: row.get(2)?,
                win_rate: row.get(3)?,
                total_score: to_u64(row.get(4)?),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Distinct categories a player has won at least one game in.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn categories_won(&self, id: PlayerId) -> Result<usize> {
        let count: i64 = self
            .conn
            .prepare_cached(
                "SELECT COUNT(DISTINCT w.category) FROM game_sessions gs
                 JOIN words w ON gs.word_id = w.id
                 WHERE gs.player_id = ?1 AND gs.won = 1",
            )?
            .query_row(params![id.0], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Games a player has won on words from `category`.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn wins_in_category(&self, id: PlayerId, category: &str) -> Result<u32> {
        Ok(self
            .conn
            .prepare_cached(
                "SELECT COUNT(*) FROM game_sessions gs
                 JOIN words w ON gs.word_id = w.id
                 WHERE gs.player_id = ?1 AND gs.won = 1 AND w.category = ?2",
            )?
            .query_row(params![id.0, category], |row| row.get(0))?)
    }

    // ------------------------------------------------------------------
    // Achievements
    // ------------------------------------------------------------------

    /// Keys of every achievement a player has unlocked.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn unlocked_achievements(&self, id: PlayerId) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT achievement_key FROM achievements WHERE player_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![id.0], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Record an unlock. Returns `false` when it was already unlocked.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn unlock_achievement(&self, id: PlayerId, key: &str) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO achievements (player_id, achievement_key, unlocked_at)
             VALUES (?1, ?2, ?3)",
            params![id.0, key, Utc::now().to_rfc3339()],
        )?;
        if inserted > 0 {
            info!(player = %id, key, "Achievement unlocked");
        }
        Ok(inserted > 0)
    }

    // ------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------

    /// Copy the database to `dest_path` with SQLite's online-backup API.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] on SQLite failures.
    pub fn backup<P: AsRef<Path>>(&self, dest_path: P) -> Result<()> {
        let start = Instant::now();
        let mut dest = Connection::open(dest_path.as_ref())?;
        let backup = rusqlite::backup::Backup::new(&self.conn, &mut dest)?;
        backup.run_to_completion(256, std::time::Duration::from_millis(50), None)?;

        info!(
            dest = %dest_path.as_ref().display(),
            elapsed_ms = start.elapsed().as_millis(),
            "Database backup completed"
        );
        Ok(())
    }

    /// Back up next to the database file as `<name>.bak.1`, shifting older
    /// copies up and keeping at most `backup_count`. No-op in memory.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] or [`GallowsError::Io`] on failure.
    pub fn create_rotating_backup(&self) -> Result<()> {
        let max = self.config.backup_count;
        if self.is_in_memory() || max == 0 {
            return Ok(());
        }

        for i in (1..max).rev() {
            let src = self.backup_path(i);
            if src.exists() {
                std::fs::rename(&src, self.backup_path(i + 1))?;
            }
        }
        let oldest = self.backup_path(max + 1);
        if oldest.exists() {
            std::fs::remove_file(&oldest)?;
        }

        self.backup(self.backup_path(1))?;
        info!(max_backups = max, "Rotating backup created");
        Ok(())
    }

    fn backup_path(&self, n: u32) -> PathBuf {
        let mut name = self.db_path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".bak.{n}"));
        self.db_path.with_file_name(name)
    }

    // ------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------

    /// Path of the database file, `:memory:` for in-memory stores.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == ":memory:"
    }

    /// Run `PRAGMA integrity_check`; `Ok(false)` means corruption.
    ///
    /// # Errors
    ///
    /// Returns [`GallowsError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result != "ok" {
            warn!(result = %result, "Integrity check failed");
        }
        Ok(result == "ok")
    }
}

impl NarratorStore for SqliteStore {
    fn narrator_memory(&self, player: PlayerId) -> Result<Option<NarratorMemory>> {
        let row: Option<(String, u8)> = self
            .conn
            .prepare_cached(
                "SELECT mood, respect_level FROM executioner_memory WHERE player_id = ?1",
            )?
            .query_row(params![player.0], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        Ok(row.map(|(mood, respect_level)| {
            let mood = Mood::from_name(&mood).unwrap_or_else(|| {
                warn!(%player, stored = %mood, "Unknown stored mood, using neutral");
                Mood::Neutral
            });
            NarratorMemory {
                mood,
                respect_level,
            }
        }))
    }

    fn upsert_narrator_memory(&self, player: PlayerId, memory: &NarratorMemory) -> Result<()> {
        self.conn.execute(
            "INSERT INTO executioner_memory (player_id, mood, respect_level, last_interaction)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(player_id) DO UPDATE SET
                mood = excluded.mood,
                respect_level = excluded.respect_level,
                last_interaction = excluded.last_interaction",
            params![
                player.0,
                memory.mood.as_str(),
                memory.respect_level,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }
}

/// Adds `.optional()` to `rusqlite::Result`: `QueryReturnedNoRows` becomes
/// `Ok(None)`.
trait OptionalExt<T> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
