//! Configuration for gallows.
//!
//! Maps directly to `gallows.toml`. Every field has a default, so an empty
//! file (or no file at all) gives the standard rules: eight lives, respect
//! starting at 50, +5 per win and -3 per loss.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GallowsConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Game rules.
    #[serde(default)]
    pub game: GameConfig,
    /// Narrator respect rules.
    #[serde(default)]
    pub narrator: NarratorConfig,
    /// Persistence / save settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl GallowsConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `GallowsError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::GallowsError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Game rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Wrong guesses allowed before a loss.
    #[serde(default = "default_max_wrong")]
    pub max_wrong_guesses: u32,
    /// A win that lands the streak on a multiple of this triggers a streak line.
    #[serde(default = "default_3")]
    pub streak_milestone: u32,
    /// Show the full word after a loss.
    #[serde(default = "default_true")]
    pub reveal_word_on_loss: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_wrong_guesses: crate::engine::MAX_WRONG_GUESSES,
            streak_milestone: 3,
            reveal_word_on_loss: true,
        }
    }
}

/// How the executioner's respect moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Respect of a player the executioner has never met.
    #[serde(default = "default_initial_respect")]
    pub initial_respect: u8,
    /// Respect change after a win.
    #[serde(default = "default_win_delta")]
    pub win_delta: i32,
    /// Respect change after a loss.
    #[serde(default = "default_loss_delta")]
    pub loss_delta: i32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            initial_respect: 50,
            win_delta: 5,
            loss_delta: -3,
        }
    }
}

/// Persistence / save configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Directory holding the database. Defaults to `~/.gallows`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Database file name inside `data_dir`.
    #[serde(default = "default_db_file")]
    pub db_file: String,
    /// Use WAL journaling.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Number of rotated backups to keep.
    #[serde(default = "default_3")]
    pub backup_count: u32,
    /// Insert the built-in word list when the pool is empty.
    #[serde(default = "default_true")]
    pub seed_default_words: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_file: default_db_file(),
            wal_mode: true,
            backup_count: 3,
            seed_default_words: true,
        }
    }
}

impl PersistenceConfig {
    /// Full path of the database file.
    ///
    /// Without an explicit `data_dir` this is `$HOME/.gallows/<db_file>`,
    /// falling back to the working directory when `HOME` is unset.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        let dir = self.data_dir.clone().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".gallows")
        });
        dir.join(&self.db_file)
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_db_file() -> String { "game.db".to_string() }
fn default_max_wrong() -> u32 { crate::engine::MAX_WRONG_GUESSES }
fn default_3() -> u32 { 3 }
fn default_initial_respect() -> u8 { 50 }
fn default_win_delta() -> i32 { 5 }
fn default_loss_delta() -> i32 { -3 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GallowsConfig::from_toml("").expect("parse");
        assert_eq!(config.game.max_wrong_guesses, 8);
        assert_eq!(config.narrator, NarratorConfig::default());
        assert_eq!(config.persistence.db_file, "game.db");
        assert!(config.persistence.wal_mode);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GallowsConfig::from_toml(
            r#"
            [narrator]
            win_delta = 10

            [persistence]
            data_dir = "/tmp/gallows-test"
            "#,
        )
        .expect("parse");
        assert_eq!(config.narrator.win_delta, 10);
        assert_eq!(config.narrator.loss_delta, -3);
        assert_eq!(
            config.persistence.db_path(),
            PathBuf::from("/tmp/gallows-test/game.db")
        );
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = GallowsConfig::from_toml("[game\nmax_wrong_guesses = ").expect_err("invalid");
        assert!(matches!(err, crate::GallowsError::Config(_)));
    }
}
