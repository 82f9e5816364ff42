//! Error types for the gallows core library.
//!
//! The game engine and the narrator's pure functions never fail. Everything
//! in here originates at the storage boundary or while loading configuration.

use thiserror::Error;

use crate::types::PlayerId;

/// Top-level error type for all gallows operations.
#[derive(Error, Debug)]
pub enum GallowsError {
    /// The backing store could not be opened or prepared.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No player row exists for the given id.
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// Another player already uses this name.
    #[error("Player name already taken: {0}")]
    NameTaken(String),

    /// The word pool is empty for the requested difficulty / category.
    #[error("No word available for the requested difficulty and category")]
    NoWordAvailable,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, GallowsError>;
