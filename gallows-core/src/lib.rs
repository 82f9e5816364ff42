//! # Gallows Core Library
//!
//! Hangman with an executioner who remembers you.
//!
//! - **Engine**: an immutable [`GameState`] with guesses, a single hint,
//!   win/loss detection and scoring.
//! - **Narrator**: a per-player respect level (persisted), a mood derived
//!   from it and the difficulty, and weighted, condition-gated dialogue lines
//!   with `{placeholder}` interpolation.
//! - **Records**: players, the word pool, finished games, statistics,
//!   streaks, a leaderboard and achievements, stored in SQLite.
//!
//! ## Determinism
//!
//! Randomness is always passed in as `&mut impl Rng` and only consumed as
//! uniform `[0, 1)` rolls; time-dependent operations have `*_at(now)`
//! variants. Seeded or mock generators reproduce every outcome.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod achievements;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod narrator;
pub mod persistence;
pub mod stats;
pub mod types;
pub mod words;

pub use config::GallowsConfig;
pub use engine::{GameState, GameStatus, HintOutcome};
pub use error::{GallowsError, Result};
pub use narrator::{Dialogue, DialogueContext, Narrator, NarratorMemory, NarratorStore};
pub use persistence::SqliteStore;
pub use stats::{FinishedGame, LeaderboardEntry, Player, PlayerStats};
pub use types::*;
pub use words::Word;
