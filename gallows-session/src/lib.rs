//! # Gallows Session
//!
//! Drives one game of hangman end to end on top of `gallows-core`.
//!
//! - [`session::GameSession`]: picks a word, applies guesses and the hint,
//!   asks the narrator for a line after every change, and records the
//!   result (stats, word counters, respect, achievements) when finished.
//! - [`events`]: classifies what an action did and maps it to a narrator
//!   moment.
//! - [`telemetry`]: installs the `tracing` subscriber for the binary.
//!
//! The `gallows` binary is a line-based terminal front end over these.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod events;
pub mod session;
pub mod telemetry;

pub use events::TurnOutcome;
pub use session::{GameReport, GameSession, Turn};
