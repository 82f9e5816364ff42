//! The executioner: an adaptive narrator.
//!
//! ```text
//! respect (persisted) ─┐
//!                      ├─ determine_mood ─ corpus::lines ─ select_line ─ interpolate
//! difficulty ──────────┘
//! ```
//!
//! [`Narrator`] ties the pieces together over a [`NarratorStore`]. Mood is
//! recomputed on every request; only respect is durable.

pub mod corpus;
pub mod memory;
pub mod mood;
pub mod selector;
pub mod template;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::NarratorConfig;
use crate::error::Result;
use crate::types::{Difficulty, Moment, Mood, PlayerId};

pub use memory::{NarratorMemory, NarratorStore};
pub use mood::{avatar, determine_mood};
pub use selector::DialogueLine;
pub use template::{DialogueContext, interpolate};

/// One line of narration, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialogue {
    /// Interpolated line.
    pub text: String,
    /// Mood the line was drawn from.
    pub mood: Mood,
    /// Executioner glyph for that mood.
    pub avatar: String,
}

/// Pick a line for `moment` at a given respect level without touching storage.
///
/// `ctx` supplies the player and game facts; its `difficulty`,
/// `respect_level`, `mood` and `moment` fields are overwritten.
pub fn compose_dialogue<R: Rng + ?Sized>(
    respect_level: u8,
    moment: Moment,
    difficulty: Difficulty,
    ctx: DialogueContext,
    rng: &mut R,
) -> Dialogue {
    let mood = determine_mood(respect_level, difficulty);
    let ctx = DialogueContext {
        difficulty,
        respect_level,
        mood,
        moment,
        ..ctx
    };
    let text = selector::select_line_or_any(corpus::lines(mood, moment), &ctx, rng)
        .unwrap_or_default();
    debug!(%moment, %mood, respect = respect_level, "Dialogue selected");
    Dialogue {
        text,
        mood,
        avatar: avatar(mood),
    }
}

/// Narrator bound to a memory store.
#[derive(Debug)]
pub struct Narrator<'a, S: NarratorStore + ?Sized> {
    store: &'a S,
    config: NarratorConfig,
}

impl<'a, S: NarratorStore + ?Sized> Narrator<'a, S> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: &'a S, config: NarratorConfig) -> Self {
        Self { store, config }
    }

    /// Respect rules in effect.
    #[must_use]
    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    /// What the executioner remembers about `player`.
    ///
    /// A player without a row gets the fresh default; no row is created.
    ///
    /// # Errors
    /// Storage failures are propagated.
    pub fn memory(&self, player: PlayerId) -> Result<NarratorMemory> {
        Ok(self
            .store
            .narrator_memory(player)?
            .unwrap_or_else(|| NarratorMemory::fresh(&self.config)))
    }

    /// Apply the result of one finished game and persist it.
    ///
    /// Call exactly once per finished game.
    ///
    /// # Errors
    /// Storage failures are propagated; nothing is written when the read fails.
    pub fn update_executioner_mood(
        &self,
        player: PlayerId,
        won: bool,
        difficulty: Difficulty,
    ) -> Result<NarratorMemory> {
        let before = self.memory(player)?;
        let after = before.after_game(won, difficulty, &self.config);
        self.store.upsert_narrator_memory(player, &after)?;
        debug!(
            %player,
            won,
            from = before.respect_level,
            to = after.respect_level,
            mood = %after.mood,
            "Executioner respect updated"
        );
        Ok(after)
    }

    /// A line for `moment`, in the mood the executioner is in right now.
    ///
    /// # Errors
    /// Storage failures while reading memory are propagated.
    pub fn dialogue<R: Rng + ?Sized>(
        &self,
        player: PlayerId,
        moment: Moment,
        difficulty: Difficulty,
        ctx: DialogueContext,
        rng: &mut R,
    ) -> Result<Dialogue> {
        let memory = self.memory(player)?;
        Ok(compose_dialogue(memory.respect_level, moment, difficulty, ctx, rng))
    }
}
