//! Weighted, condition-gated dialogue line selection.

use std::fmt;

use rand::Rng;
use tracing::warn;

use crate::dice;

use super::template::{DialogueContext, interpolate};

/// Eligibility rule attached to a line.
pub type Condition = fn(&DialogueContext) -> bool;

/// One candidate line of dialogue.
///
/// Lines are built in `const` tables:
///
/// ```
/// use gallows_core::narrator::selector::DialogueLine;
///
/// const LINES: &[DialogueLine] = &[
///     DialogueLine::new("The rope is ready."),
///     DialogueLine::new("{streak} in a row? Ends today.")
///         .when(|c| c.streak >= 3)
///         .weighted(3),
/// ];
/// assert_eq!(LINES[1].weight(), 3);
/// ```
#[derive(Clone, Copy)]
pub struct DialogueLine {
    text: &'static str,
    condition: Option<Condition>,
    weight: u32,
}

impl DialogueLine {
    /// An unconditional line of weight 1.
    #[must_use]
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            condition: None,
            weight: 1,
        }
    }

    /// Only eligible when `condition` holds.
    #[must_use]
    pub const fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Relative likelihood among eligible siblings. Zero is treated as 1.
    #[must_use]
    pub const fn weighted(mut self, weight: u32) -> Self {
        self.weight = if weight == 0 { 1 } else { weight };
        self
    }

    /// The raw template text.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// Selection weight.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Whether the line carries no condition.
    #[must_use]
    pub const fn is_unconditional(&self) -> bool {
        self.condition.is_none()
    }

    /// Whether the line may be chosen for `ctx`.
    #[must_use]
    pub fn is_eligible(&self, ctx: &DialogueContext) -> bool {
        self.condition.is_none_or(|cond| cond(ctx))
    }
}

impl fmt::Debug for DialogueLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueLine")
            .field("text", &self.text)
            .field("conditional", &self.condition.is_some())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Pick one eligible line by weight and interpolate it.
///
/// Returns `None` when no line is eligible. A single roll `r` in `[0, 1)` is
/// scaled to the total weight; lines are walked in order, subtracting each
/// weight until the remainder drops to zero or below.
pub fn select_line<R: Rng + ?Sized>(
    lines: &[DialogueLine],
    ctx: &DialogueContext,
    rng: &mut R,
) -> Option<String> {
    let eligible: Vec<&DialogueLine> = lines.iter().filter(|l| l.is_eligible(ctx)).collect();
    let last = *eligible.last()?;

    let total: u32 = eligible.iter().map(|l| l.weight).sum();
    let mut draw = dice::roll_unit(rng) * f64::from(total);
    for line in &eligible {
        draw -= f64::from(line.weight);
        if draw <= 0.0 {
            return Some(interpolate(line.text, ctx));
        }
    }

    // Only reachable through float rounding on the final subtraction.
    Some(interpolate(last.text, ctx))
}

/// [`select_line`], falling back to a uniform pick over every line (conditions
/// ignored) when nothing is eligible.
///
/// Returns `None` only for an empty slice.
pub fn select_line_or_any<R: Rng + ?Sized>(
    lines: &[DialogueLine],
    ctx: &DialogueContext,
    rng: &mut R,
) -> Option<String> {
    if let Some(text) = select_line(lines, ctx, rng) {
        return Some(text);
    }
    if lines.is_empty() {
        return None;
    }
    warn!(
        moment = %ctx.moment,
        mood = %ctx.mood,
        candidates = lines.len(),
        "No eligible dialogue line, falling back to an unfiltered pick"
    );
    let line = &lines[dice::pick_index(rng, lines.len())];
    Some(interpolate(line.text, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    /// A generator whose unit roll lands at roughly `fraction`.
    fn fixed(fraction: f64) -> StepRng {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let raw = (fraction * u64::MAX as f64) as u64;
        StepRng::new(raw, 0)
    }

    const WEIGHTED: &[DialogueLine] = &[
        DialogueLine::new("light a"),
        DialogueLine::new("light b"),
        DialogueLine::new("heavy").weighted(8),
    ];

    #[test]
    fn heavy_line_wins_top_of_range() {
        let ctx = DialogueContext::default();
        for fraction in [0.25, 0.5, 0.85, 0.99] {
            let text = select_line(WEIGHTED, &ctx, &mut fixed(fraction));
            assert_eq!(text.as_deref(), Some("heavy"), "roll {fraction}");
        }
    }

    #[test]
    fn low_rolls_pick_light_lines() {
        let ctx = DialogueContext::default();
        assert_eq!(select_line(WEIGHTED, &ctx, &mut fixed(0.0)).as_deref(), Some("light a"));
        assert_eq!(select_line(WEIGHTED, &ctx, &mut fixed(0.15)).as_deref(), Some("light b"));
    }

    #[test]
    fn weights_shape_the_distribution() {
        let ctx = DialogueContext::default();
        let mut rng = StdRng::seed_from_u64(42);
        let heavy = (0..2_000)
            .filter(|_| select_line(WEIGHTED, &ctx, &mut rng).as_deref() == Some("heavy"))
            .count();
        // Expected 1600 of 2000.
        assert!((1_450..=1_750).contains(&heavy), "heavy picked {heavy} times");
    }

    #[test]
    fn only_default_line_survives_failing_predicates() {
        const LINES: &[DialogueLine] = &[
            DialogueLine::new("streak").when(|c| c.streak >= 5).weighted(5),
            DialogueLine::new("default"),
            DialogueLine::new("veteran").when(|c| c.total_wins >= 10).weighted(3),
        ];
        let ctx = DialogueContext::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(select_line(LINES, &ctx, &mut rng).as_deref(), Some("default"));
        }
    }

    #[test]
    fn nothing_eligible_returns_none() {
        const LINES: &[DialogueLine] = &[DialogueLine::new("never").when(|_| false)];
        let ctx = DialogueContext::default();
        assert!(select_line(LINES, &ctx, &mut StdRng::seed_from_u64(0)).is_none());
        assert!(select_line(&[], &ctx, &mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn fallback_ignores_conditions() {
        const LINES: &[DialogueLine] = &[
            DialogueLine::new("gated {streak}").when(|c| c.streak >= 99),
        ];
        let ctx = DialogueContext::default();
        let text = select_line_or_any(LINES, &ctx, &mut StdRng::seed_from_u64(0));
        assert_eq!(text.as_deref(), Some("gated 0"));
        assert!(select_line_or_any(&[], &ctx, &mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn winner_is_interpolated() {
        const LINES: &[DialogueLine] = &[DialogueLine::new("Farewell, {player_name}.")];
        let ctx = DialogueContext {
            player_name: "Ash".to_string(),
            ..DialogueContext::default()
        };
        let text = select_line(LINES, &ctx, &mut StdRng::seed_from_u64(0));
        assert_eq!(text.as_deref(), Some("Farewell, Ash."));
    }

    #[test]
    fn zero_weight_counts_as_one() {
        assert_eq!(DialogueLine::new("x").weighted(0).weight(), 1);
    }
}
