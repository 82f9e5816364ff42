//! Randomness helpers.
//!
//! Every random decision in the crate (which letter a hint reveals, which
//! dialogue line wins) is made from a single uniform roll in `[0, 1)`.
//! Callers pass any [`rand::Rng`]; tests pass a seeded or mock generator and
//! get exactly reproducible outcomes.

use rand::Rng;

/// Draw a uniform value in `[0, 1)`.
pub fn roll_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Map a unit roll onto an index in `0..len`. `len` must be non-zero.
#[must_use]
pub fn index_from_roll(roll: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let idx = (roll * len as f64).floor() as usize;
    idx.min(len - 1)
}

/// Pick a uniformly random index in `0..len`. `len` must be non-zero.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    index_from_roll(roll_unit(rng), len)
}
