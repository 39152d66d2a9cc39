//! Deterministic RNG using PCG32.
//!
//! A render owns exactly one generator, created from the spec seed and passed
//! by `&mut` through every consumer in a fixed order. Nothing reseeds.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Draws a uniform value in `[0, 1)`.
#[inline]
pub fn unit(rng: &mut Pcg32) -> f64 {
    rng.gen::<f64>()
}

/// Draws a uniform value in `[-1, 1)`.
#[inline]
pub fn bipolar(rng: &mut Pcg32) -> f64 {
    2.0 * unit(rng) - 1.0
}
