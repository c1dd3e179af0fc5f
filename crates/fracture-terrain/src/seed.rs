//! Deterministic seed handling.
//!
//! Resolves the world seed for a generation call and derives the per-field
//! random state (lattice seed and octave offsets) from it. Everything derived
//! here is a pure function of the seed, built fresh for every call.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::params::SeedChoice;

/// Half-width of the range octave offsets are drawn from.
const OCTAVE_OFFSET_RANGE: f64 = 100_000.0;

/// Resolve a [`SeedChoice`] into a concrete seed.
pub fn resolve_seed(choice: SeedChoice) -> u64 {
    match choice {
        SeedChoice::Fixed(seed) => seed,
        SeedChoice::Random => rand::rng().random(),
    }
}

/// Seed of the temperature field for a given world seed.
#[inline]
pub fn temperature_seed(world_seed: u64) -> u64 {
    world_seed.wrapping_add(1)
}

/// Deterministic RNG for one noise field.
pub fn field_rng(field_seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(field_seed)
}

/// Draw one `(x, y)` sampling offset per octave.
///
/// Offsets move each octave to a distant, unrelated patch of the lattice so
/// octaves do not line up at the origin.
pub fn octave_offsets(field_seed: u64, octaves: usize) -> Vec<(f64, f64)> {
    let mut rng = field_rng(field_seed);
    (0..octaves)
        .map(|_| {
            (
                rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
                rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
            )
        })
        .collect()
}
