//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random choice the mock provider makes flows through this module so
//! that the same request always yields the same track. Independent streams
//! for title, tempo and pitch come from keyed seed derivation.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use tunecraft_spec::hash::derive_seed;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
///
/// # Arguments
/// * `seed` - A 32-bit seed value
///
/// # Returns
/// A deterministically initialized PCG32 generator
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Creates an RNG for a named component of a generation.
///
/// # Arguments
/// * `base_seed` - The request seed
/// * `key` - Component name (e.g. "title", "tempo")
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_seed(base_seed, key))
}
