//! Seedable random source shared by both engines.
//!
//! Every run owns its own generator; nothing reads from a global RNG, so a
//! fixed seed reproduces a run exactly.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// The generator type used by [`crate::ga::GaRunner`] and [`crate::sa::SaRunner`].
pub type SearchRng = Pcg64Mcg;

/// Creates a generator from a seed.
pub fn create_rng(seed: u64) -> SearchRng {
    Pcg64Mcg::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
