//! Command implementations.

pub mod compare;
pub mod price;

use optionum_engines::mc::SimRng;

/// Builds the simulation source: seeded when requested, entropy otherwise.
pub(crate) fn sim_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => SimRng::from_seed(seed),
        None => SimRng::from_entropy(),
    }
}
