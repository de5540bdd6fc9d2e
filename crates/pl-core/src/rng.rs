//! Deterministic simulation-level RNG.
//!
//! The tick loop itself never draws random numbers.  `SimRng` exists for
//! building randomized inputs (e.g. a mixed work order) that are still
//! reproducible: the same seed always yields the same sequence.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand::seq::SliceRandom;

/// Seeded RNG for input generation.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a random element from a slice; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
