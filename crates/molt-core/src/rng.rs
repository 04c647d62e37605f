//! Deterministic simulation-level RNG.
//!
//! Only the ambient gesture picker draws random numbers, on the single
//! simulation thread, so one seeded `SmallRng` is all a `Sim` owns.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Seeded RNG owned by a `Sim`.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a uniformly random element; `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
