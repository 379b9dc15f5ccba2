//! Deterministic RNG wrapper for simulated telemetry.
//!
//! The simulator owns one `SimRng` seeded from the configuration, so the same
//! seed and the same fleet always produce the same sequence of deltas.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.  Used only from the single-threaded tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform value in `[-amplitude, amplitude]`.  A non-positive or
    /// non-finite amplitude yields `0.0`.
    #[inline]
    pub fn symmetric(&mut self, amplitude: f64) -> f64 {
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return 0.0;
        }
        self.0.gen_range(-amplitude..=amplitude)
    }
}
