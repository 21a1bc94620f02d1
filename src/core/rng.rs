//! Random source - substitutable randomness for spawn and piece decisions
//!
//! Everything random in the core goes through the `RandomSource` trait so
//! tests can plug in a seeded or scripted source and replay a round exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// The three draws the mini-games need.
pub trait RandomSource {
    /// Uniform integer in `[min, max)`. Returns `min` for degenerate ranges.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform float in `[min, max)`. Returns `min` for degenerate ranges.
    fn uniform_float(&mut self, min: f32, max: f32) -> f32;

    /// Uniform float in `[0, 1)`.
    fn probability(&mut self) -> f32;
}

/// Seeded deterministic source. Same seed, same round.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..max)
    }

    fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..max)
    }

    fn probability(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}
