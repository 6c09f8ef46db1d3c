//! The wheel — source of winning numbers.
//!
//! Defines the `Spinner` trait so the registry never calls an ambient
//! random function directly. `RandomWheel` is the production spinner;
//! seed it for reproducible draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Highest pocket on the wheel. Pockets run `0..=MAX_NUMBER`.
pub const MAX_NUMBER: u8 = 36;

/// Abstraction over the outcome draw.
#[cfg_attr(test, mockall::automock)]
pub trait Spinner: Send + Sync {
    /// Draw a winning number, uniformly over `0..=MAX_NUMBER`.
    fn spin(&mut self) -> u8;
}

/// Pseudo-random wheel backed by `StdRng`.
pub struct RandomWheel {
    rng: StdRng,
}

impl RandomWheel {
    /// Wheel seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic wheel: the same seed yields the same draw sequence.
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "Using seeded wheel");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build from an optional configured seed.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::new(),
        }
    }
}

impl Default for RandomWheel {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner for RandomWheel {
    fn spin(&mut self) -> u8 {
        self.rng.gen_range(0..=MAX_NUMBER)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
