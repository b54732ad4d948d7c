//! Deterministic uniform and Gaussian draws from a 32-bit LCG.
//!
//! # Recurrence
//! ```text
//!   state = (state × 1664525 + 1013904223) mod 2³²
//!   next  = state / 2³²
//! ```
//!
//! The output sequence is part of the reproducibility contract: a given seed
//! must yield the same noise on every machine, so the constants and the draw
//! order are fixed.

use std::f64::consts::TAU;

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A single pseudo-random stream. Each instance owns its state; streams are
/// never shared between the base and channel noise fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a stream from `seed`, or from OS entropy when `seed` is `None`.
    ///
    /// The seed is used as the initial state verbatim, with no scrambling.
    pub fn new(seed: Option<u32>) -> Self {
        match seed {
            Some(seed) => Self { state: seed },
            None => Self::from_entropy(),
        }
    }

    /// Create a non-reproducible stream.
    pub fn from_entropy() -> Self {
        Self {
            state: rand::random::<u32>(),
        }
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Uniform draw in `[0, 1)`. Can return exactly `0.0`, never `1.0`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        f64::from(self.state) / TWO_POW_32
    }

    /// Gaussian draw via the cosine branch of Box-Muller.
    ///
    /// Always consumes exactly two uniforms; the sine companion is dropped.
    /// When the first uniform is `0.0` the result is infinite. That case is
    /// left unguarded so output stays identical to earlier renders.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next();
        let u2 = self.next();
        let z0 = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + z0 * std_dev
    }
}
