//! Alternating RIS / antenna optimization
//!
//! [`PhaseSearch`] and [`PositionSearch`] are the two search strategies;
//! [`AlternatingOptimizer`] runs them in turn with fresh random sub-streams
//! and keeps the best measured design.

mod alternating;
mod phase;
mod position;

#[cfg(test)]
mod scenario_tests;

pub use alternating::{AlternatingOptimizer, HistoryEntry, OptimizationResult, Solution};
pub use phase::PhaseSearch;
pub use position::{finite_diff_gradient, PositionSearch};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SamplingMode;
use crate::geometry::Point2;
use crate::traits::Objective;

/// Routes every evaluation of one search call through the configured
/// sampling mode and counts evaluations.
pub(crate) struct Sampler<'r> {
    rng: &'r mut ChaCha8Rng,
    frozen_seed: Option<u64>,
    evaluations: usize,
}

impl<'r> Sampler<'r> {
    pub(crate) fn new(mode: SamplingMode, rng: &'r mut ChaCha8Rng) -> Self {
        let frozen_seed = match mode {
            SamplingMode::Continuing => None,
            SamplingMode::CommonRandomNumbers => Some(rng.gen()),
        };
        Self {
            rng,
            frozen_seed,
            evaluations: 0,
        }
    }

    pub(crate) fn evaluate(
        &mut self,
        objective: &dyn Objective,
        phases: &[f64],
        antenna: Point2,
    ) -> f64 {
        self.evaluations += 1;
        match self.frozen_seed {
            None => objective.evaluate(phases, antenna, self.rng),
            Some(seed) => {
                let mut replay = ChaCha8Rng::seed_from_u64(seed);
                objective.evaluate(phases, antenna, &mut replay)
            }
        }
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }
}
