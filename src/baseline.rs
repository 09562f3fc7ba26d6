//! Random-search comparator
//!
//! Samples codebook phases and a uniform antenna position per trial and
//! keeps the best worst-case rate. A sanity floor for the alternating
//! optimizer, not an optimizer in its own right.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::Problem;
use crate::error::Result;
use crate::geometry::{wavelength, ArrayGeometry, Codebook, Point2};
use crate::objective::MinRateObjective;
use crate::optim::Solution;
use crate::traits::Objective;

/// Best of `trials` random designs.
///
/// One generator drives both the sampling and the evaluations.
pub fn random_baseline(
    problem: &Problem,
    snapshots: usize,
    trials: usize,
    seed: u64,
) -> Result<Solution> {
    problem.validate()?;
    let array = ArrayGeometry::new(
        &problem.ris,
        wavelength(problem.channel.fc_hz),
        problem.geometry.ris_center,
    )?;
    let codebook = Codebook::new(problem.ris.phase_bits)?;
    let region = problem.geometry.antenna_box;
    let objective = MinRateObjective::new(
        &problem.geometry,
        array.positions(),
        &problem.channel,
        &problem.system,
        snapshots,
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut best = Solution {
        phases: vec![0.0; array.len()],
        antenna: region.center(),
        min_rate_bps: f64::NEG_INFINITY,
    };

    for trial in 0..trials {
        let phases: Vec<f64> = (0..array.len())
            .map(|_| codebook.phases()[rng.gen_range(0..codebook.len())])
            .collect();
        let antenna = Point2::new(
            rng.gen_range(region.lo.x..=region.hi.x),
            rng.gen_range(region.lo.y..=region.hi.y),
        );

        let value = objective.evaluate(&phases, antenna, &mut rng);
        if value > best.min_rate_bps {
            debug!(trial, value, "baseline improved");
            best = Solution {
                phases,
                antenna,
                min_rate_bps: value,
            };
        }
    }

    Ok(best)
}
