//! Discrete coordinate ascent over the RIS phase codebook

use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::Sampler;
use crate::config::{OptParams, RisConfig, SamplingMode};
use crate::error::Result;
use crate::geometry::Codebook;
use crate::traits::{AcceptedMove, Design, Objective, SearchReport, SearchStrategy, StopReason};

/// Coordinate ascent over phases, antenna held fixed
///
/// Each sweep visits every element in order and tries every other codebook
/// value for it, re-evaluating the full objective per candidate. The best
/// candidate is adopted only if it strictly beats the current base value.
/// A sweep without a change ends the search.
#[derive(Debug, Clone)]
pub struct PhaseSearch {
    codebook: Codebook,
    sweeps: usize,
    sampling: SamplingMode,
}

impl PhaseSearch {
    pub fn new(codebook: Codebook, sweeps: usize, sampling: SamplingMode) -> Self {
        Self {
            codebook,
            sweeps,
            sampling,
        }
    }

    pub fn from_params(ris: &RisConfig, opt: &OptParams) -> Result<Self> {
        Ok(Self::new(
            Codebook::new(ris.phase_bits)?,
            opt.ris_inner_passes,
            opt.sampling,
        ))
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }
}

impl SearchStrategy for PhaseSearch {
    fn name(&self) -> &'static str {
        "phase"
    }

    fn search(
        &self,
        objective: &dyn Objective,
        design: &mut Design,
        rng: &mut ChaCha8Rng,
    ) -> SearchReport {
        for phase in design.phases.iter_mut() {
            if !self.codebook.contains(*phase) {
                *phase = self.codebook.quantize(*phase);
            }
        }

        let mut sampler = Sampler::new(self.sampling, rng);
        let antenna = design.antenna;
        let mut base = sampler.evaluate(objective, &design.phases, antenna);

        let mut trial = design.phases.clone();
        let mut accepted = Vec::new();
        let mut rounds = 0;
        let mut stop = StopReason::Exhausted;

        for sweep in 0..self.sweeps {
            rounds += 1;
            let mut improved = false;

            for m in 0..trial.len() {
                let current = design.phases[m];
                let mut best = base;
                let mut best_phase = current;

                for &candidate in self.codebook.phases() {
                    if candidate == current {
                        continue;
                    }
                    trial[m] = candidate;
                    let value = sampler.evaluate(objective, &trial, antenna);
                    trace!(element = m, candidate, value, "phase candidate");
                    if value > best {
                        best = value;
                        best_phase = candidate;
                    }
                }

                trial[m] = best_phase;
                if best_phase != current {
                    debug!(sweep, element = m, base, value = best, "phase accepted");
                    design.phases[m] = best_phase;
                    accepted.push(AcceptedMove {
                        round: sweep,
                        base,
                        value: best,
                    });
                    base = best;
                    improved = true;
                }
            }

            if !improved {
                stop = StopReason::FixedPoint;
                break;
            }
        }

        debug!(rounds, evaluations = sampler.evaluations(), value = base, ?stop, "phase search done");

        SearchReport {
            value: base,
            evaluations: sampler.evaluations(),
            rounds,
            accepted,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn search(bits: u32, sweeps: usize) -> PhaseSearch {
        PhaseSearch::new(Codebook::new(bits).unwrap(), sweeps, SamplingMode::Continuing)
    }

    /// Count of elements matching a target pattern of codebook indices
    fn matches_target(phases: &[f64], _: Point2, _: &mut ChaCha8Rng) -> f64 {
        let cb = Codebook::new(2).unwrap();
        phases
            .iter()
            .enumerate()
            .filter(|&(m, &p)| cb.nearest_index(p) == m % 4)
            .count() as f64
    }

    #[test]
    fn test_reaches_separable_optimum() {
        let strategy = search(2, 3);
        let mut design = Design::new(vec![0.0; 8], Point2::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = strategy.search(&matches_target, &mut design, &mut rng);

        let idx = strategy.codebook().indices(&design.phases);
        assert_eq!(idx, vec![0, 1, 2, 3, 0, 1, 2, 3]);
        assert_eq!(report.value, 8.0);
        // first sweep fixes 6 elements, second sweep finds nothing
        assert_eq!(report.accepted.len(), 6);
        assert_eq!(report.rounds, 2);
        assert_eq!(report.stop, StopReason::FixedPoint);
        // 1 base + 2 sweeps x 8 elements x 3 alternatives
        assert_eq!(report.evaluations, 1 + 2 * 8 * 3);
    }

    #[test]
    fn test_sweep_budget_exhausted() {
        let strategy = search(2, 1);
        let mut design = Design::new(vec![0.0; 4], Point2::default());
        let report = strategy.search(&matches_target, &mut design, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(report.stop, StopReason::Exhausted);
        assert_eq!(report.rounds, 1);
    }

    #[test]
    fn test_ties_do_not_move() {
        let flat = |_: &[f64], _: Point2, _: &mut ChaCha8Rng| 1.0;
        let strategy = search(3, 2);
        let mut design = Design::new(vec![0.0; 5], Point2::default());
        let report = strategy.search(&flat, &mut design, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(design.phases.iter().all(|&p| p == 0.0));
        assert!(report.accepted.is_empty());
        assert_eq!(report.stop, StopReason::FixedPoint);
    }

    #[test]
    fn test_codebook_closure_under_noise() {
        let noisy = |_: &[f64], _: Point2, rng: &mut ChaCha8Rng| rng.gen::<f64>();
        let strategy = search(2, 2);
        let mut design = Design::new(vec![0.3, 2.0, -1.0, 6.0, 0.0, PI], Point2::default());
        let report = strategy.search(&noisy, &mut design, &mut ChaCha8Rng::seed_from_u64(99));

        let allowed = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0];
        for &p in &design.phases {
            assert!(strategy.codebook().contains(p), "phase {} off codebook", p);
            assert!(allowed.iter().any(|a| (a - p).abs() < 1e-12));
        }
        for mv in &report.accepted {
            assert!(mv.value > mv.base);
        }
    }

    #[test]
    fn test_off_codebook_input_is_snapped() {
        let flat = |_: &[f64], _: Point2, _: &mut ChaCha8Rng| 0.0;
        let strategy = search(2, 1);
        let mut design = Design::new(vec![1.5, 3.0], Point2::default());
        strategy.search(&flat, &mut design, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(design.phases, vec![PI / 2.0, PI]);
    }

    #[test]
    fn test_uses_configured_bits() {
        let ris = RisConfig {
            phase_bits: 3,
            ..RisConfig::default()
        };
        let strategy = PhaseSearch::from_params(&ris, &OptParams::default()).unwrap();
        assert_eq!(strategy.codebook().len(), 8);
    }
}
