//! Alternating optimization driver
//!
//! Every outer iteration runs each search strategy in order (phases, then
//! position by default) on its own sub-stream of the master generator, then
//! re-measures the resulting design on a further independent sub-stream.
//! Only that measurement feeds the history and the best-solution record.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::{PhaseSearch, PositionSearch};
use crate::config::Problem;
use crate::error::Result;
use crate::geometry::{wavelength, ArrayGeometry, Point2};
use crate::noise::sub_stream;
use crate::objective::MinRateObjective;
use crate::traits::{Design, Objective, SearchStrategy};

/// Snapshot of a design and its measured worst-case rate
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub phases: Vec<f64>,
    pub antenna: Point2,
    pub min_rate_bps: f64,
}

/// One row per outer iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    /// 1-based iteration index
    pub iteration: usize,
    pub min_rate_bps: f64,
    pub antenna: Point2,
    /// Running maximum of `min_rate_bps` up to this entry
    pub best_so_far: f64,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub best: Solution,
    pub history: Vec<HistoryEntry>,
    pub array: ArrayGeometry,
}

pub struct AlternatingOptimizer {
    problem: Problem,
    array: ArrayGeometry,
    strategies: Vec<Box<dyn SearchStrategy>>,
}

impl AlternatingOptimizer {
    /// Validate `problem` and set up the default phase -> position pairing
    pub fn new(problem: Problem) -> Result<Self> {
        let strategies: Vec<Box<dyn SearchStrategy>> = vec![
            Box::new(PhaseSearch::from_params(&problem.ris, &problem.opt)?),
            Box::new(PositionSearch::new(problem.geometry.antenna_box, &problem.opt)),
        ];
        Self::with_strategies(problem, strategies)
    }

    /// Use a custom ordered list of strategies per outer iteration
    pub fn with_strategies(
        problem: Problem,
        strategies: Vec<Box<dyn SearchStrategy>>,
    ) -> Result<Self> {
        problem.validate()?;
        let array = ArrayGeometry::new(
            &problem.ris,
            wavelength(problem.channel.fc_hz),
            problem.geometry.ris_center,
        )?;
        Ok(Self {
            problem,
            array,
            strategies,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn array(&self) -> &ArrayGeometry {
        &self.array
    }

    /// Run the full loop from the configured master seed.
    ///
    /// Starts from all-zero phases with the antenna at the box center.
    pub fn run(&self) -> OptimizationResult {
        let p = &self.problem;
        let mut master = ChaCha8Rng::seed_from_u64(p.opt.rng_seed);
        let objective = MinRateObjective::new(
            &p.geometry,
            self.array.positions(),
            &p.channel,
            &p.system,
            p.opt.snapshots,
        );

        let mut design = Design::new(vec![0.0; self.array.len()], p.geometry.antenna_box.center());
        let mut best = Solution {
            phases: design.phases.clone(),
            antenna: design.antenna,
            min_rate_bps: f64::NEG_INFINITY,
        };
        let mut history = Vec::with_capacity(p.opt.outer_iters);

        for it in 1..=p.opt.outer_iters {
            for strategy in &self.strategies {
                let mut rng = sub_stream(&mut master);
                let report = strategy.search(&objective, &mut design, &mut rng);
                debug!(
                    iteration = it,
                    strategy = strategy.name(),
                    value = report.value,
                    accepted = report.accepted.len(),
                    evaluations = report.evaluations,
                    stop = ?report.stop,
                    "strategy finished"
                );
            }

            let mut eval_rng = sub_stream(&mut master);
            let measured = objective.evaluate(&design.phases, design.antenna, &mut eval_rng);

            if measured > best.min_rate_bps {
                best = Solution {
                    phases: design.phases.clone(),
                    antenna: design.antenna,
                    min_rate_bps: measured,
                };
            }

            info!(
                iteration = it,
                min_rate_mbps = measured / 1e6,
                best_mbps = best.min_rate_bps / 1e6,
                x = design.antenna.x,
                y = design.antenna.y,
                "outer iteration"
            );

            history.push(HistoryEntry {
                iteration: it,
                min_rate_bps: measured,
                antenna: design.antenna,
                best_so_far: best.min_rate_bps,
            });
        }

        OptimizationResult {
            best,
            history,
            array: self.array.clone(),
        }
    }
}
