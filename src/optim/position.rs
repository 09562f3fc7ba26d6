//! Projected gradient ascent over the antenna position
//!
//! Gradients come from centered finite differences of the stochastic
//! objective. Steps are chosen by backtracking on the ascent form of the
//! Armijo condition:
//!
//!   f(P(x + α∇f)) ≥ f(x) + c · α · ‖∇f‖²
//!
//! where P clamps into the feasible box. After an accepted step the next
//! initial step grows to α / β.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::Sampler;
use crate::config::{OptParams, SamplingMode};
use crate::geometry::{BoxRegion, Point2};
use crate::traits::{AcceptedMove, Design, Objective, SearchReport, SearchStrategy, StopReason};

/// Centered finite-difference gradient of `f` at `x`.
///
/// Evaluates in the order +x, -x, +y, -y.
pub fn finite_diff_gradient<F>(mut f: F, x: Point2, eps: f64) -> Point2
where
    F: FnMut(Point2) -> f64,
{
    let gx = (f(Point2::new(x.x + eps, x.y)) - f(Point2::new(x.x - eps, x.y))) / (2.0 * eps);
    let gy = (f(Point2::new(x.x, x.y + eps)) - f(Point2::new(x.x, x.y - eps))) / (2.0 * eps);
    Point2::new(gx, gy)
}

/// Box-constrained gradient ascent on the antenna, phases held fixed
#[derive(Debug, Clone)]
pub struct PositionSearch {
    region: BoxRegion,
    steps: usize,
    step_init: f64,
    fd_eps: f64,
    beta: f64,
    armijo_c: f64,
    min_step: f64,
    grad_tolerance: f64,
    sampling: SamplingMode,
}

impl PositionSearch {
    pub fn new(region: BoxRegion, opt: &OptParams) -> Self {
        Self {
            region,
            steps: opt.fas_steps,
            step_init: opt.fas_step_init,
            fd_eps: opt.fas_fd_eps,
            beta: opt.backtrack_beta,
            armijo_c: opt.backtrack_c,
            min_step: opt.fas_min_step,
            grad_tolerance: opt.grad_tolerance,
            sampling: opt.sampling,
        }
    }

    pub fn region(&self) -> &BoxRegion {
        &self.region
    }
}

impl SearchStrategy for PositionSearch {
    fn name(&self) -> &'static str {
        "position"
    }

    fn search(
        &self,
        objective: &dyn Objective,
        design: &mut Design,
        rng: &mut ChaCha8Rng,
    ) -> SearchReport {
        let mut sampler = Sampler::new(self.sampling, rng);
        let phases = design.phases.as_slice();

        let mut x = self.region.project(design.antenna);
        let mut f_cur = sampler.evaluate(objective, phases, x);
        let mut step = self.step_init;

        let mut accepted = Vec::new();
        let mut rounds = 0;
        let mut stop = StopReason::Exhausted;

        for k in 0..self.steps {
            rounds += 1;
            let grad = finite_diff_gradient(|p| sampler.evaluate(objective, phases, p), x, self.fd_eps);
            let grad_sq = grad.norm_squared();
            if grad.norm() < self.grad_tolerance {
                stop = StopReason::SmallGradient;
                break;
            }

            let mut trial_step = step;
            let mut moved = false;
            while trial_step > self.min_step {
                let trial = self.region.project(x.offset(grad, trial_step));
                let f_new = sampler.evaluate(objective, phases, trial);
                trace!(step = trial_step, x = trial.x, y = trial.y, value = f_new, "line search trial");

                if f_new >= f_cur + self.armijo_c * trial_step * grad_sq {
                    debug!(k, step = trial_step, base = f_cur, value = f_new, "position step accepted");
                    accepted.push(AcceptedMove {
                        round: k,
                        base: f_cur,
                        value: f_new,
                    });
                    x = trial;
                    f_cur = f_new;
                    step = trial_step / self.beta;
                    moved = true;
                    break;
                }
                trial_step *= self.beta;
            }

            if !moved {
                stop = StopReason::LineSearchFailed;
                break;
            }
        }

        design.antenna = x;
        debug!(rounds, evaluations = sampler.evaluations(), value = f_cur, ?stop, "position search done");

        SearchReport {
            value: f_cur,
            evaluations: sampler.evaluations(),
            rounds,
            accepted,
            stop,
        }
    }
}
