//! SearchStrategy trait - one update step of the alternating loop

use rand_chacha::ChaCha8Rng;

use super::Objective;
use crate::geometry::Point2;

/// Joint design variable: RIS phases plus antenna position
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub phases: Vec<f64>,
    pub antenna: Point2,
}

impl Design {
    pub fn new(phases: Vec<f64>, antenna: Point2) -> Self {
        Self { phases, antenna }
    }
}

/// Why a search call returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Ran out of rounds
    Exhausted,
    /// A full round changed nothing
    FixedPoint,
    /// Gradient norm under tolerance
    SmallGradient,
    /// No step above the minimum satisfied the Armijo test
    LineSearchFailed,
}

/// An accepted change and the value it had to beat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedMove {
    pub round: usize,
    pub base: f64,
    pub value: f64,
}

/// Outcome of one [`SearchStrategy::search`] call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Most recently measured objective at the returned design
    pub value: f64,
    /// Objective evaluations spent
    pub evaluations: usize,
    /// Rounds started (sweeps or gradient steps)
    pub rounds: usize,
    pub accepted: Vec<AcceptedMove>,
    pub stop: StopReason,
}

/// Local search over one axis of a [`Design`]
///
/// A strategy proposes candidates, scores them through the objective, and
/// accepts or rejects them, mutating `design` in place. Every random draw
/// comes from `rng`.
pub trait SearchStrategy {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn search(
        &self,
        objective: &dyn Objective,
        design: &mut Design,
        rng: &mut ChaCha8Rng,
    ) -> SearchReport;
}
