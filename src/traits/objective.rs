//! Objective trait - design -> scalar score

use rand_chacha::ChaCha8Rng;

use crate::geometry::Point2;

/// Stochastic scalar objective to be maximized
///
/// Implementations draw all their randomness from `rng`, so two calls with
/// generators in the same state return the same value.
pub trait Objective {
    /// Score a phase vector and antenna position
    fn evaluate(&self, phases: &[f64], antenna: Point2, rng: &mut ChaCha8Rng) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64], Point2, &mut ChaCha8Rng) -> f64,
{
    fn evaluate(&self, phases: &[f64], antenna: Point2, rng: &mut ChaCha8Rng) -> f64 {
        self(phases, antenna, rng)
    }
}
