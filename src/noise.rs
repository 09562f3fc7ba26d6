//! Gaussian draws and random sub-streams
//!
//! Uses the Box-Muller transform for Gaussian samples. One transform yields
//! two independent normals, which map directly onto the real and imaginary
//! parts of a circularly-symmetric complex Gaussian.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

/// Derive an independent generator seeded from `master`.
///
/// Advances `master` by exactly one `u64`, so the sequence of derived
/// streams is fully determined by the master seed.
pub fn sub_stream(master: &mut ChaCha8Rng) -> ChaCha8Rng {
    let seed: u64 = master.gen();
    ChaCha8Rng::seed_from_u64(seed)
}

/// Pair of independent N(0, 1) samples
#[inline]
pub fn standard_normal_pair<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    // Avoid log(0)
    let u1: f64 = rng.gen::<f64>().max(1e-10);
    let u2: f64 = rng.gen();

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * PI * u2;
    (r * theta.cos(), r * theta.sin())
}

/// Draw from CN(0, sigma²): real and imaginary parts each N(0, sigma²/2)
#[inline]
pub fn complex_gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> Complex64 {
    let (a, b) = standard_normal_pair(rng);
    let scale = sigma * std::f64::consts::FRAC_1_SQRT_2;
    Complex64::new(a * scale, b * scale)
}
