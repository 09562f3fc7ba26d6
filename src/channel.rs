//! Link-level channel synthesis
//!
//! Three physical links per transmitter:
//! - Tx -> RIS: pure line of sight. Phase follows geometry, amplitude is
//!   the Friis amplitude. Deterministic.
//! - RIS -> antenna: Rayleigh. Each element draws CN(0, sigma_m²) with
//!   sigma_m the Friis amplitude over that element-to-antenna distance, so
//!   moving the antenna reshapes the variance profile across the array.
//! - Tx -> antenna: Rician. Unit-amplitude LOS phasor plus a diffuse term
//!   scaled by a power-law path loss.
//!
//! The effective scalar channel is
//!
//!   h = h_d + Σ_m g_m · exp(jφ_m) · h_ur,m

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use crate::geometry::{wavelength, Point2, MIN_DISTANCE};
use crate::noise::complex_gaussian;

/// Convert power dB to linear scale
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Convert linear power to dB, floored at 1e-30
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.max(1e-30).log10()
}

/// Free-space amplitude λ / (4πd) with unit antenna gains
#[inline]
pub fn friis_amplitude(distance: f64, carrier_hz: f64) -> f64 {
    wavelength(carrier_hz) / (4.0 * PI * distance.max(MIN_DISTANCE))
}

/// Power-law amplitude (d / 1 m)^(-n/2)
#[inline]
pub fn power_law_amplitude(distance: f64, exponent: f64) -> f64 {
    distance.max(MIN_DISTANCE).powf(-exponent / 2.0)
}

/// exp(-j 2π d / λ)
#[inline]
fn propagation_phasor(distance: f64, lambda: f64) -> Complex64 {
    Complex64::from_polar(1.0, -2.0 * PI * distance / lambda)
}

/// Deterministic Tx -> RIS vector, one entry per element
pub fn tx_to_ris_los(tx: Point2, elements: &[Point2], carrier_hz: f64) -> Vec<Complex64> {
    let lambda = wavelength(carrier_hz);
    elements
        .iter()
        .map(|&e| {
            let d = tx.safe_distance(e);
            propagation_phasor(d, lambda) * friis_amplitude(d, carrier_hz)
        })
        .collect()
}

/// Rayleigh RIS -> antenna vector, one fresh draw per element
pub fn ris_to_antenna_rayleigh<R: Rng + ?Sized>(
    elements: &[Point2],
    antenna: Point2,
    carrier_hz: f64,
    rng: &mut R,
) -> Vec<Complex64> {
    elements
        .iter()
        .map(|&e| {
            let sigma = friis_amplitude(antenna.safe_distance(e), carrier_hz);
            complex_gaussian(rng, sigma)
        })
        .collect()
}

/// Rician Tx -> antenna scalar
pub fn tx_to_antenna_rician<R: Rng + ?Sized>(
    tx: Point2,
    antenna: Point2,
    carrier_hz: f64,
    k_db: f64,
    exponent: f64,
    rng: &mut R,
) -> Complex64 {
    let d = tx.safe_distance(antenna);
    let los = propagation_phasor(d, wavelength(carrier_hz));
    let diffuse = complex_gaussian(rng, power_law_amplitude(d, exponent));

    let k = db_to_linear(k_db);
    let a = (k / (k + 1.0)).sqrt();
    let b = (1.0 / (k + 1.0)).sqrt();
    los * a + diffuse * b
}

/// Combine a direct gain with the reflected sum through the RIS.
///
/// `reflect` and `incident` are the RIS -> antenna and Tx -> RIS vectors;
/// `phases` holds one phase shift per element.
pub fn effective_channel(
    direct: Complex64,
    reflect: &[Complex64],
    phases: &[f64],
    incident: &[Complex64],
) -> Complex64 {
    let reflected: Complex64 = reflect
        .iter()
        .zip(phases)
        .zip(incident)
        .map(|((&g, &phi), &h)| g * Complex64::from_polar(1.0, phi) * h)
        .sum();
    direct + reflected
}
