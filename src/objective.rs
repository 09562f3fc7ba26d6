//! Worst-case rate objective
//!
//! Each Monte-Carlo snapshot draws fresh direct-link and RIS -> antenna
//! fading for all three transmitters and computes the desired
//! transmitter's Shannon rate against the two interferers plus thermal
//! noise. The objective is the minimum rate over the snapshots.
//!
//! Draw order per snapshot: desired, interferer 1, interferer 2; within a
//! transmitter the direct-link diffuse term first, then one draw per RIS
//! element in element order.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::channel::{
    db_to_linear, effective_channel, ris_to_antenna_rayleigh, tx_to_antenna_rician, tx_to_ris_los,
};
use crate::config::{ChannelParams, Geometry, SystemParams};
use crate::geometry::Point2;
use crate::traits::Objective;
use num_complex::Complex64;

/// Floor applied to the SINR denominator
pub const SINR_FLOOR: f64 = 1e-30;

/// Link budget in linear units (W, Hz)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkBudget {
    pub p_des_w: f64,
    pub p_int_w: f64,
    /// N0 · NF · B
    pub noise_w: f64,
    pub bandwidth_hz: f64,
}

impl LinkBudget {
    pub fn new(system: &SystemParams) -> Self {
        let n0 = db_to_linear(system.n0_dbm_hz - 30.0);
        let n0_eff = n0 * db_to_linear(system.noise_figure_db);
        Self {
            p_des_w: db_to_linear(system.p_des_dbm - 30.0),
            p_int_w: db_to_linear(system.p_int_dbm - 30.0),
            noise_w: n0_eff * system.bandwidth_hz,
            bandwidth_hz: system.bandwidth_hz,
        }
    }

    pub fn sinr(&self, desired: Complex64, int1: Complex64, int2: Complex64) -> f64 {
        let signal = self.p_des_w * desired.norm_sqr();
        let denom = self.p_int_w * (int1.norm_sqr() + int2.norm_sqr()) + self.noise_w;
        signal / denom.max(SINR_FLOOR)
    }

    /// Shannon rate in bits/s
    pub fn rate(&self, desired: Complex64, int1: Complex64, int2: Complex64) -> f64 {
        self.bandwidth_hz * (1.0 + self.sinr(desired, int1, int2)).log2()
    }
}

/// Desired-transmitter rate for each of `snapshots` independent draws
#[allow(clippy::too_many_arguments)]
pub fn snapshot_rates<R: Rng + ?Sized>(
    desired: Point2,
    interferer1: Point2,
    interferer2: Point2,
    antenna: Point2,
    array: &[Point2],
    phases: &[f64],
    channel: &ChannelParams,
    system: &SystemParams,
    rng: &mut R,
    snapshots: usize,
) -> Vec<f64> {
    let budget = LinkBudget::new(system);
    let fc = channel.fc_hz;

    // Tx -> RIS is deterministic, so it is shared by every snapshot
    let transmitters = [desired, interferer1, interferer2];
    let incident: Vec<Vec<Complex64>> = transmitters
        .iter()
        .map(|&tx| tx_to_ris_los(tx, array, fc))
        .collect();

    let mut rates = Vec::with_capacity(snapshots);
    for _ in 0..snapshots {
        let mut h = [Complex64::new(0.0, 0.0); 3];
        for (k, &tx) in transmitters.iter().enumerate() {
            let direct =
                tx_to_antenna_rician(tx, antenna, fc, channel.k_tx_fa_db, channel.n_tx_fa, rng);
            let reflect = ris_to_antenna_rayleigh(array, antenna, fc, rng);
            h[k] = effective_channel(direct, &reflect, phases, &incident[k]);
        }
        rates.push(budget.rate(h[0], h[1], h[2]));
    }
    rates
}

/// Minimum desired-transmitter rate over `snapshots` draws (bits/s).
///
/// Returns 0.0 when `snapshots` is zero.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_min_rate<R: Rng + ?Sized>(
    desired: Point2,
    interferer1: Point2,
    interferer2: Point2,
    antenna: Point2,
    array: &[Point2],
    phases: &[f64],
    channel: &ChannelParams,
    system: &SystemParams,
    rng: &mut R,
    snapshots: usize,
) -> f64 {
    let rates = snapshot_rates(
        desired,
        interferer1,
        interferer2,
        antenna,
        array,
        phases,
        channel,
        system,
        rng,
        snapshots,
    );
    if rates.is_empty() {
        return 0.0;
    }
    rates.into_iter().fold(f64::INFINITY, f64::min)
}

/// [`evaluate_min_rate`] bound to a fixed scene
#[derive(Debug, Clone, Copy)]
pub struct MinRateObjective<'a> {
    pub geometry: &'a Geometry,
    pub array: &'a [Point2],
    pub channel: &'a ChannelParams,
    pub system: &'a SystemParams,
    pub snapshots: usize,
}

impl<'a> MinRateObjective<'a> {
    pub fn new(
        geometry: &'a Geometry,
        array: &'a [Point2],
        channel: &'a ChannelParams,
        system: &'a SystemParams,
        snapshots: usize,
    ) -> Self {
        Self {
            geometry,
            array,
            channel,
            system,
            snapshots,
        }
    }
}

impl Objective for MinRateObjective<'_> {
    fn evaluate(&self, phases: &[f64], antenna: Point2, rng: &mut ChaCha8Rng) -> f64 {
        evaluate_min_rate(
            self.geometry.desired,
            self.geometry.interferer1,
            self.geometry.interferer2,
            antenna,
            self.array,
            phases,
            self.channel,
            self.system,
            rng,
            self.snapshots,
        )
    }
}
