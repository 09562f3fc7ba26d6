//! Problem configuration
//!
//! Plain value records for the scene, the RIS, channel statistics, link
//! budget, and optimizer hyperparameters. Every record has defaults that
//! reproduce the reference scenario, and every field is optional in YAML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ensure_positive, ensure_unit_interval, ConfigError, Result};
use crate::geometry::{BoxRegion, Codebook, Point2};

/// Transmitter, array and antenna-region placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Desired transmitter
    pub desired: Point2,
    /// First interfering transmitter
    pub interferer1: Point2,
    /// Second interfering transmitter
    pub interferer2: Point2,
    /// Center of the RIS grid
    pub ris_center: Point2,
    /// Feasible region for the movable antenna
    pub antenna_box: BoxRegion,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            desired: Point2::new(12.0, 5.0),
            interferer1: Point2::new(-8.0, 7.0),
            interferer2: Point2::new(6.0, -10.0),
            ris_center: Point2::new(1.0, 0.0),
            antenna_box: BoxRegion {
                lo: Point2::new(-1.0, -1.0),
                hi: Point2::new(1.0, 1.0),
            },
        }
    }
}

/// RIS shape and phase resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RisConfig {
    /// Number of elements M
    pub elements: usize,
    /// Element spacing in wavelengths
    pub elem_spacing: f64,
    /// (rows, cols); rows * cols must equal `elements`
    pub array_shape: (usize, usize),
    /// Phase quantization bits (2^bits codebook entries)
    pub phase_bits: u32,
}

impl Default for RisConfig {
    fn default() -> Self {
        Self {
            elements: 64,
            elem_spacing: 0.5,
            array_shape: (8, 8),
            phase_bits: 2,
        }
    }
}

/// Propagation statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelParams {
    /// Carrier frequency (Hz)
    pub fc_hz: f64,
    /// Rician K-factor of the Tx->RIS link (dB). The Tx->RIS link is
    /// modelled as pure line of sight, so this value is informational.
    pub k_tx_ris_db: f64,
    /// Rician K-factor of the direct Tx->antenna link (dB)
    pub k_tx_fa_db: f64,
    /// Path-loss exponent of the direct link's diffuse term
    pub n_tx_fa: f64,
    /// Path-loss exponent of the Tx->RIS link (unused by the LOS model)
    pub n_tx_ris: f64,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            fc_hz: 28e9,
            k_tx_ris_db: 5.0,
            k_tx_fa_db: 3.0,
            n_tx_fa: 2.2,
            n_tx_ris: 2.0,
        }
    }
}

/// Transmit powers and receiver noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemParams {
    pub p_des_dbm: f64,
    pub p_int_dbm: f64,
    /// Thermal noise density (dBm/Hz)
    pub n0_dbm_hz: f64,
    pub bandwidth_hz: f64,
    pub noise_figure_db: f64,
}

impl Default for SystemParams {
    fn default() -> Self {
        Self {
            p_des_dbm: 20.0,
            p_int_dbm: 20.0,
            n0_dbm_hz: -174.0,
            bandwidth_hz: 100e6,
            noise_figure_db: 5.0,
        }
    }
}

/// How an optimizer call draws Monte-Carlo snapshots across its evaluations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// One stream advances through every evaluation of the call
    #[default]
    Continuing,
    /// Every evaluation of the call replays the same frozen snapshot set
    CommonRandomNumbers,
}

/// Optimizer hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptParams {
    /// Monte-Carlo snapshots per objective evaluation
    pub snapshots: usize,
    pub outer_iters: usize,
    /// Full coordinate sweeps per phase update
    pub ris_inner_passes: usize,
    /// Gradient steps per position update
    pub fas_steps: usize,
    /// Initial line-search step (m)
    pub fas_step_init: f64,
    /// Finite-difference perturbation (m)
    pub fas_fd_eps: f64,
    pub backtrack_beta: f64,
    pub backtrack_c: f64,
    /// Line search gives up below this step (m)
    pub fas_min_step: f64,
    /// Gradient norm treated as converged
    pub grad_tolerance: f64,
    pub rng_seed: u64,
    pub sampling: SamplingMode,
}

impl Default for OptParams {
    fn default() -> Self {
        Self {
            snapshots: 32,
            outer_iters: 12,
            ris_inner_passes: 2,
            fas_steps: 25,
            fas_step_init: 0.2,
            fas_fd_eps: 1e-3,
            backtrack_beta: 0.6,
            backtrack_c: 1e-3,
            fas_min_step: 1e-6,
            grad_tolerance: 1e-10,
            rng_seed: 20251016,
            sampling: SamplingMode::Continuing,
        }
    }
}

/// Complete problem description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Problem {
    pub geometry: Geometry,
    pub ris: RisConfig,
    pub channel: ChannelParams,
    pub system: SystemParams,
    pub opt: OptParams,
}

impl Problem {
    /// Check every construction-time precondition.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.ris.array_shape;
        if rows.checked_mul(cols) != Some(self.ris.elements) || self.ris.elements == 0 {
            return Err(ConfigError::ElementCountMismatch {
                elements: self.ris.elements,
                rows,
                cols,
            });
        }
        Codebook::new(self.ris.phase_bits)?;
        self.geometry.antenna_box.validate()?;

        ensure_positive("elem_spacing", self.ris.elem_spacing)?;
        ensure_positive("fc_hz", self.channel.fc_hz)?;
        ensure_positive("bandwidth_hz", self.system.bandwidth_hz)?;
        ensure_positive("snapshots", self.opt.snapshots as f64)?;
        ensure_positive("outer_iters", self.opt.outer_iters as f64)?;
        ensure_positive("fas_step_init", self.opt.fas_step_init)?;
        ensure_positive("fas_fd_eps", self.opt.fas_fd_eps)?;
        ensure_positive("fas_min_step", self.opt.fas_min_step)?;
        ensure_unit_interval("backtrack_beta", self.opt.backtrack_beta)?;
        ensure_unit_interval("backtrack_c", self.opt.backtrack_c)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let problem: Problem = serde_yaml::from_str(yaml)?;
        problem.validate()?;
        Ok(problem)
    }

    /// Load and validate a YAML problem file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
