//! fasris - joint RIS phase and fluid-antenna position optimization
//!
//! Maximizes the worst-case rate of a desired transmitter received by a
//! movable antenna through a reconfigurable surface, under Rician direct
//! fading, Rayleigh reflected fading, and two interfering transmitters.
//!
//! The objective is a Monte-Carlo minimum over snapshots. Optimization
//! alternates a discrete coordinate ascent on the RIS phases with a
//! projected gradient ascent on the antenna position. All randomness comes
//! from one master seed split into independent ChaCha sub-streams, so a run
//! is reproducible bit for bit.

pub mod baseline;
pub mod channel;
pub mod config;
pub mod error;
pub mod geometry;
pub mod noise;
pub mod objective;
pub mod optim;
pub mod report;
pub mod traits;

pub use baseline::random_baseline;
pub use config::{ChannelParams, Geometry, OptParams, Problem, RisConfig, SamplingMode, SystemParams};
pub use error::{ConfigError, Result};
pub use geometry::{ArrayGeometry, BoxRegion, Codebook, Point2};
pub use objective::{evaluate_min_rate, MinRateObjective};
pub use optim::{AlternatingOptimizer, HistoryEntry, OptimizationResult, PhaseSearch, PositionSearch, Solution};
pub use traits::{Design, Objective, SearchReport, SearchStrategy};
