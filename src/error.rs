//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration and construction
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building a problem instance.
///
/// Every variant is a precondition violation detected at construction
/// time. Once an optimizer is built, evaluation never fails.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Element count does not match the array shape
    #[error("array shape {rows}x{cols} does not hold {elements} elements")]
    ElementCountMismatch {
        elements: usize,
        rows: usize,
        cols: usize,
    },

    /// Phase quantization outside the supported range
    #[error("phase quantization of {0} bits is not supported (expected 1..=16)")]
    InvalidPhaseBits(u32),

    /// Box lower corner exceeds upper corner
    #[error("invalid box: lo=({lo_x}, {lo_y}) hi=({hi_x}, {hi_y})")]
    InvalidBox {
        lo_x: f64,
        lo_y: f64,
        hi_x: f64,
        hi_y: f64,
    },

    /// Parameter must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// Parameter outside its open interval
    #[error("{field} must lie in (0, 1), got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// Failed to read a configuration file
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// Malformed YAML configuration
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Reject values that are not strictly positive (NaN included).
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Reject values outside the open unit interval.
pub(crate) fn ensure_unit_interval(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
