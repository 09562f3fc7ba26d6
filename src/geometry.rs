//! Planar scene geometry
//!
//! Points and boxes in the 2-D plane, the RIS element grid, and the
//! quantized phase codebook. Array spacing is expressed in wavelengths so
//! the physical grid follows the carrier frequency.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::RisConfig;
use crate::error::{ConfigError, Result};

/// Propagation speed used for every wavelength computation (m/s)
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Smallest distance used in any inverse or power law (m)
pub const MIN_DISTANCE: f64 = 1e-6;

/// Carrier wavelength in meters.
#[inline]
pub fn wavelength(carrier_hz: f64) -> f64 {
    SPEED_OF_LIGHT / carrier_hz
}

/// Point in the plane (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(&self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Distance floored at [`MIN_DISTANCE`]
    #[inline]
    pub fn safe_distance(&self, other: Point2) -> f64 {
        self.distance(other).max(MIN_DISTANCE)
    }

    /// `self + step * direction`
    #[inline]
    pub fn offset(&self, direction: Point2, step: f64) -> Point2 {
        Point2::new(self.x + step * direction.x, self.y + step * direction.y)
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }
}

/// Axis-aligned feasible region for the movable antenna
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRegion {
    pub lo: Point2,
    pub hi: Point2,
}

impl BoxRegion {
    pub fn new(lo: Point2, hi: Point2) -> Result<Self> {
        let region = Self { lo, hi };
        region.validate()?;
        Ok(region)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.lo.x, self.lo.y, self.hi.x, self.hi.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.lo.x > self.hi.x || self.lo.y > self.hi.y {
            return Err(ConfigError::InvalidBox {
                lo_x: self.lo.x,
                lo_y: self.lo.y,
                hi_x: self.hi.x,
                hi_y: self.hi.y,
            });
        }
        Ok(())
    }

    /// Component-wise clamp into the box
    #[inline]
    pub fn project(&self, p: Point2) -> Point2 {
        Point2::new(p.x.clamp(self.lo.x, self.hi.x), p.y.clamp(self.lo.y, self.hi.y))
    }

    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.lo.x && p.x <= self.hi.x && p.y >= self.lo.y && p.y <= self.hi.y
    }

    pub fn center(&self) -> Point2 {
        Point2::new(0.5 * (self.lo.x + self.hi.x), 0.5 * (self.lo.y + self.hi.y))
    }
}

/// RIS element positions on a centered rectangular grid.
///
/// Elements are stored row-major: index `r * cols + c` sits at column `c`
/// (x offset) of row `r` (y offset).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayGeometry {
    rows: usize,
    cols: usize,
    spacing_m: f64,
    positions: Vec<Point2>,
}

impl ArrayGeometry {
    pub fn new(ris: &RisConfig, wavelength: f64, center: Point2) -> Result<Self> {
        let (rows, cols) = ris.array_shape;
        if rows.checked_mul(cols) != Some(ris.elements) || ris.elements == 0 {
            return Err(ConfigError::ElementCountMismatch {
                elements: ris.elements,
                rows,
                cols,
            });
        }
        crate::error::ensure_positive("elem_spacing", ris.elem_spacing)?;
        crate::error::ensure_positive("wavelength", wavelength)?;

        let spacing_m = ris.elem_spacing * wavelength;
        let x_mid = (cols as f64 - 1.0) / 2.0;
        let y_mid = (rows as f64 - 1.0) / 2.0;

        let mut positions = Vec::with_capacity(ris.elements);
        for r in 0..rows {
            let y = (r as f64 - y_mid) * spacing_m + center.y;
            for c in 0..cols {
                let x = (c as f64 - x_mid) * spacing_m + center.x;
                positions.push(Point2::new(x, y));
            }
        }

        Ok(Self {
            rows,
            cols,
            spacing_m,
            positions,
        })
    }

    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Physical element spacing in meters
    pub fn spacing_m(&self) -> f64 {
        self.spacing_m
    }
}

/// Uniform phase codebook with `2^bits` entries over [0, 2π)
#[derive(Debug, Clone, PartialEq)]
pub struct Codebook {
    bits: u32,
    phases: Vec<f64>,
}

impl Codebook {
    pub fn new(bits: u32) -> Result<Self> {
        if !(1..=16).contains(&bits) {
            return Err(ConfigError::InvalidPhaseBits(bits));
        }
        let levels = 1usize << bits;
        let step = 2.0 * PI / levels as f64;
        let phases = (0..levels).map(|k| k as f64 * step).collect();
        Ok(Self { bits, phases })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// True when `phase` is exactly one of the codebook values
    pub fn contains(&self, phase: f64) -> bool {
        self.phases.iter().any(|&p| p == phase)
    }

    /// Index of the codebook entry closest to `phase` on the circle
    pub fn nearest_index(&self, phase: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (k, &p) in self.phases.iter().enumerate() {
            let diff = (phase - p).rem_euclid(2.0 * PI);
            let dist = diff.min(2.0 * PI - diff);
            if dist < best_dist {
                best_dist = dist;
                best = k;
            }
        }
        best
    }

    /// Snap `phase` onto the codebook
    pub fn quantize(&self, phase: f64) -> f64 {
        self.phases[self.nearest_index(phase)]
    }

    /// Map a phase vector to codebook indices
    pub fn indices(&self, phases: &[f64]) -> Vec<usize> {
        phases.iter().map(|&p| self.nearest_index(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ris(elements: usize, rows: usize, cols: usize) -> RisConfig {
        RisConfig {
            elements,
            array_shape: (rows, cols),
            ..RisConfig::default()
        }
    }

    #[test]
    fn test_codebook_two_bits() {
        let cb = Codebook::new(2).unwrap();
        let expected = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0];
        assert_eq!(cb.len(), 4);
        for (got, want) in cb.phases().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_codebook_rejects_bits() {
        assert!(matches!(Codebook::new(0), Err(ConfigError::InvalidPhaseBits(0))));
        assert!(Codebook::new(17).is_err());
    }

    #[test]
    fn test_codebook_nearest_wraps() {
        let cb = Codebook::new(2).unwrap();
        assert_eq!(cb.nearest_index(0.1), 0);
        assert_eq!(cb.nearest_index(2.0 * PI - 0.1), 0);
        assert_eq!(cb.nearest_index(PI + 0.2), 2);
        assert_eq!(cb.nearest_index(-PI / 2.0), 3);
        assert_eq!(cb.quantize(1.4), PI / 2.0);
        assert!(cb.contains(cb.quantize(5.0)));
    }

    #[test]
    fn test_array_symmetry_and_spacing() {
        let lam = wavelength(28e9);
        let center = Point2::new(1.0, 0.0);
        let array = ArrayGeometry::new(&ris(64, 8, 8), lam, center).unwrap();
        assert_eq!(array.len(), 64);

        let spacing = 0.5 * (SPEED_OF_LIGHT / 28e9);
        assert!((array.spacing_m() - spacing).abs() < 1e-15);

        let p = array.positions();
        // neighbours along a row and along a column
        assert!((p[1].x - p[0].x - spacing).abs() < 1e-12);
        assert!((p[1].y - p[0].y).abs() < 1e-12);
        assert!((p[8].y - p[0].y - spacing).abs() < 1e-12);

        // point reflection through the center maps element k onto M-1-k
        for k in 0..64 {
            let a = p[k];
            let b = p[63 - k];
            assert!((a.x + b.x - 2.0 * center.x).abs() < 1e-12);
            assert!((a.y + b.y - 2.0 * center.y).abs() < 1e-12);
        }

        let mean_x: f64 = p.iter().map(|q| q.x).sum::<f64>() / 64.0;
        let mean_y: f64 = p.iter().map(|q| q.y).sum::<f64>() / 64.0;
        assert!((mean_x - 1.0).abs() < 1e-12);
        assert!(mean_y.abs() < 1e-12);
    }

    #[test]
    fn test_array_shape_mismatch() {
        let err = ArrayGeometry::new(&ris(60, 8, 8), 0.01, Point2::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ElementCountMismatch { elements: 60, rows: 8, cols: 8 }
        ));
    }

    #[test]
    fn test_array_shape_overflow_rejected() {
        // (MAX/4 + 17) * 4 wraps to exactly 64
        let err = ArrayGeometry::new(&ris(64, usize::MAX / 4 + 17, 4), 0.01, Point2::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ElementCountMismatch { elements: 64, cols: 4, .. }));
    }

    #[test]
    fn test_box_projection() {
        let region = BoxRegion::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(region.project(Point2::new(3.0, -0.5)), Point2::new(1.0, -0.5));
        assert_eq!(region.project(Point2::new(-2.0, -7.0)), Point2::new(-1.0, -1.0));
        assert!(region.contains(region.project(Point2::new(0.3, 9.0))));
        assert_eq!(region.center(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_invalid_box() {
        let err = BoxRegion::new(Point2::new(1.0, 0.0), Point2::new(-1.0, 1.0));
        assert!(matches!(err, Err(ConfigError::InvalidBox { .. })));
    }

    #[test]
    fn test_non_finite_box_rejected() {
        let corners = [
            (Point2::new(f64::NEG_INFINITY, -1.0), Point2::new(f64::INFINITY, 1.0)),
            (Point2::new(-1.0, -1.0), Point2::new(1.0, f64::INFINITY)),
            (Point2::new(f64::NAN, -1.0), Point2::new(1.0, 1.0)),
        ];
        for (lo, hi) in corners {
            assert!(matches!(BoxRegion::new(lo, hi), Err(ConfigError::InvalidBox { .. })));
        }
    }

    #[test]
    fn test_safe_distance_floor() {
        let p = Point2::new(2.0, 3.0);
        assert_eq!(p.safe_distance(p), MIN_DISTANCE);
        assert!((Point2::new(0.0, 0.0).distance(Point2::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
