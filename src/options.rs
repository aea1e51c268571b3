//! Import configuration.

use crate::defaults;
use crate::geometry::transform::Matrix2D;
use crate::types::{NumericError, Resolution, check_positive};

/// How cubic curves become points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveFitting {
    /// Evaluate the polynomial at a fixed step.
    #[default]
    Flatten,
    /// Approximate each cubic by two tangent-continuous circular arcs,
    /// falling back to flattening where no biarc exists.
    Biarc,
}

/// Thresholds for [`crate::geometry::circle_fit::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFitTolerance {
    pub min_vertices: usize,
    /// Relative tolerance for both the aspect ratio and the area ratio.
    pub shape: f64,
    /// Absolute tolerance for each vertex's distance to the centroid.
    pub radius: f64,
}

impl Default for CircleFitTolerance {
    fn default() -> Self {
        Self {
            min_vertices: defaults::CIRCLE_MIN_VERTICES,
            shape: defaults::CIRCLE_SHAPE_TOLERANCE,
            radius: defaults::CIRCLE_RADIUS_TOLERANCE,
        }
    }
}

/// Point density settings shared by the curve samplers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub resolution: Resolution,
    /// Target arc chord length in millimetres.
    pub curve_section: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            curve_section: defaults::CURVE_SECTION,
        }
    }
}

impl Sampling {
    pub fn new(resolution: Resolution, curve_section: f64) -> Self {
        Self {
            resolution,
            curve_section,
        }
    }

    /// Sampling for local geometry that `transform` carries into millimetres.
    ///
    /// The resolution becomes local units per millimetre so that sample
    /// density follows the size the geometry ends up at. Matrices without a
    /// usable scale keep the current resolution.
    pub fn through(&self, transform: &Matrix2D) -> Sampling {
        match Resolution::try_new(1.0 / transform.uniform_scale()) {
            Ok(resolution) => Sampling { resolution, ..*self },
            Err(_) => *self,
        }
    }
}

/// Options for one import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Pin the source resolution instead of deriving it from the document.
    pub resolution: Option<Resolution>,
    /// Target arc chord length in millimetres.
    pub curve_section: Option<f64>,
    pub curve_fitting: CurveFitting,
    /// Rewrite closed near-circular path contours into circles.
    pub detect_circles: bool,
    pub circle_fit: CircleFitTolerance,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            resolution: None,
            curve_section: None,
            curve_fitting: CurveFitting::default(),
            detect_circles: true,
            circle_fit: CircleFitTolerance::default(),
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Set the arc chord length (rejects NaN, infinite, zero, negative).
    pub fn with_curve_section(mut self, mm: f64) -> Result<Self, NumericError> {
        self.curve_section = Some(check_positive(mm)?);
        Ok(self)
    }

    pub fn with_curve_fitting(mut self, fitting: CurveFitting) -> Self {
        self.curve_fitting = fitting;
        self
    }

    pub fn with_detect_circles(mut self, detect: bool) -> Self {
        self.detect_circles = detect;
        self
    }

    pub fn with_circle_fit(mut self, tolerance: CircleFitTolerance) -> Self {
        self.circle_fit = tolerance;
        self
    }

    /// Check settings that may have been assigned directly.
    pub fn validate(&self) -> Result<(), NumericError> {
        if let Some(mm) = self.curve_section {
            check_positive(mm)?;
        }
        Ok(())
    }

    /// Sampling for a document whose own resolution is `derived`.
    pub fn sampling(&self, derived: Resolution) -> Sampling {
        Sampling {
            resolution: self.resolution.unwrap_or(derived),
            curve_section: self.curve_section.unwrap_or(defaults::CURVE_SECTION),
        }
    }
}
