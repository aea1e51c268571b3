//! Default tolerances and sampling settings

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;
/// CSS reference resolution for unitless lengths.
pub const CSS_DPI: f64 = 96.0;

/// Arc chord length in millimetres used to size arc sampling.
pub const CURVE_SECTION: f64 = 0.5;
/// Sample count floor per radian of sweep for arcs.
pub const ARC_SEGMENTS_PER_RADIAN: f64 = 2.4;
/// Largest Bezier parameter step (at least 100 segments per curve).
pub const BEZIER_MAX_STEP: f64 = 0.01;
/// Chord length in millimetres per Bezier step before the step tightens.
pub const BEZIER_CHORD_PER_STEP: f64 = 4.0;
/// Upper bound on the segments any single curve or arc is sampled into.
pub const MAX_CURVE_SEGMENTS: usize = 10_000;

/// Contours with this many points or fewer are discarded.
pub const DEGENERATE_CONTOUR_POINTS: usize = 2;

/// Minimum vertex count for a polygon to be considered a circle.
pub const CIRCLE_MIN_VERTICES: usize = 10;
/// Relative tolerance for the aspect and area checks.
pub const CIRCLE_SHAPE_TOLERANCE: f64 = 0.2;
/// Absolute tolerance for per-vertex radius deviation.
pub const CIRCLE_RADIUS_TOLERANCE: f64 = 0.05;

/// Layer assigned to shapes outside any named layer.
pub const LAYER: &str = "0";
