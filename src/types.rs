//! Core value types: points, bounding boxes and validated scalars.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric configuration values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN, infinite, zero and negative values.
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Source units per millimetre.
///
/// Derived from a drawing's declared physical size and its viewport, or
/// pinned through [`crate::ImportOptions`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution(f64);

impl Resolution {
    /// CSS reference pixels per millimetre (96 dpi).
    pub const CSS_PX: Resolution = Resolution(crate::defaults::CSS_DPI / crate::defaults::MM_PER_INCH);
    /// One source unit per millimetre.
    pub const UNIT: Resolution = Resolution(1.0);

    /// Create a Resolution with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(units_per_mm: f64) -> Result<Self, NumericError> {
        check_positive(units_per_mm).map(Resolution)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Convert a source length to millimetres.
    #[inline]
    pub fn to_mm(self, source: f64) -> f64 {
        source / self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::CSS_PX
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units/mm", self.0)
    }
}

/// A 2D point.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// View as a glam vector for arithmetic.
    #[inline]
    pub fn vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.vec().distance(other.vec())
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Approximate equality with an absolute tolerance.
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.vec()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl Add<DVec2> for Point {
    type Output = Point;
    fn add(self, rhs: DVec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Subtract two points to get a displacement
impl Sub for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        dvec2(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// Bounding box spanning two corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let mut bb = BBox::new();
        bb.expand_point(a);
        bb.expand_point(b);
        bb
    }

    /// Bounding box of a point set; empty for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bb = BBox::new();
        for p in points {
            bb.expand_point(*p);
        }
        bb
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include another box
    pub fn union(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    /// Grow by `margin` on every side.
    pub fn inflate(self, margin: f64) -> BBox {
        BBox {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Shift by an offset.
    pub fn translate(self, offset: DVec2) -> BBox {
        BBox {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn contains(&self, p: Point, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    pub fn x(&self) -> f64 {
        self.min.x
    }

    pub fn y(&self) -> f64 {
        self.min.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Get the center point
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_try_new_valid() {
        assert!(Resolution::try_new(3.78).is_ok());
        assert!(Resolution::try_new(1.0).is_ok());
    }

    #[test]
    fn resolution_try_new_rejects_bad_values() {
        assert_eq!(Resolution::try_new(0.0), Err(NumericError::Zero));
        assert_eq!(Resolution::try_new(-1.0), Err(NumericError::Negative));
        assert_eq!(Resolution::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Resolution::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn css_resolution_maps_one_inch_to_25_4_mm() {
        let res = Resolution::CSS_PX;
        assert!((res.to_mm(96.0) - 25.4).abs() < 1e-9);
    }

    #[test]
    fn point_minus_point_gives_vector() {
        let d = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(d, dvec2(3.0, 4.0));
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::new().is_empty());
        assert!(BBox::from_points(&[]).is_empty());
    }

    #[test]
    fn bbox_expand_and_measure() {
        let bb = BBox::from_points(&[Point::new(1.0, 2.0), Point::new(5.0, 8.0)]);
        assert!(!bb.is_empty());
        assert_eq!(bb.width(), 4.0);
        assert_eq!(bb.height(), 6.0);
        assert_eq!(bb.center(), Point::new(3.0, 5.0));
    }

    #[test]
    fn bbox_union_ignores_empty() {
        let mut bb = BBox::from_corners(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        bb.union(&BBox::new());
        assert_eq!(bb, BBox::from_corners(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
        bb.union(&BBox::from_corners(Point::new(-1.0, 3.0), Point::new(0.5, 0.5)));
        assert_eq!(bb.min, Point::new(-1.0, 0.0));
        assert_eq!(bb.max, Point::new(1.0, 3.0));
    }

    #[test]
    fn bbox_inflate() {
        let bb = BBox::from_corners(Point::new(0.0, 0.0), Point::new(2.0, 2.0)).inflate(1.0);
        assert_eq!(bb.min, Point::new(-1.0, -1.0));
        assert_eq!(bb.max, Point::new(3.0, 3.0));
    }
}
