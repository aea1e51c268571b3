//! Endpoint-to-center conversion and sampling of elliptical arcs.
//!
//! Follows the standard construction: the chord is rotated into the ellipse
//! frame, undersized radii are scaled up uniformly, and the centre is solved
//! with the root sign picked by the two flags.

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};

use crate::defaults::{ARC_SEGMENTS_PER_RADIAN, MAX_CURVE_SEGMENTS};
use crate::log::debug;
use crate::options::Sampling;
use crate::types::Point;

/// Center parameterization of an elliptical arc. Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x axis.
    pub rotation: f64,
    pub start_angle: f64,
    /// Signed: positive sweeps towards increasing angles.
    pub sweep_angle: f64,
}

impl ArcSpec {
    /// Point at parametric angle `theta`, through its polar form so the
    /// distance from the centre is recomputed for every sample.
    pub fn point_at(&self, theta: f64) -> Point {
        let local = dvec2(self.radius_x * theta.cos(), self.radius_y * theta.sin());
        let distance = local.length();
        let angle = local.y.atan2(local.x) + self.rotation;
        (self.center.vec() + DVec2::from_angle(angle) * distance).into()
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Approximate length in source units (exact for circles).
    pub fn length(&self) -> f64 {
        self.sweep_angle.abs() * (self.radius_x + self.radius_y) / 2.0
    }

    pub fn is_circular(&self) -> bool {
        (self.radius_x - self.radius_y).abs() <= 1e-12 * self.radius_x.max(1.0)
    }

    /// Number of segments used when sampling.
    pub fn segment_count(&self, sampling: &Sampling) -> usize {
        let by_angle = ARC_SEGMENTS_PER_RADIAN * self.sweep_angle.abs();
        let by_length = sampling.resolution.to_mm(self.length()) / sampling.curve_section;
        let count = by_angle.max(by_length).ceil();
        if !count.is_finite() {
            return 1;
        }
        (count as usize).clamp(1, MAX_CURVE_SEGMENTS)
    }
}

/// What an endpoint-parameterized arc turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcResolution {
    Arc(ArcSpec),
    /// A radius is zero: draw a straight line to the endpoint.
    Line,
    /// The endpoints coincide: the arc contributes nothing.
    Omit,
}

/// Signed angle from `u` to `v`.
fn angle_between(u: DVec2, v: DVec2) -> f64 {
    u.perp_dot(v).atan2(u.dot(v))
}

/// Convert an endpoint-parameterized arc to its center parameterization.
///
/// `rotation_deg` is the ellipse's x-axis rotation in degrees. Radii too small
/// to span the chord are scaled up, never rejected.
pub fn resolve_arc(
    p1: Point,
    p2: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcResolution {
    if p1 == p2 {
        debug!(%p1, "arc endpoints coincide, omitting");
        return ArcResolution::Omit;
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
        debug!(rx, ry, "zero arc radius, drawing a line");
        return ArcResolution::Line;
    }

    let rotation = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = rotation.sin_cos();

    // Half chord in the ellipse frame
    let half = (p1.vec() - p2.vec()) / 2.0;
    let x1 = cos_phi * half.x + sin_phi * half.y;
    let y1 = -sin_phi * half.x + cos_phi * half.y;

    let lambda = (x1 / rx).powi(2) + (y1 / ry).powi(2);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let denom = (rx * y1).powi(2) + (ry * x1).powi(2);
    if denom == 0.0 {
        return ArcResolution::Omit;
    }
    let numer = (rx * ry).powi(2);
    if !numer.is_finite() || !denom.is_finite() {
        debug!(rx, ry, "arc radius overflows, drawing a line");
        return ArcResolution::Line;
    }
    let mut k = (numer / denom - 1.0).max(0.0).sqrt();
    if large_arc == sweep {
        k = -k;
    }
    let cx1 = k * rx * y1 / ry;
    let cy1 = -k * ry * x1 / rx;

    let mid = (p1.vec() + p2.vec()) / 2.0;
    let center = dvec2(
        cos_phi * cx1 - sin_phi * cy1 + mid.x,
        sin_phi * cx1 + cos_phi * cy1 + mid.y,
    );

    let u = dvec2((x1 - cx1) / rx, (y1 - cy1) / ry);
    let v = dvec2((-x1 - cx1) / rx, (-y1 - cy1) / ry);
    let start_angle = u.y.atan2(u.x);
    let mut sweep_angle = angle_between(u, v);
    if sweep && sweep_angle <= 0.0 {
        sweep_angle += TAU;
    } else if !sweep && sweep_angle >= 0.0 {
        sweep_angle -= TAU;
    }

    ArcResolution::Arc(ArcSpec {
        center: center.into(),
        radius_x: rx,
        radius_y: ry,
        rotation,
        start_angle,
        sweep_angle,
    })
}

/// Sample an arc into points, excluding its start and ending exactly on `end`.
pub fn sample_arc(arc: &ArcSpec, end: Point, sampling: &Sampling) -> Vec<Point> {
    if !arc.length().is_finite() {
        return vec![end];
    }
    let n = arc.segment_count(sampling);
    let mut points: Vec<Point> = (1..n)
        .map(|i| arc.point_at(arc.start_angle + arc.sweep_angle * i as f64 / n as f64))
        .collect();
    points.push(end);
    points
}
