//! Biarc approximation of a curve between two points with known tangents.
//!
//! The junction is the incenter of the triangle formed by the two endpoints
//! and the intersection of their tangent lines. At that point both arcs run
//! parallel to the chord, which makes the pair tangent-continuous.

use glam::DVec2;

use crate::log::debug;
use crate::options::Sampling;
use crate::types::Point;

use super::arc::{ArcSpec, sample_arc};

/// Relative threshold under which a cross product counts as zero.
const PARALLEL_EPSILON: f64 = 1e-12;

/// One half of a biarc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BiarcSpan {
    /// Circular arc (`radius_x == radius_y`, no rotation).
    Arc(ArcSpec),
    /// The junction lies on the tangent line: the span is straight.
    Line { from: Point, to: Point },
}

impl BiarcSpan {
    /// Circular arc leaving `start` along `tangent` and passing through `end`.
    fn through(start: Point, tangent: DVec2, end: Point) -> BiarcSpan {
        let chord = end - start;
        let normal = tangent.perp();
        let offset = normal.dot(chord);
        if offset.abs() <= PARALLEL_EPSILON * chord.length_squared().max(1.0) {
            return BiarcSpan::Line { from: start, to: end };
        }
        // signed: positive puts the centre on the left, a counter-clockwise turn
        let signed_radius = chord.length_squared() / (2.0 * offset);
        let center = start.vec() + normal * signed_radius;
        let from = start.vec() - center;
        let to = end.vec() - center;
        let mut sweep = from.perp_dot(to).atan2(from.dot(to));
        if signed_radius > 0.0 && sweep < 0.0 {
            sweep += std::f64::consts::TAU;
        } else if signed_radius < 0.0 && sweep > 0.0 {
            sweep -= std::f64::consts::TAU;
        }
        BiarcSpan::Arc(ArcSpec {
            center: center.into(),
            radius_x: signed_radius.abs(),
            radius_y: signed_radius.abs(),
            rotation: 0.0,
            start_angle: from.y.atan2(from.x),
            sweep_angle: sweep,
        })
    }

    /// Unit direction of travel at the start.
    pub fn start_tangent(&self) -> DVec2 {
        match self {
            BiarcSpan::Arc(arc) => arc_tangent(arc, arc.start_angle),
            BiarcSpan::Line { from, to } => (*to - *from).normalize_or_zero(),
        }
    }

    /// Unit direction of travel at the end.
    pub fn end_tangent(&self) -> DVec2 {
        match self {
            BiarcSpan::Arc(arc) => arc_tangent(arc, arc.end_angle()),
            BiarcSpan::Line { from, to } => (*to - *from).normalize_or_zero(),
        }
    }

    fn sample_into(&self, end: Point, sampling: &Sampling, out: &mut Vec<Point>) {
        match self {
            BiarcSpan::Arc(arc) => out.extend(sample_arc(arc, end, sampling)),
            BiarcSpan::Line { .. } => out.push(end),
        }
    }
}

fn arc_tangent(arc: &ArcSpec, theta: f64) -> DVec2 {
    DVec2::from_angle(theta).perp() * arc.sweep_angle.signum()
}

/// Two tangent-continuous spans from `start` through `junction` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biarc {
    pub start: Point,
    pub junction: Point,
    pub end: Point,
    pub first: BiarcSpan,
    pub second: BiarcSpan,
}

impl Biarc {
    /// Sample both spans. Excludes `start`; the junction and `end` are exact.
    pub fn sample(&self, sampling: &Sampling) -> Vec<Point> {
        let mut points = Vec::new();
        self.first.sample_into(self.junction, sampling, &mut points);
        self.second.sample_into(self.end, sampling, &mut points);
        points
    }
}

/// Fit a biarc from `p1` to `p2`, with `c1` and `c2` giving the tangent
/// directions at each end (as the control points of a cubic would).
///
/// Returns `None` when the tangents are parallel, meet behind the chord, or
/// the chord has zero length; callers fall back to flattening.
pub fn fit_biarc(p1: Point, c1: Point, p2: Point, c2: Point) -> Option<Biarc> {
    // a turn point sitting on its own endpoint borrows the other one
    let c1 = if c1 == p1 { c2 } else { c1 };
    let c2 = if c2 == p2 { c1 } else { c2 };

    let chord = p2 - p1;
    let t1 = (c1 - p1).normalize_or_zero();
    let t2 = (p2 - c2).normalize_or_zero();
    if chord.length_squared() == 0.0 || t1 == DVec2::ZERO || t2 == DVec2::ZERO {
        debug!(%p1, %p2, "degenerate biarc input");
        return None;
    }

    let cross = t1.perp_dot(t2);
    if cross.abs() <= PARALLEL_EPSILON {
        debug!(%p1, %p2, "biarc tangents are parallel");
        return None;
    }
    // p1 + s·t1 = p2 + u·t2
    let s = chord.perp_dot(t2) / cross;
    let u = chord.perp_dot(t1) / cross;
    if s <= 0.0 || u >= 0.0 {
        debug!(%p1, %p2, "biarc tangents meet behind the chord");
        return None;
    }
    let v = p1.vec() + t1 * s;

    // incenter, each vertex weighted by the length of the opposite side
    let a = v.distance(p2.vec());
    let b = chord.length();
    let c = p1.vec().distance(v);
    let junction: Point = ((p1.vec() * a + v * b + p2.vec() * c) / (a + b + c)).into();

    let first = BiarcSpan::through(p1, t1, junction);
    let second = BiarcSpan::through(junction, first.end_tangent(), p2);

    Some(Biarc {
        start: p1,
        junction,
        end: p2,
        first,
        second,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resolution;

    fn mm() -> Sampling {
        Sampling::new(Resolution::UNIT, 0.5)
    }

    fn assert_parallel(a: DVec2, b: DVec2) {
        assert!(a.distance(b) < 1e-9, "tangents differ: {a} vs {b}");
    }

    #[test]
    fn junction_is_tangent_continuous() {
        let cases = [
            (Point::new(0.0, 0.0), Point::new(2.0, 4.0), Point::new(10.0, 0.0), Point::new(8.0, 4.0)),
            (Point::new(0.0, 0.0), Point::new(1.0, 3.0), Point::new(10.0, 2.0), Point::new(4.0, 6.0)),
            (Point::new(5.0, 5.0), Point::new(5.0, 9.0), Point::new(9.0, 9.0), Point::new(7.0, 9.0)),
        ];
        for (p1, c1, p2, c2) in cases {
            let biarc = fit_biarc(p1, c1, p2, c2).unwrap();
            assert_parallel(biarc.first.end_tangent(), biarc.second.start_tangent());
            assert_parallel(biarc.first.start_tangent(), (c1 - p1).normalize());
            assert_parallel(biarc.second.end_tangent(), (p2 - c2).normalize());
        }
    }

    #[test]
    fn symmetric_corner_puts_junction_on_axis() {
        let biarc = fit_biarc(
            Point::new(0.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(10.0, 0.0),
            Point::new(8.0, 4.0),
        )
        .unwrap();
        assert!((biarc.junction.x - 5.0).abs() < 1e-9);
        // tangent at the junction runs along the chord
        assert_parallel(biarc.first.end_tangent(), DVec2::X);
    }

    #[test]
    fn samples_hit_junction_and_end() {
        let p2 = Point::new(10.0, 2.0);
        let biarc = fit_biarc(Point::new(0.0, 0.0), Point::new(1.0, 3.0), p2, Point::new(4.0, 6.0)).unwrap();
        let pts = biarc.sample(&mm());
        assert_eq!(*pts.last().unwrap(), p2);
        assert!(pts.contains(&biarc.junction));
    }

    #[test]
    fn degenerate_turn_point_borrows_the_other() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(10.0, 0.0);
        let biarc = fit_biarc(p1, p1, p2, Point::new(6.0, 6.0)).unwrap();
        assert_parallel(biarc.first.start_tangent(), (Point::new(6.0, 6.0) - p1).normalize());
    }

    #[test]
    fn parallel_tangents_have_no_biarc() {
        let fit = fit_biarc(
            Point::new(0.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
        );
        assert!(fit.is_none());
        let p = Point::new(1.0, 1.0);
        assert!(fit_biarc(p, Point::new(2.0, 2.0), p, Point::new(0.0, 2.0)).is_none());
    }
}
