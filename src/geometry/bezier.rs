//! Bezier curve flattening by direct polynomial evaluation.

use crate::defaults::{BEZIER_CHORD_PER_STEP, BEZIER_MAX_STEP, MAX_CURVE_SEGMENTS};
use crate::log::debug;
use crate::options::Sampling;
use crate::types::Point;

/// Parameter step for a curve whose chord is `p0 → pn`.
///
/// Never coarser than [`BEZIER_MAX_STEP`] (100 segments), finer once the
/// chord is longer than `BEZIER_CHORD_PER_STEP / BEZIER_MAX_STEP` millimetres.
fn step_for(p0: Point, pn: Point, sampling: &Sampling) -> f64 {
    let chord_mm = sampling.resolution.to_mm(p0.distance(pn));
    if chord_mm <= 0.0 {
        return BEZIER_MAX_STEP;
    }
    BEZIER_MAX_STEP.min(BEZIER_CHORD_PER_STEP / chord_mm)
}

/// Interior parameter values for the curve with control polygon `hull`,
/// strictly inside `(0, 1)` and at most [`MAX_CURVE_SEGMENTS`] segments.
///
/// A hull whose extent overflows gets no interior samples: the caller's
/// endpoint then makes the curve a straight line.
fn interior_steps(hull: &[Point], sampling: &Sampling) -> impl Iterator<Item = f64> {
    let (first, last) = (hull[0], hull[hull.len() - 1]);
    let finite = first.distance(last).is_finite()
        && hull.windows(2).all(|w| w[0].distance(w[1]).is_finite());
    let count = if finite {
        let step = step_for(first, last, sampling);
        (((1.0 / step) - 1e-9).ceil().max(1.0) as usize).min(MAX_CURVE_SEGMENTS)
    } else {
        debug!(%first, %last, "curve extent overflows, drawing a line");
        1
    };
    (1..count).map(move |i| i as f64 / count as f64)
}

/// Sample a cubic curve. Endpoints are not included.
pub fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, sampling: &Sampling) -> Vec<Point> {
    let (a, b, c, d) = (p0.vec(), p1.vec(), p2.vec(), p3.vec());
    interior_steps(&[p0, p1, p2, p3], sampling)
        .map(|t| {
            let mt = 1.0 - t;
            (a * (mt * mt * mt) + b * (3.0 * mt * mt * t) + c * (3.0 * mt * t * t) + d * (t * t * t))
                .into()
        })
        .collect()
}

/// Sample a quadratic curve. Endpoints are not included.
pub fn flatten_quadratic(p0: Point, p1: Point, p2: Point, sampling: &Sampling) -> Vec<Point> {
    let (a, b, c) = (p0.vec(), p1.vec(), p2.vec());
    interior_steps(&[p0, p1, p2], sampling)
        .map(|t| {
            let mt = 1.0 - t;
            (a * (mt * mt) + b * (2.0 * mt * t) + c * (t * t)).into()
        })
        .collect()
}

/// Mirror `control` through `through`.
pub fn reflect(control: Point, through: Point) -> Point {
    (through.vec() * 2.0 - control.vec()).into()
}
