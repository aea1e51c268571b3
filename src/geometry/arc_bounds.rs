//! Closed-form bounding box of a circular arc.
//!
//! Each bound is either the raw endpoint value or the circle's extreme on that
//! side, picked from a fixed table indexed by `[end quadrant][start quadrant]`.
//! A `true` entry means the counter-clockwise sweep crosses that extreme.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::types::{BBox, Point};

const T: bool = true;
const F: bool = false;

/// Crossing of π/2.
const MAX_Y: [[bool; 4]; 4] = [
    [F, F, F, F],
    [T, F, T, T],
    [T, F, F, T],
    [T, F, F, F],
];

/// Crossing of π.
const MIN_X: [[bool; 4]; 4] = [
    [F, T, F, F],
    [F, F, F, F],
    [T, T, F, T],
    [T, T, F, F],
];

/// Crossing of 3π/2.
const MIN_Y: [[bool; 4]; 4] = [
    [F, T, T, F],
    [F, F, T, F],
    [F, F, F, F],
    [T, T, T, F],
];

/// Crossing of 0.
const MAX_X: [[bool; 4]; 4] = [
    [F, T, T, T],
    [F, F, T, T],
    [F, F, F, T],
    [F, F, F, F],
];

fn normalize(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Quadrant of a normalized angle: `[0, π/2)` is 0 through `[3π/2, 2π)` is 3.
fn quadrant(normalized: f64) -> usize {
    ((normalized / FRAC_PI_2) as usize).min(3)
}

/// Bounding box of the arc centred at the origin, running counter-clockwise
/// from `start` to `end` (radians), grown by `margin` on every side.
pub fn arc_bounds(start: f64, end: f64, radius: f64, margin: f64) -> BBox {
    let (start, end) = (normalize(start), normalize(end));
    let (qs, qe) = (quadrant(start), quadrant(end));

    let (sx, sy) = (radius * start.cos(), radius * start.sin());
    let (ex, ey) = (radius * end.cos(), radius * end.sin());

    // same quadrant, but the sweep goes all the way round
    let wraps = qs == qe && end < start;
    let pick = |table: &[[bool; 4]; 4], extreme: f64, raw: f64| {
        if wraps || table[qe][qs] { extreme } else { raw }
    };

    let min = Point::new(
        pick(&MIN_X, -radius, sx.min(ex)),
        pick(&MIN_Y, -radius, sy.min(ey)),
    );
    let max = Point::new(
        pick(&MAX_X, radius, sx.max(ex)),
        pick(&MAX_Y, radius, sy.max(ey)),
    );
    BBox { min, max }.inflate(margin)
}

/// [`arc_bounds`] for an arc centred at `center`.
pub fn arc_bounds_at(center: Point, start: f64, end: f64, radius: f64, margin: f64) -> BBox {
    arc_bounds(start, end, radius, margin).translate(center.vec())
}
