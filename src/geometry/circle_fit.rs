//! Decide whether a closed polygon is really a sampled circle.
//!
//! Two stages: a cheap bounding-box aspect and area check, then a strict
//! per-vertex distance check against the shoelace centroid.

use std::f64::consts::PI;

use crate::options::CircleFitTolerance;
use crate::types::{BBox, Point};

/// Why a polygon was not taken for a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    TooFewVertices(usize),
    /// Bounding box aspect `|1 - w/h|` out of tolerance.
    Aspect(f64),
    /// Area ratio `|1 - A/(π r²)|` out of tolerance.
    Area(f64),
    /// Largest vertex distance from the expected radius.
    RadiusDeviation(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Circle { center: Point, radius: f64 },
    NotCircle(Rejection),
}

impl Classification {
    pub fn is_circle(&self) -> bool {
        matches!(self, Classification::Circle { .. })
    }
}

/// Vertices without a repeated closing point.
fn distinct_vertices(points: &[Point]) -> &[Point] {
    match points {
        [first, .., last] if first == last => &points[..points.len() - 1],
        _ => points,
    }
}

/// Signed shoelace area and area-weighted centroid.
fn area_and_centroid(vertices: &[Point]) -> (f64, Option<Point>) {
    let n = vertices.len();
    let (mut twice_area, mut cx, mut cy) = (0.0, 0.0, 0.0);
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        twice_area += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let area = twice_area / 2.0;
    if area == 0.0 {
        return (0.0, None);
    }
    (area, Some(Point::new(cx / (6.0 * area), cy / (6.0 * area))))
}

/// Classify a closed contour.
pub fn classify(points: &[Point], tolerance: &CircleFitTolerance) -> Classification {
    let vertices = distinct_vertices(points);
    if vertices.len() < tolerance.min_vertices {
        return Classification::NotCircle(Rejection::TooFewVertices(vertices.len()));
    }

    let bounds = BBox::from_points(vertices);
    let (w, h) = (bounds.width(), bounds.height());
    let aspect = if h > 0.0 { (1.0 - w / h).abs() } else { f64::INFINITY };
    if aspect > tolerance.shape {
        return Classification::NotCircle(Rejection::Aspect(aspect));
    }

    let box_radius = w.max(h) / 2.0;
    let (area, centroid) = area_and_centroid(vertices);
    let area_ratio = (1.0 - area.abs() / (PI * box_radius * box_radius)).abs();
    if area_ratio > tolerance.shape {
        return Classification::NotCircle(Rejection::Area(area_ratio));
    }
    let Some(center) = centroid else {
        return Classification::NotCircle(Rejection::Area(area_ratio));
    };

    let distances: Vec<f64> = vertices.iter().map(|p| p.distance(center)).collect();
    let worst = distances
        .iter()
        .map(|d| (d - box_radius).abs())
        .fold(0.0, f64::max);
    if worst > tolerance.radius {
        return Classification::NotCircle(Rejection::RadiusDeviation(worst));
    }

    let radius = distances.iter().sum::<f64>() / distances.len() as f64;
    Classification::Circle { center, radius }
}
