//! User transforms on a finished document.
//!
//! Both operations build a new document; the input is left as it was.

use crate::geometry::circle_fit::{Classification, classify};
use crate::log::debug;
use crate::options::CircleFitTolerance;

use super::document::DrawingDocument;
use super::shapes::{CircleShape, Primitive, Shape};

/// Replace closed polylines that classify as circles with circles.
pub fn detect_circles(doc: &DrawingDocument, tolerance: &CircleFitTolerance) -> DrawingDocument {
    let shapes: Vec<Shape> = doc
        .shapes()
        .into_iter()
        .map(|shape| match shape {
            Shape::Polyline(poly) if poly.closed => match classify(&poly.vertices, tolerance) {
                Classification::Circle { center, radius } => Shape::Circle(CircleShape {
                    center,
                    radius,
                    meta: poly.meta,
                }),
                Classification::NotCircle(_) => Shape::Polyline(poly),
            },
            other => other,
        })
        .collect();
    let result = DrawingDocument::from_shapes(doc.file_name.clone(), shapes);
    debug!(
        found = result.circles.len() - doc.circles.len(),
        "circle detection"
    );
    result
}

/// Layer name for a radius: `R<=t` for the smallest threshold `t` at or
/// above it, `R>t` past the largest.
fn bucket_name(radius: f64, thresholds: &[f64]) -> Option<String> {
    let last = thresholds.last()?;
    Some(match thresholds.iter().find(|t| radius <= **t) {
        Some(t) => format!("R<={t}"),
        None => format!("R>{last}"),
    })
}

/// Move circles and arcs onto layers named after their radius bucket.
///
/// Thresholds may be given in any order. With no thresholds the document
/// is copied unchanged.
pub fn bucket_by_radius(doc: &DrawingDocument, thresholds: &[f64]) -> DrawingDocument {
    let mut sorted: Vec<f64> = thresholds.iter().copied().filter(|t| t.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let shapes: Vec<Shape> = doc
        .shapes()
        .into_iter()
        .map(|mut shape| {
            let radius = match &shape {
                Shape::Circle(c) => Some(c.radius),
                Shape::Arc(a) => Some(a.radius),
                _ => None,
            };
            if let Some(layer) = radius.and_then(|r| bucket_name(r, &sorted)) {
                shape.meta_mut().style.layer = layer;
            }
            shape
        })
        .collect();
    DrawingDocument::from_shapes(doc.file_name.clone(), shapes)
}
