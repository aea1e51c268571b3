//! Turn source elements into canonical primitives.
//!
//! Each element arrives in its own coordinates together with the full matrix
//! to canonical units. Geometry is copied through that matrix; the element is
//! never modified.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::geometry::arc::{ArcSpec, sample_arc};
use crate::geometry::circle_fit::{Classification, classify};
use crate::geometry::transform::Matrix2D;
use crate::log::{debug, trace};
use crate::options::{CircleFitTolerance, ImportOptions, Sampling};
use crate::path::Contour;
use crate::types::Point;

use super::document::DrawingDocument;
use super::shapes::{CircleShape, LineShape, PolylineShape, Shape, ShapeMeta, Style};

/// Geometry of one source element, in its local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceGeometry {
    Line {
        start: Point,
        end: Point,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
    },
    /// Corner radii are already clamped to half the side lengths.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
    },
    /// Contours produced by the path interpreter.
    Path {
        contours: Vec<Contour>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceElement {
    pub geometry: SourceGeometry,
    pub tag: String,
    pub style: Style,
    /// Local coordinates to canonical millimetres.
    pub transform: Matrix2D,
}

/// Collects primitives for one document.
#[derive(Debug)]
pub struct Assembler {
    sampling: Sampling,
    detect_circles: bool,
    circle_fit: CircleFitTolerance,
    shapes: Vec<Shape>,
}

impl Assembler {
    pub fn new(options: &ImportOptions, sampling: Sampling) -> Self {
        Self {
            sampling,
            detect_circles: options.detect_circles,
            circle_fit: options.circle_fit,
            shapes: Vec::new(),
        }
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn add(&mut self, element: SourceElement) {
        let SourceElement {
            geometry,
            tag,
            style,
            transform,
        } = element;
        let meta = ShapeMeta::new(tag, style);
        trace!(tag = %meta.tag, "assembling element");

        match geometry {
            SourceGeometry::Line { start, end } => self.shapes.push(Shape::Line(LineShape {
                start: transform.apply_point(start),
                end: transform.apply_point(end),
                meta,
            })),
            SourceGeometry::Circle { center, radius } => {
                self.add_ellipse(center, radius, radius, &transform, meta)
            }
            SourceGeometry::Ellipse { center, rx, ry } => {
                self.add_ellipse(center, rx, ry, &transform, meta)
            }
            SourceGeometry::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                let sampling = self.sampling.through(&transform);
                let outline = rect_outline(x, y, width, height, rx, ry, &sampling);
                self.add_contour(Contour::from_points(transform.apply(&outline), true), meta, false);
            }
            SourceGeometry::Polyline { mut points, closed } => {
                if closed && points.len() > 1 && points.first() != points.last() {
                    points.push(points[0]);
                }
                let contour = Contour::from_points(transform.apply(&points), closed);
                self.add_contour(contour, meta, closed && self.detect_circles);
            }
            SourceGeometry::Path { contours } => {
                for contour in contours {
                    let contour = Contour::from_points(transform.apply(&contour.points), contour.closed);
                    self.add_contour(contour, meta.clone(), self.detect_circles);
                }
            }
        }
    }

    fn add_ellipse(&mut self, center: Point, rx: f64, ry: f64, transform: &Matrix2D, meta: ShapeMeta) {
        if rx <= 0.0 || ry <= 0.0 {
            debug!(tag = %meta.tag, rx, ry, "skipping zero-size ellipse");
            return;
        }
        if rx == ry && transform.is_similarity() {
            self.shapes.push(Shape::Circle(CircleShape {
                center: transform.apply_point(center),
                radius: rx * transform.uniform_scale(),
                meta,
            }));
            return;
        }
        // no circle survives this transform: keep it as a closed outline
        let spec = ArcSpec {
            center,
            radius_x: rx,
            radius_y: ry,
            rotation: 0.0,
            start_angle: 0.0,
            sweep_angle: TAU,
        };
        let start = spec.point_at(0.0);
        let mut outline = vec![start];
        outline.extend(sample_arc(&spec, start, &self.sampling.through(transform)));
        self.add_contour(Contour::from_points(transform.apply(&outline), true), meta, false);
    }

    /// Emit a contour as a line, circle or polyline.
    fn add_contour(&mut self, contour: Contour, meta: ShapeMeta, try_circle: bool) {
        let Contour { points, closed } = contour;
        match points.as_slice() {
            [] | [_] => {
                debug!(tag = %meta.tag, "skipping contour without extent");
            }
            [start, end] => self.shapes.push(Shape::Line(LineShape {
                start: *start,
                end: *end,
                meta,
            })),
            _ => {
                if try_circle && closed {
                    if let Classification::Circle { center, radius } = classify(&points, &self.circle_fit) {
                        trace!(tag = %meta.tag, %center, radius, "contour is a circle");
                        self.shapes.push(Shape::Circle(CircleShape { center, radius, meta }));
                        return;
                    }
                }
                self.shapes.push(Shape::Polyline(PolylineShape {
                    vertices: points,
                    closed,
                    meta,
                }));
            }
        }
    }

    pub fn finish(self, file_name: impl Into<String>) -> DrawingDocument {
        DrawingDocument::from_shapes(file_name, self.shapes)
    }
}

/// Outline of a rectangle, rounded when both corner radii are positive.
fn rect_outline(x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64, sampling: &Sampling) -> Vec<Point> {
    if rx <= 0.0 || ry <= 0.0 {
        return vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
            Point::new(x, y),
        ];
    }
    let corners = [
        (Point::new(x + w - rx, y + ry), -FRAC_PI_2),
        (Point::new(x + w - rx, y + h - ry), 0.0),
        (Point::new(x + rx, y + h - ry), FRAC_PI_2),
        (Point::new(x + rx, y + ry), PI),
    ];
    let start = Point::new(x + rx, y);
    let mut outline = vec![start];
    for (center, start_angle) in corners {
        let spec = ArcSpec {
            center,
            radius_x: rx,
            radius_y: ry,
            rotation: 0.0,
            start_angle,
            sweep_angle: FRAC_PI_2,
        };
        outline.push(spec.point_at(start_angle));
        outline.extend(sample_arc(&spec, spec.point_at(start_angle + FRAC_PI_2), sampling));
    }
    outline.push(start);
    outline
}
