//! Canonical primitives.
//!
//! The set of primitive kinds is closed: [`Shape`] is matched exhaustively and
//! dispatches [`Primitive`] to its variants.

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::defaults;
use crate::geometry::arc_bounds::arc_bounds_at;
use crate::geometry::transform::Matrix2D;
use crate::types::{BBox, Point};

/// Simple color model; unparsed values are kept verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Raw(String),
}

impl Color {
    /// Parse a paint value. `none` and empty values mean no paint.
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            return None;
        }
        if let Some(hex) = value.strip_prefix('#') {
            return Some(parse_hex(hex).unwrap_or_else(|| Color::Raw(value.to_string())));
        }
        if let Some(args) = value
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Some(parse_rgb_args(args).unwrap_or_else(|| Color::Raw(value.to_string())));
        }
        if value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(Color::Named(value.to_ascii_lowercase()));
        }
        Some(Color::Raw(value.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::Rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Some(Color::Rgb(pair(0)?, pair(2)?, pair(4)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let mut channels = args.split(',').map(|c| {
        let c = c.trim();
        match c.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f64>().ok().map(|p| p * 255.0 / 100.0),
            None => c.parse::<f64>().ok(),
        }
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
    });
    let (r, g, b) = (channels.next()??, channels.next()??, channels.next()??);
    if channels.next().is_some() {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) | Color::Raw(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
        }
    }
}

/// Presentation carried by every shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub stroke: Option<Color>,
    /// Millimetres.
    pub stroke_width: Option<f64>,
    pub fill: Option<Color>,
    /// Invisible shapes stay in the document but not in its bounds.
    pub visible: bool,
    pub layer: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: None,
            fill: None,
            visible: true,
            layer: defaults::LAYER.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ShapeMeta {
    /// Identifies the source element.
    pub tag: String,
    pub style: Style,
}

impl ShapeMeta {
    pub fn new(tag: impl Into<String>, style: Style) -> Self {
        Self {
            tag: tag.into(),
            style,
        }
    }
}

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Primitive {
    fn meta(&self) -> &ShapeMeta;

    fn meta_mut(&mut self) -> &mut ShapeMeta;

    /// Axis-aligned bounds of the geometry (stroke width ignored).
    fn bounds(&self) -> BBox;

    fn tag(&self) -> &str {
        &self.meta().tag
    }

    fn style(&self) -> &Style {
        &self.meta().style
    }

    fn is_visible(&self) -> bool {
        self.meta().style.visible
    }

    fn layer(&self) -> &str {
        &self.meta().style.layer
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    pub meta: ShapeMeta,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f64,
    pub meta: ShapeMeta,
}

/// Circular arc. Angles are degrees, measured counter-clockwise from +x.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcShape {
    pub center: Point,
    pub radius: f64,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
    /// Runs from start to end clockwise instead of counter-clockwise.
    pub clockwise: bool,
    pub meta: ShapeMeta,
}

impl ArcShape {
    /// Start and end angles, in radians, of the same arc run counter-clockwise.
    pub fn ccw_angles(&self) -> (f64, f64) {
        let (s, e) = (self.start_angle_deg.to_radians(), self.end_angle_deg.to_radians());
        if self.clockwise { (e, s) } else { (s, e) }
    }

    pub fn point_at_deg(&self, deg: f64) -> Point {
        let a = deg.to_radians();
        Point::new(
            self.center.x + self.radius * a.cos(),
            self.center.y + self.radius * a.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at_deg(self.start_angle_deg)
    }

    pub fn end_point(&self) -> Point {
        self.point_at_deg(self.end_angle_deg)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolylineShape {
    /// A closed polyline repeats its first vertex at the end.
    pub vertices: Vec<Point>,
    pub closed: bool,
    pub meta: ShapeMeta,
}

impl Primitive for LineShape {
    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }

    fn bounds(&self) -> BBox {
        BBox::from_corners(self.start, self.end)
    }
}

impl Primitive for CircleShape {
    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }

    fn bounds(&self) -> BBox {
        BBox::from_corners(self.center, self.center).inflate(self.radius)
    }
}

impl Primitive for ArcShape {
    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }

    fn bounds(&self) -> BBox {
        let (start, end) = self.ccw_angles();
        arc_bounds_at(self.center, start, end, self.radius, 0.0)
    }
}

impl Primitive for PolylineShape {
    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }

    fn bounds(&self) -> BBox {
        BBox::from_points(&self.vertices)
    }
}

/// A canonical primitive.
#[enum_dispatch(Primitive)]
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Circle(CircleShape),
    Arc(ArcShape),
    Polyline(PolylineShape),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line(_) => "line",
            Shape::Circle(_) => "circle",
            Shape::Arc(_) => "arc",
            Shape::Polyline(_) => "polyline",
        }
    }

    /// Map the geometry through a similarity transform.
    ///
    /// Circles and arcs keep their kind, so the matrix must not shear or
    /// scale unevenly; returns `None` in that case.
    pub fn transformed(&self, m: &Matrix2D) -> Option<Shape> {
        let shape = match self {
            Shape::Line(l) => Shape::Line(LineShape {
                start: m.apply_point(l.start),
                end: m.apply_point(l.end),
                meta: l.meta.clone(),
            }),
            Shape::Polyline(p) => Shape::Polyline(PolylineShape {
                vertices: m.apply(&p.vertices),
                closed: p.closed,
                meta: p.meta.clone(),
            }),
            Shape::Circle(c) => {
                if !m.is_similarity() {
                    return None;
                }
                Shape::Circle(CircleShape {
                    center: m.apply_point(c.center),
                    radius: c.radius * m.uniform_scale(),
                    meta: c.meta.clone(),
                })
            }
            Shape::Arc(a) => {
                if !m.is_similarity() {
                    return None;
                }
                let turn = m.rotation().to_degrees();
                let mirror = m.is_mirroring();
                let (start, end) = if mirror {
                    (turn - a.start_angle_deg, turn - a.end_angle_deg)
                } else {
                    (a.start_angle_deg + turn, a.end_angle_deg + turn)
                };
                Shape::Arc(ArcShape {
                    center: m.apply_point(a.center),
                    radius: a.radius * m.uniform_scale(),
                    start_angle_deg: start,
                    end_angle_deg: end,
                    clockwise: a.clockwise != mirror,
                    meta: a.meta.clone(),
                })
            }
        };
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(start: f64, end: f64, clockwise: bool) -> ArcShape {
        ArcShape {
            center: Point::new(1.0, 1.0),
            radius: 2.0,
            start_angle_deg: start,
            end_angle_deg: end,
            clockwise,
            meta: ShapeMeta::default(),
        }
    }

    #[test]
    fn color_parsing() {
        assert_eq!(Color::parse("#f00"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(Color::parse("#00FF7f"), Some(Color::Rgb(0, 255, 127)));
        assert_eq!(Color::parse("rgb(10, 20,30)"), Some(Color::Rgb(10, 20, 30)));
        assert_eq!(Color::parse("rgb(100%,0%,50%)"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(Color::parse("Black"), Some(Color::Named("black".into())));
        assert_eq!(Color::parse("none"), None);
        assert_eq!(Color::parse(" "), None);
        assert_eq!(Color::parse("url(#grad)"), Some(Color::Raw("url(#grad)".into())));
        assert_eq!(Color::parse("#12"), Some(Color::Raw("#12".into())));
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::Rgb(1, 2, 3).to_string(), "rgb(1,2,3)");
        assert_eq!(Color::Named("red".into()).to_string(), "red");
    }

    #[test]
    fn default_style_is_visible_on_layer_zero() {
        let style = Style::default();
        assert!(style.visible);
        assert_eq!(style.layer, "0");
    }

    #[test]
    fn dispatch_through_shape() {
        let shape: Shape = CircleShape {
            center: Point::new(0.0, 0.0),
            radius: 3.0,
            meta: ShapeMeta::new("c1", Style::default()),
        }
        .into();
        assert_eq!(shape.tag(), "c1");
        assert_eq!(shape.kind(), "circle");
        assert_eq!(shape.bounds().width(), 6.0);
        assert!(shape.is_visible());
    }

    #[test]
    fn clockwise_arc_bounds() {
        // counter-clockwise 0..90 stays in one quadrant
        let ccw = arc(0.0, 90.0, false).bounds();
        assert!((ccw.width() - 2.0).abs() < 1e-9);
        // clockwise 0..90 goes the long way round
        let cw = arc(0.0, 90.0, true).bounds();
        assert!((cw.width() - 4.0).abs() < 1e-9);
        assert!((cw.height() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn transformed_arc_keeps_endpoints() {
        let m = Matrix2D::translate(3.0, -1.0)
            .append(&Matrix2D::rotate(0.5))
            .append(&Matrix2D::scale(2.0, -2.0));
        let original = arc(10.0, 130.0, false);
        let Some(Shape::Arc(moved)) = Shape::Arc(original.clone()).transformed(&m) else {
            panic!("arc should survive a similarity");
        };
        assert!(moved.start_point().approx_eq(m.apply_point(original.start_point()), 1e-9));
        assert!(moved.end_point().approx_eq(m.apply_point(original.end_point()), 1e-9));
        assert!(moved.clockwise);
    }

    #[test]
    fn circles_refuse_uneven_scale() {
        let c = Shape::Circle(CircleShape {
            center: Point::ORIGIN,
            radius: 1.0,
            meta: ShapeMeta::default(),
        });
        assert!(c.transformed(&Matrix2D::scale(2.0, 1.0)).is_none());
    }
}
