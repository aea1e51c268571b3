//! SVG markup reader.
//!
//! Walks the element tree and hands every drawable element to the
//! [`Assembler`]. Everything an element inherits from its ancestors (matrix,
//! style, layer, viewport) travels down the traversal in an explicit
//! [`Context`].
//!
//! The page is mapped to millimetres with the y axis pointing up: the
//! viewBox origin is translated away, user units are divided by the
//! resolution, and y is flipped about the bottom edge of the page.

use std::collections::HashMap;

use roxmltree::{Document, Node, ParsingOptions};

use crate::attributes::{parse_style, parse_transform_matrix};
use crate::errors::{AttributeError, ImportError, SourceContext};
use crate::geometry::transform::Matrix2D;
use crate::log::{debug, trace, warn};
use crate::model::{Assembler, Color, DrawingDocument, SourceElement, SourceGeometry, Style};
use crate::options::{CurveFitting, ImportOptions, Sampling};
use crate::path::interpret_path;
use crate::path::tokenizer::{Lookahead, PathTokenizer};
use crate::types::{Point, Resolution};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Subtrees that never produce geometry.
const SKIPPED: &[&str] = &[
    "defs", "symbol", "clipPath", "mask", "marker", "pattern", "metadata", "title", "desc",
    "text", "image", "style", "script", "foreignObject",
];

/// CSS pixels per unit for the absolute length units.
fn unit_in_px(unit: &str) -> Option<f64> {
    let px_per_mm = Resolution::CSS_PX.raw();
    Some(match unit {
        "" | "px" => 1.0,
        "mm" => px_per_mm,
        "cm" => px_per_mm * 10.0,
        "in" => crate::defaults::CSS_DPI,
        "pt" => crate::defaults::CSS_DPI / 72.0,
        "pc" => crate::defaults::CSS_DPI / 6.0,
        _ => return None,
    })
}

/// Which viewport dimension a percentage refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Diagonal,
}

/// Size of the nearest viewport, in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Diagonal => self.width.hypot(self.height) / std::f64::consts::SQRT_2,
        }
    }
}

/// Style as it is inherited down the tree; lengths in user units.
#[derive(Debug, Clone, PartialEq)]
struct InheritedStyle {
    stroke: Option<Color>,
    stroke_width: f64,
    fill: Option<Color>,
    /// Cleared by `display: none` on any ancestor.
    displayed: bool,
    visibility: bool,
}

impl Default for InheritedStyle {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: 1.0,
            fill: Some(Color::Named("black".to_string())),
            displayed: true,
            visibility: true,
        }
    }
}

/// Everything an element inherits from its ancestors.
#[derive(Debug, Clone)]
struct Context {
    /// Element coordinates to canonical millimetres.
    transform: Matrix2D,
    style: InheritedStyle,
    layer: String,
    viewport: Viewport,
}

impl Context {
    fn to_style(&self) -> Style {
        let s = &self.style;
        Style {
            stroke_width: s
                .stroke
                .as_ref()
                .map(|_| s.stroke_width * self.transform.uniform_scale()),
            stroke: s.stroke.clone(),
            fill: s.fill.clone(),
            visible: s.displayed && s.visibility,
            layer: self.layer.clone(),
        }
    }
}

/// Resolution, page matrix and root viewport derived from the root element.
#[derive(Debug, Clone, Copy)]
struct Page {
    resolution: Resolution,
    transform: Matrix2D,
    viewport: Viewport,
}

/// Attribute parsing against one source file, for error spans.
#[derive(Debug, Clone, Copy)]
struct Attrs<'s> {
    file_name: &'s str,
    source: &'s str,
}

struct Reader<'s> {
    attrs: Attrs<'s>,
    sampling: Sampling,
    fitting: CurveFitting,
    assembler: Assembler,
    ordinals: HashMap<String, usize>,
}

/// Read an SVG document into a drawing.
///
/// Any malformed number, transform list or path aborts the whole read.
pub fn read_svg(file_name: &str, source: &str, options: &ImportOptions) -> Result<DrawingDocument, ImportError> {
    options.validate()?;
    let parsing = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(source, parsing)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(ImportError::NotSvg {
            found: root.tag_name().name().to_string(),
        });
    }

    let attrs = Attrs { file_name, source };
    let page = attrs.page(root, options)?;
    let sampling = options.sampling(page.resolution);
    let mut reader = Reader {
        attrs,
        sampling,
        fitting: options.curve_fitting,
        assembler: Assembler::new(options, sampling),
        ordinals: HashMap::new(),
    };
    debug!(file = file_name, resolution = %reader.sampling.resolution, "reading svg");

    let root_ctx = Context {
        transform: page.transform,
        style: InheritedStyle::default(),
        layer: crate::defaults::LAYER.to_string(),
        viewport: page.viewport,
    };
    let root_ctx = reader.derive(root, &root_ctx, false)?;
    reader.visit_children(root, &root_ctx)?;
    Ok(reader.assembler.finish(file_name))
}

impl<'s> Attrs<'s> {
    fn invalid_number(&self, node: Node, attribute: &str, value: &str) -> AttributeError {
        let range = node.range();
        AttributeError::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
            src: SourceContext::new(self.file_name, self.source).named_source(),
            span: (range.start, range.len()).into(),
        }
    }

    fn number(&self, node: Node, attribute: &str, value: &str) -> Result<f64, AttributeError> {
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid_number(node, attribute, value)),
        }
    }

    /// Parse a length into user units.
    fn length(
        &self,
        node: Node,
        attribute: &str,
        value: &str,
        axis: Axis,
        viewport: &Viewport,
    ) -> Result<f64, AttributeError> {
        let value = value.trim();
        if let Some(pct) = value.strip_suffix('%') {
            return Ok(self.number(node, attribute, pct)? / 100.0 * viewport.extent(axis));
        }
        let split = value
            .rfind(|c: char| c.is_ascii_digit() || c == '.')
            .map_or(0, |i| i + 1);
        let (number, unit) = value.split_at(split);
        let scale = unit_in_px(unit).ok_or_else(|| self.invalid_number(node, attribute, value))?;
        Ok(self.number(node, attribute, number)? * scale)
    }

    fn length_attr(
        &self,
        node: Node,
        attribute: &str,
        axis: Axis,
        ctx: &Context,
    ) -> Result<f64, AttributeError> {
        match node.attribute(attribute) {
            Some(value) => self.length(node, attribute, value, axis, &ctx.viewport),
            None => Ok(0.0),
        }
    }

    fn optional_length(
        &self,
        node: Node,
        attribute: &str,
        axis: Axis,
        ctx: &Context,
    ) -> Result<Option<f64>, AttributeError> {
        match node.attribute(attribute) {
            Some("auto") | None => Ok(None),
            Some(value) => self.length(node, attribute, value, axis, &ctx.viewport).map(Some),
        }
    }

    /// Parse a whitespace or comma separated list of numbers.
    fn number_list(&self, node: Node, attribute: &str, value: &str) -> Result<Vec<f64>, AttributeError> {
        let mut tokens = PathTokenizer::new(value);
        let mut numbers = Vec::new();
        while tokens.lookahead() == Lookahead::Number {
            let Some(token) = tokens.extract_number() else {
                break;
            };
            numbers.push(self.number(node, attribute, token.text)?);
        }
        if tokens.lookahead() != Lookahead::End {
            return Err(self.invalid_number(node, attribute, value));
        }
        Ok(numbers)
    }

    /// Derive the resolution and page matrix from the root element.
    fn page(&self, root: Node, options: &ImportOptions) -> Result<Page, ImportError> {
        let view_box = match root.attribute("viewBox") {
            Some(value) => {
                let numbers = self.number_list(root, "viewBox", value)?;
                match numbers.as_slice() {
                    &[x, y, w, h] if w > 0.0 && h > 0.0 => Some((x, y, w, h)),
                    _ => {
                        warn!(value, "ignoring unusable viewBox");
                        None
                    }
                }
            }
            None => None,
        };

        // physical size in px; percentages say nothing about it
        let physical = |name: &str| -> Result<Option<f64>, AttributeError> {
            match root.attribute(name) {
                Some(v) if !v.trim().ends_with('%') => {
                    let unit_viewport = Viewport {
                        width: 0.0,
                        height: 0.0,
                    };
                    self.length(root, name, v, Axis::X, &unit_viewport)
                        .map(|px| (px > 0.0).then_some(px))
                }
                _ => Ok(None),
            }
        };
        let width_px = physical("width")?;
        let height_px = physical("height")?;

        let css = Resolution::CSS_PX.raw();
        let derived = match (view_box, width_px, height_px) {
            (Some((_, _, w, _)), Some(px), _) => Resolution::try_new(w / (px / css))?,
            (Some((_, _, _, h)), None, Some(px)) => Resolution::try_new(h / (px / css))?,
            _ => Resolution::CSS_PX,
        };
        let resolution = options.sampling(derived).resolution;

        let (origin_x, origin_y, viewport) = match view_box {
            Some((x, y, w, h)) => (x, y, Viewport { width: w, height: h }),
            None => {
                let width = width_px.unwrap_or(0.0);
                let height = height_px.unwrap_or(0.0);
                (0.0, 0.0, Viewport { width, height })
            }
        };

        let k = 1.0 / resolution.raw();
        let transform = Matrix2D::scale(k, -k)
            .append(&Matrix2D::translate(-origin_x, -(origin_y + viewport.height)));
        Ok(Page {
            resolution,
            transform,
            viewport,
        })
    }
}

impl<'s> Reader<'s> {
    fn tag(&mut self, node: Node) -> String {
        if let Some(id) = node.attribute("id") {
            return id.to_string();
        }
        let name = node.tag_name().name();
        let n = self.ordinals.entry(name.to_string()).or_insert(0);
        *n += 1;
        format!("{name}#{n}")
    }

    fn apply_property(
        &self,
        node: Node,
        style: &mut InheritedStyle,
        name: &str,
        value: &str,
        viewport: &Viewport,
    ) -> Result<(), AttributeError> {
        let value = value.trim();
        if matches!(value, "inherit" | "initial" | "unset" | "") {
            return Ok(());
        }
        match name {
            "stroke" => style.stroke = Color::parse(value),
            "fill" => style.fill = Color::parse(value),
            "stroke-width" => {
                style.stroke_width = self.attrs.length(node, name, value, Axis::Diagonal, viewport)?
            }
            "display" => {
                if value == "none" {
                    style.displayed = false;
                }
            }
            "visibility" => style.visibility = value == "visible",
            _ => {}
        }
        Ok(())
    }

    /// Context for `node`'s own content: its transform, style and layer
    /// applied on top of the parent's.
    fn derive(&self, node: Node, parent: &Context, nested_viewport: bool) -> Result<Context, ImportError> {
        let mut ctx = parent.clone();

        if nested_viewport {
            let x = self.attrs.length_attr(node, "x", Axis::X, parent)?;
            let y = self.attrs.length_attr(node, "y", Axis::Y, parent)?;
            ctx.transform = ctx.transform.append(&Matrix2D::translate(x, y));
            if let Some(w) = self.attrs.optional_length(node, "width", Axis::X, parent)? {
                ctx.viewport.width = w;
            }
            if let Some(h) = self.attrs.optional_length(node, "height", Axis::Y, parent)? {
                ctx.viewport.height = h;
            }
        }
        if let Some(value) = node.attribute("transform") {
            ctx.transform = ctx.transform.append(&parse_transform_matrix(value)?);
        }

        for name in ["stroke", "fill", "stroke-width", "display", "visibility"] {
            if let Some(value) = node.attribute(name) {
                self.apply_property(node, &mut ctx.style, name, value, &ctx.viewport)?;
            }
        }
        if let Some(value) = node.attribute("style") {
            for (name, value) in parse_style(value)? {
                self.apply_property(node, &mut ctx.style, &name, &value, &ctx.viewport)?;
            }
        }

        if node.attribute((INKSCAPE_NS, "groupmode")) == Some("layer") {
            if let Some(label) = node.attribute((INKSCAPE_NS, "label")).or(node.attribute("id")) {
                ctx.layer = label.to_string();
            }
        }
        Ok(ctx)
    }

    fn visit_children(&mut self, node: Node, ctx: &Context) -> Result<(), ImportError> {
        for child in node.children().filter(|n| n.is_element()) {
            if child.tag_name().namespace().is_some_and(|ns| ns != SVG_NS) {
                trace!(name = child.tag_name().name(), "skipping foreign element");
                continue;
            }
            let name = child.tag_name().name();
            if SKIPPED.contains(&name) {
                continue;
            }
            match name {
                "g" | "a" | "switch" => {
                    let inner = self.derive(child, ctx, false)?;
                    self.visit_children(child, &inner)?;
                }
                "svg" => {
                    let inner = self.derive(child, ctx, true)?;
                    self.visit_children(child, &inner)?;
                }
                "line" | "circle" | "ellipse" | "rect" | "polyline" | "polygon" | "path" => {
                    self.read_shape(child, ctx)?;
                }
                _ => {
                    debug!(element = name, "unsupported element");
                }
            }
        }
        Ok(())
    }

    fn read_shape(&mut self, node: Node, parent: &Context) -> Result<(), ImportError> {
        let ctx = self.derive(node, parent, false)?;
        let Some(geometry) = self.geometry(node, &ctx)? else {
            return Ok(());
        };
        let tag = self.tag(node);
        self.assembler.add(SourceElement {
            geometry,
            tag,
            style: ctx.to_style(),
            transform: ctx.transform,
        });
        Ok(())
    }

    fn geometry(&self, node: Node, ctx: &Context) -> Result<Option<SourceGeometry>, ImportError> {
        let len = |name: &str, axis: Axis| self.attrs.length_attr(node, name, axis, ctx);
        let geometry = match node.tag_name().name() {
            "line" => SourceGeometry::Line {
                start: Point::new(len("x1", Axis::X)?, len("y1", Axis::Y)?),
                end: Point::new(len("x2", Axis::X)?, len("y2", Axis::Y)?),
            },
            "circle" => SourceGeometry::Circle {
                center: Point::new(len("cx", Axis::X)?, len("cy", Axis::Y)?),
                radius: len("r", Axis::Diagonal)?,
            },
            "ellipse" => SourceGeometry::Ellipse {
                center: Point::new(len("cx", Axis::X)?, len("cy", Axis::Y)?),
                rx: len("rx", Axis::X)?,
                ry: len("ry", Axis::Y)?,
            },
            "rect" => {
                let width = len("width", Axis::X)?;
                let height = len("height", Axis::Y)?;
                if width <= 0.0 || height <= 0.0 {
                    debug!("skipping empty rect");
                    return Ok(None);
                }
                let rx = self.attrs.optional_length(node, "rx", Axis::X, ctx)?;
                let ry = self.attrs.optional_length(node, "ry", Axis::Y, ctx)?;
                let (rx, ry) = match (rx, ry) {
                    (Some(rx), Some(ry)) => (rx, ry),
                    (Some(r), None) | (None, Some(r)) => (r, r),
                    (None, None) => (0.0, 0.0),
                };
                SourceGeometry::Rect {
                    x: len("x", Axis::X)?,
                    y: len("y", Axis::Y)?,
                    width,
                    height,
                    rx: rx.clamp(0.0, width / 2.0),
                    ry: ry.clamp(0.0, height / 2.0),
                }
            }
            name @ ("polyline" | "polygon") => {
                let value = node.attribute("points").unwrap_or_default();
                let mut numbers = self.attrs.number_list(node, "points", value)?;
                if numbers.len() % 2 == 1 {
                    warn!(element = name, "odd coordinate count in points, dropping the last");
                    numbers.pop();
                }
                SourceGeometry::Polyline {
                    points: numbers.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect(),
                    closed: name == "polygon",
                }
            }
            "path" => {
                let data = node.attribute("d").unwrap_or_default();
                let sampling = self.sampling.through(&ctx.transform);
                SourceGeometry::Path {
                    contours: interpret_path(data, &sampling, self.fitting)?,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(svg: &str) -> DrawingDocument {
        read_svg("test.svg", svg, &ImportOptions::default()).unwrap()
    }

    #[test]
    fn millimetre_page_maps_user_units_to_mm() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100mm" height="50mm" viewBox="0 0 200 100">
                <line x1="0" y1="100" x2="200" y2="0"/>
            </svg>"#,
        );
        let line = &doc.lines[0];
        assert!(line.start.approx_eq(Point::new(0.0, 0.0), 1e-9));
        assert!(line.end.approx_eq(Point::new(100.0, 50.0), 1e-9));
    }

    #[test]
    fn view_box_origin_is_translated_away() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20mm" height="20mm" viewBox="-10 -10 20 20">
                <circle cx="0" cy="0" r="5"/>
            </svg>"#,
        );
        assert!(doc.circles[0].center.approx_eq(Point::new(10.0, 10.0), 1e-9));
        assert!((doc.circles[0].radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn unitless_page_uses_css_pixels() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="96" height="96">
                <line x1="0" y1="96" x2="96" y2="96"/>
            </svg>"#,
        );
        assert!((doc.lines[0].end.x - 25.4).abs() < 1e-9);
        assert!(doc.lines[0].end.y.abs() < 1e-9);
    }

    #[test]
    fn group_transforms_compose() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 10 10">
                <g transform="translate(2,0)">
                    <g transform="scale(2)">
                        <line x1="0" y1="5" x2="1" y2="5"/>
                    </g>
                </g>
            </svg>"#,
        );
        let line = &doc.lines[0];
        assert!(line.start.approx_eq(Point::new(2.0, 0.0), 1e-9));
        assert!(line.end.approx_eq(Point::new(4.0, 0.0), 1e-9));
    }

    #[test]
    fn styles_inherit_and_override() {
        let doc = read(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 10 10">
                <g stroke="red" style="stroke-width:0.5">
                    <line id="a" x1="0" y1="0" x2="1" y2="1"/>
                    <line x1="0" y1="0" x2="1" y2="1" style="stroke:#00f"/>
                    <line x1="0" y1="0" x2="1" y2="1" fill="none" visibility="hidden"/>
                </g>
            </svg>"##,
        );
        assert_eq!(doc.lines[0].meta.tag, "a");
        assert_eq!(doc.lines[0].meta.style.stroke, Some(Color::Named("red".into())));
        assert_eq!(doc.lines[0].meta.style.stroke_width, Some(0.5));
        assert_eq!(doc.lines[1].meta.style.stroke, Some(Color::Rgb(0, 0, 255)));
        assert_eq!(doc.lines[1].meta.tag, "line#1");
        assert_eq!(doc.lines[2].meta.style.fill, None);
        assert!(!doc.lines[2].meta.style.visible);
    }

    #[test]
    fn inkscape_layers_name_shapes() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg"
                    xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
                    width="10mm" height="10mm" viewBox="0 0 10 10">
                <g inkscape:groupmode="layer" inkscape:label="Cut">
                    <rect x="1" y="1" width="2" height="2"/>
                </g>
                <rect x="5" y="5" width="2" height="2"/>
            </svg>"#,
        );
        assert_eq!(doc.polylines[0].meta.style.layer, "Cut");
        assert_eq!(doc.polylines[1].meta.style.layer, "0");
    }

    #[test]
    fn skipped_subtrees_produce_nothing() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 10 10">
                <defs><circle cx="1" cy="1" r="1"/></defs>
                <text x="1" y="1">hi</text>
                <metadata/>
                <animate attributeName="x"/>
            </svg>"#,
        );
        assert!(doc.is_empty());
        assert_eq!(doc.bounds, None);
    }

    #[test]
    fn rect_radius_defaults_to_the_other() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 10 10">
                <rect x="0" y="0" width="4" height="2" rx="5"/>
            </svg>"#,
        );
        // clamped to a stadium: no corner survives
        let poly = &doc.polylines[0];
        assert!(!poly.vertices.iter().any(|p| p.approx_eq(Point::new(0.0, 10.0), 1e-9)));
    }

    #[test]
    fn percentage_lengths_use_the_viewport() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="20mm" viewBox="0 0 10 20">
                <line x1="0" y1="20" x2="50%" y2="20"/>
            </svg>"#,
        );
        assert!((doc.lines[0].end.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn not_an_svg() {
        let err = read_svg("a.xml", "<html/>", &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::NotSvg { found } if found == "html"));
    }

    #[test]
    fn malformed_numbers_abort() {
        let bad = [
            r#"<svg xmlns="http://www.w3.org/2000/svg"><circle cx="1" cy="x" r="1"/></svg>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 0 0 L 1e 1"/></svg>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><polygon points="0,0 1,1 2,M"/></svg>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g transform="translate(1"/></svg>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><line x2="3furlongs"/></svg>"#,
        ];
        for svg in bad {
            assert!(read_svg("bad.svg", svg, &ImportOptions::default()).is_err(), "{svg}");
        }
    }

    #[test]
    fn pinned_resolution_overrides_page_size() {
        let options = ImportOptions::default().with_resolution(Resolution::UNIT);
        let doc = read_svg(
            "p.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 100 100">
                <line x1="0" y1="100" x2="100" y2="100"/>
            </svg>"#,
            &options,
        )
        .unwrap();
        assert!((doc.lines[0].end.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_paths_are_sampled_in_millimetres() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100mm" height="100mm" viewBox="0 0 100 100">
                <path d="M 0 0 A 1 1 0 0 1 2 0"/>
                <path transform="scale(10)" d="M 0 0 A 1 1 0 0 1 2 0"/>
            </svg>"#,
        );
        let small = doc.polylines[0].vertices.len();
        let large = doc.polylines[1].vertices.len();
        // a 10 mm half circle at 0.5 mm per section
        assert!(large > 60, "{large}");
        assert!(large > 5 * small, "{large} vs {small}");
    }

    #[test]
    fn overflowing_arcs_are_drawn_straight() {
        let doc = read(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 10 10">
                <path d="M 0 0 A 1e300 1e300 0 1 1 1 0 L 1 1"/>
            </svg>"#,
        );
        assert_eq!(doc.polylines[0].vertices.len(), 3);
    }
}
