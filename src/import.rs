//! Format selection for incoming files.
//!
//! An import tries each reader in order and keeps the first document that
//! comes back. Nothing is published unless some reader succeeds.

use crate::cad::{CadCodec, CadDocument};
use crate::errors::{Attempt, ImportError};
use crate::log::{debug, trace};
use crate::model::{
    ArcShape, CircleShape, DrawingDocument, LineShape, PolylineShape, Shape, ShapeMeta, Style,
};
use crate::options::ImportOptions;
use crate::svg::read_svg;

/// One way of turning file bytes into a drawing.
pub trait FormatReader {
    fn name(&self) -> &'static str;

    fn read(&self, file_name: &str, bytes: &[u8], options: &ImportOptions) -> Result<DrawingDocument, ImportError>;
}

/// Reads SVG markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgReader;

impl FormatReader for SvgReader {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn read(&self, file_name: &str, bytes: &[u8], options: &ImportOptions) -> Result<DrawingDocument, ImportError> {
        let source = std::str::from_utf8(bytes)?;
        read_svg(file_name, source, options)
    }
}

/// Reads any format an external [`CadCodec`] can decode.
#[derive(Debug, Clone, Default)]
pub struct CadReader<C> {
    codec: C,
}

impl<C: CadCodec> CadReader<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: CadCodec> FormatReader for CadReader<C> {
    fn name(&self) -> &'static str {
        self.codec.name()
    }

    fn read(&self, file_name: &str, bytes: &[u8], _options: &ImportOptions) -> Result<DrawingDocument, ImportError> {
        let cad = self.codec.decode(bytes)?;
        Ok(lift(file_name, cad))
    }
}

fn meta(kind: &str, index: usize, layer: String) -> ShapeMeta {
    ShapeMeta::new(
        format!("{kind}#{}", index + 1),
        Style {
            layer,
            ..Style::default()
        },
    )
}

/// Turn codec collections into shapes. Closed polylines get their closing
/// vertex back.
fn lift(file_name: &str, cad: CadDocument) -> DrawingDocument {
    let lines = cad.lines.into_iter().enumerate().map(|(i, l)| {
        Shape::Line(LineShape {
            start: l.start,
            end: l.end,
            meta: meta("line", i, l.layer),
        })
    });
    let circles = cad.circles.into_iter().enumerate().map(|(i, c)| {
        Shape::Circle(CircleShape {
            center: c.center,
            radius: c.radius,
            meta: meta("circle", i, c.layer),
        })
    });
    let arcs = cad.arcs.into_iter().enumerate().map(|(i, a)| {
        Shape::Arc(ArcShape {
            center: a.center,
            radius: a.radius,
            start_angle_deg: a.start_angle_deg,
            end_angle_deg: a.end_angle_deg,
            clockwise: false,
            meta: meta("arc", i, a.layer),
        })
    });
    let polylines = cad.polylines.into_iter().enumerate().map(|(i, p)| {
        let mut vertices = p.vertices;
        if p.closed {
            if let Some(&first) = vertices.first() {
                vertices.push(first);
            }
        }
        Shape::Polyline(PolylineShape {
            vertices,
            closed: p.closed,
            meta: meta("polyline", i, p.layer),
        })
    });
    DrawingDocument::from_shapes(file_name, lines.chain(circles).chain(arcs).chain(polylines))
}

/// Try `readers` in order and return the first document produced.
///
/// When every reader fails the error lists each reader's reason.
pub fn import(
    file_name: &str,
    bytes: &[u8],
    readers: &[&dyn FormatReader],
    options: &ImportOptions,
) -> Result<DrawingDocument, ImportError> {
    options.validate()?;
    let mut attempts = Vec::with_capacity(readers.len());
    for reader in readers {
        trace!(reader = reader.name(), file = file_name, "trying reader");
        match reader.read(file_name, bytes, options) {
            Ok(doc) => {
                debug!(reader = reader.name(), file = file_name, shapes = doc.len(), "imported");
                return Ok(doc);
            }
            Err(error) => {
                debug!(reader = reader.name(), %error, "reader rejected file");
                attempts.push(Attempt {
                    reader: reader.name(),
                    error: Box::new(error),
                });
            }
        }
    }
    Err(ImportError::Unsupported { attempts })
}
