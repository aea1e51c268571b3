//! Turn vector drawings into CAD-ready primitives.
//!
//! SVG markup is walked element by element; path data is interpreted into
//! point contours, curves are sampled or fitted with arcs, and every element
//! is mapped through its full transform into millimetres with y pointing up.
//! The result is a [`DrawingDocument`] of lines, circles, arcs and polylines.

pub mod log;

pub mod attributes;
pub mod cad;
pub mod defaults;
pub mod errors;
pub mod geometry;
pub mod import;
pub mod model;
pub mod options;
pub mod path;
pub mod svg;
pub mod types;

pub use cad::{CadCodec, CadDocument};
pub use errors::{AttributeError, ImportError, PathError};
pub use geometry::{Matrix2D, TransformOp};
pub use import::{CadReader, FormatReader, SvgReader, import};
pub use model::{
    ArcShape, CircleShape, DocumentSlot, DrawingDocument, LineShape, PolylineShape, Primitive,
    Shape, Style, bucket_by_radius, detect_circles,
};
pub use options::{CircleFitTolerance, CurveFitting, ImportOptions, Sampling};
pub use path::{Contour, interpret_path};
pub use svg::read_svg;
pub use types::{BBox, NumericError, Point, Resolution};

/// Import SVG text.
///
/// Shorthand for [`read_svg`]; use [`import`] to try several formats.
pub fn import_svg(file_name: &str, source: &str, options: &ImportOptions) -> Result<DrawingDocument, ImportError> {
    read_svg(file_name, source, options)
}
