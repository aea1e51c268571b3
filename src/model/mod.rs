//! The canonical drawing model.

pub mod assemble;
pub mod document;
pub mod ops;
pub mod shapes;

pub use assemble::{Assembler, SourceElement, SourceGeometry};
pub use document::{DocumentSlot, DrawingDocument};
pub use ops::{bucket_by_radius, detect_circles};
pub use shapes::{
    ArcShape, CircleShape, Color, LineShape, PolylineShape, Primitive, Shape, ShapeMeta, Style,
};
