//! Geometric algorithms: curve sampling, arc reconstruction, transforms and
//! shape classification.

pub mod arc;
pub mod arc_bounds;
pub mod bezier;
pub mod biarc;
pub mod circle_fit;
pub mod transform;

pub use arc::{ArcResolution, ArcSpec, resolve_arc, sample_arc};
pub use arc_bounds::{arc_bounds, arc_bounds_at};
pub use bezier::{flatten_cubic, flatten_quadratic, reflect};
pub use biarc::{Biarc, BiarcSpan, fit_biarc};
pub use circle_fit::{Classification, Rejection, classify};
pub use transform::{Matrix2D, TransformOp, compose};
