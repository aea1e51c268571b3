//! The codec-facing side of a drawing.
//!
//! A CAD interchange codec only moves flat primitive collections in and out
//! of its file format. Geometry is in millimetres, angles in degrees, and arcs
//! always run counter-clockwise.

use crate::errors::ImportError;
use crate::types::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct CadLine {
    pub start: Point,
    pub end: Point,
    pub layer: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CadCircle {
    pub center: Point,
    pub radius: f64,
    pub layer: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CadArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
    pub layer: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CadPolyline {
    /// Closed polylines do not repeat their first vertex.
    pub vertices: Vec<Point>,
    pub closed: bool,
    pub layer: String,
}

/// Flat primitive collections as a CAD codec sees them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CadDocument {
    pub lines: Vec<CadLine>,
    pub circles: Vec<CadCircle>,
    pub arcs: Vec<CadArc>,
    pub polylines: Vec<CadPolyline>,
}

impl CadDocument {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.circles.is_empty()
            && self.arcs.is_empty()
            && self.polylines.is_empty()
    }

    /// Distinct layer names in order of first use.
    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        let names = self
            .lines
            .iter()
            .map(|l| l.layer.as_str())
            .chain(self.circles.iter().map(|c| c.layer.as_str()))
            .chain(self.arcs.iter().map(|a| a.layer.as_str()))
            .chain(self.polylines.iter().map(|p| p.layer.as_str()));
        for name in names {
            if !layers.contains(&name) {
                layers.push(name);
            }
        }
        layers
    }
}

/// An external CAD interchange codec.
///
/// Implementations serialize and deserialize; they never reason about
/// geometry.
pub trait CadCodec {
    fn name(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> Result<CadDocument, ImportError>;

    fn encode(&self, document: &CadDocument) -> Result<Vec<u8>, ImportError>;
}
