//! The drawing document and the slot it is published through.

use std::sync::{Arc, RwLock};

use crate::cad::{CadArc, CadCircle, CadDocument, CadLine, CadPolyline};
use crate::log::debug;
use crate::types::BBox;

use super::shapes::{ArcShape, CircleShape, LineShape, PolylineShape, Primitive, Shape};

/// All primitives of one imported file, grouped by kind.
///
/// Built once by the assembler; to change it, build a new one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingDocument {
    pub file_name: String,
    /// Bounds of the visible primitives, `None` when there are none.
    pub bounds: Option<BBox>,
    pub lines: Vec<LineShape>,
    pub circles: Vec<CircleShape>,
    pub arcs: Vec<ArcShape>,
    pub polylines: Vec<PolylineShape>,
}

impl DrawingDocument {
    /// Group shapes by kind and compute bounds.
    pub fn from_shapes(file_name: impl Into<String>, shapes: impl IntoIterator<Item = Shape>) -> Self {
        let mut doc = DrawingDocument {
            file_name: file_name.into(),
            ..Default::default()
        };
        for shape in shapes {
            match shape {
                Shape::Line(s) => doc.lines.push(s),
                Shape::Circle(s) => doc.circles.push(s),
                Shape::Arc(s) => doc.arcs.push(s),
                Shape::Polyline(s) => doc.polylines.push(s),
            }
        }
        doc.bounds = doc.visible_bounds();
        debug!(
            file = %doc.file_name,
            lines = doc.lines.len(),
            circles = doc.circles.len(),
            arcs = doc.arcs.len(),
            polylines = doc.polylines.len(),
            "assembled document"
        );
        doc
    }

    /// Every primitive, lines first, then circles, arcs and polylines.
    pub fn primitives(&self) -> impl Iterator<Item = &dyn Primitive> {
        self.lines
            .iter()
            .map(|s| s as &dyn Primitive)
            .chain(self.circles.iter().map(|s| s as &dyn Primitive))
            .chain(self.arcs.iter().map(|s| s as &dyn Primitive))
            .chain(self.polylines.iter().map(|s| s as &dyn Primitive))
    }

    /// Owned copies of every primitive, in [`primitives`](Self::primitives) order.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(self.len());
        shapes.extend(self.lines.iter().cloned().map(Shape::from));
        shapes.extend(self.circles.iter().cloned().map(Shape::from));
        shapes.extend(self.arcs.iter().cloned().map(Shape::from));
        shapes.extend(self.polylines.iter().cloned().map(Shape::from));
        shapes
    }

    pub fn len(&self) -> usize {
        self.lines.len() + self.circles.len() + self.arcs.len() + self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn visible_bounds(&self) -> Option<BBox> {
        let mut bounds = BBox::new();
        for p in self.primitives().filter(|p| p.is_visible()) {
            bounds.union(&p.bounds());
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    /// Flatten into the collections a CAD codec writes.
    ///
    /// Clockwise arcs are turned around; closed polylines drop their
    /// repeated closing vertex.
    pub fn to_cad(&self) -> CadDocument {
        CadDocument {
            lines: self
                .lines
                .iter()
                .map(|l| CadLine {
                    start: l.start,
                    end: l.end,
                    layer: l.layer().to_string(),
                })
                .collect(),
            circles: self
                .circles
                .iter()
                .map(|c| CadCircle {
                    center: c.center,
                    radius: c.radius,
                    layer: c.layer().to_string(),
                })
                .collect(),
            arcs: self
                .arcs
                .iter()
                .map(|a| {
                    let (start, end) = if a.clockwise {
                        (a.end_angle_deg, a.start_angle_deg)
                    } else {
                        (a.start_angle_deg, a.end_angle_deg)
                    };
                    CadArc {
                        center: a.center,
                        radius: a.radius,
                        start_angle_deg: start,
                        end_angle_deg: end,
                        layer: a.layer().to_string(),
                    }
                })
                .collect(),
            polylines: self
                .polylines
                .iter()
                .map(|p| {
                    let mut vertices = p.vertices.clone();
                    if p.closed && vertices.len() > 1 && vertices.first() == vertices.last() {
                        vertices.pop();
                    }
                    CadPolyline {
                        vertices,
                        closed: p.closed,
                        layer: p.layer().to_string(),
                    }
                })
                .collect(),
        }
    }
}

/// The currently published document.
///
/// Publishing swaps in a new document; readers holding an earlier snapshot
/// keep it unchanged.
#[derive(Debug, Default)]
pub struct DocumentSlot {
    current: RwLock<Option<Arc<DrawingDocument>>>,
}

impl DocumentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published document, returning the previous one.
    pub fn publish(&self, document: DrawingDocument) -> Option<Arc<DrawingDocument>> {
        let next = Arc::new(document);
        // a poisoned lock still holds a complete document
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        slot.replace(next)
    }

    /// A snapshot of the published document.
    pub fn current(&self) -> Option<Arc<DrawingDocument>> {
        let slot = self.current.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    pub fn clear(&self) -> Option<Arc<DrawingDocument>> {
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}
