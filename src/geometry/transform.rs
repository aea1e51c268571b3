//! 2D affine matrices and their composition.
//!
//! A [`Matrix2D`] maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
//!
//! Two composition orders are exposed:
//!
//! - [`Matrix2D::append`] multiplies on the right. The appended operation acts
//!   in the local frame established so far, which is how a transform list such
//!   as `translate(10) rotate(45)` reads left to right.
//! - [`Matrix2D::then`] (and [`compose`]) applies `self` first and the argument
//!   afterwards, in the resulting frame.

use glam::{DVec2, dvec2};

use crate::log::debug;
use crate::types::Point;

/// Below this magnitude a determinant is treated as zero.
const SINGULAR_EPSILON: f64 = 1e-12;

/// One operation of a declarative transform list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Matrix([f64; 6]),
    Translate { tx: f64, ty: f64 },
    Scale { sx: f64, sy: f64 },
    /// Degrees, about an optional centre.
    Rotate { angle: f64, center: Option<Point> },
    SkewX(f64),
    SkewY(f64),
}

impl TransformOp {
    pub fn to_matrix(self) -> Matrix2D {
        match self {
            TransformOp::Matrix([a, b, c, d, e, f]) => Matrix2D { a, b, c, d, e, f },
            TransformOp::Translate { tx, ty } => Matrix2D::translate(tx, ty),
            TransformOp::Scale { sx, sy } => Matrix2D::scale(sx, sy),
            TransformOp::Rotate { angle, center: None } => Matrix2D::rotate(angle.to_radians()),
            TransformOp::Rotate {
                angle,
                center: Some(c),
            } => Matrix2D::translate(c.x, c.y)
                .append(&Matrix2D::rotate(angle.to_radians()))
                .append(&Matrix2D::translate(-c.x, -c.y)),
            TransformOp::SkewX(angle) => Matrix2D {
                c: angle.to_radians().tan(),
                ..Matrix2D::IDENTITY
            },
            TransformOp::SkewY(angle) => Matrix2D {
                b: angle.to_radians().tan(),
                ..Matrix2D::IDENTITY
            },
        }
    }
}

/// Affine 2D matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2D {
    pub const IDENTITY: Matrix2D = Matrix2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Matrix2D {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Matrix2D {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Rotation by `radians`, counter-clockwise in a y-up frame.
    pub fn rotate(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Matrix2D {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Build from a transform list, appending each operation in order.
    ///
    /// A non-invertible result is replaced by the identity.
    pub fn from_ops(ops: &[TransformOp]) -> Self {
        let m = ops
            .iter()
            .fold(Self::IDENTITY, |m, op| m.append(&op.to_matrix()));
        if m.is_invertible() {
            m
        } else {
            debug!(?ops, "degenerate transform, substituting identity");
            Self::IDENTITY
        }
    }

    /// `self × other`: `other` acts first, inside the frame of `self`.
    pub fn append(&self, other: &Matrix2D) -> Matrix2D {
        Matrix2D {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &Matrix2D) -> Matrix2D {
        next.append(self)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > SINGULAR_EPSILON
    }

    pub fn inverse(&self) -> Option<Matrix2D> {
        if !self.is_invertible() {
            return None;
        }
        let det = self.determinant();
        Some(Matrix2D {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether circles stay circles: rotation, uniform scale, reflection and
    /// translation only.
    pub fn is_similarity(&self) -> bool {
        let col_x = dvec2(self.a, self.b);
        let col_y = dvec2(self.c, self.d);
        let scale = col_x.length();
        let tol = 1e-9 * scale.max(1.0);
        (col_y.length() - scale).abs() <= tol && col_x.dot(col_y).abs() <= tol * scale.max(1.0)
    }

    /// Scale factor applied to lengths, exact for similarities.
    pub fn uniform_scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }

    /// Whether the orientation of the plane is flipped.
    pub fn is_mirroring(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Rotation angle of the x axis, in radians.
    pub fn rotation(&self) -> f64 {
        self.b.atan2(self.a)
    }

    pub fn apply_vec(&self, p: DVec2) -> DVec2 {
        dvec2(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn apply_point(&self, p: Point) -> Point {
        self.apply_vec(p.vec()).into()
    }

    /// Map every point. The input is left untouched.
    pub fn apply(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply_point(*p)).collect()
    }
}

/// `compose(a, b)` applies `a` first, then `b`.
pub fn compose(a: &Matrix2D, b: &Matrix2D) -> Matrix2D {
    a.then(b)
}
