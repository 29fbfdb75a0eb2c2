//! 2-D affine transformations.
//!
//! Uses the SVG `matrix(a b c d e f)` convention:
//!   x' = a*x + c*y + e
//!   y' = b*x + d*y + f

use serde::{Deserialize, Serialize};

use crate::types::{Offset, Point};

/// Determinants with a smaller magnitude are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// An affine transformation of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Counter-clockwise rotation (in the y-down SVG frame this reads clockwise).
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// `self.then(other)` applies `self` first, then `other`.
    pub fn then(&self, other: &Transformation) -> Transformation {
        other.compose(self)
    }

    /// Matrix product `self * inner`: applies `inner` first, then `self`.
    pub fn compose(&self, inner: &Transformation) -> Transformation {
        Transformation {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    /// Inverse transformation, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Transformation> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Transformation {
            a,
            b,
            c,
            d,
            e: -(a * self.e + c * self.f),
            f: -(b * self.e + d * self.f),
        })
    }

    pub fn apply_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Vectors ignore the translation part.
    pub fn apply_offset(&self, v: Offset) -> Offset {
        Offset {
            dx: self.a * v.dx + self.c * v.dy,
            dy: self.b * v.dx + self.d * v.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_inverse_round_trips_point() {
        let t = Transformation::translation(3.0, -2.0)
            .compose(&Transformation::rotation(0.7))
            .compose(&Transformation::scaling(2.0, 0.5));
        let inv = t.inverse().unwrap();
        let p = Point { x: 1.5, y: -4.0 };
        let back = inv.apply_point(t.apply_point(p));
        assert!(close(back.x, p.x) && close(back.y, p.y));
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Transformation::scaling(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_then_applies_left_first() {
        let scale = Transformation::scaling(2.0, 2.0);
        let shift = Transformation::translation(1.0, 0.0);
        let p = scale.then(&shift).apply_point(Point { x: 1.0, y: 1.0 });
        assert!(close(p.x, 3.0) && close(p.y, 2.0));
    }

    #[test]
    fn test_offset_ignores_translation() {
        let t = Transformation::translation(10.0, 10.0);
        let v = t.apply_offset(Offset { dx: 1.0, dy: 2.0 });
        assert_eq!(v, Offset { dx: 1.0, dy: 2.0 });
    }
}
