use super::{Point2, TOLERANCE};

/// Precomputed 2D triangle for repeated barycentric queries.
///
/// Weights are `(w0, w1, w2)` for vertices `a`, `b`, `c`; they sum to 1.
#[derive(Debug, Clone, Copy)]
pub struct Triangle2 {
    a: Point2,
    b: Point2,
    c: Point2,
    inv_denom: f64,
}

impl Triangle2 {
    /// Builds a triangle, or `None` if its signed area is (near) zero.
    #[must_use]
    pub fn new(a: Point2, b: Point2, c: Point2) -> Option<Self> {
        let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if denom.abs() < TOLERANCE || !denom.is_finite() {
            return None;
        }
        Some(Self {
            a,
            b,
            c,
            inv_denom: 1.0 / denom,
        })
    }

    /// Barycentric weights of `p` with respect to this triangle.
    #[must_use]
    pub fn weights(&self, p: &Point2) -> [f64; 3] {
        let (a, b, c) = (&self.a, &self.b, &self.c);
        let w0 = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) * self.inv_denom;
        let w1 = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) * self.inv_denom;
        [w0, w1, 1.0 - w0 - w1]
    }

    /// Axis-aligned bounds as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Point2, Point2) {
        let min = Point2::new(
            self.a.x.min(self.b.x).min(self.c.x),
            self.a.y.min(self.b.y).min(self.c.y),
        );
        let max = Point2::new(
            self.a.x.max(self.b.x).max(self.c.x),
            self.a.y.max(self.b.y).max(self.c.y),
        );
        (min, max)
    }
}
