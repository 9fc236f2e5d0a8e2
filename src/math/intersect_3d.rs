use super::{Point3, Vector3};

/// Parametric hit of a ray against a single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter: the hit point is `origin + t * dir`.
    pub t: f64,
    /// Barycentric weight of the second vertex.
    pub u: f64,
    /// Barycentric weight of the third vertex.
    pub v: f64,
}

/// Intersects the ray `origin + t * dir` (`t > 0`) with triangle `(a, b, c)`.
///
/// Möller–Trumbore, double-sided: front and back faces both report a hit.
/// Rays parallel to the triangle plane never hit. The parallel test is
/// relative to the triangle size and the length of `dir`, so tiny triangles
/// and unnormalized directions behave like unit-scale ones.
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3,
    dir: &Vector3,
    a: &Point3,
    b: &Point3,
    c: &Point3,
) -> Option<TriangleHit> {
    let edge1 = b - a;
    let edge2 = c - a;

    let h = dir.cross(&edge2);
    let det = edge1.dot(&h);
    let scale = dir.norm() * edge1.norm() * edge2.norm();
    if det.abs() <= f64::EPSILON * scale {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * dir.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    (t > 0.0).then_some(TriangleHit { t, u, v })
}
