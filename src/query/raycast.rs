use crate::math::intersect_3d::ray_triangle_intersect;
use crate::math::{transform_point, Matrix4, Point3, Vector3};
use crate::mesh::MeshTopology;

/// A pick ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }
}

/// The nearest triangle struck by a [`Raycast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Index of the struck triangle.
    pub triangle: usize,
    /// World-space distance from the ray origin to the hit point.
    pub distance: f64,
    /// World-space hit point.
    pub point: Point3,
    /// Barycentric weights of the triangle's second and third vertices.
    pub barycentric: (f64, f64),
}

/// Closest-hit ray query against a triangle mesh.
///
/// The mesh is placed in the world by an optional object-to-world matrix
/// (identity by default). Triangles are double-sided.
pub struct Raycast {
    ray: Ray,
    transform: Matrix4,
}

impl Raycast {
    /// Creates a new `Raycast` query with an identity transform.
    #[must_use]
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            transform: Matrix4::identity(),
        }
    }

    /// Sets the object-to-world matrix of the mesh.
    #[must_use]
    pub fn with_transform(mut self, transform: Matrix4) -> Self {
        self.transform = transform;
        self
    }

    /// Executes the query, returning the nearest hit along the ray.
    ///
    /// Ties in distance resolve to the lower triangle index.
    #[must_use]
    pub fn execute(&self, topology: &MeshTopology) -> Option<RaycastHit> {
        let world: Vec<Point3> = topology
            .positions()
            .iter()
            .map(|p| transform_point(&self.transform, p))
            .collect();

        let origin = &self.ray.origin;
        let dir = &self.ray.direction;

        let mut best: Option<(usize, f64, f64, f64)> = None;
        for (t, [a, b, c]) in topology.triangles().enumerate() {
            let Some(hit) = ray_triangle_intersect(origin, dir, &world[a], &world[b], &world[c])
            else {
                continue;
            };
            if best.is_none_or(|(_, best_t, _, _)| hit.t < best_t) {
                best = Some((t, hit.t, hit.u, hit.v));
            }
        }

        best.map(|(triangle, t, u, v)| RaycastHit {
            triangle,
            distance: t * dir.norm(),
            point: origin + dir * t,
            barycentric: (u, v),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::SourceMesh;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    /// Two unit triangles facing +Z, at z = 0 and z = 2.
    fn stacked() -> MeshTopology {
        MeshTopology::load(SourceMesh {
            positions: vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(0.0, 0.0, 2.0),
                p(1.0, 0.0, 2.0),
                p(0.0, 1.0, 2.0),
            ],
            indices: vec![0, 1, 2, 3, 4, 5],
            ..SourceMesh::default()
        })
        .unwrap()
    }

    #[test]
    fn nearest_triangle_wins() {
        let topo = stacked();
        let down = Raycast::new(Ray::new(p(0.2, 0.2, 10.0), v(0.0, 0.0, -1.0)))
            .execute(&topo)
            .unwrap();
        assert_eq!(down.triangle, 1);
        assert_abs_diff_eq!(down.distance, 8.0, epsilon = 1e-9);

        let up = Raycast::new(Ray::new(p(0.2, 0.2, -10.0), v(0.0, 0.0, 1.0)))
            .execute(&topo)
            .unwrap();
        assert_eq!(up.triangle, 0);
        assert_abs_diff_eq!(up.point.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn miss_returns_none() {
        let topo = stacked();
        let hit = Raycast::new(Ray::new(p(5.0, 5.0, 10.0), v(0.0, 0.0, -1.0))).execute(&topo);
        assert!(hit.is_none());
    }

    #[test]
    fn distance_is_in_world_units_for_unnormalized_direction() {
        let topo = stacked();
        let hit = Raycast::new(Ray::new(p(0.2, 0.2, 10.0), v(0.0, 0.0, -4.0)))
            .execute(&topo)
            .unwrap();
        assert_abs_diff_eq!(hit.distance, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn tiny_triangle_and_short_direction_are_hit() {
        let s = 1e-6;
        let tiny = MeshTopology::load(SourceMesh {
            positions: vec![p(0.0, 0.0, 0.0), p(s, 0.0, 0.0), p(0.0, s, 0.0)],
            indices: vec![0, 1, 2],
            ..SourceMesh::default()
        })
        .unwrap();
        let hit = Raycast::new(Ray::new(p(0.25 * s, 0.25 * s, 1.0), v(0.0, 0.0, -1.0)))
            .execute(&tiny)
            .unwrap();
        assert_eq!(hit.triangle, 0);
        assert_abs_diff_eq!(hit.distance, 1.0, epsilon = 1e-9);

        let topo = stacked();
        let hit = Raycast::new(Ray::new(p(0.2, 0.2, 10.0), v(0.0, 0.0, -1e-11)))
            .execute(&topo)
            .unwrap();
        assert_eq!(hit.triangle, 1);
        assert_abs_diff_eq!(hit.distance, 8.0, epsilon = 1e-6);
    }

    #[test]
    fn transform_moves_mesh() {
        let topo = stacked();
        let shift = Matrix4::new_translation(&v(10.0, 0.0, 0.0));

        let ray = Ray::new(p(0.2, 0.2, 10.0), v(0.0, 0.0, -1.0));
        assert!(Raycast::new(ray)
            .with_transform(shift)
            .execute(&topo)
            .is_none());

        let ray = Ray::new(p(10.2, 0.2, 10.0), v(0.0, 0.0, -1.0));
        let hit = Raycast::new(ray).with_transform(shift).execute(&topo).unwrap();
        assert_eq!(hit.triangle, 1);
    }

    #[test]
    fn scale_transform_grows_hit_area() {
        let topo = stacked();
        let scale = Matrix4::new_scaling(3.0);
        let ray = Ray::new(p(2.0, 0.5, 10.0), v(0.0, 0.0, -1.0));
        assert!(Raycast::new(ray).execute(&topo).is_none());
        let hit = Raycast::new(ray).with_transform(scale).execute(&topo).unwrap();
        // top triangle sits at z = 6 after scaling
        assert_abs_diff_eq!(hit.point.z, 6.0, epsilon = 1e-9);
    }
}
