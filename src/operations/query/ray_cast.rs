use crate::math::intersect_3d::ray_triangle_intersect;
use crate::math::{Point3, Vector3};
use crate::tessellation::TriangleMesh;

/// A ray-mesh hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the (normalized) ray.
    pub t: f64,
    /// Index of the triangle that was hit.
    pub triangle: usize,
}

/// Casts a ray against a triangle mesh.
pub struct RayCast {
    origin: Point3,
    direction: Vector3,
}

impl RayCast {
    /// Creates a new `RayCast`. The direction is normalized, so hit
    /// parameters are distances.
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize(0.0).unwrap_or_else(Vector3::zeros),
        }
    }

    /// Returns every hit in front of the origin, nearest first.
    ///
    /// A zero direction hits nothing.
    #[must_use]
    pub fn execute(&self, mesh: &TriangleMesh) -> Vec<RayHit> {
        if self.direction == Vector3::zeros() {
            return Vec::new();
        }
        let mut hits: Vec<RayHit> = mesh
            .triangles()
            .enumerate()
            .filter_map(|(triangle, [a, b, c])| {
                ray_triangle_intersect(&self.origin, &self.direction, &a, &b, &c)
                    .map(|t| RayHit { t, triangle })
            })
            .collect();
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        hits
    }
}
