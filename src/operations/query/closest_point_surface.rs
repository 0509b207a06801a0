use crate::error::Result;
use crate::math::Point3;
use crate::topology::{FaceId, TopologyStore};

/// Result of a closest-point-on-surface query.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    /// U parameter on the surface.
    pub u: f64,
    /// V parameter on the surface.
    pub v: f64,
    /// 3D point on the surface.
    pub point: Point3,
    /// Distance from the query point to the surface point.
    pub distance: f64,
}

/// Finds the point of a face's untrimmed surface closest to a query point.
pub struct ClosestPointOnSurface {
    face: FaceId,
    query: Point3,
}

impl ClosestPointOnSurface {
    /// Creates a new query.
    #[must_use]
    pub fn new(face: FaceId, query: Point3) -> Self {
        Self { face, query }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found or cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<SurfacePoint> {
        let face = store.face(self.face)?;
        let (u, v) = face.closest_parameters(&self.query);
        let point = face.point_at(u, v)?;
        Ok(SurfacePoint {
            u,
            v,
            point,
            distance: (self.query - point).norm(),
        })
    }
}
