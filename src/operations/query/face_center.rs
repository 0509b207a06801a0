use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::tessellation::{TessellateFace, TessellationParams};
use crate::topology::{FaceBoundary, FaceId, TopologyStore};

use super::ClosestPointOnSurface;

/// A representative point on a face and the outward normal there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    pub center: Point3,
    pub normal: Vector3,
}

/// Picks the representative point of a face.
///
/// For a planar face this is the middle of the outer loop's extent in the
/// plane's own frame. It can fall outside an L-shaped or holed face, which
/// is what lets a ray from the underside of an overhang find the volume
/// below it. For a curved face it is the area centroid of the tessellation
/// pulled back onto the surface.
pub struct FaceCenter {
    face: FaceId,
    params: TessellationParams,
}

impl FaceCenter {
    /// Creates a new `FaceCenter` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self {
            face,
            params: TessellationParams::default(),
        }
    }

    /// Sets custom tessellation parameters for curved faces.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing, cannot be tessellated, or has
    /// no area.
    pub fn execute(&self, store: &TopologyStore) -> Result<FaceFrame> {
        let face = store.face(self.face)?;

        if let (Some(plane), FaceBoundary::Loops { outer, .. }) = (face.plane(), &face.boundary) {
            if outer.is_empty() {
                return Err(GeometryError::Degenerate("face has an empty boundary".into()).into());
            }
            let uv: Vec<Point2> = outer.iter().map(|p| plane.project(p)).collect();
            let (lo, hi) = uv.iter().fold(
                (
                    Point2::new(f64::INFINITY, f64::INFINITY),
                    Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
                ),
                |(lo, hi), p| (lo.inf(p), hi.sup(p)),
            );
            return Ok(FaceFrame {
                center: plane.lift(&nalgebra::center(&lo, &hi)),
                normal: face.normal_at(0.0, 0.0)?,
            });
        }

        let mesh = TessellateFace::new(self.face, self.params).execute(store)?;
        let mut weighted = Vector3::zeros();
        let mut total = 0.0;
        for [a, b, c] in mesh.triangles() {
            let area = (b - a).cross(&(c - a)).norm() * 0.5;
            weighted += (a.coords + b.coords + c.coords) * (area / 3.0);
            total += area;
        }
        if total < TOLERANCE {
            return Err(GeometryError::Degenerate("face has no area".into()).into());
        }
        let centroid = Point3::from(weighted / total);
        let foot = ClosestPointOnSurface::new(self.face, centroid).execute(store)?;
        Ok(FaceFrame {
            center: foot.point,
            normal: face.normal_at(foot.u, foot.v)?,
        })
    }
}
