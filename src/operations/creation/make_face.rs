use crate::error::{OperationError, Result};
use crate::geometry::surface::{Cylinder, Plane, SurfaceDomain};
use crate::math::polygon_3d::{newell_normal, polygon_area_3d};
use crate::math::Point3;
use crate::topology::{FaceData, FaceId, FaceSurface, TopologyStore};

/// Deviation from the best-fit plane above which a loop is rejected.
const PLANARITY_TOLERANCE: f64 = 1e-6;

/// Creates a planar face from a boundary polygon and optional holes.
///
/// The face normal follows the right-hand rule around the outer loop.
pub struct MakePlanarFace {
    outer: Vec<Point3>,
    holes: Vec<Vec<Point3>>,
}

impl MakePlanarFace {
    /// Creates a new `MakePlanarFace` operation.
    #[must_use]
    pub fn new(outer: Vec<Point3>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Adds hole loops cut out of the face.
    #[must_use]
    pub fn with_holes(mut self, holes: Vec<Vec<Point3>>) -> Self {
        self.holes = holes;
        self
    }

    /// Builds the face data without inserting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the outer loop has fewer than three points or no
    /// area, or if any point lies off the plane of the outer loop.
    pub fn build(&self) -> Result<FaceData> {
        if self.outer.len() < 3 {
            return Err(OperationError::InvalidInput(format!(
                "face boundary needs at least 3 points, got {}",
                self.outer.len()
            ))
            .into());
        }
        let normal = newell_normal(&self.outer)?;
        let plane = Plane::from_normal(self.outer[0], normal)?;

        let scale = polygon_area_3d(&self.outer).sqrt().max(1.0);
        let off_plane = self
            .outer
            .iter()
            .chain(self.holes.iter().flatten())
            .map(|p| plane.signed_distance(p).abs())
            .fold(0.0_f64, f64::max);
        if off_plane > PLANARITY_TOLERANCE * scale {
            return Err(OperationError::InvalidInput(format!(
                "face boundary is not planar (deviation {off_plane:.3e})"
            ))
            .into());
        }

        Ok(FaceData::planar(plane, self.outer.clone(), self.holes.clone()))
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// See [`MakePlanarFace::build`].
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        Ok(store.add_face(self.build()?))
    }
}

/// Creates a face on a cylinder, trimmed to an angle and height range.
pub struct MakeCylinderFace {
    cylinder: Cylinder,
    domain: SurfaceDomain,
    outward: bool,
}

impl MakeCylinderFace {
    /// Creates a new `MakeCylinderFace` operation.
    ///
    /// `domain` spans the angle (u, radians) and the height along the axis (v).
    #[must_use]
    pub fn new(cylinder: Cylinder, domain: SurfaceDomain) -> Self {
        Self {
            cylinder,
            domain,
            outward: true,
        }
    }

    /// Makes the face normal point towards the axis, as on the inside of a
    /// courtyard.
    #[must_use]
    pub fn facing_axis(mut self) -> Self {
        self.outward = false;
        self
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the domain is unbounded or empty.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let d = &self.domain;
        if !d.is_bounded() || d.u_span() <= 0.0 || d.v_span() <= 0.0 {
            return Err(OperationError::InvalidInput(
                "cylinder face needs a bounded, non-empty parameter range".into(),
            )
            .into());
        }
        Ok(store.add_face(FaceData::patch(
            FaceSurface::Cylinder(self.cylinder.clone()),
            *d,
            self.outward,
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    #[test]
    fn ccw_loop_faces_up() {
        let face = MakePlanarFace::new(vec![
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(3.0, 0.0, 2.0),
            Point3::new(3.0, 3.0, 2.0),
        ])
        .build()
        .unwrap();
        let n = face.normal_at(0.0, 0.0).unwrap();
        assert!((n - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn non_planar_loop_is_rejected() {
        let r = MakePlanarFace::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .build();
        assert!(r.is_err());
    }

    #[test]
    fn too_few_points_rejected() {
        let r = MakePlanarFace::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).build();
        assert!(r.is_err());
    }

    #[test]
    fn cylinder_face_needs_bounded_domain() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::vertical(Point3::origin(), 1.0).unwrap();
        let open = SurfaceDomain::new(0.0, 1.0, 0.0, f64::INFINITY);
        assert!(MakeCylinderFace::new(cyl.clone(), open).execute(&mut store).is_err());
        let id = MakeCylinderFace::new(cyl, SurfaceDomain::new(0.0, 1.0, 0.0, 3.0))
            .facing_axis()
            .execute(&mut store)
            .unwrap();
        assert!(!store.face(id).unwrap().same_sense);
    }
}
