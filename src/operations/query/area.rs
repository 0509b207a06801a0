use crate::error::Result;
use crate::math::polygon_3d::polygon_area_3d;
use crate::topology::{FaceBoundary, FaceData, FaceId, FaceSurface, SolidId, TopologyStore};

/// Computes the exact area of a single face.
///
/// Planar faces use the polygon area of the outer loop minus its holes;
/// cylindrical patches use `radius * angle * height`.
pub struct FaceArea {
    face: FaceId,
}

impl FaceArea {
    /// Creates a new `FaceArea` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query, returning the face area.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        Ok(face_data_area(store.face(self.face)?))
    }
}

pub(crate) fn face_data_area(face: &FaceData) -> f64 {
    match (&face.surface, &face.boundary) {
        (_, FaceBoundary::Loops { outer, holes }) => {
            let cut: f64 = holes.iter().map(|h| polygon_area_3d(h)).sum();
            (polygon_area_3d(outer) - cut).max(0.0)
        }
        (FaceSurface::Cylinder(cyl), FaceBoundary::Patch(d)) => {
            cyl.radius() * d.u_span().abs() * d.v_span().abs()
        }
        (FaceSurface::Plane(_), FaceBoundary::Patch(d)) => {
            if d.is_bounded() {
                d.u_span().abs() * d.v_span().abs()
            } else {
                0.0
            }
        }
    }
}

/// Computes the total surface area of a solid.
pub struct Area {
    solid: SolidId,
}

impl Area {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the total surface area.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its faces is not found.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        Ok(store
            .solid_faces(self.solid)?
            .into_iter()
            .map(|(_, face)| face_data_area(face))
            .sum())
    }
}
