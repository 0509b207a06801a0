use crate::error::Result;
use crate::geometry::surface::{Cylinder, Plane, Surface, SurfaceDomain};
use crate::math::{Point3, Vector3};

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
    /// A cylindrical surface.
    Cylinder(Cylinder),
}

impl FaceSurface {
    fn as_surface(&self) -> &dyn Surface {
        match self {
            Self::Plane(p) => p,
            Self::Cylinder(c) => c,
        }
    }
}

/// How a face is trimmed on its surface.
#[derive(Debug, Clone)]
pub enum FaceBoundary {
    /// Closed 3D polylines lying on a planar surface.
    ///
    /// Loops are implicitly closed: the last point connects back to the first.
    Loops {
        outer: Vec<Point3>,
        holes: Vec<Vec<Point3>>,
    },
    /// A rectangle in the surface's parameter space.
    Patch(SurfaceDomain),
}

/// Data associated with a topological face.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// Trimming boundary of the face.
    pub boundary: FaceBoundary,
    /// If `true`, the face normal agrees with the surface normal.
    pub same_sense: bool,
}

impl FaceData {
    /// A planar face whose outer loop winds counter-clockwise about the
    /// plane normal.
    #[must_use]
    pub fn planar(plane: Plane, outer: Vec<Point3>, holes: Vec<Vec<Point3>>) -> Self {
        Self {
            surface: FaceSurface::Plane(plane),
            boundary: FaceBoundary::Loops { outer, holes },
            same_sense: true,
        }
    }

    /// A face trimmed to a parameter rectangle of its surface.
    #[must_use]
    pub fn patch(surface: FaceSurface, domain: SurfaceDomain, same_sense: bool) -> Self {
        Self {
            surface,
            boundary: FaceBoundary::Patch(domain),
            same_sense,
        }
    }

    /// The supporting plane, if the face is planar.
    #[must_use]
    pub fn plane(&self) -> Option<&Plane> {
        match &self.surface {
            FaceSurface::Plane(p) => Some(p),
            FaceSurface::Cylinder(_) => None,
        }
    }

    /// Surface point at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be evaluated.
    pub fn point_at(&self, u: f64, v: f64) -> Result<Point3> {
        self.surface.as_surface().evaluate(u, v)
    }

    /// Unit face normal at `(u, v)`, flipped when the face opposes its surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface normal is degenerate.
    pub fn normal_at(&self, u: f64, v: f64) -> Result<Vector3> {
        let n = self.surface.as_surface().normal(u, v)?;
        Ok(if self.same_sense { n } else { -n })
    }

    /// Parameters of the surface point closest to `point`.
    #[must_use]
    pub fn closest_parameters(&self, point: &Point3) -> (f64, f64) {
        self.surface.as_surface().closest_parameters(point)
    }
}
