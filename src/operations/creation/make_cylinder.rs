use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::geometry::surface::{Cylinder, SurfaceDomain};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

use super::{MakeCylinderFace, MakePlanarFace, MakeSolid};

/// Default number of polygon sides used for the end caps.
const DEFAULT_CAP_SEGMENTS: usize = 48;

/// Creates an upright round tower: a cylindrical wall closed by two
/// polygonal caps.
pub struct MakeCylinder {
    base_center: Point3,
    radius: f64,
    height: f64,
    cap_segments: usize,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    #[must_use]
    pub fn new(base_center: Point3, radius: f64, height: f64) -> Self {
        Self {
            base_center,
            radius,
            height,
            cap_segments: DEFAULT_CAP_SEGMENTS,
        }
    }

    /// Sets the number of sides of the cap polygons.
    #[must_use]
    pub fn with_cap_segments(mut self, segments: usize) -> Self {
        self.cap_segments = segments;
        self
    }

    /// Executes the operation, creating the cylinder in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the radius or height is not
    /// positive or the caps have fewer than three sides.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if !(self.height.is_finite() && self.height > TOLERANCE) {
            return Err(
                OperationError::InvalidInput("cylinder height must be positive".into()).into(),
            );
        }
        if self.cap_segments < 3 {
            return Err(OperationError::InvalidInput(
                "cylinder caps need at least 3 sides".into(),
            )
            .into());
        }
        let surface = Cylinder::vertical(self.base_center, self.radius)?;

        let wall = MakeCylinderFace::new(surface, SurfaceDomain::new(0.0, TAU, 0.0, self.height))
            .execute(store)?;

        let ring = |z: f64| -> Vec<Point3> {
            (0..self.cap_segments)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let a = TAU * i as f64 / self.cap_segments as f64;
                    Point3::new(
                        self.base_center.x + self.radius * a.cos(),
                        self.base_center.y + self.radius * a.sin(),
                        self.base_center.z + z,
                    )
                })
                .collect()
        };
        let bottom = MakePlanarFace::new(ring(0.0).into_iter().rev().collect()).execute(store)?;
        let top = MakePlanarFace::new(ring(self.height)).execute(store)?;

        MakeSolid::new(vec![bottom, top, wall]).execute(store)
    }
}
