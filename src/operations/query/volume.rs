use crate::error::Result;
use crate::tessellation::{TessellateSolid, TessellationParams};
use crate::topology::{SolidId, TopologyStore};

/// Computes the enclosed volume of a solid from its tessellation.
///
/// Sums the signed tetrahedra `(1/6) * v0 . (v1 x v2)` of every triangle, so
/// the result is negative when the faces point inward.
pub struct Volume {
    solid: SolidId,
    params: TessellationParams,
}

impl Volume {
    /// Creates a new `Volume` query with default tessellation parameters.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: TessellationParams::default(),
        }
    }

    /// Sets custom tessellation parameters for higher accuracy.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the signed volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be tessellated.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        Ok(TessellateSolid::new(self.solid, self.params)
            .execute(store)?
            .signed_volume())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, Point3};
    use crate::operations::creation::{MakeBox, MakeCylinder, MakePrism};
    use std::f64::consts::PI;

    #[test]
    fn box_volume() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 4.0, 5.0))
            .execute(&mut store)
            .unwrap();
        let v = Volume::new(solid).execute(&store).unwrap();
        assert!((v - 24.0).abs() < 1e-9);
    }

    #[test]
    fn courtyard_volume() {
        let mut store = TopologyStore::new();
        let sq = |x0: f64, s: f64| {
            vec![
                Point2::new(x0, x0),
                Point2::new(x0 + s, x0),
                Point2::new(x0 + s, x0 + s),
                Point2::new(x0, x0 + s),
            ]
        };
        let solid = MakePrism::new(sq(0.0, 10.0), 2.0)
            .with_holes(vec![sq(4.0, 2.0)])
            .execute(&mut store)
            .unwrap();
        let v = Volume::new(solid).execute(&store).unwrap();
        assert!((v - 192.0).abs() < 1e-9);
    }

    #[test]
    fn cylinder_volume_close_to_exact() {
        let mut store = TopologyStore::new();
        let solid = MakeCylinder::new(Point3::origin(), 1.0, 2.0)
            .execute(&mut store)
            .unwrap();
        let v = Volume::new(solid).execute(&store).unwrap();
        assert!((v - PI * 2.0).abs() / (PI * 2.0) < 0.02, "got {v}");
    }
}
