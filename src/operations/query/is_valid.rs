use crate::tessellation::{TessellateSolid, TessellationParams};
use crate::topology::{SolidId, TopologyStore};

/// Checks that a solid is a closed, outward-facing volume.
///
/// The tessellated boundary must have a vector area that vanishes relative
/// to its total area and a positive enclosed volume.
pub struct IsValid {
    solid: SolidId,
    params: TessellationParams,
    closure_tolerance: f64,
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: TessellationParams::default(),
            closure_tolerance: 1e-3,
        }
    }

    /// Sets the tessellation used for the check.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the validation, returning `true` if the solid is valid.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> bool {
        let Ok(mesh) = TessellateSolid::new(self.solid, self.params).execute(store) else {
            return false;
        };
        let area = mesh.area();
        area > 0.0
            && mesh.vector_area().norm() <= self.closure_tolerance * area
            && mesh.signed_volume() > 0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakeCylinder, MakePlanarFace, MakeSolid};

    #[test]
    fn box_is_valid() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0))
            .execute(&mut store)
            .unwrap();
        assert!(IsValid::new(solid).execute(&store));
    }

    #[test]
    fn cylinder_is_valid() {
        let mut store = TopologyStore::new();
        let solid = MakeCylinder::new(Point3::origin(), 4.0, 3.0)
            .execute(&mut store)
            .unwrap();
        assert!(IsValid::new(solid).execute(&store));
    }

    #[test]
    fn open_shell_is_invalid() {
        let mut store = TopologyStore::new();
        let roof = MakePlanarFace::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ])
        .execute(&mut store)
        .unwrap();
        let solid = MakeSolid::new(vec![roof]).execute(&mut store).unwrap();
        assert!(!IsValid::new(solid).execute(&store));
    }
}
