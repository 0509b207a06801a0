use tracing::{debug, warn};

use crate::context::ModelContext;
use crate::error::{OperationError, Result};
use crate::operations::boolean::{MergeStatus, Union};
use crate::operations::query::FaceArea;
use crate::topology::{FaceId, SolidId, TopologyStore};

use super::classify::{ClassifySurfaces, DEFAULT_MAX_FLOOR_ANGLE, DEFAULT_MAX_ROOF_ANGLE};

/// Exposed wall area of a group of buildings.
#[derive(Debug, Clone, PartialEq)]
pub struct FacadeResult {
    /// Wall area in document units squared.
    pub area: f64,
    /// Newly created wall faces, owned by the store.
    pub surfaces: Vec<FaceId>,
    /// Whether the buildings were merged before measuring.
    pub union: MergeStatus,
}

/// Measures the facade area of a group of buildings.
///
/// The buildings are merged first so that party walls between touching
/// buildings are not counted. If the merge fails, each building is measured
/// as given and the result records the fallback.
pub struct ExtractFacades {
    solids: Vec<SolidId>,
    max_roof_angle: f64,
    max_floor_angle: f64,
}

impl ExtractFacades {
    /// Creates a new `ExtractFacades` query with the default angles.
    #[must_use]
    pub fn new(solids: Vec<SolidId>) -> Self {
        Self {
            solids,
            max_roof_angle: DEFAULT_MAX_ROOF_ANGLE,
            max_floor_angle: DEFAULT_MAX_FLOOR_ANGLE,
        }
    }

    #[must_use]
    pub fn with_max_roof_angle(mut self, degrees: f64) -> Self {
        self.max_roof_angle = degrees;
        self
    }

    #[must_use]
    pub fn with_max_floor_angle(mut self, degrees: f64) -> Self {
        self.max_floor_angle = degrees;
        self
    }

    /// Executes the query, adding the merged solid (if any) and the wall
    /// faces to the store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for an empty input, or an
    /// error if a solid cannot be classified.
    pub fn execute(&self, store: &mut TopologyStore, ctx: &ModelContext) -> Result<FacadeResult> {
        if self.solids.is_empty() {
            return Err(OperationError::InvalidInput("no solids to measure".into()).into());
        }

        let merged = Union::new(self.solids.clone())
            .with_tolerance(ctx.tolerance())
            .with_params(ctx.tessellation())
            .execute(store);
        let (targets, union) = match merged {
            Ok(solid) => (vec![solid], MergeStatus::Merged),
            Err(err) => {
                warn!(
                    solids = self.solids.len(),
                    error = %err,
                    "union failed; measuring buildings separately"
                );
                (
                    self.solids.clone(),
                    MergeStatus::FellBack {
                        reason: err.to_string(),
                    },
                )
            }
        };

        let mut area = 0.0;
        let mut surfaces = Vec::new();
        for &solid in &targets {
            let classes = ClassifySurfaces::new(solid)
                .with_max_roof_angle(self.max_roof_angle)
                .with_max_floor_angle(self.max_floor_angle)
                .execute(store, ctx)?;
            for wall in classes.walls() {
                area += FaceArea::new(wall.face).execute(store)?;
                let face = if union.is_merged() {
                    wall.face
                } else {
                    let copy = store.face(wall.face)?.clone();
                    store.add_face(copy)
                };
                surfaces.push(face);
            }
        }
        debug!(area, walls = surfaces.len(), merged = union.is_merged(), "extracted facades");

        Ok(FacadeResult {
            area,
            surfaces,
            union,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakePlanarFace, MakeSolid};
    use approx::assert_relative_eq;

    fn boxed(store: &mut TopologyStore, lo: (f64, f64, f64), hi: (f64, f64, f64)) -> SolidId {
        MakeBox::new(Point3::new(lo.0, lo.1, lo.2), Point3::new(hi.0, hi.1, hi.2))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn single_box_walls() {
        let mut store = TopologyStore::new();
        let solid = boxed(&mut store, (0.0, 0.0, 0.0), (10.0, 10.0, 30.0));
        let facade = ExtractFacades::new(vec![solid])
            .execute(&mut store, &ModelContext::default())
            .unwrap();
        assert!(facade.union.is_merged());
        assert_eq!(facade.surfaces.len(), 4);
        assert_relative_eq!(facade.area, 1200.0, epsilon = 1e-6);
    }

    #[test]
    fn party_wall_is_not_counted() {
        let mut store = TopologyStore::new();
        let a = boxed(&mut store, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let b = boxed(&mut store, (10.0, 0.0, 0.0), (20.0, 10.0, 10.0));
        let facade = ExtractFacades::new(vec![a, b])
            .execute(&mut store, &ModelContext::default())
            .unwrap();
        assert!(facade.union.is_merged());
        // 800 unmerged, minus the two 100 m2 sides of the shared wall.
        assert_relative_eq!(facade.area, 600.0, epsilon = 1e-6);
    }

    #[test]
    fn open_solid_falls_back_to_copies() {
        let mut store = TopologyStore::new();
        let wall = MakePlanarFace::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ])
        .execute(&mut store)
        .unwrap();
        let open = MakeSolid::new(vec![wall]).execute(&mut store).unwrap();
        let facade = ExtractFacades::new(vec![open])
            .execute(&mut store, &ModelContext::default())
            .unwrap();
        assert!(matches!(facade.union, MergeStatus::FellBack { .. }));
        assert_relative_eq!(facade.area, 12.0, epsilon = 1e-9);
        assert_eq!(facade.surfaces.len(), 1);
        assert_ne!(facade.surfaces[0], wall);
    }

    #[test]
    fn empty_input_is_an_error() {
        let mut store = TopologyStore::new();
        assert!(ExtractFacades::new(Vec::new())
            .execute(&mut store, &ModelContext::default())
            .is_err());
    }
}
