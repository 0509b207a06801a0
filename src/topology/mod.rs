pub mod face;
pub mod solid;

pub use face::{FaceBoundary, FaceData, FaceId, FaceSurface};
pub use solid::{SolidData, SolidId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Arena that owns the faces and solids of a massing model.
///
/// Entities reference each other via typed IDs (generational indices), so a
/// solid is a list of [`FaceId`]s and derived faces can be added without
/// invalidating existing handles.
#[derive(Debug, Default)]
pub struct TopologyStore {
    faces: SlotMap<FaceId, FaceData>,
    solids: SlotMap<SolidId, SolidData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Number of faces in the store.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // --- Solid operations ---

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Looks up every face of a solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its faces is missing.
    pub fn solid_faces(&self, id: SolidId) -> Result<Vec<(FaceId, &FaceData)>, TopologyError> {
        self.solid(id)?
            .faces
            .iter()
            .map(|&fid| self.face(fid).map(|f| (fid, f)))
            .collect()
    }
}
