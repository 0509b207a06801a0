use crate::error::{OperationError, Result};
use crate::topology::{FaceId, SolidData, SolidId, TopologyStore};

/// Creates a solid from faces already in the store.
pub struct MakeSolid {
    faces: Vec<FaceId>,
}

impl MakeSolid {
    /// Creates a new `MakeSolid` operation.
    #[must_use]
    pub fn new(faces: Vec<FaceId>) -> Self {
        Self { faces }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if no faces are given, or a
    /// topology error if a face is not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.faces.is_empty() {
            return Err(OperationError::InvalidInput("a solid needs at least one face".into()).into());
        }
        for &face in &self.faces {
            store.face(face)?;
        }
        Ok(store.add_solid(SolidData::new(self.faces.clone())))
    }
}
