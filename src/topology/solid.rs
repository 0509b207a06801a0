use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the topology store.
    pub struct SolidId;
}

/// A closed building volume bounded by its faces.
///
/// Faces are expected to be oriented with normals pointing out of the volume.
#[derive(Debug, Clone, Default)]
pub struct SolidData {
    /// Boundary faces of the solid.
    pub faces: Vec<FaceId>,
}

impl SolidData {
    #[must_use]
    pub fn new(faces: Vec<FaceId>) -> Self {
        Self { faces }
    }
}
