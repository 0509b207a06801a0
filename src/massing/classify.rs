use tracing::{debug, warn};

use crate::context::ModelContext;
use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::operations::query::{FaceArea, FaceCenter};
use crate::parameters::validate::in_range;
use crate::topology::{FaceId, SolidId, TopologyStore};

/// Default largest angle from straight up at which a face still counts as roof.
pub const DEFAULT_MAX_ROOF_ANGLE: f64 = 45.0;
/// Default largest angle from straight down at which a face still counts as floor.
pub const DEFAULT_MAX_FLOOR_ANGLE: f64 = 60.0;

/// Role of a boundary face in a building's massing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceClass {
    Roof,
    Floor,
    Wall,
}

/// Classifies a normal by its angle to zenith in degrees.
///
/// Roof wins over floor when the two ranges overlap.
#[must_use]
pub fn classify_angle(angle_to_zenith: f64, max_roof_angle: f64, max_floor_angle: f64) -> SurfaceClass {
    if angle_to_zenith < max_roof_angle || angle_to_zenith > 360.0 - max_roof_angle {
        SurfaceClass::Roof
    } else if 180.0 - max_floor_angle < angle_to_zenith && angle_to_zenith < 180.0 + max_floor_angle
    {
        SurfaceClass::Floor
    } else {
        SurfaceClass::Wall
    }
}

/// One face of a solid with its class and orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFace {
    pub face: FaceId,
    pub class: SurfaceClass,
    /// Representative point; `None` for a degenerate face.
    pub center: Option<Point3>,
    /// Outward unit normal at `center`; `None` for a degenerate face.
    pub normal: Option<Vector3>,
    /// Degrees between the normal and +Z, in `[0, 180]`.
    pub angle_to_zenith: f64,
    /// `(90 - angle_to_zenith) / 90`: 1 facing up, 0 vertical, -1 facing down.
    pub steepness: f64,
}

impl ClassifiedFace {
    /// Whether the face had no usable normal and was filed as a roof.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal.is_none()
    }
}

/// Partition of a solid's faces into roofs, floors and walls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedFaceSet {
    faces: Vec<ClassifiedFace>,
}

impl ClassifiedFaceSet {
    /// All faces in solid order.
    #[must_use]
    pub fn faces(&self) -> &[ClassifiedFace] {
        &self.faces
    }

    pub fn of_class(&self, class: SurfaceClass) -> impl Iterator<Item = &ClassifiedFace> {
        self.faces.iter().filter(move |f| f.class == class)
    }

    pub fn roofs(&self) -> impl Iterator<Item = &ClassifiedFace> {
        self.of_class(SurfaceClass::Roof)
    }

    pub fn floors(&self) -> impl Iterator<Item = &ClassifiedFace> {
        self.of_class(SurfaceClass::Floor)
    }

    pub fn walls(&self) -> impl Iterator<Item = &ClassifiedFace> {
        self.of_class(SurfaceClass::Wall)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Sorts the faces of a solid into roofs, floors and walls by the angle of
/// their outward normal to the world up axis.
///
/// Faces without a usable normal (no area, or a failed center evaluation)
/// are kept and filed as roofs at 0°, with a warning.
pub struct ClassifySurfaces {
    solid: SolidId,
    max_roof_angle: f64,
    max_floor_angle: f64,
}

impl ClassifySurfaces {
    /// Creates a new `ClassifySurfaces` query with the default angles.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
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

    /// Executes the classification.
    ///
    /// # Errors
    ///
    /// Returns a validation error if an angle is outside `[0, 180]`, or a
    /// topology error if the solid or one of its faces is missing.
    pub fn execute(&self, store: &TopologyStore, ctx: &ModelContext) -> Result<ClassifiedFaceSet> {
        in_range(self.max_roof_angle, 0.0, 180.0, "max_roof_angle")?;
        in_range(self.max_floor_angle, 0.0, 180.0, "max_floor_angle")?;

        let min_area = ctx.tolerance() * ctx.tolerance();
        let mut faces = Vec::new();
        for (face, _) in store.solid_faces(self.solid)? {
            let area = FaceArea::new(face).execute(store)?;
            let frame = if area < min_area {
                None
            } else {
                match FaceCenter::new(face)
                    .with_params(ctx.tessellation())
                    .execute(store)
                {
                    Ok(frame) => Some(frame),
                    Err(err) => {
                        warn!(?face, error = %err, "face center failed");
                        None
                    }
                }
            };

            let classified = match frame {
                Some(frame) => {
                    let angle = frame.normal.z.clamp(-1.0, 1.0).acos().to_degrees();
                    ClassifiedFace {
                        face,
                        class: classify_angle(angle, self.max_roof_angle, self.max_floor_angle),
                        center: Some(frame.center),
                        normal: Some(frame.normal),
                        angle_to_zenith: angle,
                        steepness: (90.0 - angle) / 90.0,
                    }
                }
                None => {
                    warn!(?face, area, "degenerate face classified as roof");
                    ClassifiedFace {
                        face,
                        class: SurfaceClass::Roof,
                        center: None,
                        normal: None,
                        angle_to_zenith: 0.0,
                        steepness: 1.0,
                    }
                }
            };
            faces.push(classified);
        }

        let set = ClassifiedFaceSet { faces };
        debug!(
            roofs = set.roofs().count(),
            floors = set.floors().count(),
            walls = set.walls().count(),
            "classified faces"
        );
        Ok(set)
    }
}
