use crate::error::{GeometryError, Result};
use crate::math::polygon_3d::extents;
use crate::math::{Point3, Vector3};
use crate::tessellation::{TessellateSolid, TessellationParams, TriangleMesh};
use crate::topology::{SolidId, TopologyStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Bounding box of a set of points, or `None` if the set is empty.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        extents(points).map(|(min, max)| Self { min, max })
    }

    /// Bounding box of a mesh's vertices.
    #[must_use]
    pub fn from_mesh(mesh: &TriangleMesh) -> Option<Self> {
        Self::from_points(&mesh.vertices)
    }

    /// Size along each axis.
    #[must_use]
    pub fn diagonal(&self) -> Vector3 {
        self.max - self.min
    }

    /// Vertical extent, used as the height of a building volume.
    #[must_use]
    pub fn extent_z(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Returns `true` if the boxes overlap once each is grown by `margin`.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb, margin: f64) -> bool {
        (0..3).all(|i| self.min[i] - margin <= other.max[i] && other.min[i] - margin <= self.max[i])
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}

/// Computes the axis-aligned bounding box of a solid from its tessellation.
pub struct BoundingBox {
    solid: SolidId,
    params: TessellationParams,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: TessellationParams::default(),
        }
    }

    /// Sets custom tessellation parameters.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be tessellated or has no vertices.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let mesh = TessellateSolid::new(self.solid, self.params).execute(store)?;
        Aabb::from_mesh(&mesh)
            .ok_or_else(|| GeometryError::Degenerate("solid has no vertices".into()).into())
    }
}
