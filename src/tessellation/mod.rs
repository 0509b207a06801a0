mod tessellate_face;
mod tessellate_solid;

pub use tessellate_face::TessellateFace;
pub use tessellate_solid::TessellateSolid;

use crate::error::{Result, TessellationError};
use crate::math::{Point3, Vector3};

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TessellationParams {
    /// Maximum chord deviation from curved geometry.
    pub tolerance: f64,
    /// Minimum number of segments around a curved face.
    pub min_segments: usize,
    /// Maximum number of segments around a curved face.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

impl TessellationParams {
    /// Checks that the parameters describe a usable subdivision.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] for a non-positive
    /// tolerance or an empty segment range.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(TessellationError::InvalidParameters(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }
        if self.min_segments < 3 || self.max_segments < self.min_segments {
            return Err(TessellationError::InvalidParameters(format!(
                "segment range {}..={} is invalid",
                self.min_segments, self.max_segments
            ))
            .into());
        }
        Ok(())
    }
}

/// A triangle mesh approximation of one or more faces.
///
/// Triangles wind counter-clockwise about the outward face normal.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Appends another mesh, re-indexing its triangles.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Iterates over triangle corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.iter().map(|&[a, b, c]| {
            [
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            ]
        })
    }

    /// Total surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Sum of the oriented triangle areas; zero for a closed surface.
    #[must_use]
    pub fn vector_area(&self) -> Vector3 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)) * 0.5)
            .sum()
    }

    /// Enclosed volume by the divergence theorem, positive when triangles face outward.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }
}
