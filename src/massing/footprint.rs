use tracing::{debug, warn};

use crate::context::ModelContext;
use crate::error::Result;
use crate::math::polygon_2d::{signed_area, total_area, Region};
use crate::math::{Point2, Point3};
use crate::operations::boolean::overlay::union_regions;
use crate::operations::boolean::MergeStatus;
use crate::operations::query::RayCast;
use crate::tessellation::{TessellateFace, TessellateSolid, TriangleMesh};
use crate::topology::{FaceBoundary, FaceId, SolidId, TopologyStore};

use super::classify::{ClassifySurfaces, DEFAULT_MAX_FLOOR_ANGLE, DEFAULT_MAX_ROOF_ANGLE};

/// How a footprint area was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FootprintMethod {
    /// Half of the whole boundary projected onto the ground.
    ///
    /// Exact for vertical extrusions only: the roof and the floor each cover
    /// the footprint once. Sloped or stepped massing that never overhangs
    /// itself is approximated.
    HalfProjection,
    /// Union of the floor faces projected onto the ground, used when the
    /// building overhangs itself.
    FloorUnion(MergeStatus),
}

/// Ground footprint of one building.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintResult {
    /// Footprint area in document units squared.
    pub area: f64,
    /// Footprint outline on the ground plane.
    pub boundary: Vec<Region>,
    pub method: FootprintMethod,
}

impl FootprintResult {
    /// Whether a floor of the building looks down onto the building itself.
    #[must_use]
    pub fn is_self_intersecting(&self) -> bool {
        matches!(self.method, FootprintMethod::FloorUnion(_))
    }
}

/// Computes the ground footprint of a building solid.
///
/// A ray is cast from the center of every floor face along its outward
/// normal. If any ray meets the building again beyond the model tolerance,
/// the building overhangs itself and the footprint is the union of its
/// projected floors. Otherwise it is half of the projected boundary.
pub struct ExtractFootprint {
    solid: SolidId,
    max_floor_angle: f64,
}

impl ExtractFootprint {
    /// Creates a new `ExtractFootprint` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            max_floor_angle: DEFAULT_MAX_FLOOR_ANGLE,
        }
    }

    #[must_use]
    pub fn with_max_floor_angle(mut self, degrees: f64) -> Self {
        self.max_floor_angle = degrees;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing, cannot be tessellated, or
    /// the floor angle is out of range.
    pub fn execute(&self, store: &TopologyStore, ctx: &ModelContext) -> Result<FootprintResult> {
        let classes = ClassifySurfaces::new(self.solid)
            .with_max_roof_angle(DEFAULT_MAX_ROOF_ANGLE)
            .with_max_floor_angle(self.max_floor_angle)
            .execute(store, ctx)?;
        let mesh = TessellateSolid::new(self.solid, ctx.tessellation()).execute(store)?;

        let overhangs = classes.floors().any(|floor| {
            let (Some(center), Some(normal)) = (floor.center, floor.normal) else {
                return false;
            };
            RayCast::new(center, normal)
                .execute(&mesh)
                .iter()
                .any(|hit| hit.t > ctx.tolerance())
        });

        let result = if overhangs {
            let mut floors = Vec::new();
            for floor in classes.floors() {
                floors.extend(project_face(store, floor.face, ctx)?);
            }
            floor_union(floors, ctx.tolerance())
        } else {
            half_projection(&mesh, ctx.tolerance())
        };
        debug!(
            area = result.area,
            self_intersecting = overhangs,
            "extracted footprint"
        );
        Ok(result)
    }
}

fn ground(p: &Point3) -> Point2 {
    Point2::new(p.x, p.y)
}

fn projected_triangles(mesh: &TriangleMesh) -> impl Iterator<Item = Vec<Point2>> + '_ {
    mesh.triangles().map(|tri| tri.iter().map(ground).collect())
}

/// Ground projection of a face as regions. Vertical faces project to nothing.
fn project_face(store: &TopologyStore, face_id: FaceId, ctx: &ModelContext) -> Result<Vec<Region>> {
    let face = store.face(face_id)?;
    let min_area = ctx.tolerance() * ctx.tolerance();
    let regions = if let (Some(_), FaceBoundary::Loops { outer, holes }) = (face.plane(), &face.boundary) {
        let outer: Vec<Point2> = outer.iter().map(ground).collect();
        let holes: Vec<Vec<Point2>> = holes.iter().map(|h| h.iter().map(ground).collect()).collect();
        vec![Region::new(&outer, &holes)]
    } else {
        let mesh = TessellateFace::new(face_id, ctx.tessellation()).execute(store)?;
        projected_triangles(&mesh)
            .map(|tri| Region::new(&tri, &[]))
            .collect()
    };
    Ok(regions.into_iter().filter(|r| r.area() > min_area).collect())
}

fn floor_union(floors: Vec<Region>, tolerance: f64) -> FootprintResult {
    let merged = union_regions(&floors, tolerance);
    let unmerged_area = total_area(&floors);
    if merged.is_empty() && unmerged_area > tolerance * tolerance {
        warn!(
            floors = floors.len(),
            area = unmerged_area,
            "floor union failed; using unmerged floors"
        );
        return FootprintResult {
            area: unmerged_area,
            boundary: floors,
            method: FootprintMethod::FloorUnion(MergeStatus::FellBack {
                reason: "projected floors could not be merged".into(),
            }),
        };
    }
    FootprintResult {
        area: total_area(&merged),
        boundary: merged,
        method: FootprintMethod::FloorUnion(MergeStatus::Merged),
    }
}

fn half_projection(mesh: &TriangleMesh, tolerance: f64) -> FootprintResult {
    let min_area = tolerance * tolerance;
    let mut projected = 0.0;
    let mut cover = Vec::new();
    for tri in projected_triangles(mesh) {
        let area = signed_area(&tri).abs();
        projected += area;
        if area > min_area {
            cover.push(Region::new(&tri, &[]));
        }
    }
    FootprintResult {
        area: projected * 0.5,
        boundary: union_regions(&cover, tolerance),
        method: FootprintMethod::HalfProjection,
    }
}
