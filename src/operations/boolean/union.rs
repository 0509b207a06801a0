use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::surface::Plane;
use crate::math::polygon_2d::Region;
use crate::math::polygon_3d::newell_normal;
use crate::math::{Point2, Point3};
use crate::operations::query::Aabb;
use crate::tessellation::{TessellateFace, TessellateSolid, TessellationParams, TriangleMesh};
use crate::topology::{FaceBoundary, FaceData, SolidData, SolidId, TopologyStore};

use super::overlay::subtract_regions;
use super::section::PlaneSection;

/// Relative vector-area residue above which a mesh is treated as open.
const CLOSURE_TOLERANCE: f64 = 1e-3;

/// Computes the boolean union of any number of closed solids.
///
/// The result is a single solid made of new faces covering the boundary of
/// the union. Each face is kept minus the parts that lie inside another
/// solid or that duplicate a same-facing coplanar face of an earlier solid.
/// Faces no other solid comes near are copied unchanged; the others are
/// rebuilt as planar pieces, with curved faces split into their
/// tessellation facets first. Disjoint inputs give a solid with several
/// separate shells.
pub struct Union {
    solids: Vec<SolidId>,
    tolerance: f64,
    params: TessellationParams,
}

impl Union {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(solids: Vec<SolidId>) -> Self {
        Self {
            solids,
            tolerance: 1e-6,
            params: TessellationParams::default(),
        }
    }

    /// Sets the distance under which surfaces count as touching.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the tessellation used for sections and curved faces.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the union, creating the result solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for an empty input or a
    /// non-positive tolerance, and [`OperationError::Failed`] if an input is
    /// not a closed, outward-facing volume or nothing of the boundary remains.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.solids.is_empty() {
            return Err(OperationError::InvalidInput("union needs at least one solid".into()).into());
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "union tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }

        let mut meshes = Vec::with_capacity(self.solids.len());
        let mut boxes = Vec::with_capacity(self.solids.len());
        for (index, &solid) in self.solids.iter().enumerate() {
            let mesh = TessellateSolid::new(solid, self.params).execute(store)?;
            check_closed(&mesh, index)?;
            let bounds = Aabb::from_mesh(&mesh).ok_or_else(|| {
                OperationError::Failed(format!("solid {index} has no geometry"))
            })?;
            meshes.push(mesh);
            boxes.push(bounds);
        }

        let mut pieces: Vec<FaceData> = Vec::new();
        for (index, &solid) in self.solids.iter().enumerate() {
            for &face_id in &store.solid(solid)?.faces {
                let face = store.face(face_id)?;
                let face_mesh = TessellateFace::new(face_id, self.params).execute(store)?;
                let Some(face_box) = Aabb::from_mesh(&face_mesh) else {
                    continue;
                };
                let neighbours: Vec<usize> = (0..self.solids.len())
                    .filter(|&other| other != index && boxes[other].overlaps(&face_box, self.tolerance))
                    .collect();

                if neighbours.is_empty() {
                    pieces.push(face.clone());
                    continue;
                }

                for (plane, region) in facets(face, &face_mesh)? {
                    let mut clip = Vec::new();
                    for &other in &neighbours {
                        let section = PlaneSection::compute(&meshes[other], &plane, self.tolerance);
                        clip.extend(section.interior);
                        if other < index {
                            clip.extend(section.coplanar);
                        }
                    }
                    let kept = if clip.is_empty() {
                        vec![region]
                    } else {
                        subtract_regions(std::slice::from_ref(&region), &clip, self.tolerance)
                    };
                    pieces.extend(kept.iter().map(|r| lift_region(&plane, r)));
                }
            }
        }

        if pieces.is_empty() {
            return Err(OperationError::Failed("union left no boundary".into()).into());
        }
        debug!(
            solids = self.solids.len(),
            faces = pieces.len(),
            "union boundary assembled"
        );
        let faces = pieces.into_iter().map(|f| store.add_face(f)).collect();
        Ok(store.add_solid(SolidData::new(faces)))
    }
}

fn check_closed(mesh: &TriangleMesh, index: usize) -> Result<()> {
    let area = mesh.area();
    if area <= 0.0 || mesh.vector_area().norm() > CLOSURE_TOLERANCE * area {
        return Err(OperationError::Failed(format!("solid {index} is not closed")).into());
    }
    if mesh.signed_volume() <= 0.0 {
        return Err(OperationError::Failed(format!("solid {index} faces inward")).into());
    }
    Ok(())
}

/// Splits a face into planar pieces, each with a plane whose normal is the
/// outward face normal and the piece outline in that plane's frame.
fn facets(face: &FaceData, mesh: &TriangleMesh) -> Result<Vec<(Plane, Region)>> {
    if let (Some(surface), FaceBoundary::Loops { outer, holes }) = (face.plane(), &face.boundary) {
        let normal = if face.same_sense {
            *surface.plane_normal()
        } else {
            -*surface.plane_normal()
        };
        let plane = Plane::from_normal(*surface.origin(), normal)?;
        let project = |loop_: &Vec<Point3>| loop_.iter().map(|p| plane.project(p)).collect::<Vec<_>>();
        let holes: Vec<_> = holes.iter().map(project).collect();
        let region = Region::new(&project(outer), &holes);
        return Ok(vec![(plane, region)]);
    }

    let mut out = Vec::with_capacity(mesh.triangle_count());
    for tri in mesh.triangles() {
        let Ok(normal) = newell_normal(&tri) else {
            continue;
        };
        let plane = Plane::from_normal(tri[0], normal)?;
        let outline: Vec<_> = tri.iter().map(|p| plane.project(p)).collect();
        out.push((plane, Region::new(&outline, &[])));
    }
    Ok(out)
}

fn lift_region(plane: &Plane, region: &Region) -> FaceData {
    let lift = |contour: &Vec<Point2>| -> Vec<Point3> { contour.iter().map(|p| plane.lift(p)).collect() };
    FaceData::planar(
        plane.clone(),
        lift(&region.outer),
        region.holes.iter().map(lift).collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeBox, MakeCylinder, MakePlanarFace, MakeSolid};
    use crate::operations::query::{Area, IsValid, Volume};
    use approx::assert_relative_eq;

    fn boxed(store: &mut TopologyStore, lo: (f64, f64, f64), hi: (f64, f64, f64)) -> SolidId {
        MakeBox::new(Point3::new(lo.0, lo.1, lo.2), Point3::new(hi.0, hi.1, hi.2))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn adjacent_boxes_drop_the_shared_wall() {
        let mut store = TopologyStore::new();
        let a = boxed(&mut store, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let b = boxed(&mut store, (10.0, 0.0, 0.0), (20.0, 10.0, 10.0));
        let merged = Union::new(vec![a, b]).execute(&mut store).unwrap();
        // 2 * (20*10) + 2 * (10*10) + 2 * (20*10)
        assert_relative_eq!(Area::new(merged).execute(&store).unwrap(), 1000.0, epsilon = 1e-6);
        assert!(IsValid::new(merged).execute(&store));
    }

    #[test]
    fn overlapping_boxes_give_union_volume() {
        let mut store = TopologyStore::new();
        let a = boxed(&mut store, (0.0, 0.0, 0.0), (2.0, 2.0, 2.0));
        let b = boxed(&mut store, (1.0, 1.0, 1.0), (3.0, 3.0, 3.0));
        let merged = Union::new(vec![a, b]).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(merged).execute(&store).unwrap(), 15.0, epsilon = 1e-6);
        assert_relative_eq!(Area::new(merged).execute(&store).unwrap(), 42.0, epsilon = 1e-6);
    }

    #[test]
    fn identical_boxes_keep_one_copy() {
        let mut store = TopologyStore::new();
        let a = boxed(&mut store, (0.0, 0.0, 0.0), (1.0, 2.0, 3.0));
        let b = boxed(&mut store, (0.0, 0.0, 0.0), (1.0, 2.0, 3.0));
        let merged = Union::new(vec![a, b]).execute(&mut store).unwrap();
        assert_relative_eq!(Area::new(merged).execute(&store).unwrap(), 22.0, epsilon = 1e-6);
    }

    #[test]
    fn disjoint_boxes_copy_every_face() {
        let mut store = TopologyStore::new();
        let a = boxed(&mut store, (0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        let b = boxed(&mut store, (5.0, 0.0, 0.0), (6.0, 1.0, 1.0));
        let merged = Union::new(vec![a, b]).execute(&mut store).unwrap();
        assert_eq!(store.solid(merged).unwrap().faces.len(), 12);
    }

    #[test]
    fn tower_beside_box_keeps_curved_wall_area() {
        let mut store = TopologyStore::new();
        let tower = MakeCylinder::new(Point3::new(-5.0, 0.0, 0.0), 1.0, 4.0)
            .execute(&mut store)
            .unwrap();
        // Overlaps the tower's bounding box but not the tower itself.
        let slab = boxed(&mut store, (-4.05, 0.95, 0.0), (0.0, 3.0, 1.0));
        let before = Area::new(tower).execute(&store).unwrap();
        let merged = Union::new(vec![tower, slab]).execute(&mut store).unwrap();
        let after = Area::new(merged).execute(&store).unwrap();
        let slab_area = 2.0 * (4.05 * 2.05 + 4.05 + 2.05);
        // The faceted wall loses only the chord sag.
        assert!((after - before - slab_area).abs() < 0.05 * before, "{after} vs {before}");
    }

    #[test]
    fn open_input_is_rejected() {
        let mut store = TopologyStore::new();
        let face = MakePlanarFace::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .execute(&mut store)
        .unwrap();
        let open = MakeSolid::new(vec![face]).execute(&mut store).unwrap();
        assert!(Union::new(vec![open]).execute(&mut store).is_err());
        assert!(Union::new(Vec::new()).execute(&mut store).is_err());
    }
}
