use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::geometry::surface::{Plane, Surface, SurfaceDomain};
use crate::math::{Point3, Vector3};
use crate::topology::{FaceBoundary, FaceData, FaceId, FaceSurface, TopologyStore};

use super::{TessellationParams, TriangleMesh};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Tessellates a face into a triangle mesh.
pub struct TessellateFace {
    face: FaceId,
    params: TessellationParams,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId, params: TessellationParams) -> Self {
        Self { face, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or cannot be triangulated.
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh> {
        tessellate_face_data(store.face(self.face)?, &self.params)
    }
}

/// Tessellates face data that need not live in a store.
pub(crate) fn tessellate_face_data(
    face: &FaceData,
    params: &TessellationParams,
) -> Result<TriangleMesh> {
    match (&face.surface, &face.boundary) {
        (FaceSurface::Plane(plane), FaceBoundary::Loops { outer, holes }) => {
            tessellate_plane(plane, outer, holes, face.same_sense)
        }
        (FaceSurface::Cylinder(cyl), FaceBoundary::Patch(domain)) => {
            let n_u = adaptive_angular_segments(cyl.radius(), domain.u_span().abs(), params);
            // Straight along the axis, so a single row is exact.
            tessellate_uv_grid(cyl, domain, n_u, 1, face.same_sense)
        }
        (FaceSurface::Plane(plane), FaceBoundary::Patch(domain)) => {
            if !domain.is_bounded() {
                return Err(TessellationError::Failed(
                    "planar patch has an unbounded domain".into(),
                )
                .into());
            }
            tessellate_uv_grid(plane, domain, 1, 1, face.same_sense)
        }
        (FaceSurface::Cylinder(_), FaceBoundary::Loops { .. }) => Err(TessellationError::Failed(
            "cylindrical faces must be trimmed by a parameter patch".into(),
        )
        .into()),
    }
}

/// Tessellates a planar face using CDT.
#[allow(clippy::cast_possible_truncation)]
fn tessellate_plane(
    plane: &Plane,
    outer: &[Point3],
    holes: &[Vec<Point3>],
    same_sense: bool,
) -> Result<TriangleMesh> {
    let project = |p: &Point3| {
        let uv = plane.project(p);
        SpadePoint2::new(uv.x, uv.y)
    };

    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, &outer.iter().map(project).collect::<Vec<_>>())?;
    for hole in holes {
        insert_constraint_loop(&mut cdt, &hole.iter().map(project).collect::<Vec<_>>())?;
    }

    let interior = classify_interior_faces(&cdt);
    let normal = if same_sense {
        *plane.plane_normal()
    } else {
        -*plane.plane_normal()
    };

    let mut mesh = TriangleMesh::default();
    let mut vertex_map: HashMap<usize, u32> = HashMap::new();

    for face_handle in cdt.inner_faces() {
        if !interior.contains(&face_handle.fix().index()) {
            continue;
        }
        let mut tri = [0u32; 3];
        for (slot, vh) in face_handle.vertices().iter().enumerate() {
            let idx = vh.fix().index();
            tri[slot] = *vertex_map.entry(idx).or_insert_with(|| {
                let pos = vh.position();
                mesh.vertices
                    .push(plane.lift(&crate::math::Point2::new(pos.x, pos.y)));
                mesh.normals.push(normal);
                (mesh.vertices.len() - 1) as u32
            });
        }
        // Spade reports inner faces counter-clockwise in the plane frame.
        if !same_sense {
            tri.swap(1, 2);
        }
        mesh.indices.push(tri);
    }

    Ok(mesh)
}

/// Generates `(n_u + 1) * (n_v + 1)` vertices over the parameter rectangle,
/// then splits each quad cell into two triangles.
#[allow(clippy::cast_possible_truncation)]
fn tessellate_uv_grid(
    surface: &dyn Surface,
    domain: &SurfaceDomain,
    n_u: usize,
    n_v: usize,
    same_sense: bool,
) -> Result<TriangleMesh> {
    let mut mesh = TriangleMesh::default();
    let rows = n_v + 1;
    let cols = n_u + 1;
    mesh.vertices.reserve(rows * cols);
    mesh.normals.reserve(rows * cols);
    mesh.indices.reserve(n_u * n_v * 2);

    for iv in 0..rows {
        #[allow(clippy::cast_precision_loss)]
        let v = domain.v_min + domain.v_span() * iv as f64 / n_v as f64;
        for iu in 0..cols {
            #[allow(clippy::cast_precision_loss)]
            let u = domain.u_min + domain.u_span() * iu as f64 / n_u as f64;
            let n = surface.normal(u, v).unwrap_or_else(|_| Vector3::z());
            mesh.vertices.push(surface.evaluate(u, v)?);
            mesh.normals.push(if same_sense { n } else { -n });
        }
    }

    for iv in 0..n_v {
        for iu in 0..n_u {
            let i00 = (iv * cols + iu) as u32;
            let i10 = (iv * cols + iu + 1) as u32;
            let i01 = ((iv + 1) * cols + iu) as u32;
            let i11 = ((iv + 1) * cols + iu + 1) as u32;
            if same_sense {
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            } else {
                mesh.indices.push([i00, i11, i10]);
                mesh.indices.push([i00, i01, i11]);
            }
        }
    }

    Ok(mesh)
}

/// Number of segments for an angular sweep so the chord error stays within tolerance.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn adaptive_angular_segments(
    radius: f64,
    sweep: f64,
    params: &TessellationParams,
) -> usize {
    if radius > params.tolerance {
        let half_angle = (1.0 - params.tolerance / radius).acos();
        let computed = (sweep / (2.0 * half_angle)).ceil() as usize;
        computed.clamp(params.min_segments, params.max_segments)
    } else {
        params.min_segments
    }
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed(
                "boundary loops cross each other".into(),
            )
            .into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the boundary using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::Cylinder;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn planar(outer: Vec<Point3>, holes: Vec<Vec<Point3>>) -> FaceData {
        FaceData::planar(Plane::world_xy(), outer, holes)
    }

    #[test]
    fn square_produces_2_triangles() {
        let face = planar(
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
            Vec::new(),
        );
        let mesh = tessellate_face_data(&face, &TessellationParams::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_relative_eq!(mesh.area(), 1.0, epsilon = 1e-12);
        assert!(mesh.vector_area().z > 0.0);
    }

    #[test]
    fn l_shape_concave_tessellates() {
        let face = planar(
            vec![
                p(0.0, 0.0),
                p(2.0, 0.0),
                p(2.0, 1.0),
                p(1.0, 1.0),
                p(1.0, 2.0),
                p(0.0, 2.0),
            ],
            Vec::new(),
        );
        let mesh = tessellate_face_data(&face, &TessellationParams::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert_relative_eq!(mesh.area(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn face_with_hole_excludes_interior() {
        let face = planar(
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            vec![vec![p(3.0, 3.0), p(3.0, 7.0), p(7.0, 7.0), p(7.0, 3.0)]],
        );
        let mesh = tessellate_face_data(&face, &TessellationParams::default()).unwrap();
        assert_relative_eq!(mesh.area(), 84.0, epsilon = 1e-9);
    }

    #[test]
    fn reversed_face_flips_winding() {
        let mut face = planar(
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
            Vec::new(),
        );
        face.same_sense = false;
        let mesh = tessellate_face_data(&face, &TessellationParams::default()).unwrap();
        assert!(mesh.vector_area().z < 0.0);
        assert!(mesh.normals.iter().all(|n| n.z < 0.0));
    }

    #[test]
    fn crossing_loops_are_rejected() {
        let face = planar(
            vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)],
            vec![vec![p(2.0, 2.0), p(6.0, 2.0), p(6.0, 3.0), p(2.0, 3.0)]],
        );
        assert!(tessellate_face_data(&face, &TessellationParams::default()).is_err());
    }

    #[test]
    fn cylinder_patch_tessellates_outward() {
        let cyl = Cylinder::vertical(Point3::origin(), 2.0).unwrap();
        let face = FaceData::patch(
            FaceSurface::Cylinder(cyl),
            SurfaceDomain::new(0.0, TAU, 0.0, 5.0),
            true,
        );
        let params = TessellationParams::default();
        let mesh = tessellate_face_data(&face, &params).unwrap();
        let n_u = adaptive_angular_segments(2.0, TAU, &params);
        assert_eq!(mesh.triangle_count(), 2 * n_u);
        // Chords sit inside the true surface.
        let exact = TAU * 2.0 * 5.0;
        assert!(mesh.area() < exact && mesh.area() > exact * 0.99);
        for ([a, b, c], [ia, _, _]) in mesh.triangles().zip(&mesh.indices) {
            let n = (b - a).cross(&(c - a));
            let radial = mesh.vertices[*ia as usize].coords.xy();
            assert!(n.xy().dot(&radial) > 0.0);
        }
    }

    #[test]
    fn angular_segments_clamp() {
        let params = TessellationParams::default();
        assert_eq!(adaptive_angular_segments(0.001, TAU, &params), params.min_segments);
        assert_eq!(adaptive_angular_segments(1e6, TAU, &params), params.max_segments);
    }
}
