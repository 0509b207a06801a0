use crate::geometry::surface::Plane;
use crate::math::intersect_3d::{classify_point_plane, clip_polygon_to_front, PointPlaneClassification};
use crate::math::polygon_2d::signed_area;
use crate::math::Point2;
use crate::tessellation::TriangleMesh;

/// Cross-section of a closed mesh by a plane, as contours in the plane's
/// 2D frame.
///
/// `interior` holds the signed projections of every triangle part in front
/// of the plane. For a closed, outward-facing mesh their winding numbers sum
/// to one inside the section and to zero elsewhere, so filling them with the
/// non-zero rule yields the section. Triangles lying in the plane are left
/// out; the remaining ones still close up the section, which makes a face
/// abutting the plane from the front count as covered.
///
/// `coplanar` holds the triangles lying in the plane and facing the same way
/// as its normal.
#[derive(Debug, Clone, Default)]
pub struct PlaneSection {
    pub interior: Vec<Vec<Point2>>,
    pub coplanar: Vec<Vec<Point2>>,
}

impl PlaneSection {
    /// Computes the section. `eps` is the distance under which a vertex
    /// counts as lying in the plane.
    #[must_use]
    pub fn compute(mesh: &TriangleMesh, plane: &Plane, eps: f64) -> Self {
        let mut section = Self::default();
        let min_area = eps * eps;

        for tri in mesh.triangles() {
            let on_plane = tri
                .iter()
                .all(|p| classify_point_plane(p, plane, eps) == PointPlaneClassification::On);
            if on_plane {
                let contour: Vec<Point2> = tri.iter().map(|p| plane.project(p)).collect();
                if signed_area(&contour) > min_area {
                    section.coplanar.push(contour);
                }
                continue;
            }

            let clipped = clip_polygon_to_front(&tri, plane, eps);
            if clipped.len() < 3 {
                continue;
            }
            let contour: Vec<Point2> = clipped.iter().map(|p| plane.project(p)).collect();
            if signed_area(&contour).abs() > min_area {
                section.interior.push(contour);
            }
        }

        section
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interior.is_empty() && self.coplanar.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::{total_area, Region};
    use crate::math::{Point3, Vector3};
    use crate::operations::boolean::overlay::subtract_regions;
    use crate::operations::creation::MakeBox;
    use crate::tessellation::{TessellateSolid, TessellationParams};
    use crate::topology::TopologyStore;
    use approx::assert_relative_eq;

    fn box_mesh(lo: Point3, hi: Point3) -> TriangleMesh {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(lo, hi).execute(&mut store).unwrap();
        TessellateSolid::new(solid, TessellationParams::default())
            .execute(&store)
            .unwrap()
    }

    /// Area of a large test square left after removing the section.
    fn covered_area(section: &PlaneSection) -> f64 {
        let square: Vec<Point2> = [(-50.0, -50.0), (50.0, -50.0), (50.0, 50.0), (-50.0, 50.0)]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect();
        let square = Region::new(&square, &[]);
        let left = subtract_regions(std::slice::from_ref(&square), &section.interior, 1e-6);
        square.area() - total_area(&left)
    }

    #[test]
    fn horizontal_cut_through_box() {
        let mesh = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 5.0, 10.0));
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 3.0), Vector3::z()).unwrap();
        let section = PlaneSection::compute(&mesh, &plane, 1e-9);
        assert!(section.coplanar.is_empty());
        assert_relative_eq!(covered_area(&section), 20.0, epsilon = 1e-6);
    }

    #[test]
    fn plane_missing_box_has_no_section() {
        let mesh = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 5.0, 10.0));
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 20.0), Vector3::z()).unwrap();
        let section = PlaneSection::compute(&mesh, &plane, 1e-9);
        assert!(section.is_empty());
    }

    #[test]
    fn box_behind_plane_contributes_nothing() {
        let mesh = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 5.0, 10.0));
        let plane = Plane::from_normal(Point3::new(6.0, 0.0, 0.0), Vector3::x()).unwrap();
        let section = PlaneSection::compute(&mesh, &plane, 1e-9);
        assert!(section.interior.is_empty());
    }

    #[test]
    fn abutting_box_covers_the_shared_wall() {
        // Neighbour occupies x in [10, 20]; the plane is the wall x = 10 facing +x.
        let mesh = box_mesh(Point3::new(10.0, 0.0, 0.0), Point3::new(20.0, 10.0, 10.0));
        let plane = Plane::from_normal(Point3::new(10.0, 0.0, 0.0), Vector3::x()).unwrap();
        let section = PlaneSection::compute(&mesh, &plane, 1e-9);
        assert!(section.coplanar.is_empty());
        assert_relative_eq!(covered_area(&section), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn same_facing_roof_is_coplanar() {
        let mesh = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 5.0));
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 5.0), Vector3::z()).unwrap();
        let section = PlaneSection::compute(&mesh, &plane, 1e-9);
        assert_eq!(section.coplanar.len(), 2);
        assert!(section.interior.is_empty());
    }
}
