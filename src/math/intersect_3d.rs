use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Intersects the ray `origin + t * dir` with a triangle (Möller–Trumbore).
///
/// Both triangle sides are hit. Returns the ray parameter `t` of the hit,
/// which is a distance when `dir` is a unit vector. Hits behind the origin
/// are not reported.
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3,
    dir: &Vector3,
    a: &Point3,
    b: &Point3,
    c: &Point3,
) -> Option<f64> {
    let e1 = b - a;
    let e2 = c - a;
    let pvec = dir.cross(&e2);
    let det = e1.dot(&pvec);
    if det.abs() < TOLERANCE {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(&pvec) * inv_det;
    if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(&e1);
    let v = dir.dot(&qvec) * inv_det;
    if v < -TOLERANCE || u + v > 1.0 + TOLERANCE {
        return None;
    }
    let t = e2.dot(&qvec) * inv_det;
    (t >= -TOLERANCE).then_some(t.max(0.0))
}

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPlaneClassification {
    /// Point is on the positive side (in the direction of the normal).
    Front,
    /// Point is on the negative side (opposite the normal).
    Back,
    /// Point lies on the plane (within tolerance).
    On,
}

/// Classifies a point relative to a plane using the given tolerance band.
#[must_use]
pub fn classify_point_plane(point: &Point3, plane: &Plane, eps: f64) -> PointPlaneClassification {
    let dist = plane.signed_distance(point);
    if dist > eps {
        PointPlaneClassification::Front
    } else if dist < -eps {
        PointPlaneClassification::Back
    } else {
        PointPlaneClassification::On
    }
}

/// Clips a convex or concave planar polygon to the closed front half-space
/// of `plane` (Sutherland–Hodgman against a single plane).
///
/// Points within `eps` of the plane count as lying on it. The vertex order
/// of the input is preserved, so the result keeps its orientation.
#[must_use]
pub fn clip_polygon_to_front(points: &[Point3], plane: &Plane, eps: f64) -> Vec<Point3> {
    let n = points.len();
    let dist: Vec<f64> = points
        .iter()
        .map(|p| {
            let d = plane.signed_distance(p);
            if d.abs() <= eps {
                0.0
            } else {
                d
            }
        })
        .collect();

    let mut clipped = Vec::with_capacity(n + 2);
    for i in 0..n {
        let j = (i + 1) % n;
        let (p, q) = (&points[i], &points[j]);
        let (dp, dq) = (dist[i], dist[j]);
        if dp >= 0.0 {
            clipped.push(*p);
        }
        if (dp > 0.0 && dq < 0.0) || (dp < 0.0 && dq > 0.0) {
            let t = dp / (dp - dq);
            clipped.push(p + (q - p) * t);
        }
    }
    clipped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_3d::polygon_area_3d;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn ground() -> Plane {
        Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::z()).unwrap()
    }

    #[test]
    fn ray_hits_triangle_below() {
        let t = ray_triangle_intersect(
            &p(0.2, 0.2, 5.0),
            &-Vector3::z(),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert!((t.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ray_misses_triangle_outside() {
        let t = ray_triangle_intersect(
            &p(2.0, 2.0, 5.0),
            &-Vector3::z(),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn ray_ignores_triangle_behind() {
        let t = ray_triangle_intersect(
            &p(0.2, 0.2, 5.0),
            &Vector3::z(),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn ray_parallel_to_triangle_misses() {
        let t = ray_triangle_intersect(
            &p(0.2, 0.2, 1.0),
            &Vector3::x(),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn point_plane_classification() {
        let plane = ground();
        assert_eq!(
            classify_point_plane(&p(0.0, 0.0, 1.0), &plane, 1e-6),
            PointPlaneClassification::Front
        );
        assert_eq!(
            classify_point_plane(&p(0.0, 0.0, -1.0), &plane, 1e-6),
            PointPlaneClassification::Back
        );
        assert_eq!(
            classify_point_plane(&p(3.0, 3.0, 1e-8), &plane, 1e-6),
            PointPlaneClassification::On
        );
    }

    #[test]
    fn clip_straddling_wall_keeps_upper_half() {
        let wall = vec![
            p(0.0, 0.0, -2.0),
            p(4.0, 0.0, -2.0),
            p(4.0, 0.0, 2.0),
            p(0.0, 0.0, 2.0),
        ];
        let clipped = clip_polygon_to_front(&wall, &ground(), 1e-9);
        assert_eq!(clipped.len(), 4);
        assert!((polygon_area_3d(&clipped) - 8.0).abs() < 1e-9);
        assert!(clipped.iter().all(|q| q.z >= -1e-12));
    }

    #[test]
    fn clip_polygon_behind_is_empty() {
        let tri = vec![p(0.0, 0.0, -1.0), p(1.0, 0.0, -1.0), p(0.0, 1.0, -2.0)];
        assert!(clip_polygon_to_front(&tri, &ground(), 1e-9).is_empty());
    }
}
