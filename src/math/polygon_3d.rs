use crate::error::{GeometryError, Result};

use super::{Point3, Vector3, TOLERANCE};

/// Computes the unit normal of a polygon using Newell's method.
///
/// The normal follows the right-hand rule around the vertex order.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if the polygon has no area.
pub fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let normal = newell_vector(points);
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate("polygon has no area".into()).into());
    }
    Ok(normal / len)
}

/// Newell vector: twice the vector area of the polygon.
fn newell_vector(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Area of a planar 3D polygon.
#[must_use]
pub fn polygon_area_3d(points: &[Point3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    newell_vector(points).norm() * 0.5
}

/// Axis-aligned extents `(min, max)` of a point set, or `None` when empty.
#[must_use]
pub fn extents<'a, I>(points: I) -> Option<(Point3, Point3)>
where
    I: IntoIterator<Item = &'a Point3>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), p| {
        (
            Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
            Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
        )
    });
    Some((min, max))
}
