use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the contour with counter-clockwise winding.
#[must_use]
pub fn ensure_ccw(points: &[Point2]) -> Vec<Point2> {
    if signed_area(points) < 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Returns the contour with clockwise winding (the orientation of holes).
#[must_use]
pub fn ensure_cw(points: &[Point2]) -> Vec<Point2> {
    if signed_area(points) > 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Snaps every point to a square grid of the given spacing and drops the
/// consecutive duplicates this creates.
///
/// Vertices closer than `spacing` collapse onto the same grid node, which is
/// how nearly-touching outlines are joined before an overlay.
#[must_use]
pub fn snap_to_grid(points: &[Point2], spacing: f64) -> Vec<Point2> {
    if spacing <= TOLERANCE {
        return points.to_vec();
    }
    let mut snapped: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        let q = Point2::new(
            (p.x / spacing).round() * spacing,
            (p.y / spacing).round() * spacing,
        );
        if snapped.last().is_none_or(|last| (last - q).norm() > TOLERANCE) {
            snapped.push(q);
        }
    }
    while snapped.len() > 1 {
        let first = snapped[0];
        match snapped.last() {
            Some(last) if (last - first).norm() <= TOLERANCE => {
                snapped.pop();
            }
            _ => break,
        }
    }
    snapped
}

/// A planar region: one outer contour with zero or more holes.
///
/// The outer contour winds counter-clockwise and holes wind clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    /// Outer boundary.
    pub outer: Vec<Point2>,
    /// Holes inside the outer boundary.
    pub holes: Vec<Vec<Point2>>,
}

impl Region {
    /// Creates a region, normalising the winding of every contour.
    #[must_use]
    pub fn new(outer: &[Point2], holes: &[Vec<Point2>]) -> Self {
        Self {
            outer: ensure_ccw(outer),
            holes: holes.iter().map(|h| ensure_cw(h)).collect(),
        }
    }

    /// Area of the outer contour minus the area of the holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        (signed_area(&self.outer).abs() - holes).max(0.0)
    }

    /// All contours, outer first.
    pub fn contours(&self) -> impl Iterator<Item = &Vec<Point2>> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

/// Total area of a set of regions.
#[must_use]
pub fn total_area(regions: &[Region]) -> f64 {
    regions.iter().map(Region::area).sum()
}
