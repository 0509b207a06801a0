//! Planar region booleans on top of `i_overlay`.
//!
//! Contours are snapped to the join tolerance before the overlay so that
//! outlines closer than the tolerance merge instead of leaving slivers.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::math::polygon_2d::{signed_area, snap_to_grid, Region};
use crate::math::Point2;

type Path = Vec<[f64; 2]>;

/// Union of a set of regions.
///
/// Overlapping and touching regions merge; the result has no overlaps.
#[must_use]
pub fn union_regions(regions: &[Region], snap: f64) -> Vec<Region> {
    let Some((first, rest)) = regions.split_first() else {
        return Vec::new();
    };
    let subject = region_paths(std::slice::from_ref(first), snap);
    let clip = region_paths(rest, snap);
    if clip.is_empty() {
        // Still run the overlay so a lone region is cleaned up the same way.
        let shapes = subject.overlay(&subject, OverlayRule::Union, FillRule::NonZero);
        return shapes_to_regions(shapes, snap);
    }
    let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    shapes_to_regions(shapes, snap)
}

/// Removes every area covered by `clip` from `subject`.
///
/// `clip` is a soup of contours filled with the non-zero rule: a point is
/// removed when the winding numbers of the clip contours around it do not
/// sum to zero. Contour orientation is therefore significant.
#[must_use]
pub fn subtract_regions(subject: &[Region], clip: &[Vec<Point2>], snap: f64) -> Vec<Region> {
    let subject_paths = region_paths(subject, snap);
    if subject_paths.is_empty() {
        return Vec::new();
    }
    let clip_paths: Vec<Path> = clip
        .iter()
        .filter_map(|c| contour_path(c, snap))
        .collect();
    if clip_paths.is_empty() {
        return shapes_to_regions(
            subject_paths.overlay(&subject_paths, OverlayRule::Union, FillRule::NonZero),
            snap,
        );
    }
    let shapes = subject_paths.overlay(&clip_paths, OverlayRule::Difference, FillRule::NonZero);
    shapes_to_regions(shapes, snap)
}

fn region_paths(regions: &[Region], snap: f64) -> Vec<Path> {
    regions
        .iter()
        .flat_map(Region::contours)
        .filter_map(|c| contour_path(c, snap))
        .collect()
}

/// Snapped contour in `i_overlay` form, or `None` if it collapses.
fn contour_path(contour: &[Point2], snap: f64) -> Option<Path> {
    let snapped = snap_to_grid(contour, snap);
    if snapped.len() < 3 || signed_area(&snapped).abs() <= snap * snap {
        return None;
    }
    Some(snapped.iter().map(|p| [p.x, p.y]).collect())
}

/// Converts overlay output (shapes of contours, outer first) into regions,
/// dropping pieces thinner than the snapping grid.
fn shapes_to_regions(shapes: Vec<Vec<Path>>, snap: f64) -> Vec<Region> {
    let min_area = snap * snap;
    shapes
        .into_iter()
        .filter_map(|shape| {
            let mut contours = shape.into_iter().map(|path| {
                path.into_iter()
                    .map(|[x, y]| Point2::new(x, y))
                    .collect::<Vec<_>>()
            });
            let outer = contours.next()?;
            let holes: Vec<Vec<Point2>> = contours
                .filter(|h| h.len() >= 3 && signed_area(h).abs() > min_area)
                .collect();
            let region = Region::new(&outer, &holes);
            (outer.len() >= 3 && region.area() > min_area).then_some(region)
        })
        .collect()
}
