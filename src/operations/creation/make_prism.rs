use crate::error::{OperationError, Result};
use crate::math::polygon_2d::{ensure_ccw, ensure_cw};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::topology::{FaceId, SolidId, TopologyStore};

use super::{MakePlanarFace, MakeSolid};

/// Extrudes a plan outline straight up into a closed building volume.
///
/// The outline may be given in either winding. Holes become courtyards
/// whose walls face into the void.
pub struct MakePrism {
    outline: Vec<Point2>,
    holes: Vec<Vec<Point2>>,
    base_z: f64,
    height: f64,
}

impl MakePrism {
    /// Creates a new `MakePrism` operation standing on `z = 0`.
    #[must_use]
    pub fn new(outline: Vec<Point2>, height: f64) -> Self {
        Self {
            outline,
            holes: Vec::new(),
            base_z: 0.0,
            height,
        }
    }

    /// Sets the elevation of the bottom face.
    #[must_use]
    pub fn with_base(mut self, base_z: f64) -> Self {
        self.base_z = base_z;
        self
    }

    /// Adds courtyards cut through the full height.
    #[must_use]
    pub fn with_holes(mut self, holes: Vec<Vec<Point2>>) -> Self {
        self.holes = holes;
        self
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the height is not positive
    /// or the outline has fewer than three points.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if !(self.height.is_finite() && self.height > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "prism height must be positive, got {}",
                self.height
            ))
            .into());
        }
        if self.outline.len() < 3 || self.holes.iter().any(|h| h.len() < 3) {
            return Err(OperationError::InvalidInput(
                "prism outlines need at least 3 points".into(),
            )
            .into());
        }

        let outer = ensure_ccw(&self.outline);
        let holes: Vec<Vec<Point2>> = self.holes.iter().map(|h| ensure_cw(h)).collect();
        let bottom_z = self.base_z;
        let top_z = self.base_z + self.height;
        let at = |pts: &[Point2], z: f64| -> Vec<Point3> {
            pts.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
        };
        let reversed = |pts: Vec<Point3>| -> Vec<Point3> { pts.into_iter().rev().collect() };

        let mut faces: Vec<FaceId> = Vec::with_capacity(outer.len() + 2);

        // Bottom faces down, so its loops run the other way round.
        faces.push(
            MakePlanarFace::new(reversed(at(&outer, bottom_z)))
                .with_holes(holes.iter().map(|h| reversed(at(h, bottom_z))).collect())
                .execute(store)?,
        );
        faces.push(
            MakePlanarFace::new(at(&outer, top_z))
                .with_holes(holes.iter().map(|h| at(h, top_z)).collect())
                .execute(store)?,
        );

        for contour in std::iter::once(&outer).chain(holes.iter()) {
            let n = contour.len();
            for i in 0..n {
                let (a, b) = (contour[i], contour[(i + 1) % n]);
                if (b - a).norm() < TOLERANCE {
                    continue;
                }
                faces.push(
                    MakePlanarFace::new(vec![
                        Point3::new(a.x, a.y, bottom_z),
                        Point3::new(b.x, b.y, bottom_z),
                        Point3::new(b.x, b.y, top_z),
                        Point3::new(a.x, a.y, top_z),
                    ])
                    .execute(store)?,
                );
            }
        }

        MakeSolid::new(faces).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn prism_faces_point_outward() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(rect(0.0, 0.0, 4.0, 2.0), 3.0)
            .execute(&mut store)
            .unwrap();
        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 6);
        let centroid = Point3::new(2.0, 1.0, 1.5);
        for (_, face) in faces {
            let plane = face.plane().unwrap();
            let n = face.normal_at(0.0, 0.0).unwrap();
            assert!(n.dot(&(plane.origin() - centroid)) > 0.0);
        }
    }

    #[test]
    fn clockwise_outline_is_normalized() {
        let mut store = TopologyStore::new();
        let cw: Vec<_> = rect(0.0, 0.0, 1.0, 1.0).into_iter().rev().collect();
        let solid = MakePrism::new(cw, 1.0).with_base(5.0).execute(&mut store).unwrap();
        let faces = store.solid_faces(solid).unwrap();
        let top = faces[1].1.normal_at(0.0, 0.0).unwrap();
        assert!((top - Vector3::z()).norm() < 1e-12);
        assert!((faces[1].1.plane().unwrap().origin().z - 6.0).abs() < 1e-12);
    }

    #[test]
    fn courtyard_walls_face_the_void() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(rect(0.0, 0.0, 10.0, 10.0), 3.0)
            .with_holes(vec![rect(4.0, 4.0, 6.0, 6.0)])
            .execute(&mut store)
            .unwrap();
        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 10);
        let court = Point3::new(5.0, 5.0, 1.5);
        for (_, face) in &faces[6..] {
            let plane = face.plane().unwrap();
            let n = face.normal_at(0.0, 0.0).unwrap();
            assert!(n.dot(&(court - plane.origin())) > 0.0);
        }
    }

    #[test]
    fn zero_height_rejected() {
        let mut store = TopologyStore::new();
        assert!(MakePrism::new(rect(0.0, 0.0, 1.0, 1.0), 0.0)
            .execute(&mut store)
            .is_err());
    }
}
