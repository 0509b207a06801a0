use crate::error::Result;
use crate::math::{Point2, Point3};
use crate::topology::{SolidId, TopologyStore};

use super::MakePrism;

/// Creates an axis-aligned box solid from two opposite corners.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    ///
    /// The corners may be given in any order.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min_corner: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max_corner: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if the box is flat in any direction.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        let outline = vec![
            Point2::new(lo.x, lo.y),
            Point2::new(hi.x, lo.y),
            Point2::new(hi.x, hi.y),
            Point2::new(lo.x, hi.y),
        ];
        MakePrism::new(outline, hi.z - lo.z)
            .with_base(lo.z)
            .execute(store)
    }
}
