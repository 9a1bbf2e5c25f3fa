use crate::error::Result;
use crate::shape::{BooleanOp, ShapeId, ShapeStore};

use super::engine::boolean_execute;

/// Computes the boolean intersection (common) of two solids.
pub struct Intersect {
    solid_a: ShapeId,
    solid_b: ShapeId,
}

impl Intersect {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(solid_a: ShapeId, solid_b: ShapeId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the intersection, creating the result solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand is missing or a compound, or their
    /// bounding boxes do not overlap.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        boolean_execute(store, self.solid_a, self.solid_b, BooleanOp::Intersect)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::query::{BoundingBox, Volume};
    use approx::assert_relative_eq;

    #[test]
    fn overlap_of_offset_boxes() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(Point3::origin(), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let common = Intersect::new(a, b).execute(&mut store).unwrap();
        let aabb = BoundingBox::new(common).execute(&store).unwrap();
        assert_relative_eq!(aabb.volume(), 1.0);
        let volume = Volume::new(common).execute(&store).unwrap();
        assert_relative_eq!(volume, 1.0, max_relative = 0.02);
    }
}
