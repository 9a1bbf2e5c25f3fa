use crate::error::Result;
use crate::shape::{BooleanOp, ShapeId, ShapeStore};

use super::engine::boolean_execute;

/// Computes the boolean union (fuse) of two solids.
pub struct Union {
    solid_a: ShapeId,
    solid_b: ShapeId,
}

impl Union {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(solid_a: ShapeId, solid_b: ShapeId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the union, creating the result solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand is missing or a compound.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        boolean_execute(store, self.solid_a, self.solid_b, BooleanOp::Union)
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

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn union_of_disjoint_boxes_sums_volume() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(p(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(p(3.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let fused = Union::new(a, b).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(fused).execute(&store).unwrap(), 3.0);
        let aabb = BoundingBox::new(fused).execute(&store).unwrap();
        assert_relative_eq!(aabb.max, p(5.0, 1.0, 1.0));
    }

    #[test]
    fn union_of_overlapping_boxes_counts_overlap_once() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(p(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(p(1.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let fused = Union::new(a, b).execute(&mut store).unwrap();
        let volume = Volume::new(fused).execute(&store).unwrap();
        assert_relative_eq!(volume, 12.0, max_relative = 0.02);
    }
}
