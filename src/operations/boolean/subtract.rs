use crate::error::Result;
use crate::shape::{BooleanOp, ShapeId, ShapeStore};

use super::engine::boolean_execute;

/// Computes the boolean difference (cut) of solid B from solid A.
pub struct Subtract {
    solid_a: ShapeId,
    solid_b: ShapeId,
}

impl Subtract {
    /// Creates a new `Subtract` operation.
    #[must_use]
    pub fn new(solid_a: ShapeId, solid_b: ShapeId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the subtraction, creating the result solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand is missing or a compound, or their
    /// bounding boxes do not overlap.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        boolean_execute(store, self.solid_a, self.solid_b, BooleanOp::Subtract)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeBox, MakeCylinder};
    use crate::operations::query::Volume;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn drilled_block_volume() {
        let mut store = ShapeStore::new();
        let block = MakeBox::new(Point3::origin(), Vector3::new(10.0, 10.0, 10.0))
            .execute(&mut store)
            .unwrap();
        let drill = MakeCylinder::new(Point3::new(5.0, 5.0, -1.0), 2.0, Vector3::z(), 12.0)
            .execute(&mut store)
            .unwrap();
        let cut = Subtract::new(block, drill).execute(&mut store).unwrap();
        let volume = Volume::new(cut).execute(&store).unwrap();
        assert_relative_eq!(volume, 1000.0 - 40.0 * PI, max_relative = 0.01);
    }
}
