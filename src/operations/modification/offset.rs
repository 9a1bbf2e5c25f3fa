use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;
use crate::shape::{ShapeId, ShapeKind, ShapeStore};

/// Grows (positive distance) or shrinks (negative) a solid uniformly.
///
/// Shrinking a boolean result may remove slightly more than `distance`
/// near concave features; the result always lies within the original.
pub struct Offset {
    shape: ShapeId,
    distance: f64,
}

impl Offset {
    /// Creates a new `Offset` operation.
    #[must_use]
    pub fn new(shape: ShapeId, distance: f64) -> Self {
        Self { shape, distance }
    }

    /// Executes the offset, creating the new solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if the distance is zero or not finite, the shape is
    /// a compound, or shrinking would consume the whole solid's bounding box.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let d = self.distance;
        if !d.is_finite() || d.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(format!("offset distance must be non-zero, got {d}")).into());
        }
        let data = store.shape(self.shape)?;
        if data.is_compound() {
            return Err(OperationError::NonSolidOperand("offset").into());
        }
        if d < 0.0 && 2.0 * -d >= data.bbox.min_extent() {
            return Err(OperationError::Failed(format!(
                "inward offset {d} consumes a solid {} thick",
                data.bbox.min_extent()
            ))
            .into());
        }
        store.add_shape(ShapeKind::Offset {
            child: self.shape,
            distance: d,
        })
    }
}
