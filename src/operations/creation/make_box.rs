use crate::error::{OperationError, Result};
use crate::math::{Isometry3, Point3, Vector3, TOLERANCE};
use crate::shape::{Primitive, ShapeId, ShapeKind, ShapeStore};

/// Creates an axis-aligned box from its minimum corner and edge lengths.
pub struct MakeBox {
    corner: Point3,
    size: Vector3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(corner: Point3, size: Vector3) -> Self {
        Self { corner, size }
    }

    /// Creates a box of the given size centered on `center`.
    #[must_use]
    pub fn centered(center: Point3, size: Vector3) -> Self {
        Self {
            corner: center - size * 0.5,
            size,
        }
    }

    /// Executes the operation, creating the box in the shape store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if any edge length is not
    /// strictly positive.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        if self.size.iter().any(|len| !(*len > TOLERANCE)) {
            return Err(OperationError::InvalidInput(format!(
                "box dimensions must be positive, got ({}, {}, {})",
                self.size.x, self.size.y, self.size.z
            ))
            .into());
        }
        store.add_shape(ShapeKind::Primitive {
            primitive: Primitive::Box {
                size: self.size,
                fillet: 0.0,
            },
            placement: Isometry3::translation(self.corner.x, self.corner.y, self.corner.z),
        })
    }
}
