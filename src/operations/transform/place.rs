use crate::error::Result;
use crate::math::Isometry3;
use crate::shape::{ShapeId, ShapeKind, ShapeStore};

/// Applies a rigid placement (rotation, then translation) to a shape.
///
/// Placing a primitive folds the placement into it; other shapes are
/// wrapped, composing with an existing wrapper.
pub struct Place {
    shape: ShapeId,
    placement: Isometry3,
}

impl Place {
    /// Creates a new `Place` operation.
    #[must_use]
    pub fn new(shape: ShapeId, placement: Isometry3) -> Self {
        Self { shape, placement }
    }

    /// Executes the placement, creating the moved shape in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is missing.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let kind = match &store.shape(self.shape)?.kind {
            ShapeKind::Primitive {
                primitive,
                placement,
            } => ShapeKind::Primitive {
                primitive: primitive.clone(),
                placement: self.placement * placement,
            },
            ShapeKind::Transformed { child, placement } => ShapeKind::Transformed {
                child: *child,
                placement: self.placement * placement,
            },
            _ => ShapeKind::Transformed {
                child: self.shape,
                placement: self.placement,
            },
        };
        store.add_shape(kind)
    }
}
