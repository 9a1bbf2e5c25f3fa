use crate::error::Result;
use crate::math::{Isometry3, Vector3};
use crate::shape::{ShapeId, ShapeStore};

use super::Place;

/// Translates a shape by a displacement vector.
pub struct Translate {
    shape: ShapeId,
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(shape: ShapeId, displacement: Vector3) -> Self {
        Self {
            shape,
            displacement,
        }
    }

    /// Executes the translation, creating the moved shape in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is missing.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let d = self.displacement;
        Place::new(self.shape, Isometry3::translation(d.x, d.y, d.z)).execute(store)
    }
}
