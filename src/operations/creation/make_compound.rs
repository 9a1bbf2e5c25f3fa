use crate::error::{OperationError, Result};
use crate::shape::{ShapeId, ShapeKind, ShapeStore};

/// Groups shapes into a compound without merging them.
pub struct MakeCompound {
    shapes: Vec<ShapeId>,
}

impl MakeCompound {
    /// Creates a new `MakeCompound` operation.
    #[must_use]
    pub fn new(shapes: Vec<ShapeId>) -> Self {
        Self { shapes }
    }

    /// Executes the operation, creating the compound in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if no shapes are given or one is missing.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        if self.shapes.is_empty() {
            return Err(OperationError::InvalidInput("compound needs at least one shape".into()).into());
        }
        store.add_shape(ShapeKind::Compound(self.shapes.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::query::Volume;
    use approx::assert_relative_eq;

    #[test]
    fn compound_volume_sums_overlapping_members() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(Point3::origin(), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let compound = MakeCompound::new(vec![a, b]).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(compound).execute(&store).unwrap(), 16.0);
    }

    #[test]
    fn empty_compound_fails() {
        let mut store = ShapeStore::new();
        assert!(MakeCompound::new(Vec::new()).execute(&mut store).is_err());
    }
}
