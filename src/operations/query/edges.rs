use crate::error::Result;
use crate::shape::{ShapeId, ShapeKind, ShapeStore};

/// Lists the lengths of a shape's edges.
///
/// Boolean results report the edges of both operands; lengths are not
/// trimmed at intersection curves.
pub struct EdgeLengths {
    shape: ShapeId,
}

impl EdgeLengths {
    /// Creates a new `EdgeLengths` query.
    #[must_use]
    pub fn new(shape: ShapeId) -> Self {
        Self { shape }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape or one of its operands is missing.
    pub fn execute(&self, store: &ShapeStore) -> Result<Vec<f64>> {
        let mut lengths = Vec::new();
        collect(store, self.shape, &mut lengths)?;
        Ok(lengths)
    }
}

fn collect(store: &ShapeStore, id: ShapeId, out: &mut Vec<f64>) -> Result<()> {
    match &store.shape(id)?.kind {
        ShapeKind::Primitive { primitive, .. } => out.extend(primitive.edge_lengths()),
        ShapeKind::Transformed { child, .. } | ShapeKind::Offset { child, .. } => {
            collect(store, *child, out)?;
        }
        ShapeKind::Boolean { lhs, rhs, .. } => {
            collect(store, *lhs, out)?;
            collect(store, *rhs, out)?;
        }
        ShapeKind::Compound(children) => {
            for child in children {
                collect(store, *child, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::boolean::Union;
    use crate::operations::creation::{MakeBox, MakeCylinder};

    #[test]
    fn union_reports_both_operands() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(Point3::origin(), Vector3::new(1.0, 2.0, 3.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeCylinder::new(Point3::origin(), 1.0, Vector3::z(), 5.0)
            .execute(&mut store)
            .unwrap();
        let fused = Union::new(a, b).execute(&mut store).unwrap();
        let edges = EdgeLengths::new(fused).execute(&store).unwrap();
        assert_eq!(edges.len(), 15);
        assert_eq!(edges.iter().filter(|len| (**len - 5.0).abs() < 1e-12).count(), 1);
    }
}
