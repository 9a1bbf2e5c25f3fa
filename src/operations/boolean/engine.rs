use crate::error::{OperationError, Result};
use crate::shape::{BooleanOp, ShapeId, ShapeKind, ShapeStore};

/// Executes a boolean operation on two solids.
///
/// Cut and common reject operands whose bounding boxes do not overlap, since
/// the result would be the unchanged base or empty.
pub(super) fn boolean_execute(
    store: &mut ShapeStore,
    lhs: ShapeId,
    rhs: ShapeId,
    op: BooleanOp,
) -> Result<ShapeId> {
    let a = store.shape(lhs)?;
    let b = store.shape(rhs)?;
    if a.is_compound() || b.is_compound() {
        return Err(OperationError::NonSolidOperand(op.label()).into());
    }
    if op != BooleanOp::Union && !a.bbox.overlaps(&b.bbox) {
        return Err(OperationError::DisjointOperands(op.label()).into());
    }
    store.add_shape(ShapeKind::Boolean { op, lhs, rhs })
}

/// Fuses shapes left to right.
///
/// # Errors
///
/// Returns an error if the list is empty or any fuse fails.
pub fn fuse_all(store: &mut ShapeStore, shapes: &[ShapeId]) -> Result<ShapeId> {
    let (first, rest) = shapes
        .split_first()
        .ok_or_else(|| OperationError::InvalidInput("nothing to fuse".into()))?;
    let mut acc = *first;
    for shape in rest {
        acc = boolean_execute(store, acc, *shape, BooleanOp::Union)?;
    }
    Ok(acc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ForgeError;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeBox, MakeCompound};

    fn cube(store: &mut ShapeStore, x: f64) -> ShapeId {
        MakeBox::new(Point3::new(x, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn disjoint_cut_is_rejected() {
        let mut store = ShapeStore::new();
        let a = cube(&mut store, 0.0);
        let b = cube(&mut store, 5.0);
        let err = boolean_execute(&mut store, a, b, BooleanOp::Subtract).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Operation(OperationError::DisjointOperands("cut"))
        ));
    }

    #[test]
    fn disjoint_union_is_allowed() {
        let mut store = ShapeStore::new();
        let a = cube(&mut store, 0.0);
        let b = cube(&mut store, 5.0);
        assert!(boolean_execute(&mut store, a, b, BooleanOp::Union).is_ok());
    }

    #[test]
    fn compound_operand_is_rejected() {
        let mut store = ShapeStore::new();
        let a = cube(&mut store, 0.0);
        let b = cube(&mut store, 0.5);
        let compound = MakeCompound::new(vec![a, b]).execute(&mut store).unwrap();
        let err = boolean_execute(&mut store, a, compound, BooleanOp::Union).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Operation(OperationError::NonSolidOperand("fuse"))
        ));
    }

    #[test]
    fn fuse_all_of_nothing_fails() {
        let mut store = ShapeStore::new();
        assert!(fuse_all(&mut store, &[]).is_err());
    }
}
