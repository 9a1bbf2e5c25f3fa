use super::{BooleanOp, ShapeId, ShapeKind, ShapeStore};
use crate::error::Result;
use crate::math::Point3;

impl ShapeStore {
    /// Signed distance bound from `p` to the shape's boundary, negative inside.
    ///
    /// The value never exceeds the true distance in magnitude and the field
    /// is 1-Lipschitz. Right-hand operands are clipped to their bounding
    /// box, which lets whole subtrees be skipped without changing the value.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced shape is missing.
    pub fn signed_distance(&self, id: ShapeId, p: &Point3) -> Result<f64> {
        let data = self.shape(id)?;
        let d = match &data.kind {
            ShapeKind::Primitive {
                primitive,
                placement,
            } => primitive.signed_distance(&placement.inverse_transform_point(p)),
            ShapeKind::Transformed { child, placement } => {
                self.signed_distance(*child, &placement.inverse_transform_point(p))?
            }
            ShapeKind::Boolean { op, lhs, rhs } => self.boolean_distance(*op, *lhs, *rhs, p)?,
            ShapeKind::Offset { child, distance } => self.signed_distance(*child, p)? - distance,
            ShapeKind::Compound(children) => {
                let mut best = f64::INFINITY;
                for child in children {
                    let bound = self.shape(*child)?.bbox.signed_distance(p);
                    if bound < best {
                        best = best.min(self.signed_distance(*child, p)?.max(bound));
                    }
                }
                best
            }
        };
        Ok(d)
    }

    fn boolean_distance(
        &self,
        op: BooleanOp,
        lhs: ShapeId,
        rhs: ShapeId,
        p: &Point3,
    ) -> Result<f64> {
        let da = self.signed_distance(lhs, p)?;
        let bound = self.shape(rhs)?.bbox.signed_distance(p);
        let d = match op {
            BooleanOp::Union => {
                if da <= bound {
                    da
                } else {
                    da.min(self.signed_distance(rhs, p)?.max(bound))
                }
            }
            BooleanOp::Subtract => {
                if da >= -bound {
                    da
                } else {
                    da.max(-self.signed_distance(rhs, p)?.max(bound))
                }
            }
            BooleanOp::Intersect => da.max(self.signed_distance(rhs, p)?),
        };
        Ok(d)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::boolean::{Intersect, Subtract, Union};
    use crate::operations::creation::{MakeBox, MakeCylinder};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_box(store: &mut ShapeStore, x: f64) -> ShapeId {
        MakeBox::new(p(x, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn union_takes_nearest_operand() {
        let mut store = ShapeStore::new();
        let a = unit_box(&mut store, 0.0);
        let b = unit_box(&mut store, 3.0);
        let fused = Union::new(a, b).execute(&mut store).unwrap();
        assert_relative_eq!(store.signed_distance(fused, &p(3.5, 0.5, 0.5)).unwrap(), -0.5);
        assert_relative_eq!(store.signed_distance(fused, &p(2.0, 0.5, 0.5)).unwrap(), 1.0);
    }

    #[test]
    fn subtract_hollows_base() {
        let mut store = ShapeStore::new();
        let base = MakeBox::new(p(0.0, 0.0, 0.0), Vector3::new(10.0, 10.0, 10.0))
            .execute(&mut store)
            .unwrap();
        let hole = MakeCylinder::new(p(5.0, 5.0, -1.0), 2.0, Vector3::z(), 12.0)
            .execute(&mut store)
            .unwrap();
        let cut = Subtract::new(base, hole).execute(&mut store).unwrap();
        assert!(store.signed_distance(cut, &p(5.0, 5.0, 5.0)).unwrap() > 0.0);
        assert!(store.signed_distance(cut, &p(1.0, 1.0, 5.0)).unwrap() < 0.0);
    }

    #[test]
    fn intersect_keeps_overlap() {
        let mut store = ShapeStore::new();
        let a = MakeBox::new(p(0.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let b = MakeBox::new(p(1.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let common = Intersect::new(a, b).execute(&mut store).unwrap();
        assert!(store.signed_distance(common, &p(1.5, 0.5, 0.5)).unwrap() < 0.0);
        assert!(store.signed_distance(common, &p(0.5, 0.5, 0.5)).unwrap() > 0.0);
    }

    #[test]
    fn culling_does_not_change_union_sign() {
        let mut store = ShapeStore::new();
        let mut acc = unit_box(&mut store, 0.0);
        for i in 1..10 {
            let next = unit_box(&mut store, f64::from(i) * 2.0);
            acc = Union::new(acc, next).execute(&mut store).unwrap();
        }
        for i in 0..10 {
            let inside = p(f64::from(i) * 2.0 + 0.5, 0.5, 0.5);
            let gap = p(f64::from(i) * 2.0 + 1.5, 0.5, 0.5);
            assert!(store.signed_distance(acc, &inside).unwrap() < 0.0);
            assert!(store.signed_distance(acc, &gap).unwrap() > 0.0);
        }
    }
}
