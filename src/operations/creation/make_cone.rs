use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::shape::{Primitive, ShapeId, ShapeStore};

use super::insert_axial;

/// Creates a cone or truncated cone (frustum) solid.
///
/// - either radius may be zero for a pointed cone
/// - equal radii produce a cylinder-shaped solid of revolution
pub struct MakeCone {
    base: Point3,
    bottom_radius: f64,
    top_radius: f64,
    axis: Vector3,
    height: f64,
}

impl MakeCone {
    /// Creates a new `MakeCone` operation.
    #[must_use]
    pub fn new(
        base: Point3,
        bottom_radius: f64,
        top_radius: f64,
        axis: Vector3,
        height: f64,
    ) -> Self {
        Self {
            base,
            bottom_radius,
            top_radius,
            axis,
            height,
        }
    }

    /// Executes the operation, creating the cone in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is negative, both radii are zero, the
    /// height is not positive, or the axis is degenerate.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let (r1, r2, h) = (self.bottom_radius, self.top_radius, self.height);
        if !(r1 >= 0.0 && r2 >= 0.0) || r1.max(r2) < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "cone radii must be non-negative and not both zero, got {r1} and {r2}"
            ))
            .into());
        }
        if !(h > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "cone height must be positive, got {h}"
            ))
            .into());
        }

        let mut profile = vec![Point2::new(0.0, 0.0)];
        if r1 > TOLERANCE {
            profile.push(Point2::new(r1, 0.0));
        }
        if r2 > TOLERANCE {
            profile.push(Point2::new(r2, h));
        }
        profile.push(Point2::new(0.0, h));

        insert_axial(
            store,
            Primitive::Revolved { profile },
            self.base,
            &self.axis,
            "cone",
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{BoundingBox, EdgeLengths, Volume};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn pointed_cone_volume() {
        let mut store = ShapeStore::new();
        let solid = MakeCone::new(p(0.0, 0.0, 0.0), 3.0, 0.0, Vector3::z(), 4.0)
            .execute(&mut store)
            .unwrap();
        let volume = Volume::new(solid).execute(&store).unwrap();
        assert_relative_eq!(volume, 12.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn frustum_volume() {
        let mut store = ShapeStore::new();
        let solid = MakeCone::new(p(0.0, 0.0, 0.0), 2.0, 1.0, Vector3::z(), 3.0)
            .execute(&mut store)
            .unwrap();
        let volume = Volume::new(solid).execute(&store).unwrap();
        // π h / 3 (R² + R r + r²)
        assert_relative_eq!(volume, PI * 7.0, epsilon = 1e-9);
    }

    #[test]
    fn inverted_cone_from_apex() {
        let mut store = ShapeStore::new();
        let solid = MakeCone::new(p(0.0, 0.0, 0.0), 0.0, 5.0, Vector3::x(), 2.0)
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert_relative_eq!(aabb.max.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(aabb.max.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn cone_has_one_rim_and_a_seam() {
        let mut store = ShapeStore::new();
        let solid = MakeCone::new(p(0.0, 0.0, 0.0), 3.0, 0.0, Vector3::z(), 4.0)
            .execute(&mut store)
            .unwrap();
        let edges = EdgeLengths::new(solid).execute(&store).unwrap();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().any(|len| (len - 5.0).abs() < 1e-12));
    }

    #[test]
    fn zero_radii_fail() {
        let mut store = ShapeStore::new();
        let result = MakeCone::new(p(0.0, 0.0, 0.0), 0.0, 0.0, Vector3::z(), 4.0).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn negative_radius_fails() {
        let mut store = ShapeStore::new();
        let result = MakeCone::new(p(0.0, 0.0, 0.0), -1.0, 2.0, Vector3::z(), 4.0).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn zero_height_fails() {
        let mut store = ShapeStore::new();
        let result = MakeCone::new(p(0.0, 0.0, 0.0), 3.0, 1.0, Vector3::z(), 0.0).execute(&mut store);
        assert!(result.is_err());
    }
}
