use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::shape::{Primitive, ShapeId, ShapeStore};

use super::insert_axial;

/// Creates a cylinder solid from base center, radius, axis, and height.
pub struct MakeCylinder {
    base: Point3,
    radius: f64,
    axis: Vector3,
    height: f64,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    #[must_use]
    pub fn new(base: Point3, radius: f64, axis: Vector3, height: f64) -> Self {
        Self {
            base,
            radius,
            axis,
            height,
        }
    }

    /// Executes the operation, creating the cylinder in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or height is not positive, or the axis
    /// direction is degenerate.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        if !(self.radius > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "cylinder radius must be positive, got {}",
                self.radius
            ))
            .into());
        }
        if !(self.height > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "cylinder height must be positive, got {}",
                self.height
            ))
            .into());
        }
        insert_axial(
            store,
            Primitive::Cylinder {
                radius: self.radius,
                height: self.height,
                fillet: 0.0,
            },
            self.base,
            &self.axis,
            "cylinder",
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{BoundingBox, Volume};
    use crate::tessellation::{TessellateShape, TessellationParams};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn cylinder_volume_is_analytic() {
        let mut store = ShapeStore::new();
        let solid = MakeCylinder::new(p(0.0, 0.0, 0.0), 3.0, Vector3::z(), 6.0)
            .execute(&mut store)
            .unwrap();
        let volume = Volume::new(solid).execute(&store).unwrap();
        assert_relative_eq!(volume, std::f64::consts::PI * 54.0, epsilon = 1e-9);
    }

    #[test]
    fn cylinder_along_x_bounding_box() {
        let mut store = ShapeStore::new();
        let solid = MakeCylinder::new(p(10.0, 0.0, 0.0), 2.0, Vector3::x(), 5.0)
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert_relative_eq!(aabb.min, p(10.0, -2.0, -2.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, p(15.0, 2.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn cylinder_tessellates() {
        let mut store = ShapeStore::new();
        let solid = MakeCylinder::new(p(0.0, 0.0, 0.0), 3.0, Vector3::z(), 6.0)
            .execute(&mut store)
            .unwrap();
        let mesh = TessellateShape::new(solid, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
    }

    #[test]
    fn zero_radius_fails() {
        let mut store = ShapeStore::new();
        let result =
            MakeCylinder::new(p(0.0, 0.0, 0.0), 0.0, Vector3::z(), 5.0).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn zero_height_fails() {
        let mut store = ShapeStore::new();
        let result =
            MakeCylinder::new(p(0.0, 0.0, 0.0), 3.0, Vector3::z(), 0.0).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn zero_axis_fails() {
        let mut store = ShapeStore::new();
        let result =
            MakeCylinder::new(p(0.0, 0.0, 0.0), 3.0, Vector3::zeros(), 5.0).execute(&mut store);
        assert!(result.is_err());
    }
}
