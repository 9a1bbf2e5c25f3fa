use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::shape::{Primitive, ShapeId, ShapeStore};

use super::insert_axial;

/// Creates a ring torus around `axis` through `center`.
pub struct MakeTorus {
    center: Point3,
    major_radius: f64,
    minor_radius: f64,
    axis: Vector3,
}

impl MakeTorus {
    /// Creates a new `MakeTorus` operation.
    #[must_use]
    pub fn new(center: Point3, major_radius: f64, minor_radius: f64, axis: Vector3) -> Self {
        Self {
            center,
            major_radius,
            minor_radius,
            axis,
        }
    }

    /// Executes the operation, creating the torus in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < minor_radius < major_radius`, or if the
    /// axis is degenerate.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let (major, minor) = (self.major_radius, self.minor_radius);
        if !(minor > TOLERANCE && major > minor) {
            return Err(OperationError::InvalidInput(format!(
                "torus needs 0 < minor < major, got major {major}, minor {minor}"
            ))
            .into());
        }
        insert_axial(
            store,
            Primitive::Torus { major, minor },
            self.center,
            &self.axis,
            "torus",
        )
    }
}
