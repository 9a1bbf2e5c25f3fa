use crate::error::{OperationError, Result};
use crate::math::{rotation_from_z, Isometry3, Point2, Point3, Vector3, TOLERANCE};
use crate::shape::{Primitive, ShapeId, ShapeKind, ShapeStore};

/// A circular sweep path.
#[derive(Debug, Clone, Copy)]
pub struct CirclePath {
    pub center: Point3,
    pub axis: Vector3,
    pub radius: f64,
}

/// Sweeps a rectangular section once around a circular path.
///
/// The rectangle is centered on the path, `radial_width` across the radius
/// and `axial_height` along the circle's axis.
pub struct Sweep {
    radial_width: f64,
    axial_height: f64,
    path: CirclePath,
}

impl Sweep {
    /// Creates a new rectangle-around-circle `Sweep` operation.
    #[must_use]
    pub fn rectangle(radial_width: f64, axial_height: f64, path: CirclePath) -> Self {
        Self {
            radial_width,
            axial_height,
            path,
        }
    }

    /// Executes the sweep, creating the solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is empty, the section would cross the
    /// axis, or the path axis is degenerate.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let (w, h, r) = (self.radial_width, self.axial_height, self.path.radius);
        if !(w > TOLERANCE && h > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "sweep section must be non-empty, got {w} x {h}"
            ))
            .into());
        }
        if !(r - w * 0.5 > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "sweep section of width {w} crosses the axis of a radius-{r} path"
            ))
            .into());
        }
        let rotation = rotation_from_z(&self.path.axis)
            .ok_or_else(|| OperationError::InvalidInput("sweep path axis must be non-zero".into()))?;

        let (inner, outer) = (r - w * 0.5, r + w * 0.5);
        let profile = vec![
            Point2::new(inner, -h * 0.5),
            Point2::new(outer, -h * 0.5),
            Point2::new(outer, h * 0.5),
            Point2::new(inner, h * 0.5),
        ];
        store.add_shape(ShapeKind::Primitive {
            primitive: Primitive::Revolved { profile },
            placement: Isometry3::from_parts(self.path.center.coords.into(), rotation),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::Volume;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn path(radius: f64) -> CirclePath {
        CirclePath {
            center: Point3::origin(),
            axis: Vector3::x(),
            radius,
        }
    }

    #[test]
    fn rectangular_ring_volume() {
        let mut store = ShapeStore::new();
        let solid = Sweep::rectangle(2.0, 1.0, path(10.0)).execute(&mut store).unwrap();
        // π (11² - 9²) · 1
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 40.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn center_of_ring_is_outside() {
        let mut store = ShapeStore::new();
        let solid = Sweep::rectangle(2.0, 1.0, path(10.0)).execute(&mut store).unwrap();
        assert!(store.signed_distance(solid, &Point3::origin()).unwrap() > 0.0);
        assert!(store.signed_distance(solid, &Point3::new(0.0, 10.0, 0.0)).unwrap() < 0.0);
    }

    #[test]
    fn section_crossing_axis_fails() {
        let mut store = ShapeStore::new();
        assert!(Sweep::rectangle(30.0, 1.0, path(10.0)).execute(&mut store).is_err());
    }
}
