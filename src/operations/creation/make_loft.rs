use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::shape::{Primitive, ShapeId, ShapeStore};

use super::insert_axial;

/// A circular cross-section for [`MakeLoft`].
#[derive(Debug, Clone, Copy)]
pub struct CircleSection {
    pub center: Point3,
    pub normal: Vector3,
    pub radius: f64,
}

impl CircleSection {
    #[must_use]
    pub fn new(center: Point3, normal: Vector3, radius: f64) -> Self {
        Self {
            center,
            normal,
            radius,
        }
    }
}

/// Creates a ruled solid through an ordered sequence of coaxial circles.
pub struct MakeLoft {
    sections: Vec<CircleSection>,
}

impl MakeLoft {
    /// Creates a new `MakeLoft` operation.
    #[must_use]
    pub fn new(sections: Vec<CircleSection>) -> Self {
        Self { sections }
    }

    /// Executes the operation, creating the loft in the shape store.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two sections are given, a radius is
    /// not positive, the section centers do not advance along one axis, or
    /// a section is not perpendicular to that axis.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let (Some(first), Some(last)) = (self.sections.first(), self.sections.last()) else {
            return Err(OperationError::InvalidInput("loft needs sections".into()).into());
        };
        if self.sections.len() < 2 {
            return Err(OperationError::InvalidInput("loft needs at least two sections".into()).into());
        }
        let span = last.center - first.center;
        let length = span.norm();
        if length < TOLERANCE {
            return Err(OperationError::InvalidInput("loft sections share one center".into()).into());
        }
        let axis = span / length;

        let mut profile = vec![Point2::new(0.0, 0.0)];
        let mut previous = f64::NEG_INFINITY;
        for section in &self.sections {
            if !(section.radius > TOLERANCE) {
                return Err(OperationError::InvalidInput(format!(
                    "loft section radius must be positive, got {}",
                    section.radius
                ))
                .into());
            }
            let offset = section.center - first.center;
            let along = offset.dot(&axis);
            if (offset - axis * along).norm() > 1e-9 * length.max(1.0) {
                return Err(OperationError::Unsupported("non-coaxial loft sections".into()).into());
            }
            if section.normal.cross(&axis).norm() > 1e-9 * section.normal.norm().max(TOLERANCE) {
                return Err(OperationError::Unsupported("loft section not perpendicular to its axis".into()).into());
            }
            if along <= previous {
                return Err(OperationError::InvalidInput("loft sections must advance along the axis".into()).into());
            }
            previous = along;
            profile.push(Point2::new(section.radius, along));
        }
        profile.push(Point2::new(0.0, length));

        insert_axial(store, Primitive::Revolved { profile }, first.center, &axis, "loft")
    }
}
