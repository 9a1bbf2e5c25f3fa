use crate::error::Result;
use crate::math::Point3;
use crate::shape::{ShapeId, ShapeStore};

/// Distance band treated as lying on the boundary.
const BOUNDARY_TOLERANCE: f64 = 1e-7;

/// Location of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Classifies a point against a solid.
pub struct ClassifyPoint {
    shape: ShapeId,
    point: Point3,
}

impl ClassifyPoint {
    /// Creates a new `ClassifyPoint` query.
    #[must_use]
    pub fn new(shape: ShapeId, point: Point3) -> Self {
        Self { shape, point }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is missing.
    pub fn execute(&self, store: &ShapeStore) -> Result<PointClassification> {
        let d = store.signed_distance(self.shape, &self.point)?;
        Ok(if d.abs() <= BOUNDARY_TOLERANCE {
            PointClassification::OnBoundary
        } else if d < 0.0 {
            PointClassification::Inside
        } else {
            PointClassification::Outside
        })
    }
}
