use crate::error::{OperationError, Result};
use crate::math::{Isometry3, Point2, UnitQuaternion, Vector3, TOLERANCE};
use crate::shape::{FaceId, Primitive, ShapeId, ShapeKind, ShapeStore};

/// Extrudes a face along a direction vector to create a solid.
pub struct Extrude {
    face: FaceId,
    direction: Vector3,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(face: FaceId, direction: Vector3) -> Self {
        Self { face, direction }
    }

    /// Executes the extrusion, creating the solid in the shape store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is zero-length
    /// and [`OperationError::Unsupported`] if it is not along the face normal.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<ShapeId> {
        let height = self.direction.norm();
        if height < TOLERANCE {
            return Err(
                OperationError::InvalidInput("extrude direction must be non-zero".into()).into(),
            );
        }
        let face = store.face(self.face)?;
        let normal = face.frame * Vector3::z();
        let along = self.direction.dot(&normal);
        if (along.abs() - height).abs() > 1e-9 * height {
            return Err(OperationError::Unsupported(
                "extrusion must follow the face normal".into(),
            )
            .into());
        }

        let (outline, frame) = if along > 0.0 {
            (face.outline.clone(), face.frame)
        } else {
            // Flip the local frame about its x axis so +Z follows the direction.
            let flip = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI);
            let outline: Vec<Point2> = face.outline.iter().map(|p| Point2::new(p.x, -p.y)).collect();
            (
                outline,
                Isometry3::from_parts(face.frame.translation, face.frame.rotation * flip),
            )
        };

        store.add_shape(ShapeKind::Primitive {
            primitive: Primitive::Prism { outline, height },
            placement: frame,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeFace;
    use crate::operations::query::{BoundingBox, Volume};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square(store: &mut ShapeStore) -> FaceId {
        MakeFace::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ])
        .execute(store)
        .unwrap()
    }

    #[test]
    fn extrude_square_to_cube() {
        let mut store = ShapeStore::new();
        let face = square(&mut store);
        let solid = Extrude::new(face, Vector3::new(0.0, 0.0, 1.0))
            .execute(&mut store)
            .unwrap();
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 1.0, epsilon = 1e-12);
        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert_relative_eq!(aabb.max, p(1.0, 1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn extrude_against_normal() {
        let mut store = ShapeStore::new();
        let face = square(&mut store);
        let solid = Extrude::new(face, Vector3::new(0.0, 0.0, -2.0))
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert_relative_eq!(aabb.min, p(0.0, 0.0, -2.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, p(1.0, 1.0, 0.0), epsilon = 1e-12);
        assert!(store.signed_distance(solid, &p(0.5, 0.5, -1.0)).unwrap() < 0.0);
    }

    #[test]
    fn zero_direction_fails() {
        let mut store = ShapeStore::new();
        let face = square(&mut store);
        assert!(Extrude::new(face, Vector3::zeros()).execute(&mut store).is_err());
    }

    #[test]
    fn oblique_direction_fails() {
        let mut store = ShapeStore::new();
        let face = square(&mut store);
        let result = Extrude::new(face, Vector3::new(1.0, 0.0, 1.0)).execute(&mut store);
        assert!(result.is_err());
    }
}
