use crate::error::{OperationError, Result};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Isometry3, Point2, Point3, UnitQuaternion, Vector3, TOLERANCE};
use crate::shape::{FaceData, FaceId, ShapeStore};

/// Creates a planar face bounded by a closed polygon.
///
/// A repeated closing point is accepted and dropped.
pub struct MakeFace {
    points: Vec<Point3>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Executes the operation, creating the face in the shape store.
    ///
    /// The face normal follows the right-hand rule over the point order.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three distinct points are given, the
    /// points are collinear, or they do not lie in one plane.
    pub fn execute(&self, store: &mut ShapeStore) -> Result<FaceId> {
        let mut points = self.points.clone();
        if points.len() > 1 && (points[0] - points[points.len() - 1]).norm() < TOLERANCE {
            points.pop();
        }
        if points.len() < 3 {
            return Err(
                OperationError::InvalidInput("face needs at least three points".into()).into(),
            );
        }

        let normal = newell_normal(&points)?;
        let origin = points[0];
        let scale = points
            .iter()
            .map(|p| (p - origin).norm())
            .fold(0.0_f64, f64::max);
        if points
            .iter()
            .any(|p| (p - origin).dot(&normal).abs() > 1e-9 * scale.max(1.0))
        {
            return Err(OperationError::InvalidInput("face points are not coplanar".into()).into());
        }

        let first_edge = points
            .iter()
            .skip(1)
            .map(|p| p - origin)
            .find(|e| e.norm() > TOLERANCE)
            .ok_or_else(|| OperationError::InvalidInput("face points coincide".into()))?;
        let u = (first_edge - normal * first_edge.dot(&normal)).normalize();
        let v = normal.cross(&u);

        let outline: Vec<Point2> = points
            .iter()
            .map(|p| {
                let d = p - origin;
                Point2::new(d.dot(&u), d.dot(&v))
            })
            .collect();
        if signed_area_2d(&outline).abs() < TOLERANCE {
            return Err(OperationError::InvalidInput("face has zero area".into()).into());
        }

        let rotation = UnitQuaternion::from_basis_unchecked(&[u, v, normal]);
        let frame = Isometry3::from_parts(origin.coords.into(), rotation);
        Ok(store.add_face(FaceData { outline, frame }))
    }
}

/// Computes the unit Newell normal of a closed polygon.
fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(
            OperationError::InvalidInput("degenerate polygon: cannot compute normal".into()).into(),
        );
    }
    Ok(normal / len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn square_face_normal_is_z() {
        let mut store = ShapeStore::new();
        let face = MakeFace::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 0.0),
        ])
        .execute(&mut store)
        .unwrap();
        let data = store.face(face).unwrap();
        assert_eq!(data.outline.len(), 4);
        assert_relative_eq!(data.frame * Vector3::z(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(signed_area_2d(&data.outline), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn face_in_xz_plane() {
        let mut store = ShapeStore::new();
        let face = MakeFace::new(vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(0.0, 0.0, 3.0)])
            .execute(&mut store)
            .unwrap();
        let data = store.face(face).unwrap();
        let normal = data.frame * Vector3::z();
        assert_relative_eq!(normal, -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(signed_area_2d(&data.outline), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_fail() {
        let mut store = ShapeStore::new();
        let result = MakeFace::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)])
            .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn non_planar_points_fail() {
        let mut store = ShapeStore::new();
        let result = MakeFace::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 1.0),
            p(0.0, 1.0, 0.0),
        ])
        .execute(&mut store);
        assert!(result.is_err());
    }
}
