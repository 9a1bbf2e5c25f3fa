pub mod polygon_2d;
pub mod profile;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rigid placement (rotation followed by translation).
pub type Isometry3 = nalgebra::Isometry3<f64>;

/// Unit quaternion rotation.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation that returns `a` at `t = 0` and `b` at `t = 1` exactly.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Returns the rotation that maps local +Z onto `axis`.
///
/// Returns `None` if the axis has zero length.
#[must_use]
pub fn rotation_from_z(axis: &Vector3) -> Option<UnitQuaternion> {
    let len = axis.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = axis / len;
    UnitQuaternion::rotation_between(&Vector3::z(), &dir).or_else(|| {
        // Antiparallel: any half-turn about an axis perpendicular to Z.
        Some(UnitQuaternion::from_axis_angle(
            &Vector3::x_axis(),
            std::f64::consts::PI,
        ))
    })
}

/// Builds a placement from a translation and a rotation of `degrees` about `axis`.
///
/// A zero axis yields the identity rotation.
#[must_use]
pub fn placement(base: Vector3, axis: Vector3, degrees: f64) -> Isometry3 {
    let rotation = nalgebra::Unit::try_new(axis, TOLERANCE).map_or_else(
        UnitQuaternion::identity,
        |unit| UnitQuaternion::from_axis_angle(&unit, degrees.to_radians()),
    );
    Isometry3::from_parts(base.into(), rotation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_endpoints_are_exact() {
        assert_eq!(lerp(3.0, 2.2, 0.0), 3.0);
        assert_eq!(lerp(3.0, 2.2, 1.0), 2.2);
        assert_relative_eq!(lerp(0.0, 10.0, 0.25), 2.5);
    }

    #[test]
    fn rotation_from_z_to_x() {
        let rot = rotation_from_z(&Vector3::x()).unwrap();
        let mapped = rot * Vector3::z();
        assert_relative_eq!(mapped, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn rotation_from_z_antiparallel() {
        let rot = rotation_from_z(&-Vector3::z()).unwrap();
        let mapped = rot * Vector3::z();
        assert_relative_eq!(mapped, -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn rotation_from_zero_axis_is_none() {
        assert!(rotation_from_z(&Vector3::zeros()).is_none());
    }

    #[test]
    fn placement_rotates_about_y() {
        let iso = placement(Vector3::new(1.0, 0.0, 0.0), Vector3::y(), 90.0);
        let p = iso * Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(p, Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
