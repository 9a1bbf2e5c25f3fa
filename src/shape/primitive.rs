use std::f64::consts::PI;

use crate::math::polygon_2d::{bounds_2d, edge_lengths, revolved_volume, signed_area_2d, signed_distance_2d};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::operations::query::Aabb;

/// A solid defined in its own local frame.
///
/// Distances are exact outside and bounded inside, so every primitive
/// field is 1-Lipschitz.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Box with one corner at the origin, extending along +x, +y, +z.
    Box { size: Vector3, fillet: f64 },
    /// Cylinder with base centered at the origin, axis +Z.
    Cylinder { radius: f64, height: f64, fillet: f64 },
    /// Closed (ρ, z) polygon revolved a full turn about +Z.
    Revolved { profile: Vec<Point2> },
    /// Torus centered at the origin in the XY plane.
    Torus { major: f64, minor: f64 },
    /// Polygon in the XY plane extruded from z = 0 to z = height.
    Prism { outline: Vec<Point2>, height: f64 },
}

impl Primitive {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Revolved { .. } => "solid of revolution",
            Self::Torus { .. } => "torus",
            Self::Prism { .. } => "prism",
        }
    }

    /// Signed distance from a point given in local coordinates.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        match self {
            Self::Box { size, fillet } => {
                let half = size * 0.5;
                let q = (p.coords - half).abs() - (half - Vector3::repeat(*fillet));
                q.sup(&Vector3::zeros()).norm() + q.max().min(0.0) - fillet
            }
            Self::Cylinder {
                radius,
                height,
                fillet,
            } => {
                let rho = p.x.hypot(p.y);
                let dr = rho - (radius - fillet);
                let dz = (p.z - height * 0.5).abs() - (height * 0.5 - fillet);
                dr.max(dz).min(0.0) + dr.max(0.0).hypot(dz.max(0.0)) - fillet
            }
            Self::Revolved { profile } => {
                signed_distance_2d(profile, &Point2::new(p.x.hypot(p.y), p.z))
            }
            Self::Torus { major, minor } => (p.x.hypot(p.y) - major).hypot(p.z) - minor,
            Self::Prism { outline, height } => {
                let d = signed_distance_2d(outline, &Point2::new(p.x, p.y));
                let dz = (p.z - height * 0.5).abs() - height * 0.5;
                d.max(dz).min(0.0) + d.max(0.0).hypot(dz.max(0.0))
            }
        }
    }

    /// Bounding box in local coordinates.
    #[must_use]
    pub fn local_bounds(&self) -> Aabb {
        match self {
            Self::Box { size, .. } => Aabb::new(Point3::origin(), Point3::from(*size)),
            Self::Cylinder { radius, height, .. } => Aabb::new(
                Point3::new(-radius, -radius, 0.0),
                Point3::new(*radius, *radius, *height),
            ),
            Self::Revolved { profile } => {
                let (min, max) = bounds_2d(profile);
                Aabb::new(
                    Point3::new(-max.x, -max.x, min.y),
                    Point3::new(max.x, max.x, max.y),
                )
            }
            Self::Torus { major, minor } => {
                let r = major + minor;
                Aabb::new(Point3::new(-r, -r, -minor), Point3::new(r, r, *minor))
            }
            Self::Prism { outline, height } => {
                let (min, max) = bounds_2d(outline);
                Aabb::new(
                    Point3::new(min.x, min.y, 0.0),
                    Point3::new(max.x, max.y, *height),
                )
            }
        }
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        match self {
            Self::Box { size, fillet } => {
                let r = *fillet;
                let (x, y, z) = (size.x - 2.0 * r, size.y - 2.0 * r, size.z - 2.0 * r);
                x * y * z
                    + 2.0 * r * (x * y + y * z + z * x)
                    + PI * r * r * (x + y + z)
                    + 4.0 / 3.0 * PI * r.powi(3)
            }
            Self::Cylinder {
                radius,
                height,
                fillet,
            } => {
                let (big, r) = (*radius, *fillet);
                // Each rounded rim removes a (square minus quarter disc) ring.
                let corner = r * r * big - r.powi(3) / 2.0 - PI * r * r * (big - r) / 4.0
                    - r.powi(3) / 3.0;
                PI * big * big * height - 2.0 * 2.0 * PI * corner
            }
            Self::Revolved { profile } => revolved_volume(profile),
            Self::Torus { major, minor } => 2.0 * PI * PI * major * minor * minor,
            Self::Prism { outline, height } => signed_area_2d(outline).abs() * height,
        }
    }

    /// Lengths of the primitive's boundary edges.
    #[must_use]
    pub fn edge_lengths(&self) -> Vec<f64> {
        match self {
            Self::Box { size, .. } => [size.x, size.y, size.z]
                .iter()
                .flat_map(|len| std::iter::repeat_n(*len, 4))
                .collect(),
            Self::Cylinder { radius, height, .. } => {
                vec![2.0 * PI * radius, 2.0 * PI * radius, *height]
            }
            Self::Revolved { profile } => {
                let n = profile.len();
                let mut edges: Vec<f64> = profile
                    .iter()
                    .filter(|pt| pt.x > TOLERANCE)
                    .map(|pt| 2.0 * PI * pt.x)
                    .collect();
                for i in 0..n {
                    let (a, b) = (profile[i], profile[(i + 1) % n]);
                    let on_axis = a.x <= TOLERANCE && b.x <= TOLERANCE;
                    let len = (b - a).norm();
                    if !on_axis && len > TOLERANCE {
                        edges.push(len);
                    }
                }
                edges
            }
            Self::Torus { major, minor } => vec![2.0 * PI * minor, 2.0 * PI * (major + minor)],
            Self::Prism { outline, height } => {
                let ring = edge_lengths(outline);
                let mut edges = Vec::with_capacity(ring.len() * 3);
                edges.extend_from_slice(&ring);
                edges.extend_from_slice(&ring);
                edges.extend(std::iter::repeat_n(*height, ring.len()));
                edges
            }
        }
    }
}
