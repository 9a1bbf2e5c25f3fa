use crate::error::Result;
use crate::math::{Isometry3, Point3, Vector3};
use crate::shape::{ShapeId, ShapeStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a box from two corners in any order.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for pt in rest {
            aabb.min = aabb.min.inf(pt);
            aabb.max = aabb.max.sup(pt);
        }
        Some(aabb)
    }

    /// Edge lengths along x, y and z.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// Smallest of the three edge lengths.
    #[must_use]
    pub fn min_extent(&self) -> f64 {
        self.extent().min()
    }

    /// Largest of the three edge lengths.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.extent().max()
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let e = self.extent();
        e.x * e.y * e.z
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Overlap of both boxes, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        (min.x <= max.x && min.y <= max.y && min.z <= max.z).then_some(Self { min, max })
    }

    /// Whether the boxes share any point (touching counts).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Grows the box by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector3::repeat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Bounding box of this box after a rigid placement.
    #[must_use]
    pub fn transformed(&self, placement: &Isometry3) -> Self {
        let corners: Vec<Point3> = self
            .corners()
            .iter()
            .map(|c| placement.transform_point(c))
            .collect();
        Self::from_points(&corners).unwrap_or(*self)
    }

    /// The eight corners, x varying fastest.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// The eight half-size sub-boxes.
    #[must_use]
    pub fn octants(&self) -> [Self; 8] {
        let c = self.center();
        self.corners().map(|corner| Self::new(corner, c))
    }

    /// Signed distance from `p` to the box, negative inside.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        let half = self.extent() * 0.5;
        let q = (p - self.center()).abs() - half;
        let outside = q.sup(&Vector3::zeros()).norm();
        let inside = q.max().min(0.0);
        outside + inside
    }

    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Computes the axis-aligned bounding box of a shape.
pub struct BoundingBox {
    shape: ShapeId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(shape: ShapeId) -> Self {
        Self { shape }
    }

    /// Executes the query, returning the AABB.
    ///
    /// Boxes are conservative: a cut never shrinks its base's box.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is not in the store.
    pub fn execute(&self, store: &ShapeStore) -> Result<Aabb> {
        Ok(store.shape(self.shape)?.bbox)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::placement;
    use crate::operations::creation::{MakeBox, MakeCylinder};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_bounding_box() {
        let mut store = ShapeStore::new();
        let solid = MakeBox::new(p(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0))
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert_relative_eq!(aabb.min, p(1.0, 2.0, 3.0));
        assert_relative_eq!(aabb.max, p(5.0, 7.0, 9.0));
    }

    #[test]
    fn cylinder_bounding_box_covers_round_extent() {
        let mut store = ShapeStore::new();
        let solid = MakeCylinder::new(Point3::origin(), 2.0, Vector3::z(), 5.0)
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(solid).execute(&store).unwrap();
        assert_relative_eq!(aabb.min, p(-2.0, -2.0, 0.0));
        assert_relative_eq!(aabb.max, p(2.0, 2.0, 5.0));
    }

    #[test]
    fn signed_distance_to_box() {
        let aabb = Aabb::new(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0));
        assert_relative_eq!(aabb.signed_distance(&p(1.0, 1.0, 1.0)), -1.0);
        assert_relative_eq!(aabb.signed_distance(&p(3.0, 1.0, 1.0)), 1.0);
        assert_relative_eq!(aabb.signed_distance(&p(3.0, 3.0, 1.0)), 2.0_f64.sqrt());
    }

    #[test]
    fn disjoint_boxes_do_not_overlap() {
        let a = Aabb::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let b = Aabb::new(p(2.0, 0.0, 0.0), p(3.0, 1.0, 1.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&a.expanded(0.5)));
    }

    #[test]
    fn transformed_box_rotated_quarter_turn() {
        let aabb = Aabb::new(p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0));
        let rotated = aabb.transformed(&placement(Vector3::zeros(), Vector3::z(), 90.0));
        assert_relative_eq!(rotated.min, p(-2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(rotated.max, p(0.0, 1.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn octants_tile_parent() {
        let aabb = Aabb::new(p(0.0, 0.0, 0.0), p(2.0, 4.0, 6.0));
        let total: f64 = aabb.octants().iter().map(Aabb::volume).sum();
        assert_relative_eq!(total, aabb.volume());
    }
}
