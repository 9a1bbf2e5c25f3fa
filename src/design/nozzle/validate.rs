use crate::error::Result;
use crate::operations::query::BoundingBox;
use crate::shape::{ShapeId, ShapeStore};

/// Printability check on the finished solid.
///
/// Passes when the smallest bounding-box extent exceeds `min_feature`.
/// Despite the name this does not inspect the boundary topology.
///
/// # Errors
///
/// Returns an error if the shape is not in the store.
pub fn validate_manifold(store: &ShapeStore, shape: ShapeId, min_feature: f64) -> Result<bool> {
    let bbox = BoundingBox::new(shape).execute(store)?;
    let min_extent = bbox.min_extent();
    tracing::debug!(min_extent, min_feature, "manifold check");
    Ok(min_extent > min_feature)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;

    fn slab(store: &mut ShapeStore, thinnest: f64) -> ShapeId {
        MakeBox::new(Point3::origin(), Vector3::new(120.0, 80.0, thinnest))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn thick_part_passes() {
        let mut store = ShapeStore::new();
        let shape = slab(&mut store, 50.0);
        assert!(validate_manifold(&store, shape, 0.6).unwrap());
    }

    #[test]
    fn thin_part_fails() {
        let mut store = ShapeStore::new();
        let shape = slab(&mut store, 0.3);
        assert!(!validate_manifold(&store, shape, 0.6).unwrap());
    }

    #[test]
    fn extent_equal_to_min_feature_fails() {
        let mut store = ShapeStore::new();
        let shape = slab(&mut store, 0.6);
        assert!(!validate_manifold(&store, shape, 0.6).unwrap());
    }
}
