use crate::error::Result;
use crate::shape::{BooleanOp, ShapeId, ShapeKind, ShapeStore};

use super::Aabb;

/// Default octree depth for numeric integration.
pub const DEFAULT_MAX_DEPTH: u32 = 7;

/// Computes the volume of a shape.
///
/// Primitives, placements and unions of disjoint operands are computed
/// analytically. Other shapes are integrated over an adaptive octree: a cell
/// whose center lies farther from the boundary than its half-diagonal is
/// wholly inside or outside; leaf cells straddling the boundary contribute a
/// fraction estimated from the signed distance at their center.
///
/// A compound's volume is the sum of its members', overlaps included.
pub struct Volume {
    shape: ShapeId,
    max_depth: u32,
}

impl Volume {
    /// Creates a new `Volume` query with the default octree depth.
    #[must_use]
    pub fn new(shape: ShapeId) -> Self {
        Self {
            shape,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the octree depth used when no analytic volume exists.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Executes the query, returning the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape or one of its operands is missing.
    pub fn execute(&self, store: &ShapeStore) -> Result<f64> {
        self.volume_of(store, self.shape)
    }

    fn volume_of(&self, store: &ShapeStore, id: ShapeId) -> Result<f64> {
        if let ShapeKind::Compound(children) = &store.shape(id)?.kind {
            let mut total = 0.0;
            for child in children {
                total += self.volume_of(store, *child)?;
            }
            return Ok(total);
        }
        if let Some(volume) = analytic_volume(store, id)? {
            return Ok(volume);
        }
        let root = store.shape(id)?.bbox;
        let root = root.expanded(root.max_extent() * 1e-6);
        integrate(store, id, &root, 0, self.max_depth)
    }
}

fn analytic_volume(store: &ShapeStore, id: ShapeId) -> Result<Option<f64>> {
    let volume = match &store.shape(id)?.kind {
        ShapeKind::Primitive { primitive, .. } => Some(primitive.volume()),
        ShapeKind::Transformed { child, .. } => analytic_volume(store, *child)?,
        ShapeKind::Boolean {
            op: BooleanOp::Union,
            lhs,
            rhs,
        } if !store.shape(*lhs)?.bbox.overlaps(&store.shape(*rhs)?.bbox) => {
            match (analytic_volume(store, *lhs)?, analytic_volume(store, *rhs)?) {
                (Some(a), Some(b)) => Some(a + b),
                _ => None,
            }
        }
        _ => None,
    };
    Ok(volume)
}

fn integrate(store: &ShapeStore, id: ShapeId, cell: &Aabb, depth: u32, max_depth: u32) -> Result<f64> {
    let half_diagonal = cell.extent().norm() * 0.5;
    let d = store.signed_distance(id, &cell.center())?;
    if d >= half_diagonal {
        return Ok(0.0);
    }
    let cell_volume = cell.volume();
    if d <= -half_diagonal {
        return Ok(cell_volume);
    }
    if depth >= max_depth {
        let edge = cell_volume.cbrt();
        return Ok(cell_volume * (0.5 - d / edge).clamp(0.0, 1.0));
    }
    let mut total = 0.0;
    for octant in &cell.octants() {
        total += integrate(store, id, octant, depth + 1, max_depth)?;
    }
    Ok(total)
}
