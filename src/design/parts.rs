//! Placement helpers shared by the generators.
//!
//! Hulls run along +X from nose to tail, except the nozzle which runs
//! along +Z.

use crate::error::Result;
use crate::materials::MaterialTag;
use crate::math::{Point3, Vector3};
use crate::operations::boolean::{Subtract, Union};
use crate::operations::creation::{MakeBox, MakeCone, MakeCylinder};
use crate::operations::modification::{EdgeFilter, Fillet};
use crate::scene::SceneBuilder;
use crate::shape::{ShapeId, ShapeStore};

use super::{or_fallback, BuildLog};

/// Direction a helper-built cylinder is laid along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    /// Laid by a quarter turn about X, so the solid grows toward −Y.
    Y,
    Z,
}

impl Axis {
    fn direction(self) -> Vector3 {
        match self {
            Self::X => Vector3::x(),
            Self::Y => -Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }

    fn base(self, center: Point3, length: f64) -> Point3 {
        let half = length * 0.5;
        match self {
            Self::X => center - Vector3::x() * half,
            Self::Y => center - Vector3::y() * half,
            Self::Z => center - Vector3::z() * half,
        }
    }
}

/// Cylinder of diameter `d` and length `l` positioned from `center`.
///
/// The base sits half a length before `center` on the chosen axis.
pub(crate) fn cylinder(store: &mut ShapeStore, d: f64, l: f64, center: Point3, axis: Axis) -> Result<ShapeId> {
    MakeCylinder::new(axis.base(center, l), d / 2.0, axis.direction(), l).execute(store)
}

/// Cylinder along +X centered on `center`.
pub(crate) fn cylinder_x(store: &mut ShapeStore, d: f64, l: f64, center: Point3) -> Result<ShapeId> {
    cylinder(store, d, l, center, Axis::X)
}

/// Cone along +X centered on `center`, diameter `d1` at the low-x end.
pub(crate) fn cone_x(store: &mut ShapeStore, d1: f64, d2: f64, l: f64, center: Point3) -> Result<ShapeId> {
    MakeCone::new(Axis::X.base(center, l), d1 / 2.0, d2 / 2.0, Vector3::x(), l).execute(store)
}

/// Box of size `(w, h, d)` centered on `center`.
pub(crate) fn box_centered(store: &mut ShapeStore, w: f64, h: f64, d: f64, center: Point3) -> Result<ShapeId> {
    MakeBox::centered(center, Vector3::new(w, h, d)).execute(store)
}

/// Hollow tube along `axis`, cutting with an inner cylinder `clearance`
/// longer than the outer one.
pub(crate) fn tube(
    store: &mut ShapeStore,
    outer_d: f64,
    inner_d: f64,
    l: f64,
    center: Point3,
    axis: Axis,
    clearance: f64,
) -> Result<ShapeId> {
    let outer = cylinder(store, outer_d, l, center, axis)?;
    let inner = cylinder(store, inner_d, l + clearance, center, axis)?;
    Subtract::new(outer, inner).execute(store)
}

/// Annulus along +Z with its base at `z`.
pub(crate) fn annulus_z(
    store: &mut ShapeStore,
    inner_r: f64,
    outer_r: f64,
    z: f64,
    height: f64,
    clearance: f64,
) -> Result<ShapeId> {
    let outer = MakeCylinder::new(Point3::new(0.0, 0.0, z), outer_r, Vector3::z(), height).execute(store)?;
    let inner = MakeCylinder::new(
        Point3::new(0.0, 0.0, z - clearance),
        inner_r,
        Vector3::z(),
        height + 2.0 * clearance,
    )
    .execute(store)?;
    Subtract::new(outer, inner).execute(store)
}

/// Rounds a shape, keeping it unrounded if the fillet fails.
pub(crate) fn fillet_or_keep(
    store: &mut ShapeStore,
    log: &mut BuildLog,
    step: &str,
    shape: ShapeId,
    radius: f64,
    filter: EdgeFilter,
) -> Result<ShapeId> {
    let primary = Fillet::new(shape, radius).with_filter(filter).execute(store);
    let built = or_fallback(step, primary, || Ok(shape))?;
    Ok(log.take(step, built))
}

/// Fuses shapes left to right, skipping any operand whose fuse fails.
pub(crate) fn fuse_skipping(
    store: &mut ShapeStore,
    log: &mut BuildLog,
    step: &str,
    first: ShapeId,
    rest: &[ShapeId],
) -> ShapeId {
    let mut acc = first;
    for (i, shape) in rest.iter().enumerate() {
        match Union::new(acc, *shape).execute(store) {
            Ok(fused) => acc = fused,
            Err(err) => log.skip(format!("{step} #{}", i + 1), &err),
        }
    }
    acc
}

/// Registers `shape` under `label` and returns the shape for chaining.
pub(crate) fn register(
    scene: &mut SceneBuilder,
    label: &str,
    shape: ShapeId,
    material: MaterialTag,
) -> Result<ShapeId> {
    scene.add_part(label, shape, Some(material))?;
    Ok(shape)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeCompound;
    use crate::operations::query::{BoundingBox, Volume};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn x_cylinder_is_centered() {
        let mut store = ShapeStore::new();
        let c = cylinder_x(&mut store, 4.0, 10.0, p(20.0, 0.0, 0.0)).unwrap();
        let bb = BoundingBox::new(c).execute(&store).unwrap();
        assert_relative_eq!(bb.min.x, 15.0, epsilon = 1e-9);
        assert_relative_eq!(bb.max.x, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn y_cylinder_grows_toward_negative_y() {
        let mut store = ShapeStore::new();
        let c = cylinder(&mut store, 2.0, 10.0, p(0.0, 0.0, 0.0), Axis::Y).unwrap();
        let bb = BoundingBox::new(c).execute(&store).unwrap();
        assert_relative_eq!(bb.max.y, -5.0, epsilon = 1e-9);
        assert_relative_eq!(bb.min.y, -15.0, epsilon = 1e-9);
    }

    #[test]
    fn tube_volume() {
        let mut store = ShapeStore::new();
        let t = tube(&mut store, 20.0, 16.0, 10.0, p(0.0, 0.0, 0.0), Axis::X, 1.0).unwrap();
        let volume = Volume::new(t).execute(&store).unwrap();
        assert_relative_eq!(volume, PI * (100.0 - 64.0) * 10.0, max_relative = 0.03);
    }

    #[test]
    fn failed_fillet_keeps_shape() {
        let mut store = ShapeStore::new();
        let a = box_centered(&mut store, 2.0, 2.0, 2.0, p(0.0, 0.0, 0.0)).unwrap();
        let b = box_centered(&mut store, 2.0, 2.0, 2.0, p(1.0, 0.0, 0.0)).unwrap();
        let fused = Union::new(a, b).execute(&mut store).unwrap();
        let mut log = BuildLog::default();
        let kept = fillet_or_keep(&mut store, &mut log, "round", fused, 0.1, EdgeFilter::All).unwrap();
        assert_eq!(kept, fused);
        assert_eq!(log.fallbacks.len(), 1);
    }

    #[test]
    fn fuse_skipping_drops_compound_operand() {
        let mut store = ShapeStore::new();
        let a = box_centered(&mut store, 1.0, 1.0, 1.0, p(0.0, 0.0, 0.0)).unwrap();
        let b = box_centered(&mut store, 1.0, 1.0, 1.0, p(3.0, 0.0, 0.0)).unwrap();
        let group = MakeCompound::new(vec![a, b]).execute(&mut store).unwrap();
        let mut log = BuildLog::default();
        let fused = fuse_skipping(&mut store, &mut log, "assembly", a, &[group, b]);
        assert_eq!(log.skipped.len(), 1);
        let volume = Volume::new(fused).execute(&store).unwrap();
        assert_relative_eq!(volume, 2.0, epsilon = 1e-9);
    }
}
