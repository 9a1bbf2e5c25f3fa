//! Solid, heavily shielded probe for printing.
//!
//! No part is hollow. Each part gets its own display color; with
//! `make_unified_solid` set they are also fused into one solid.

mod params;

pub use params::{ProbeParams, ShieldDisc};

use crate::design::parts::{cone_x, cylinder_x, fillet_or_keep, tube, Axis};
use crate::design::{BuildLog, DesignBuild};
use crate::error::Result;
use crate::math::{placement, Point3, Vector3};
use crate::operations::boolean::{fuse_all, Union};
use crate::operations::creation::{CircleSection, MakeBox, MakeCone, MakeCylinder, MakeLoft};
use crate::operations::modification::EdgeFilter;
use crate::operations::transform::Place;
use crate::scene::{Color, DisplayMode, SceneBuilder};
use crate::shape::{ShapeId, ShapeStore};

/// Label of the fused probe.
pub const UNIFIED_LABEL: &str = "Unified_ExtremeShield_Probe";

const HULL_LABEL: &str = "Hull_Solid";
const HULL_COLOR: Color = Color::rgb(0.70, 0.70, 0.72);
const SHIELD_COLOR: Color = Color::rgb(0.50, 0.52, 0.54);
const UNIFIED_COLOR: Color = Color::rgb(0.72, 0.72, 0.74);

/// Builds the probe.
///
/// Without `make_unified_solid` the hull is reported as the final part.
///
/// # Errors
///
/// Returns an error if a part cannot be built or the unified fuse fails.
pub fn build_shield_probe(scene: &mut SceneBuilder, params: &ProbeParams) -> Result<DesignBuild> {
    let mut log = BuildLog::default();

    let hull = hull(scene.store_mut(), params, &mut log)?;
    show(scene, HULL_LABEL, hull, HULL_COLOR)?;

    let store = scene.store_mut();
    let front_x = -params.front_tps.t - params.front_tps.gap;
    let front = shield_disc(store, &params.front_tps, front_x)?;
    let front = fillet_or_keep(store, &mut log, "front TPS fillet", front, params.shield_fillet_r, EdgeFilter::All)?;
    let rear_x = params.tail_x() + params.rear_tps.gap;
    let rear = shield_disc(store, &params.rear_tps, rear_x)?;
    let rear = fillet_or_keep(store, &mut log, "rear TPS fillet", rear, params.shield_fillet_r, EdgeFilter::All)?;
    show(scene, "Front_TPS", front, SHIELD_COLOR)?;
    show(scene, "Rear_TPS", rear, SHIELD_COLOR)?;

    let ring = tube(
        scene.store_mut(),
        2.0 * params.ring_guard_r,
        2.0 * (params.ring_guard_r - params.ring_guard_t),
        params.ring_guard_w,
        Point3::new(params.tail_x(), 0.0, 0.0),
        Axis::X,
        0.2,
    )?;
    show(scene, "Rear_Guard_Ring", ring, Color::rgb(0.58, 0.60, 0.62))?;

    let nozzle = nozzle(scene.store_mut(), params, &mut log)?;
    show(scene, "Main_Nozzle", nozzle, Color::rgb(0.68, 0.70, 0.72))?;

    let core = cylinder_x(
        scene.store_mut(),
        params.reactor_d,
        params.reactor_l,
        Point3::new(params.reactor_cx, 0.0, 0.0),
    )?;
    show(scene, "Reactor_Core", core, Color::rgb(0.66, 0.68, 0.70))?;

    let radiators = radiator_panels(scene.store_mut(), params, &mut log)?;
    show(scene, "Radiator_Panels", radiators, Color::rgb(0.62, 0.64, 0.68))?;

    let bands = structural_bands(scene.store_mut(), params, &mut log)?;
    show(scene, "Structural_Bands", bands, Color::rgb(0.64, 0.64, 0.66))?;

    let truss = truss_armor(scene.store_mut(), params)?;
    show(scene, "Truss_Armor", truss, Color::rgb(0.58, 0.58, 0.60))?;

    let mast_x = params.nose_len + params.mid_len / 2.0;
    let store = scene.store_mut();
    let mast = cylinder_x(store, params.mast_r * 2.0, params.mast_l, Point3::new(mast_x, 0.0, 0.0))?;
    let dish_base = Point3::new(mast_x + params.mast_l, 0.0, 0.0);
    let dish = MakeCone::new(dish_base, 0.0, params.dish_r, Vector3::x(), params.dish_depth).execute(store)?;
    show(scene, "Mast", mast, Color::rgb(0.60, 0.62, 0.64))?;
    show(scene, "Antenna_Dish", dish, Color::rgb(0.65, 0.67, 0.70))?;

    let parts = [hull, front, rear, ring, core, nozzle, radiators, bands, truss, mast, dish];
    let subassemblies = [
        "hull", "front TPS", "rear TPS", "guard ring", "reactor", "nozzle", "radiators", "bands",
        "truss", "mast", "dish",
    ]
    .into_iter()
    .map(str::to_owned)
    .zip(parts)
    .collect();

    let (final_label, final_shape) = if params.make_unified_solid {
        let solid = fuse_all(scene.store_mut(), &parts)?;
        let label = show(scene, UNIFIED_LABEL, solid, UNIFIED_COLOR)?;
        (label, solid)
    } else {
        (HULL_LABEL.to_owned(), hull)
    };
    tracing::info!(label = %final_label, objects = scene.object_count(), "shield probe built");

    Ok(DesignBuild {
        final_label,
        final_shape,
        compound: None,
        subassemblies,
        log,
    })
}

/// Registers a colored, shaded part without a material and returns its
/// final label.
fn show(scene: &mut SceneBuilder, label: &str, shape: ShapeId, color: Color) -> Result<String> {
    let id = scene.add_part(label, shape, None)?;
    scene.set_color(id, color)?;
    scene.set_display_mode(id, DisplayMode::Shaded)?;
    Ok(scene.object(id)?.label.clone())
}

/// Lofted nose along +X from `x = 0`.
fn nose_loft(store: &mut ShapeStore, p: &ProbeParams) -> Result<ShapeId> {
    let radii = [p.nose_base_d / 2.0, p.nose_shoulder_r, p.nose_neck_r, p.nose_cap_d / 2.0];
    let stations = [0.0, 0.35, 0.7, 1.0];
    let sections = radii
        .into_iter()
        .zip(stations)
        .map(|(r, t)| CircleSection::new(Point3::new(p.nose_len * t, 0.0, 0.0), Vector3::x(), r))
        .collect();
    MakeLoft::new(sections).execute(store)
}

/// Nose, mid and rear fused. The mid and rear cylinders are centered on
/// the start of the section before them.
fn hull(store: &mut ShapeStore, p: &ProbeParams, log: &mut BuildLog) -> Result<ShapeId> {
    let nose = nose_loft(store, p)?;
    let mid = cylinder_x(store, p.mid_d, p.mid_len, Point3::new(p.nose_len, 0.0, 0.0))?;
    let rear = cylinder_x(store, p.rear_d, p.rear_len, Point3::new(p.nose_len + p.mid_len, 0.0, 0.0))?;
    let hull = fuse_all(store, &[nose, mid, rear])?;
    fillet_or_keep(store, log, "hull fillet", hull, p.hull_fillet_r, EdgeFilter::All)
}

/// Disc with a bevel cone on its face, turned onto +X and moved to `x`.
fn shield_disc(store: &mut ShapeStore, disc: &ShieldDisc, x: f64) -> Result<ShapeId> {
    let plate = MakeCylinder::new(Point3::origin(), disc.r, Vector3::z(), disc.t).execute(store)?;
    let bevel = MakeCone::new(Point3::origin(), disc.r, disc.r - disc.bevel, Vector3::z(), disc.bevel).execute(store)?;
    let shield = Union::new(plate, bevel).execute(store)?;
    Place::new(shield, placement(Vector3::new(x, 0.0, 0.0), Vector3::y(), 90.0)).execute(store)
}

/// Short throat cylinder ahead of the expansion cone.
fn nozzle(store: &mut ShapeStore, p: &ProbeParams, log: &mut BuildLog) -> Result<ShapeId> {
    let throat_x = p.nozzle_cx - p.nozzle_l / 2.0 - p.nozzle_throat_l / 2.0;
    let throat = cylinder_x(store, p.nozzle_throat_d, p.nozzle_throat_l, Point3::new(throat_x, 0.0, 0.0))?;
    let cone = cone_x(store, p.nozzle_throat_d, p.nozzle_exit_d, p.nozzle_l, Point3::new(p.nozzle_cx, 0.0, 0.0))?;
    let cone = fillet_or_keep(store, log, "nozzle cone fillet", cone, p.nozzle_fillet_r, EdgeFilter::All)?;
    Union::new(throat, cone).execute(store)
}

/// Stack of rounded plates beside the rear section.
fn radiator_panels(store: &mut ShapeStore, p: &ProbeParams, log: &mut BuildLog) -> Result<ShapeId> {
    let size = Vector3::new(p.rad_panel_w, p.rad_panel_t, p.rad_panel_h);
    let x = p.nose_len + p.mid_len + 80.0;
    let y = -p.rear_d / 2.0 - 90.0;
    let mut plates = Vec::new();
    for i in 0..p.rad_panel_count {
        let z = -p.rad_panel_h / 2.0 + f64::from(i) * p.rad_spacing;
        let plate = MakeBox::new(Point3::new(x, y, z), size).execute(store)?;
        plates.push(fillet_or_keep(store, log, "radiator fillet", plate, p.rad_fillet_r, EdgeFilter::All)?);
    }
    fuse_all(store, &plates)
}

fn structural_bands(store: &mut ShapeStore, p: &ProbeParams, log: &mut BuildLog) -> Result<ShapeId> {
    let pitch = p.band_pitch();
    let r = p.mid_d / 2.0 + p.band_t;
    let bands = (0..p.bands_n)
        .map(|i| {
            let base = Point3::new(p.nose_len + f64::from(i) * pitch, 0.0, 0.0);
            MakeCylinder::new(base, r, Vector3::x(), p.band_w).execute(store)
        })
        .collect::<Result<Vec<_>>>()?;
    let bands = fuse_all(store, &bands)?;
    fillet_or_keep(store, log, "band fillet", bands, p.band_fillet_r, EdgeFilter::All)
}

/// Solid armor block made of `truss_n` coincident beams at the origin.
fn truss_armor(store: &mut ShapeStore, p: &ProbeParams) -> Result<ShapeId> {
    let size = Vector3::new(p.truss_len, p.truss_tube_w, p.truss_tube_w);
    let beams = (0..p.truss_n)
        .map(|_| MakeBox::new(Point3::origin(), size).execute(store))
        .collect::<Result<Vec<_>>>()?;
    fuse_all(store, &beams)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{BoundingBox, ClassifyPoint, PointClassification};
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    fn build(params: &ProbeParams) -> (Scene, DesignBuild) {
        let mut scene = SceneBuilder::open("ExtremeShield_Probe_Printable");
        let build = build_shield_probe(&mut scene, params).unwrap();
        (scene.finalize(), build)
    }

    fn bounds(scene: &Scene, label: &str) -> crate::operations::query::Aabb {
        let shape = scene.object(label).unwrap().shape;
        BoundingBox::new(shape).execute(scene.store()).unwrap()
    }

    #[test]
    fn unified_probe_is_the_final_part() {
        let (scene, build) = build(&ProbeParams::default());
        assert_eq!(scene.objects().len(), 12);
        assert_eq!(build.final_label, UNIFIED_LABEL);
        let unified = scene.object(UNIFIED_LABEL).unwrap();
        assert_eq!(unified.color, UNIFIED_COLOR);
        assert_eq!(unified.display_mode, DisplayMode::Shaded);
        assert_eq!(unified.material, None);
        assert_eq!(build.subassemblies.len(), 11);
    }

    #[test]
    fn without_unification_the_hull_is_final() {
        let params = ProbeParams {
            make_unified_solid: false,
            ..ProbeParams::default()
        };
        let (scene, build) = build(&params);
        assert_eq!(scene.objects().len(), 11);
        assert_eq!(build.final_label, HULL_LABEL);
        assert!(scene.object(UNIFIED_LABEL).is_err());
    }

    #[test]
    fn composite_fillets_fall_back_and_plates_round() {
        let (_, build) = build(&ProbeParams::default());
        let steps: Vec<&str> = build.log.fallbacks.iter().map(|n| n.step.as_str()).collect();
        assert_eq!(
            steps,
            ["hull fillet", "front TPS fillet", "rear TPS fillet", "nozzle cone fillet", "band fillet"]
        );
    }

    #[test]
    fn front_shield_stands_off_the_nose() {
        let (scene, _) = build(&ProbeParams::default());
        let front = bounds(&scene, "Front_TPS");
        assert_relative_eq!(front.min.x, -360.0, epsilon = 1e-6);
        assert_relative_eq!(front.max.x, -120.0, epsilon = 1e-6);
        assert_relative_eq!(front.max.z, 1600.0, epsilon = 1e-6);
        let rear = bounds(&scene, "Rear_TPS");
        assert_relative_eq!(rear.min.x, 4880.0, epsilon = 1e-6);
    }

    #[test]
    fn nose_loft_tapers_to_the_cap() {
        let params = ProbeParams::default();
        let mut store = ShapeStore::new();
        let nose = nose_loft(&mut store, &params).unwrap();
        let bb = BoundingBox::new(nose).execute(&store).unwrap();
        assert_relative_eq!(bb.max.x, 800.0, epsilon = 1e-6);
        assert_relative_eq!(bb.max.y, 550.0, epsilon = 1e-6);
        let at = |y: f64| ClassifyPoint::new(nose, Point3::new(790.0, y, 0.0)).execute(&store).unwrap();
        assert_eq!(at(200.0), PointClassification::Inside);
        assert_eq!(at(400.0), PointClassification::Outside);
    }

    #[test]
    fn radiator_stack_height() {
        let (scene, _) = build(&ProbeParams::default());
        let stack = bounds(&scene, "Radiator_Panels");
        assert_relative_eq!(stack.min.z, -40.0, epsilon = 1e-6);
        assert_relative_eq!(stack.max.z, 1160.0, epsilon = 1e-6);
        assert_relative_eq!(stack.max.y, -1162.0, epsilon = 1e-6);
    }
}
