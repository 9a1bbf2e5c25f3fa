//! Radiation-hardened spaceship with internal volume.
//!
//! Every part is registered in the scene under its own label. The final
//! solid fuses the hull, compartments, propulsion, power systems,
//! external features and shield layers. Print supports are registered
//! but stay out of the fuse.

mod params;

pub use params::ShipParams;

use std::f64::consts::TAU;

use crate::design::parts::{
    box_centered, cone_x, cylinder, cylinder_x, fillet_or_keep, register, tube, Axis,
};
use crate::design::{BuildLog, DesignBuild};
use crate::error::Result;
use crate::materials::MaterialTag;
use crate::math::{placement, Point3, Vector3};
use crate::operations::boolean::{fuse_all, Subtract};
use crate::operations::creation::{MakeCone, MakeCylinder};
use crate::operations::modification::EdgeFilter;
use crate::operations::transform::Place;
use crate::scene::{DisplayMode, SceneBuilder};
use crate::shape::{ShapeId, ShapeStore};

/// Label of the fused spaceship in the scene.
pub const SHIP_LABEL: &str = "TankBlackRadiation_Spaceship";

/// Extra length given to inner cutters so they pass through the ends.
const CUT_OVERRUN: f64 = 100.0;

/// Builds the spaceship and registers all of its parts.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or a part cannot be
/// built or fused.
pub fn build_spaceship(scene: &mut SceneBuilder, params: &ShipParams) -> Result<DesignBuild> {
    params.validate()?;
    let mut log = BuildLog::default();

    let hull = hull(scene, params, &mut log)?;
    let shields = radiation_shields(scene, params)?;
    let compartments = internal_compartments(scene, params)?;
    let propulsion = propulsion_systems(scene, params)?;
    let power = power_systems(scene, params)?;
    let external = external_features(scene, params)?;
    let supports = support_structures(scene, params)?;
    tracing::debug!(supports, "print supports registered");

    let store = scene.store_mut();
    let mut subassemblies = vec![("hull".to_owned(), hull)];
    for (name, group) in [
        ("compartments", &compartments),
        ("propulsion", &propulsion),
        ("power", &power),
        ("external features", &external),
        ("radiation shields", &shields),
    ] {
        subassemblies.push((name.to_owned(), fuse_all(store, group)?));
    }
    let parts: Vec<ShapeId> = subassemblies.iter().map(|(_, shape)| *shape).collect();
    let ship = fuse_all(store, &parts)?;

    let id = scene.add_part(SHIP_LABEL, ship, Some(MaterialTag::Titanium))?;
    scene.set_display_mode(id, DisplayMode::Shaded)?;
    let final_label = scene.object(id)?.label.clone();
    tracing::info!(label = %final_label, objects = scene.object_count(), "spaceship built");
    Ok(DesignBuild {
        final_label,
        final_shape: ship,
        compound: None,
        subassemblies,
        log,
    })
}

/// Places a shape built along +Z so that it runs along +X from `x`.
fn place_on_x(store: &mut ShapeStore, shape: ShapeId, x: f64) -> Result<ShapeId> {
    Place::new(shape, placement(Vector3::new(x, 0.0, 0.0), Vector3::y(), 90.0)).execute(store)
}

/// Hollow cone section from `r1` to `r2`, cut by a cone from `r1_in` to
/// `r2_in` that overruns the far end.
fn hollow_cone(
    store: &mut ShapeStore,
    (r1, r2): (f64, f64),
    (r1_in, r2_in): (f64, f64),
    length: f64,
) -> Result<ShapeId> {
    let outer = MakeCone::new(Point3::origin(), r1, r2, Vector3::z(), length).execute(store)?;
    let inner = if (r1_in - r2_in).abs() < f64::EPSILON {
        MakeCylinder::new(Point3::origin(), r1_in, Vector3::z(), length + CUT_OVERRUN).execute(store)?
    } else {
        MakeCone::new(Point3::origin(), r1_in, r2_in, Vector3::z(), length + CUT_OVERRUN).execute(store)?
    };
    Subtract::new(outer, inner).execute(store)
}

fn hull(scene: &mut SceneBuilder, p: &ShipParams, log: &mut BuildLog) -> Result<ShapeId> {
    let (r_o, r_i) = (p.hull_outer_d / 2.0, p.hull_inner_d / 2.0);
    let store = scene.store_mut();

    let nose = hollow_cone(store, (r_o, r_i), (r_i, r_i), p.nose_len)?;
    let nose = place_on_x(store, nose, p.nose_len / 2.0)?;
    let mid_x = p.nose_len + p.mid_len / 2.0;
    let mid = tube(store, p.hull_outer_d, p.hull_inner_d, p.mid_len, Point3::new(mid_x, 0.0, 0.0), Axis::X, CUT_OVERRUN)?;
    let rear_x = p.nose_len + p.mid_len + p.rear_len / 2.0;
    let rear = tube(store, p.hull_outer_d, p.hull_inner_d, p.rear_len, Point3::new(rear_x, 0.0, 0.0), Axis::X, CUT_OVERRUN)?;
    let tail = hollow_cone(store, (r_o, r_o * 0.5), (r_i, r_i * 0.5), p.tail_len)?;
    let tail = place_on_x(store, tail, p.total_length - p.tail_len / 2.0)?;

    let hull = fuse_all(store, &[nose, mid, rear, tail])?;
    let filter = EdgeFilter::LengthBetween { min: 100.0, max: 10000.0 };
    let hull = fillet_or_keep(store, log, "hull fillet", hull, p.fillet_r, filter)?;
    register(scene, "Hull", hull, MaterialTag::Titanium)
}

fn radiation_shields(scene: &mut SceneBuilder, p: &ShipParams) -> Result<Vec<ShapeId>> {
    let center = Point3::new(p.total_length / 2.0, 0.0, 0.0);
    let mut shields = Vec::new();
    for i in 0..p.rad_shield_layers {
        let layer_d = p.hull_outer_d + f64::from(i + 1) * p.rad_layer_t * 2.0;
        let layer = tube(
            scene.store_mut(),
            layer_d,
            layer_d - p.rad_layer_t * 2.0,
            p.total_length,
            center,
            Axis::X,
            CUT_OVERRUN,
        )?;
        let material = p.shield_material(i as usize);
        shields.push(register(scene, &format!("Rad_Shield_Layer_{}", i + 1), layer, material)?);
    }
    Ok(shields)
}

/// Points evenly spaced on a circle of radius `r` in the YZ plane at `x`.
fn ring_positions(count: u32, x: f64, r: f64) -> impl Iterator<Item = (u32, Point3)> {
    (0..count).map(move |i| {
        let angle = TAU * f64::from(i) / f64::from(count);
        (i, Point3::new(x, r * angle.cos(), r * angle.sin()))
    })
}

fn internal_compartments(scene: &mut SceneBuilder, p: &ShipParams) -> Result<Vec<ShapeId>> {
    let mut parts = Vec::new();

    let cockpit = box_centered(
        scene.store_mut(),
        p.cockpit_len,
        p.cockpit_w,
        p.cockpit_h,
        Point3::new(p.nose_len - p.cockpit_len / 2.0, 0.0, 0.0),
    )?;
    parts.push(register(scene, "Cockpit", cockpit, MaterialTag::Titanium)?);

    let reactor = cylinder_x(
        scene.store_mut(),
        p.reactor_d,
        p.reactor_len,
        Point3::new(p.nose_len + p.mid_len / 2.0, 0.0, 0.0),
    )?;
    parts.push(register(scene, "Reactor", reactor, MaterialTag::Steel)?);

    let tank_x = p.nose_len + p.mid_len + p.rear_len / 2.0;
    let tank_r = p.hull_inner_d / 2.0 - p.tank_d / 2.0 - 200.0;
    for (i, center) in ring_positions(p.tank_n, tank_x, tank_r) {
        let tank = cylinder_x(scene.store_mut(), p.tank_d, p.tank_len, center)?;
        parts.push(register(scene, &format!("Tank_{}", i + 1), tank, MaterialTag::Water)?);
    }

    for i in 0..p.crew_n {
        let center = Point3::new(
            p.nose_len + p.mid_len * 0.3 + f64::from(i) * p.crew_quarters_len,
            0.0,
            p.hull_inner_d / 4.0,
        );
        let quarters = box_centered(
            scene.store_mut(),
            p.crew_quarters_len,
            p.crew_quarters_w,
            p.crew_quarters_h,
            center,
        )?;
        parts.push(register(scene, &format!("Crew_Quarters_{}", i + 1), quarters, MaterialTag::Aluminum)?);
    }

    let life_support = cylinder_x(
        scene.store_mut(),
        p.life_support_d,
        p.life_support_len,
        Point3::new(p.nose_len + p.mid_len * 0.7, 0.0, -p.hull_inner_d / 4.0),
    )?;
    parts.push(register(scene, "Life_Support", life_support, MaterialTag::Steel)?);

    let control_room = box_centered(
        scene.store_mut(),
        p.control_room_len,
        p.control_room_w,
        p.control_room_h,
        Point3::new(p.nose_len + p.mid_len * 0.5, 0.0, p.hull_inner_d / 3.0),
    )?;
    parts.push(register(scene, "Control_Room", control_room, MaterialTag::Aluminum)?);

    Ok(parts)
}

fn propulsion_systems(scene: &mut SceneBuilder, p: &ShipParams) -> Result<Vec<ShapeId>> {
    let mut parts = Vec::new();
    let engine = cone_x(
        scene.store_mut(),
        p.main_engine_d,
        p.main_engine_d * 0.5,
        p.main_engine_l,
        Point3::new(p.total_length - p.main_engine_l / 2.0, 0.0, 0.0),
    )?;
    parts.push(register(scene, "Main_Engine", engine, MaterialTag::Steel)?);

    let x = p.nose_len + p.mid_len + p.rear_len * 0.7;
    for (i, center) in ring_positions(p.attitude_n, x, p.hull_outer_d / 2.0) {
        let thruster = cylinder_x(scene.store_mut(), p.attitude_thruster_d, p.attitude_thruster_l, center)?;
        parts.push(register(scene, &format!("Attitude_Thruster_{}", i + 1), thruster, MaterialTag::Titanium)?);
    }
    Ok(parts)
}

fn power_systems(scene: &mut SceneBuilder, p: &ShipParams) -> Result<Vec<ShapeId>> {
    let mut parts = Vec::new();
    let x = p.nose_len + p.mid_len * 0.8;
    let r = p.hull_inner_d / 2.0 - p.battery_d / 2.0 - 100.0;
    for (i, center) in ring_positions(p.battery_n, x, r) {
        let battery = cylinder_x(scene.store_mut(), p.battery_d, p.battery_len, center)?;
        parts.push(register(scene, &format!("Battery_{}", i + 1), battery, MaterialTag::Battery)?);
    }
    let rtg = cylinder_x(
        scene.store_mut(),
        p.generator_d,
        p.generator_len,
        Point3::new(p.nose_len + p.mid_len * 0.6, 0.0, -p.hull_inner_d / 3.0),
    )?;
    parts.push(register(scene, "RTG_Generator", rtg, MaterialTag::Superconductor)?);
    Ok(parts)
}

fn external_features(scene: &mut SceneBuilder, p: &ShipParams) -> Result<Vec<ShapeId>> {
    let mut parts = Vec::new();
    let wing_x = p.nose_len + p.mid_len / 2.0;
    for (label, side) in [("Wing_Left", 1.0), ("Wing_Right", -1.0)] {
        let wing = box_centered(
            scene.store_mut(),
            p.wing_chord,
            p.wing_span / 2.0,
            p.wing_t,
            Point3::new(wing_x, side * p.wing_span / 4.0, 0.0),
        )?;
        parts.push(register(scene, label, wing, MaterialTag::CarbonFiber)?);
    }

    for i in 0..p.solar_n {
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let center = Point3::new(
            p.nose_len + p.mid_len * 0.8 + f64::from(i) * 500.0,
            side * (p.hull_outer_d / 2.0 + p.solar_panel_w / 2.0),
            0.0,
        );
        let panel = box_centered(scene.store_mut(), p.solar_panel_l, p.solar_panel_w, p.solar_panel_t, center)?;
        parts.push(register(scene, &format!("Solar_Panel_{}", i + 1), panel, MaterialTag::CarbonFiber)?);
    }

    let antenna = cylinder_x(
        scene.store_mut(),
        p.antenna_d,
        p.antenna_h,
        Point3::new(
            p.nose_len + p.mid_len + p.antenna_h / 2.0,
            0.0,
            p.hull_outer_d / 2.0 + 200.0,
        ),
    )?;
    parts.push(register(scene, "Antenna", antenna, MaterialTag::Steel)?);

    let x = p.nose_len + p.mid_len * 0.3;
    for (i, center) in ring_positions(p.landing_n, x, p.hull_outer_d / 2.0) {
        let leg = cylinder_x(scene.store_mut(), p.landing_gear_d, p.landing_gear_l, center)?;
        parts.push(register(scene, &format!("Landing_Gear_{}", i + 1), leg, MaterialTag::Titanium)?);
    }
    Ok(parts)
}

/// Registers rods every `support_spacing` along the mid and rear
/// sections, eight per station. Returns how many were made.
#[allow(clippy::cast_possible_truncation)]
fn support_structures(scene: &mut SceneBuilder, p: &ShipParams) -> Result<usize> {
    let start = p.nose_len.trunc() as i64;
    let end = (p.total_length - p.tail_len).trunc() as i64;
    let step = (p.support_spacing.trunc() as i64).max(1);
    let r = p.hull_inner_d / 2.0 - 300.0;
    let length = p.hull_inner_d - 600.0;
    let mut count = 0;
    let mut x = start;
    while x < end {
        for angle in (0..360).step_by(45) {
            let a = f64::from(angle).to_radians();
            #[allow(clippy::cast_precision_loss)]
            let center = Point3::new(x as f64, r * a.cos(), r * a.sin());
            let rod = cylinder(scene.store_mut(), 50.0, length, center, Axis::Y)?;
            register(scene, &format!("Support_{x}_{angle}"), rod, MaterialTag::CarbonFiber)?;
            count += 1;
        }
        x += step;
    }
    Ok(count)
}
