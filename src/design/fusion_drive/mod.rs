//! Direct fusion drive with a Parker-style heat shield.
//!
//! Every part is registered under its own label. The printable
//! `Assembly_Fused` fuses them left to right and skips any operand whose
//! fuse fails; `Assembly_Compound` keeps the same parts unfused.

mod params;

pub use params::{FusionDriveParams, RadiatorParams, TpsParams};

use crate::design::parts::{box_centered, cone_x, cylinder_x, fillet_or_keep, fuse_skipping, register, tube, Axis};
use crate::design::{or_fallback, BuildLog, DesignBuild};
use crate::error::Result;
use crate::materials::MaterialTag;
use crate::math::{placement, Point3, Vector3};
use crate::operations::boolean::{fuse_all, Intersect, Subtract, Union};
use crate::operations::creation::{MakeBox, MakeCompound, MakeCylinder, MakeFace, MakeTorus};
use crate::operations::modification::{EdgeFilter, Offset};
use crate::operations::shaping::{CirclePath, Extrude, Sweep};
use crate::operations::transform::{Place, Translate};
use crate::scene::{DisplayMode, SceneBuilder};
use crate::shape::{ShapeId, ShapeStore};

/// Label of the single printable solid.
pub const FUSED_LABEL: &str = "Assembly_Fused";
/// Label of the unfused visual compound.
pub const COMPOUND_LABEL: &str = "Assembly_Compound";

/// Edges rounded where two parts are joined.
const JOIN_EDGES: EdgeFilter = EdgeFilter::LengthBetween { min: 30.0, max: 10000.0 };

/// Builds the drive, registers every part and both assemblies.
///
/// # Errors
///
/// Returns an error if a part cannot be built. Failed fuses in the final
/// assembly are skipped instead.
pub fn build_fusion_drive(scene: &mut SceneBuilder, params: &FusionDriveParams) -> Result<DesignBuild> {
    let mut log = BuildLog::default();

    let fuselage = fuselage(scene, params, &mut log)?;
    let tps = heat_shield(scene, params, &mut log)?;
    let hull = windowed_hull(scene, params, fuselage.shell)?;
    let cockpit = cockpit(scene, params, &mut log)?;
    let reactor = reactor(scene, params)?;
    let nozzle = nozzle(scene, params, fuselage.rear, &mut log)?;
    let tanks = tanks(scene, params)?;
    let legs = landing_legs(scene, params)?;
    let aero = wings_and_fin(scene, params)?;
    let radiators = radiators(scene, params)?;
    let instruments = instruments(scene, params)?;
    let large_comm = large_comm_dish(scene, params)?;
    let sail = solar_sail(scene, params)?;
    let thrusters = attitude_thrusters(scene, params)?;
    let shield = radiation_shield(scene, params)?;
    let meteor = meteor_shields(scene, params)?;
    let arrays = extra_solar_arrays(scene, params)?;
    let antennas = comm_antennas(scene, params)?;

    let mut parts = vec![hull, cockpit, tps, fuselage.nose, fuselage.mid, fuselage.rear];
    parts.extend(reactor);
    parts.extend(nozzle);
    parts.extend(tanks);
    parts.extend(legs);
    parts.extend(aero);
    parts.extend(instruments);
    parts.push(shield);
    parts.extend(radiators);
    parts.extend(meteor);
    parts.extend(arrays);
    parts.extend(antennas);
    parts.extend([large_comm, sail]);
    parts.extend(thrusters);

    let store = scene.store_mut();
    let fused = fuse_skipping(store, &mut log, FUSED_LABEL, parts[0], &parts[1..]);
    let compound = MakeCompound::new(parts.clone()).execute(store)?;

    let id = scene.add_part(FUSED_LABEL, fused, Some(MaterialTag::Aluminum))?;
    scene.set_display_mode(id, DisplayMode::Shaded)?;
    let final_label = scene.object(id)?.label.clone();
    scene.add_part(COMPOUND_LABEL, compound, None)?;
    tracing::info!(
        label = %final_label,
        parts = parts.len(),
        skipped = log.skipped.len(),
        "fusion drive built"
    );

    Ok(DesignBuild {
        final_label,
        final_shape: fused,
        compound: Some(compound),
        subassemblies: vec![
            ("hull".to_owned(), hull),
            ("heat shield".to_owned(), tps),
            ("cockpit".to_owned(), cockpit),
            ("nozzle mount".to_owned(), nozzle[0]),
            ("radiation shield".to_owned(), shield),
        ],
        log,
    })
}

struct Fuselage {
    nose: ShapeId,
    mid: ShapeId,
    rear: ShapeId,
    shell: ShapeId,
}

/// Cylinder of radius `r` laid along +X from `base`.
fn rod_x(store: &mut ShapeStore, base: Point3, r: f64, l: f64) -> Result<ShapeId> {
    MakeCylinder::new(base, r, Vector3::x(), l).execute(store)
}

/// Flat disc of radius `r` standing on `base` along +Z.
fn disc_z(store: &mut ShapeStore, base: Point3, r: f64, t: f64) -> Result<ShapeId> {
    MakeCylinder::new(base, r, Vector3::z(), t).execute(store)
}

/// `(y, z)` of a point at `degrees` on a circle of radius `r` around X.
fn on_circle(r: f64, degrees: f64) -> (f64, f64) {
    let a = degrees.to_radians();
    (r * a.cos(), r * a.sin())
}

fn fuselage(scene: &mut SceneBuilder, p: &FusionDriveParams, log: &mut BuildLog) -> Result<Fuselage> {
    let store = scene.store_mut();
    let nose = cone_x(store, p.nose_base_d, 0.0, p.nose_len, Point3::new(p.nose_len / 2.0, 0.0, 0.0))?;
    let mid = cylinder_x(store, p.mid_d, p.mid_len, Point3::new(p.nose_len + p.mid_len / 2.0, 0.0, 0.0))?;
    let rear_x = p.nose_len + p.mid_len + p.rear_len / 2.0;
    let rear = cylinder_x(store, p.rear_d, p.rear_len, Point3::new(rear_x, 0.0, 0.0))?;
    register(scene, "Nose", nose, MaterialTag::Titanium)?;
    register(scene, "Mid", mid, MaterialTag::CarbonFiber)?;
    register(scene, "Rear", rear, MaterialTag::Titanium)?;

    let store = scene.store_mut();
    let solid = fuse_all(store, &[nose, mid, rear])?;
    let primary = Offset::new(solid, -p.hull_t)
        .execute(store)
        .and_then(|inner| Subtract::new(solid, inner).execute(store));
    let built = or_fallback("hull shell", primary, || Ok(solid))?;
    let label = if built.is_fallback() { "Hull_Shell_fallback" } else { "Hull_Shell" };
    let shell = log.take("hull shell", built);
    register(scene, label, shell, MaterialTag::CarbonFiber)?;
    Ok(Fuselage { nose, mid, rear, shell })
}

/// Support cone and shield disc joined into `TPS_Assembly`, plus the
/// ablative sandwich layers registered alongside.
fn heat_shield(scene: &mut SceneBuilder, p: &FusionDriveParams, log: &mut BuildLog) -> Result<ShapeId> {
    let t = &p.tps;
    let support_x = p.nose_len + t.tps_gap;
    let disc_x = support_x + t.sup_l;

    let store = scene.store_mut();
    let support = cone_x(store, t.sup_d_base, t.sup_d_tip, t.sup_l, Point3::new(support_x + t.sup_l / 2.0, 0.0, 0.0))?;
    let disc = cylinder_x(store, t.tps_d, t.tps_t, Point3::new(disc_x + t.tps_t / 2.0, 0.0, 0.0))?;
    register(scene, "TPS_Support", support, MaterialTag::Steel)?;
    register(scene, "TPS_Shield", disc, MaterialTag::CarbonCarbon)?;

    let store = scene.store_mut();
    let joined = Union::new(support, disc).execute(store)?;
    let assembly = fillet_or_keep(store, log, "TPS join fillet", joined, t.join_fillet, JOIN_EDGES)?;
    register(scene, "TPS_Assembly", assembly, MaterialTag::CarbonCarbon)?;

    let core_t = t.core_t();
    if core_t > 0.0 {
        let r = t.tps_d / 2.0;
        let store = scene.store_mut();
        let outer = rod_x(store, Point3::new(disc_x, 0.0, 0.0), r, t.face_t)?;
        let core = rod_x(store, Point3::new(disc_x + t.face_t, 0.0, 0.0), r - 10.0, core_t)?;
        let inner = rod_x(store, Point3::new(disc_x + t.face_t + core_t, 0.0, 0.0), r, t.face_t)?;
        register(scene, "TPS_FaceOuter", outer, MaterialTag::Ablative)?;
        register(scene, "TPS_Core", core, MaterialTag::CarbonFiber)?;
        register(scene, "TPS_FaceInner", inner, MaterialTag::Ablative)?;
    }
    Ok(assembly)
}

/// Cuts a window through each side of the hull shell beside the cockpit.
fn windowed_hull(scene: &mut SceneBuilder, p: &FusionDriveParams, shell: ShapeId) -> Result<ShapeId> {
    let x = p.cockpit_x0 + p.cockpit_l / 2.0;
    let y = p.mid_d / 2.0 - p.win_th / 2.0;
    let mut cut = shell;
    for (label, side) in [("Win_Right", 1.0), ("Win_Left", -1.0)] {
        let window = box_centered(scene.store_mut(), p.win_w, p.win_th, p.win_h, Point3::new(x, side * y, p.win_z))?;
        scene.add_part(label, window, None)?;
        cut = Subtract::new(cut, window).execute(scene.store_mut())?;
    }
    register(scene, "Hull_Shell_Cut", cut, MaterialTag::CarbonFiber)
}

fn cockpit(scene: &mut SceneBuilder, p: &FusionDriveParams, log: &mut BuildLog) -> Result<ShapeId> {
    let store = scene.store_mut();
    let corner = Point3::new(p.cockpit_x0, -p.cockpit_w / 2.0, -p.cockpit_h / 2.0);
    let cabin = MakeBox::new(corner, Vector3::new(p.cockpit_l, p.cockpit_w, p.cockpit_h)).execute(store)?;
    let cabin = fillet_or_keep(store, log, "cockpit fillet", cabin, p.cockpit_fillet, EdgeFilter::All)?;
    register(scene, "Cockpit", cabin, MaterialTag::Titanium)
}

/// Core, confinement rings, coils, moderator and the tungsten ring behind
/// the core, in fuse order.
fn reactor(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<[ShapeId; 5]> {
    let store = scene.store_mut();
    let core = cylinder_x(store, p.reactor_d, p.reactor_l, Point3::new(p.reactor_cx, 0.0, 0.0))?;
    register(scene, "ReactorCore", core, MaterialTag::Titanium)?;

    let store = scene.store_mut();
    let x0 = p.reactor_cx - p.reactor_l / 2.0 + p.ring_h / 2.0;
    let major = (p.ring_ro + p.ring_ri) / 2.0;
    let minor = (p.ring_ro - p.ring_ri) / 2.0;
    let rings = (0..p.ring_n)
        .map(|i| {
            let center = Point3::new(x0 + f64::from(i) * p.ring_pitch, 0.0, 0.0);
            MakeTorus::new(center, major, minor, Vector3::x()).execute(store)
        })
        .collect::<Result<Vec<_>>>()?;
    let rings = fuse_all(store, &rings)?;
    register(scene, "Reactor_Rings", rings, MaterialTag::Steel)?;

    let x0 = p.reactor_cx - p.coil_span / 2.0;
    let pitch = p.coil_span / f64::from(p.coil_n.saturating_sub(1).max(1));
    let mut coils = Vec::new();
    for i in 0..p.coil_n {
        let path = CirclePath {
            center: Point3::new(x0 + f64::from(i) * pitch, 0.0, 0.0),
            axis: Vector3::x(),
            radius: p.coil_r,
        };
        let coil = Sweep::rectangle(p.coil_rect_w, p.coil_rect_h, path).execute(scene.store_mut())?;
        scene.add_part(&format!("Coil_{}", i + 1), coil, None)?;
        coils.push(coil);
    }
    let coils = fuse_all(scene.store_mut(), &coils)?;
    register(scene, "Reactor_Coils", coils, MaterialTag::Copper)?;

    let mod_inner_d = p.reactor_d + 2.0 * p.moderator_gap;
    let mod_outer_d = mod_inner_d + 2.0 * p.moderator_t;
    let moderator = tube(
        scene.store_mut(),
        mod_outer_d,
        mod_inner_d,
        p.reactor_l + p.moderator_over,
        Point3::new(p.reactor_cx, 0.0, 0.0),
        Axis::X,
        0.2,
    )?;
    register(scene, "Shield_Moderator", moderator, MaterialTag::Steel)?;

    let post_x = p.reactor_cx + p.reactor_l / 2.0;
    let tungsten = tube(
        scene.store_mut(),
        p.reactor_d,
        p.reactor_d - 20.0,
        p.tungsten_post_t,
        Point3::new(post_x, 0.0, 0.0),
        Axis::X,
        0.1,
    )?;
    register(scene, "Tungsten_Posterior", tungsten, MaterialTag::Steel)?;

    Ok([core, rings, coils, moderator, tungsten])
}

/// Magnetic nozzle joined to the rear section, its rim and the truss, in
/// fuse order.
fn nozzle(scene: &mut SceneBuilder, p: &FusionDriveParams, rear: ShapeId, log: &mut BuildLog) -> Result<[ShapeId; 3]> {
    let store = scene.store_mut();
    let bell = cone_x(store, p.nozzle_throat_d, p.nozzle_exit_d, p.nozzle_l, Point3::new(p.nozzle_cx, 0.0, 0.0))?;
    register(scene, "Magnetic_Nozzle", bell, MaterialTag::Steel)?;

    let store = scene.store_mut();
    let joined = Union::new(rear, bell).execute(store)?;
    let mount = fillet_or_keep(store, log, "nozzle mount fillet", joined, p.nozzle_fillet_r, JOIN_EDGES)?;
    register(scene, "Nozzle_Mount_Fillet", mount, MaterialTag::Steel)?;

    let rim_d = p.nozzle_exit_d + 80.0;
    let rim_x = p.nozzle_cx + p.nozzle_l / 2.0;
    let rim = tube(scene.store_mut(), rim_d, rim_d - 20.0, 20.0, Point3::new(rim_x, 0.0, 0.0), Axis::X, 0.1)?;
    register(scene, "Tungsten_Nozzle_Rim", rim, MaterialTag::Steel)?;

    let store = scene.store_mut();
    let x = p.fuselage_len() - 50.0;
    let w = p.truss_tube_w;
    let beams = (0..p.truss_n)
        .map(|k| {
            let (y, z) = on_circle(p.truss_r_attach, f64::from(k) * 360.0 / f64::from(p.truss_n));
            box_centered(store, 300.0, w, w, Point3::new(x, y, z))
        })
        .collect::<Result<Vec<_>>>()?;
    let truss = fuse_all(store, &beams)?;
    register(scene, "Nozzle_Truss", truss, MaterialTag::Steel)?;

    Ok([mount, rim, truss])
}

fn tanks(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let mut tanks = Vec::new();
    for (label, side) in [("Tank_Right", 1.0), ("Tank_Left", -1.0)] {
        let center = Point3::new(p.tank_cx, side * p.tank_cy, p.tank_cz);
        let tank = cylinder_x(scene.store_mut(), p.tank_d, p.tank_l, center)?;
        tanks.push(register(scene, label, tank, MaterialTag::Aluminum)?);
    }
    Ok(tanks)
}

/// Folded leg: a shaft along X with a round foot at its aft end.
fn landing_leg(store: &mut ShapeStore, p: &FusionDriveParams, x: f64, y: f64) -> Result<ShapeId> {
    let (l, d, z) = (p.leg_l_fold, p.leg_foot_d, p.leg_front_z);
    let shaft = rod_x(store, Point3::new(x - l / 2.0, y, z), d / 4.0, l)?;
    let foot = disc_z(store, Point3::new(x + l / 2.0 - 10.0, y, z - d / 4.0), d / 2.0, 20.0)?;
    Union::new(shaft, foot).execute(store)
}

fn landing_legs(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let stations = [
        ("Leg_Right_Front", p.leg_side_x1, p.leg_side_y),
        ("Leg_Left_Front", p.leg_side_x1, -p.leg_side_y),
        ("Leg_Right_Rear", p.leg_side_x2, p.leg_side_y),
        ("Leg_Left_Rear", p.leg_side_x2, -p.leg_side_y),
        ("Leg_Nose", p.leg_front_x, p.leg_front_y),
    ];
    let mut legs = Vec::new();
    for (label, x, y) in stations {
        let leg = landing_leg(scene.store_mut(), p, x, y)?;
        legs.push(register(scene, label, leg, MaterialTag::Steel)?);
    }
    Ok(legs)
}

const WING_T: f64 = 20.0;

/// Wing planform in the XZ plane extruded sideways and clipped to a thin
/// slab on the `side` of the XZ plane.
fn trapezoid_wing(store: &mut ShapeStore, p: &FusionDriveParams, side: f64) -> Result<ShapeId> {
    let (root, tip, chord) = (p.wing_root_w, p.wing_tip_w, p.wing_chord);
    let x_le = p.nose_len + 500.0;
    let x_te = x_le + chord;
    let planform = MakeFace::new(vec![
        Point3::new(x_le, 0.0, root / 2.0),
        Point3::new(x_te, 0.0, root / 2.0),
        Point3::new(x_te, 0.0, tip / 2.0),
        Point3::new(x_le, 0.0, tip / 2.0),
    ])
    .execute(store)?;
    let solid = Extrude::new(planform, Vector3::new(0.0, side * (root - tip), 0.0)).execute(store)?;
    let corner = Point3::new(x_le, side * WING_T / 2.0, -(root + tip) / 4.0);
    let slab = MakeBox::new(corner, Vector3::new(chord, WING_T, (root + tip) / 2.0)).execute(store)?;
    Intersect::new(solid, slab).execute(store)
}

fn wings_and_fin(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<[ShapeId; 3]> {
    let right = trapezoid_wing(scene.store_mut(), p, 1.0)?;
    register(scene, "Wing_Right", right, MaterialTag::Aluminum)?;
    let left = trapezoid_wing(scene.store_mut(), p, -1.0)?;
    register(scene, "Wing_Left", left, MaterialTag::Aluminum)?;

    let store = scene.store_mut();
    let x = p.nose_len + p.mid_len + 200.0;
    let profile = MakeFace::new(vec![
        Point3::new(x, 0.0, 0.0),
        Point3::new(x + p.fin_base, 0.0, 0.0),
        Point3::new(x, 0.0, p.fin_h),
    ])
    .execute(store)?;
    let fin = Extrude::new(profile, Vector3::new(0.0, WING_T, 0.0)).execute(store)?;
    let fin = Translate::new(fin, Vector3::new(0.0, -WING_T / 2.0, 0.0)).execute(store)?;
    register(scene, "Fin_Vertical", fin, MaterialTag::Aluminum)?;
    Ok([right, left, fin])
}

/// Radiator pairs, right then left for each station.
fn radiators(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let rad = &p.radiators;
    let hull_r = p.mid_d / 2.0;
    let size = Vector3::new(rad.th, p.rad_panel_w, p.rad_panel_h);
    let mut plates = Vec::new();
    for i in 0..rad.count_pairs {
        let x = rad.pair_x(p, i);
        let plate_x = x + rad.arm_len;
        for (tag, side) in [("R", 1.0), ("L", -1.0)] {
            let store = scene.store_mut();
            let arm = rod_x(store, Point3::new(x, side * hull_r, 0.0), rad.arm_r, rad.arm_len)?;
            let y = if side > 0.0 {
                hull_r + rad.mount_gap_y
            } else {
                -(hull_r + rad.mount_gap_y + p.rad_panel_w)
            };
            let plate = MakeBox::new(Point3::new(plate_x, y, -p.rad_panel_h / 2.0), size).execute(store)?;
            let radiator = Union::new(arm, plate).execute(store)?;
            plates.push(register(scene, &format!("Radiator_{tag}_{}", i + 1), radiator, MaterialTag::Aluminum)?);
        }
    }
    Ok(plates)
}

/// High-gain antenna and the small tilted solar array beside the nose.
fn instruments(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<[ShapeId; 2]> {
    let store = scene.store_mut();
    let (arm_l, dish_r) = (180.0, 200.0);
    let (x, y, z) = (p.nose_len + 250.0, -(p.mid_d / 2.0 + 140.0), 120.0);
    let arm = rod_x(store, Point3::new(x - arm_l / 2.0, y, z), 12.0, arm_l)?;
    let dish = disc_z(store, Point3::new(x - arm_l, y, z - dish_r / 2.0), dish_r, 6.0)?;
    let hga = Union::new(arm, dish).execute(store)?;
    register(scene, "HGA_Simple", hga, MaterialTag::Steel)?;

    let store = scene.store_mut();
    let (arm_l, l, w, h) = (160.0, 700.0, 520.0, 18.0);
    let (x, y, z) = (p.nose_len + 260.0, p.mid_d / 2.0 + 140.0, -60.0);
    let arm = rod_x(store, Point3::new(x - arm_l / 2.0, y, z), 10.0, arm_l)?;
    let panel = MakeBox::new(Point3::origin(), Vector3::new(l, w, h)).execute(store)?;
    let tilt = placement(Vector3::new(x - l / 2.0, y - w / 2.0, z - h / 2.0), Vector3::x(), 8.0);
    let panel = Place::new(panel, tilt).execute(store)?;
    let array = Union::new(arm, panel).execute(store)?;
    register(scene, "Solar_Array_Simple", array, MaterialTag::Cfrp)?;
    Ok([hga, array])
}

fn large_comm_dish(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<ShapeId> {
    let store = scene.store_mut();
    let (r, arm_l) = (800.0, 400.0);
    let (x, z) = (p.fuselage_len() - 1000.0, p.mid_d / 2.0 + 500.0);
    let arm = rod_x(store, Point3::new(x - arm_l / 2.0, 0.0, z), 40.0, arm_l)?;
    let dish = disc_z(store, Point3::new(x - arm_l, 0.0, z - r / 2.0), r, 20.0)?;
    let dish = Union::new(arm, dish).execute(store)?;
    register(scene, "Large_Comm_Dish", dish, MaterialTag::CarbonFiber)
}

fn solar_sail(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<ShapeId> {
    let store = scene.store_mut();
    let (l, w, t, arm_l) = (5000.0, 4000.0, 5.0, 1000.0);
    let x = p.fuselage_len() + 2000.0;
    let arm = rod_x(store, Point3::new(x - arm_l / 2.0, 0.0, 0.0), 50.0, arm_l)?;
    let corner = Point3::new(x + arm_l / 2.0 - l / 2.0, -w / 2.0, -t / 2.0);
    let film = MakeBox::new(corner, Vector3::new(l, w, t)).execute(store)?;
    let sail = Union::new(arm, film).execute(store)?;
    register(scene, "Solar_Sail", sail, MaterialTag::CarbonFiber)
}

fn attitude_thrusters(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let x = p.nose_len + p.mid_len / 2.0;
    let r = p.mid_d / 2.0 + 200.0;
    let mut thrusters = Vec::new();
    for i in 0..8_u32 {
        let (y, z) = on_circle(r, f64::from(i) * 45.0);
        let thruster = rod_x(scene.store_mut(), Point3::new(x, y, z), 50.0, 200.0)?;
        thrusters.push(register(scene, &format!("Attitude_Thruster_{}", i + 1), thruster, MaterialTag::Titanium)?);
    }
    Ok(thrusters)
}

/// Lead sleeve around the whole fuselage, overhanging both ends.
fn radiation_shield(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<ShapeId> {
    let len = p.fuselage_len();
    let center = Point3::new(len / 2.0, 0.0, 0.0);
    let sleeve = tube(scene.store_mut(), p.mid_d + 600.0, p.mid_d + 100.0, len + 2000.0, center, Axis::X, 10.0)?;
    register(scene, "Radiation_Shield", sleeve, MaterialTag::Lead)
}

fn meteor_shields(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let x = p.nose_len + p.mid_len / 2.0;
    let r = p.mid_d / 2.0 + 400.0;
    let mut shields = Vec::new();
    for i in 0..12_u32 {
        let (y, z) = on_circle(r, f64::from(i) * 30.0);
        let plate = disc_z(scene.store_mut(), Point3::new(x, y, z), 200.0, 100.0)?;
        shields.push(register(scene, &format!("Meteor_Shield_{}", i + 1), plate, MaterialTag::Steel)?);
    }
    Ok(shields)
}

fn extra_solar_arrays(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let x = p.nose_len + p.mid_len / 2.0;
    let r = p.mid_d / 2.0 + 500.0;
    let mut arrays = Vec::new();
    for i in 0..6_u32 {
        let (y, z) = on_circle(r, f64::from(i) * 60.0);
        let store = scene.store_mut();
        let arm = rod_x(store, Point3::new(x - 150.0, y, z), 30.0, 300.0)?;
        let panel = MakeBox::new(Point3::new(x + 150.0, y - 200.0, z - 15.0), Vector3::new(600.0, 400.0, 30.0))
            .execute(store)?;
        let array = Union::new(arm, panel).execute(store)?;
        arrays.push(register(scene, &format!("Extra_Solar_Array_{}", i + 1), array, MaterialTag::Cfrp)?);
    }
    Ok(arrays)
}

/// Whip antennas on a ring just outside the heat shield rim.
fn comm_antennas(scene: &mut SceneBuilder, p: &FusionDriveParams) -> Result<Vec<ShapeId>> {
    let t = &p.tps;
    let x = t.tps_d / 2.0 + t.tps_t + t.sup_l + p.nose_len;
    let r = t.tps_d / 2.0 + 200.0;
    let mut antennas = Vec::new();
    for i in 0..6_u32 {
        let (y, z) = on_circle(r, f64::from(i) * 60.0 + 30.0);
        let antenna = rod_x(scene.store_mut(), Point3::new(x, y, z), 50.0, 1000.0)?;
        antennas.push(register(scene, &format!("Comm_Antenna_{}", i + 1), antenna, MaterialTag::Aluminum)?);
    }
    Ok(antennas)
}
