//! Modular satellite with a hollow hull.
//!
//! Solar panels, antennas, sensors and the subsystem modules sit in rows
//! behind the mid section. Every part is registered on its own and then
//! fused into the final solid.

mod params;

pub use params::{ModuleBox, SatelliteParams};

use crate::design::parts::{fillet_or_keep, register};
use crate::design::{BuildLog, DesignBuild};
use crate::error::Result;
use crate::materials::MaterialTag;
use crate::math::{Point3, Vector3};
use crate::operations::boolean::{fuse_all, Subtract};
use crate::operations::creation::{CircleSection, MakeBox, MakeCone, MakeCylinder, MakeLoft};
use crate::operations::modification::EdgeFilter;
use crate::scene::{Color, DisplayMode, SceneBuilder};
use crate::shape::{ShapeId, ShapeStore};

/// Label of the fused satellite.
pub const SATELLITE_LABEL: &str = "Nave_Espacial_Completa";

const HULL_LABEL: &str = "Hull_Hollow";
const NOSE_STATIONS: [f64; 4] = [0.0, 0.35, 0.7, 1.0];

/// Builds the satellite and registers all of its parts.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or a part cannot be
/// built or fused.
pub fn build_satellite(scene: &mut SceneBuilder, params: &SatelliteParams) -> Result<DesignBuild> {
    params.validate()?;
    let mut log = BuildLog::default();
    let p = params;

    let hull = hollow_hull(scene.store_mut(), p, &mut log)?;
    register(scene, HULL_LABEL, hull, MaterialTag::Titanium)?;

    let store = scene.store_mut();
    let [w, d, h] = p.cockpit_size;
    let [cx, cy, cz] = p.cockpit_corner;
    let cockpit = MakeBox::new(Point3::new(cx, cy, cz), Vector3::new(w, d, h)).execute(store)?;
    register(scene, "Cockpit", cockpit, MaterialTag::Aluminum)?;
    let reactor_base = Point3::new(p.nose_len + p.mid_len / 2.0, 0.0, 0.0);
    let reactor = MakeCylinder::new(reactor_base, p.reactor_d / 2.0, Vector3::x(), p.reactor_l).execute(scene.store_mut())?;
    register(scene, "Reactor", reactor, MaterialTag::Steel)?;

    let x0 = p.module_x();
    let port_y = -p.rear_d / 2.0 - p.panel_standoff;
    let panels = box_row(
        scene.store_mut(),
        Point3::new(x0, port_y, 0.0),
        Vector3::y() * p.panel_spacing,
        Vector3::new(p.panel_width, p.panel_length, p.panel_thickness),
        p.panel_count,
    )?;
    paint(scene, "Solar_Panel", panels, Color::rgb(0.80, 0.80, 0.80))?;
    let antennas = box_row(
        scene.store_mut(),
        Point3::new(x0, port_y, 0.0),
        Vector3::x() * p.antenna_spacing,
        Vector3::new(p.antenna_d, p.antenna_l, p.antenna_h),
        p.antenna_count,
    )?;
    paint(scene, "Antenna", antennas, Color::rgb(0.80, 0.20, 0.20))?;
    let sensors = box_row(
        scene.store_mut(),
        Point3::new(x0, port_y, 0.0),
        Vector3::x() * p.sensor_spacing,
        Vector3::new(p.sensor_d, p.sensor_l, p.sensor_h),
        p.sensor_count,
    )?;
    paint(scene, "Sensor", sensors, Color::rgb(0.20, 0.20, 0.80))?;

    let store = scene.store_mut();
    let tps_base = Point3::new(-p.front_tps_t - p.front_tps_gap, 0.0, 0.0);
    let front_tps = MakeCone::new(
        tps_base,
        p.front_tps_r,
        p.front_tps_r * p.front_tps_taper,
        Vector3::x(),
        p.front_tps_t,
    )
    .execute(store)?;
    let front_tps = fillet_or_keep(store, &mut log, "front TPS fillet", front_tps, p.front_tps_fillet_r, EdgeFilter::All)?;
    paint(scene, "Front_TPS", front_tps, Color::rgb(0.50, 0.52, 0.54))?;

    let store = scene.store_mut();
    let nozzle_base = Point3::new(p.tail_x() - p.nozzle_l, 0.0, 0.0);
    let nozzle = MakeCone::new(
        nozzle_base,
        p.nozzle_throat_d / 2.0,
        p.nozzle_throat_d / 4.0,
        Vector3::x(),
        p.nozzle_l,
    )
    .execute(store)?;
    let nozzle = fillet_or_keep(store, &mut log, "nozzle fillet", nozzle, p.nozzle_fillet_r, EdgeFilter::All)?;
    paint(scene, "Nozzle", nozzle, Color::rgb(0.90, 0.90, 0.90))?;

    let propulsion = propulsion_units(scene.store_mut(), p)?;
    paint(scene, "Propulsion_System", propulsion, Color::rgb(0.60, 0.60, 0.60))?;
    let landing_gear = landing_gear(scene.store_mut(), p)?;
    paint(scene, "Landing_Gear", landing_gear, Color::rgb(0.70, 0.70, 0.70))?;

    let reach = p.rear_d / 2.0 + p.module_standoff;
    let step = Vector3::x() * p.module_spacing;
    let modules = [
        ("Communication_System", p.communication, Point3::new(x0, reach, 0.0), Color::rgb(0.30, 0.30, 0.80)),
        ("Power_System", p.power, Point3::new(x0, -reach, 0.0), Color::rgb(0.80, 0.80, 0.20)),
        ("Thermal_System", p.thermal, Point3::new(x0, 0.0, reach), Color::rgb(0.80, 0.30, 0.30)),
    ];
    let mut module_shapes = Vec::with_capacity(modules.len());
    for (label, size, corner, color) in modules {
        let size = Vector3::new(size.d, size.l, size.h);
        let row = box_row(scene.store_mut(), corner, step, size, p.module_count)?;
        paint(scene, label, row, color)?;
        module_shapes.push(row);
    }

    let mut subassemblies: Vec<(String, ShapeId)> = [
        ("hull", hull),
        ("cockpit", cockpit),
        ("reactor", reactor),
        ("front TPS", front_tps),
        ("solar panels", panels),
        ("antennas", antennas),
        ("sensors", sensors),
        ("nozzle", nozzle),
        ("propulsion", propulsion),
        ("landing gear", landing_gear),
    ]
    .into_iter()
    .map(|(name, shape)| (name.to_owned(), shape))
    .collect();
    for (name, shape) in ["communication", "power", "thermal"].into_iter().zip(module_shapes) {
        subassemblies.push((name.to_owned(), shape));
    }
    let parts: Vec<ShapeId> = subassemblies.iter().map(|(_, shape)| *shape).collect();
    let satellite = fuse_all(scene.store_mut(), &parts)?;

    let id = scene.add_part(SATELLITE_LABEL, satellite, Some(MaterialTag::Titanium))?;
    scene.set_display_mode(id, DisplayMode::Shaded)?;
    let final_label = scene.object(id)?.label.clone();
    tracing::info!(label = %final_label, objects = scene.object_count(), "satellite built");
    Ok(DesignBuild {
        final_label,
        final_shape: satellite,
        compound: None,
        subassemblies,
        log,
    })
}

/// Registers a colored part without a material.
fn paint(scene: &mut SceneBuilder, label: &str, shape: ShapeId, color: Color) -> Result<ShapeId> {
    let id = scene.add_part(label, shape, None)?;
    scene.set_color(id, color)?;
    Ok(shape)
}

/// Circular loft along +X from `x = 0` through the nose stations.
fn nose_loft(store: &mut ShapeStore, p: &SatelliteParams, radii: [f64; 4]) -> Result<ShapeId> {
    let sections = radii
        .into_iter()
        .zip(NOSE_STATIONS)
        .map(|(r, t)| CircleSection::new(Point3::new(p.nose_len * t, 0.0, 0.0), Vector3::x(), r))
        .collect();
    MakeLoft::new(sections).execute(store)
}

/// Nose shell: the outer loft minus a loft `wall_t` smaller at every
/// station.
fn hollow_nose(store: &mut ShapeStore, p: &SatelliteParams) -> Result<ShapeId> {
    let outer = nose_loft(store, p, p.nose_radii())?;
    let inner = nose_loft(store, p, p.nose_radii().map(|r| r - p.wall_t))?;
    Subtract::new(outer, inner).execute(store)
}

/// Tube along +X from `x`; the bore runs `cut_overrun` past the far end.
fn shell(store: &mut ShapeStore, p: &SatelliteParams, d: f64, length: f64, x: f64) -> Result<ShapeId> {
    let base = Point3::new(x, 0.0, 0.0);
    let outer = MakeCylinder::new(base, d / 2.0, Vector3::x(), length).execute(store)?;
    let bore = MakeCylinder::new(base, d / 2.0 - p.wall_t, Vector3::x(), length + p.cut_overrun).execute(store)?;
    Subtract::new(outer, bore).execute(store)
}

fn hollow_hull(store: &mut ShapeStore, p: &SatelliteParams, log: &mut BuildLog) -> Result<ShapeId> {
    let nose = hollow_nose(store, p)?;
    let mid = shell(store, p, p.mid_d, p.mid_len, p.nose_len)?;
    let rear = shell(store, p, p.rear_d, p.rear_len, p.nose_len + p.mid_len)?;
    let hull = fuse_all(store, &[nose, mid, rear])?;
    fillet_or_keep(store, log, "hull fillet", hull, p.hull_fillet_r, EdgeFilter::All)
}

/// `count` boxes of `size`, the i-th with its corner at `corner + i·step`,
/// fused together.
fn box_row(store: &mut ShapeStore, corner: Point3, step: Vector3, size: Vector3, count: u32) -> Result<ShapeId> {
    let boxes = (0..count)
        .map(|i| MakeBox::new(corner + step * f64::from(i), size).execute(store))
        .collect::<Result<Vec<_>>>()?;
    fuse_all(store, &boxes)
}

/// Side-by-side thrusters ending at the tail, stepping outward on +Y.
fn propulsion_units(store: &mut ShapeStore, p: &SatelliteParams) -> Result<ShapeId> {
    let x = p.tail_x() - p.propulsion_l;
    let y0 = p.rear_d / 2.0 + p.module_standoff;
    let units = (0..p.propulsion_count)
        .map(|i| {
            let base = Point3::new(x, y0 + f64::from(i) * p.propulsion_pitch, 0.0);
            MakeCylinder::new(base, p.propulsion_d / 2.0, Vector3::x(), p.propulsion_l).execute(store)
        })
        .collect::<Result<Vec<_>>>()?;
    fuse_all(store, &units)
}

/// Legs spread evenly around the tail, straddling its end plane.
fn landing_gear(store: &mut ShapeStore, p: &SatelliteParams) -> Result<ShapeId> {
    let x = p.tail_x() - p.landing_gear_l / 2.0;
    let radial = p.rear_d / 2.0 + p.module_standoff;
    let pitch = 360.0 / f64::from(p.landing_gear_count);
    let legs = (0..p.landing_gear_count)
        .map(|i| {
            let angle = (f64::from(i) * pitch).to_radians();
            let base = Point3::new(x, radial * angle.sin(), radial * angle.cos());
            MakeCylinder::new(base, p.landing_gear_d / 2.0, Vector3::x(), p.landing_gear_l).execute(store)
        })
        .collect::<Result<Vec<_>>>()?;
    fuse_all(store, &legs)
}
