//! Bore and variable-thickness wall.

use crate::design::{or_fallback, Built};
use crate::error::{ForgeError, GeometryError, Result};
use crate::math::{Point3, Vector3};
use crate::operations::boolean::fuse_all;
use crate::operations::creation::{CircleSection, MakeCylinder, MakeLoft};
use crate::shape::{ShapeId, ShapeStore};

use super::{NozzleContour, NozzleParams};

/// Number of stacked rings that approximate the wall.
pub const RING_COUNT: u32 = 20;

/// Solid of revolution through the contour, overshooting both ends by the
/// channel clearance so it cuts cleanly through the wall.
///
/// Falls back to a cylinder of the exit radius when the contour cannot be
/// laid out or lofted.
///
/// # Errors
///
/// Returns an error only if the fallback cylinder cannot be built either.
pub fn bore_surface(
    store: &mut ShapeStore,
    params: &NozzleParams,
    contour: Option<&NozzleContour>,
) -> Result<Built<ShapeId>> {
    let clearance = params.clearance_channels;
    let primary = contour
        .ok_or_else(|| ForgeError::from(GeometryError::Degenerate("no nozzle contour".into())))
        .and_then(|contour| {
            let (_, r_in) = contour.points()[0];
            let (length, r_out) = contour.points()[4];
            let mut sections = vec![section(-clearance, r_in)];
            sections.extend(contour.points().iter().map(|(z, r)| section(*z, *r)));
            sections.push(section(length + clearance, r_out));
            MakeLoft::new(sections).execute(store)
        });
    or_fallback("nozzle bore", primary, || {
        MakeCylinder::new(
            Point3::new(0.0, 0.0, -clearance),
            params.exit_radius(),
            Vector3::z(),
            params.nozzle_length + 2.0 * clearance,
        )
        .execute(store)
    })
}

fn section(z: f64, radius: f64) -> CircleSection {
    CircleSection::new(Point3::new(0.0, 0.0, z), Vector3::z(), radius)
}

/// Outer radius and axial span of each wall ring.
///
/// Ring `i` covers `[i L / n, (i + 1) L / n]` and reaches the widest bore
/// over that span plus the wall thickness at its middle. When the nozzle
/// has channels the ring also keeps `ligament_min_other` of material
/// outside the outermost channel corner near that span.
///
/// # Errors
///
/// Returns an error if the wall thickness profile cannot be built.
pub fn ring_layout(params: &NozzleParams, contour: &NozzleContour) -> Result<Vec<(f64, f64, f64)>> {
    let thickness = params.wall_thickness_profile()?;
    let step = params.nozzle_length / f64::from(RING_COUNT);
    let reach = params.ligament_min_throat.max(params.ligament_min_other) + params.channel_height;
    let half_width = params.channel_top.max(params.channel_base) / 2.0;
    Ok((0..RING_COUNT)
        .map(|i| {
            let z0 = f64::from(i) * step;
            let z1 = z0 + step;
            let mut radius = contour.max_bore(z0, z1) + thickness.at(0.5 * (z0 + z1));
            if params.num_helices > 0 {
                // pieces are offset along the wall normal, which can move them up to `reach` axially
                let corner = (contour.max_bore(z0 - reach, z1 + reach) + reach).hypot(half_width);
                radius = radius.max(corner + params.ligament_min_other);
            }
            (z0, z1, radius)
        })
        .collect())
}

/// Stacked solid rings forming the outside of the wall, before the bore
/// is cut.
///
/// Falls back to a cylinder of the exit radius plus the exit wall
/// thickness.
///
/// # Errors
///
/// Returns an error only if the fallback cylinder cannot be built either.
pub fn wall_rings(
    store: &mut ShapeStore,
    params: &NozzleParams,
    contour: Option<&NozzleContour>,
) -> Result<Built<ShapeId>> {
    let primary = contour
        .ok_or_else(|| ForgeError::from(GeometryError::Degenerate("no nozzle contour".into())))
        .and_then(|contour| ring_layout(params, contour))
        .and_then(|layout| {
            let rings = layout
                .iter()
                .map(|(z0, z1, radius)| {
                    MakeCylinder::new(Point3::new(0.0, 0.0, *z0), *radius, Vector3::z(), z1 - z0)
                        .execute(store)
                })
                .collect::<Result<Vec<_>>>()?;
            fuse_all(store, &rings)
        });
    or_fallback("nozzle wall", primary, || {
        MakeCylinder::new(
            Point3::origin(),
            params.exit_radius() + params.wall_thickness_div_end,
            Vector3::z(),
            params.nozzle_length,
        )
        .execute(store)
    })
}
