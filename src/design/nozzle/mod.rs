//! Regeneratively cooled rocket nozzle.
//!
//! The nozzle axis is +Z with the inlet at `z = 0` and the exit at
//! `z = nozzle_length`. Build order:
//!
//! ```text
//! contour ─► bore loft ─► wall rings ─► wall − bore ─► − channels
//!         ─► ∪ plenums ∪ end caps ∪ flanges ─► global fillet
//! ```

mod channels;
mod contour;
mod hull;
mod manifolds;
mod params;
mod validate;

pub use channels::{ChannelPiece, ChanneledWall};
pub use contour::NozzleContour;
pub use hull::RING_COUNT;
pub use params::NozzleParams;
pub use validate::validate_manifold;

use crate::design::parts::fillet_or_keep;
use crate::design::{BuildLog, DesignBuild};
use crate::error::Result;
use crate::materials::MaterialTag;
use crate::operations::boolean::{fuse_all, Subtract};
use crate::operations::modification::EdgeFilter;
use crate::scene::{Color, DisplayMode, SceneBuilder};

/// Label of the finished nozzle in the scene.
pub const NOZZLE_LABEL: &str = "RocketNozzle_Solid";

const NOZZLE_COLOR: Color = Color::rgb(0.70, 0.70, 0.72);

/// Builds the nozzle and registers it as [`NOZZLE_LABEL`].
///
/// Construction failures of the bore and wall fall back to plain
/// cylinders; channels that cannot be cut are skipped. Both are recorded
/// in the returned log.
///
/// # Errors
///
/// Returns an error if a fallback fails or the final fuse fails.
pub fn build_nozzle(scene: &mut SceneBuilder, params: &NozzleParams) -> Result<DesignBuild> {
    let mut log = BuildLog::default();
    let contour = match NozzleContour::new(params) {
        Ok(contour) => Some(contour),
        Err(err) => {
            log.skip("nozzle contour", &err);
            None
        }
    };
    let store = scene.store_mut();

    let bore = hull::bore_surface(store, params, contour.as_ref())?;
    let bore = log.take("nozzle bore", bore);
    let wall = hull::wall_rings(store, params, contour.as_ref())?;
    let wall = log.take("nozzle wall", wall);
    let hull = Subtract::new(wall, bore).execute(store)?;
    let mut subassemblies = vec![("hull".to_owned(), hull)];

    let (cooled, channels, inlet_outer, exit_outer) = match contour.as_ref() {
        Some(contour) => {
            let (cooled, channels) = channels::cut_channels(store, params, contour, hull, &mut log)?;
            let layout = hull::ring_layout(params, contour)?;
            let inlet_outer = layout.first().map_or(params.exit_radius(), |ring| ring.2);
            let exit_outer = layout.last().map_or(params.exit_radius(), |ring| ring.2);
            (cooled, channels, inlet_outer, exit_outer)
        }
        None => {
            let outer = params.exit_radius() + params.wall_thickness_div_end;
            (hull, ChanneledWall::default(), outer, outer)
        }
    };
    subassemblies.push(("cooled wall".to_owned(), cooled));

    let [plenum_in, plenum_out] = manifolds::plenum_rings(store, params, inlet_outer, exit_outer)?;
    let caps = manifolds::end_caps(store, params, &channels)?;
    let [flange_up, flange_down] = manifolds::flanges(store, params)?;
    subassemblies.extend([
        ("plenum inlet".to_owned(), plenum_in),
        ("plenum outlet".to_owned(), plenum_out),
        ("flange upstream".to_owned(), flange_up),
        ("flange downstream".to_owned(), flange_down),
    ]);

    let mut parts = vec![cooled, plenum_in, plenum_out];
    parts.extend(caps);
    parts.extend([flange_up, flange_down]);
    let solid = fuse_all(store, &parts)?;
    let solid = fillet_or_keep(
        store,
        &mut log,
        "nozzle global fillet",
        solid,
        params.fillet_radius,
        EdgeFilter::All,
    )?;

    let id = scene.add_part(NOZZLE_LABEL, solid, Some(MaterialTag::Copper))?;
    scene.set_color(id, NOZZLE_COLOR)?;
    scene.set_display_mode(id, DisplayMode::Shaded)?;
    let final_label = scene.object(id)?.label.clone();
    tracing::info!(
        label = %final_label,
        channels = channels.cut,
        fallbacks = log.fallbacks.len(),
        skipped = log.skipped.len(),
        "nozzle built"
    );
    Ok(DesignBuild {
        final_label,
        final_shape: solid,
        compound: None,
        subassemblies,
        log,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::query::{ClassifyPoint, PointClassification, Volume};

    #[test]
    fn default_nozzle_registers_one_solid() {
        let mut scene = SceneBuilder::open("RocketNozzle_Param");
        let build = build_nozzle(&mut scene, &NozzleParams::default()).unwrap();
        assert_eq!(build.final_label, NOZZLE_LABEL);
        assert!(build.log.skipped.is_empty());
        // the global fillet on a composite solid always falls back
        assert_eq!(build.log.fallbacks.len(), 1);
        let scene = scene.finalize();
        assert_eq!(scene.objects().len(), 1);
        let object = scene.object(NOZZLE_LABEL).unwrap();
        assert_eq!(object.color, NOZZLE_COLOR);
        assert_eq!(object.display_mode, DisplayMode::Shaded);
        assert!(validate_manifold(scene.store(), object.shape, 0.6).unwrap());
    }

    #[test]
    fn final_volume_exceeds_every_subassembly() {
        let mut scene = SceneBuilder::open("RocketNozzle_Param");
        let build = build_nozzle(&mut scene, &NozzleParams::default()).unwrap();
        let store = scene.store();
        let total = Volume::new(build.final_shape).with_max_depth(6).execute(store).unwrap();
        for (name, shape) in &build.subassemblies {
            let part = Volume::new(*shape).with_max_depth(6).execute(store).unwrap();
            assert!(total > part, "{name}: {part} >= {total}");
        }
    }

    #[test]
    fn bore_and_end_openings_stay_clear() {
        let mut scene = SceneBuilder::open("RocketNozzle_Param");
        let build = build_nozzle(&mut scene, &NozzleParams::default()).unwrap();
        let store = scene.store();
        let at = |p: Point3| ClassifyPoint::new(build.final_shape, p).execute(store).unwrap();
        for z in [-6.0, 0.0, 25.0, 50.0, 100.0, 150.0, 200.0, 206.5] {
            assert_eq!(at(Point3::new(0.0, 0.0, z)), PointClassification::Outside, "axis at z = {z}");
        }
        for p in [
            Point3::new(30.0, 0.0, -6.0),
            Point3::new(45.0, 45.0, -6.0),
            Point3::new(30.0, 0.0, 206.5),
        ] {
            assert_eq!(at(p), PointClassification::Outside, "{p:?}");
        }
    }

    #[test]
    fn channels_stay_sealed_under_the_outer_wall() {
        let params = NozzleParams::default();
        let mut scene = SceneBuilder::open("RocketNozzle_Param");
        let build = build_nozzle(&mut scene, &params).unwrap();
        let store = scene.store();
        let cooled = build
            .subassemblies
            .iter()
            .find(|(name, _)| name == "cooled wall")
            .map(|(_, shape)| *shape)
            .unwrap();
        let contour = NozzleContour::new(&params).unwrap();
        let layout = hull::ring_layout(&params, &contour).unwrap();
        let slots = params.num_helices * 4;
        for slot in 0..slots {
            let phi = std::f64::consts::TAU * f64::from(slot) / f64::from(slots);
            for (z0, z1, radius) in layout.iter().step_by(3).chain(layout.last()) {
                let z = 0.5 * (z0 + z1);
                let r = radius - params.ligament_min_other / 2.0;
                let p = Point3::new(r * phi.cos(), r * phi.sin(), z);
                let class = ClassifyPoint::new(cooled, p).execute(store).unwrap();
                assert_eq!(class, PointClassification::Inside, "slot {slot} at z = {z}");
            }
        }
    }

    #[test]
    fn zero_throat_still_yields_a_solid() {
        let params = NozzleParams {
            throat_diameter: 0.0,
            ..NozzleParams::default()
        };
        let mut scene = SceneBuilder::open("RocketNozzle_Param");
        let build = build_nozzle(&mut scene, &params).unwrap();
        let steps: Vec<&str> = build.log.fallbacks.iter().map(|n| n.step.as_str()).collect();
        assert!(steps.contains(&"nozzle bore"));
        assert!(steps.contains(&"nozzle wall"));
        assert_eq!(build.log.skipped[0].step, "nozzle contour");
        let scene = scene.finalize();
        let object = scene.object(NOZZLE_LABEL).unwrap();
        let volume = Volume::new(object.shape).with_max_depth(5).execute(scene.store()).unwrap();
        assert!(volume > 0.0);
    }
}
