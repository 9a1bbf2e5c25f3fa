//! Plenum rings, channel end caps and flanges.

use crate::design::parts::annulus_z;
use crate::error::Result;
use crate::operations::creation::MakeFace;
use crate::operations::shaping::Extrude;
use crate::shape::{ShapeId, ShapeStore};

use super::channels::{ChannelEnd, ChanneledWall};
use super::NozzleParams;

/// Overlap of a channel end cap past the channel outline, mm.
const CAP_MARGIN: f64 = 0.5;

/// Closed rings hugging the outside of the wall at the inlet and exit.
///
/// `inlet_outer` and `exit_outer` are the wall's outer radii at the two
/// ends.
///
/// # Errors
///
/// Returns an error if a ring cannot be built.
pub fn plenum_rings(
    store: &mut ShapeStore,
    params: &NozzleParams,
    inlet_outer: f64,
    exit_outer: f64,
) -> Result<[ShapeId; 2]> {
    let (h, w, c) = (params.plenum_height, params.plenum_width, params.clearance_channels);
    let inlet = annulus_z(store, inlet_outer, inlet_outer + w, 0.0, h, c)?;
    let exit = annulus_z(store, exit_outer, exit_outer + w, params.nozzle_length - h, h, c)?;
    Ok([inlet, exit])
}

/// Plates closing both ends of every channel slot.
///
/// Each cap lies against the upstream face of the slot's first piece or
/// the downstream face of its last piece. It covers that face with a
/// small margin, never reaching more than half a ligament toward the
/// bore, and is `end_caps_thickness` deep.
///
/// # Errors
///
/// Returns an error if a cap cannot be built.
pub fn end_caps(
    store: &mut ShapeStore,
    params: &NozzleParams,
    channels: &ChanneledWall,
) -> Result<Vec<ShapeId>> {
    let mut caps = Vec::new();
    for slot in 0..params.num_helices * 4 {
        let Some((upstream, downstream)) = channels.slot_ends(slot) else {
            continue;
        };
        for face in [upstream, downstream] {
            caps.push(cap(store, params, &face)?);
        }
    }
    Ok(caps)
}

fn cap(store: &mut ShapeStore, params: &NozzleParams, face: &ChannelEnd) -> Result<ShapeId> {
    let inward = CAP_MARGIN.min(face.ligament / 2.0);
    let half = params.channel_base.max(params.channel_top) / 2.0 + CAP_MARGIN;
    let inner = face.base - face.outward * inward;
    let outer = face.base + face.outward * (params.channel_height + CAP_MARGIN);
    let t = face.tangential * half;
    let outline = vec![inner - t, inner + t, outer + t, outer - t];
    let plate = MakeFace::new(outline).execute(store)?;
    Extrude::new(plate, face.exit * params.end_caps_thickness).execute(store)
}

/// Annular flanges bolted to the chamber upstream and to the skirt
/// downstream.
///
/// # Errors
///
/// Returns an error if a flange cannot be built.
pub fn flanges(store: &mut ShapeStore, params: &NozzleParams) -> Result<[ShapeId; 2]> {
    let bore = params.exit_radius();
    let c = params.clearance_channels;
    let up = annulus_z(
        store,
        bore,
        bore + params.wall_thickness_convergent + params.flange_up_radial,
        -params.flange_up_thickness,
        params.flange_up_thickness,
        c,
    )?;
    let down = annulus_z(
        store,
        bore,
        bore + params.wall_thickness_div_end + params.flange_down_radial,
        params.nozzle_length,
        params.flange_down_thickness,
        c,
    )?;
    Ok([up, down])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::BoundingBox;
    use approx::assert_relative_eq;

    #[test]
    fn flanges_sit_outside_the_nozzle_ends() {
        let params = NozzleParams::default();
        let mut store = ShapeStore::new();
        let [up, down] = flanges(&mut store, &params).unwrap();
        let up = BoundingBox::new(up).execute(&store).unwrap();
        let down = BoundingBox::new(down).execute(&store).unwrap();
        assert_relative_eq!(up.min.z, -8.0, epsilon = 1e-9);
        assert_relative_eq!(up.max.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(up.max.x, 97.8, epsilon = 1e-9);
        assert_relative_eq!(down.min.z, 200.0, epsilon = 1e-9);
        assert_relative_eq!(down.max.x, 92.2, epsilon = 1e-9);
    }

    #[test]
    fn plenums_wrap_the_wall() {
        let params = NozzleParams::default();
        let mut store = ShapeStore::new();
        let [inlet, exit] = plenum_rings(&mut store, &params, 78.0, 77.5).unwrap();
        let inlet = BoundingBox::new(inlet).execute(&store).unwrap();
        let exit = BoundingBox::new(exit).execute(&store).unwrap();
        assert_relative_eq!(inlet.max.x, 86.0, epsilon = 1e-9);
        assert_relative_eq!(inlet.max.z, 3.0, epsilon = 1e-9);
        assert_relative_eq!(exit.min.z, 197.0, epsilon = 1e-9);
    }

    #[test]
    fn caps_close_channel_ends_and_leave_the_openings_clear() {
        use crate::design::nozzle::channels::cut_channels;
        use crate::design::nozzle::NozzleContour;
        use crate::design::BuildLog;
        use crate::math::{Point3, Vector3};
        use crate::operations::boolean::fuse_all;
        use crate::operations::creation::MakeCylinder;
        use crate::operations::query::{ClassifyPoint, PointClassification};

        let params = NozzleParams::default();
        let contour = NozzleContour::new(&params).unwrap();
        let mut store = ShapeStore::new();
        let wall = MakeCylinder::new(Point3::origin(), 80.0, Vector3::z(), 200.0)
            .execute(&mut store)
            .unwrap();
        let (_, channels) = cut_channels(&mut store, &params, &contour, wall, &mut BuildLog::default()).unwrap();
        let caps = end_caps(&mut store, &params, &channels).unwrap();
        assert_eq!(caps.len(), 16);
        let all = fuse_all(&mut store, &caps).unwrap();
        let at = |store: &ShapeStore, p: Point3| ClassifyPoint::new(all, p).execute(store).unwrap();

        for slot in 0..8 {
            let (upstream, downstream) = channels.slot_ends(slot).unwrap();
            for face in [upstream, downstream] {
                let mid = face.base + face.outward * (params.channel_height / 2.0) + face.exit;
                assert_eq!(at(&store, mid), PointClassification::Inside);
                let beyond = face.base + face.outward * (params.channel_height / 2.0) + face.exit * 3.0;
                assert_eq!(at(&store, beyond), PointClassification::Outside);
            }
        }
        for p in [
            Point3::new(30.0, 0.0, -6.0),
            Point3::new(45.0, 45.0, -6.0),
            Point3::new(30.0, 0.0, 206.5),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(70.0, 0.0, 1.0),
            Point3::new(74.0, 0.0, 199.0),
        ] {
            assert_eq!(at(&store, p), PointClassification::Outside, "{p:?}");
        }
    }

    #[test]
    fn no_channels_means_no_caps() {
        let params = NozzleParams::default();
        let mut store = ShapeStore::new();
        let caps = end_caps(&mut store, &params, &ChanneledWall::default()).unwrap();
        assert!(caps.is_empty());
    }
}
