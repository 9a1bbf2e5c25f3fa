//! Contour-following cooling channels.
//!
//! Each channel is a trapezoid section swept straight along one contour
//! segment at a fixed angle around the axis. The hot-side base faces the
//! bore, one ligament away from it.

use std::f64::consts::TAU;

use crate::design::{or_fallback, BuildLog, Built};
use crate::error::Result;
use crate::math::{Isometry3, Point3, UnitQuaternion, Vector3};
use crate::operations::boolean::Subtract;
use crate::operations::creation::{MakeBox, MakeFace};
use crate::operations::shaping::Extrude;
use crate::operations::transform::Place;
use crate::shape::{ShapeId, ShapeStore};

use super::{NozzleContour, NozzleParams};

/// Flat end face of a channel piece.
#[derive(Debug, Clone, Copy)]
pub struct ChannelEnd {
    /// Middle of the hot-side base edge.
    pub base: Point3,
    /// Unit direction leaving the piece through this face.
    pub exit: Vector3,
    /// Unit wall normal; the channel spans `channel_height` along it.
    pub outward: Vector3,
    pub tangential: Vector3,
    /// Material left between the bore and the base.
    pub ligament: f64,
}

/// One channel piece and where it sits.
#[derive(Debug, Clone, Copy)]
pub struct ChannelPiece {
    pub shape: ShapeId,
    /// Position around the axis, `0..num_helices * 4`.
    pub slot: u32,
    /// Contour segment index.
    pub segment: usize,
    pub start: ChannelEnd,
    pub end: ChannelEnd,
}

/// Channels cut from a wall.
#[derive(Debug, Clone, Default)]
pub struct ChanneledWall {
    pub pieces: Vec<ChannelPiece>,
    /// Number of pieces actually subtracted.
    pub cut: usize,
}

impl ChanneledWall {
    /// Upstream face of the first piece and downstream face of the last
    /// piece in `slot`.
    #[must_use]
    pub fn slot_ends(&self, slot: u32) -> Option<(ChannelEnd, ChannelEnd)> {
        let mut pieces = self.pieces.iter().filter(|p| p.slot == slot);
        let first = pieces.next()?;
        let (first, last) = pieces.fold((first, first), |(lo, hi), p| {
            (
                if p.segment < lo.segment { p } else { lo },
                if p.segment > hi.segment { p } else { hi },
            )
        });
        Some((first.start, last.end))
    }
}

/// Local frame of a contour segment at angle `phi`.
struct SegmentFrame {
    start: Point3,
    /// Unit direction along the segment.
    along: Vector3,
    /// Unit outward normal of the wall.
    outward: Vector3,
    /// Unit tangential direction.
    tangential: Vector3,
    length: f64,
}

impl SegmentFrame {
    fn new(phi: f64, (z0, r0): (f64, f64), (z1, r1): (f64, f64)) -> Option<Self> {
        let (dz, dr) = (z1 - z0, r1 - r0);
        let length = dz.hypot(dr);
        if !(length > 0.0) {
            return None;
        }
        let radial = Vector3::new(phi.cos(), phi.sin(), 0.0);
        let tangential = Vector3::new(-phi.sin(), phi.cos(), 0.0);
        let axial = Vector3::z();
        Some(Self {
            start: Point3::from(radial * r0 + axial * z0),
            along: (radial * dr + axial * dz) / length,
            outward: (radial * dz - axial * dr) / length,
            tangential,
            length,
        })
    }
}

/// Builds one channel piece as an extruded trapezoid, falling back to a
/// box of the channel's full width.
fn channel_piece(
    store: &mut ShapeStore,
    params: &NozzleParams,
    frame: &SegmentFrame,
    ligament: f64,
) -> Result<Built<ShapeId>> {
    let (b, h, w) = (params.channel_base, params.channel_height, params.channel_top);
    let inner = frame.start + frame.outward * ligament;
    let outer = inner + frame.outward * h;
    let t = frame.tangential;
    let outline = vec![inner - t * (b / 2.0), inner + t * (b / 2.0), outer + t * (w / 2.0), outer - t * (w / 2.0)];
    let primary = MakeFace::new(outline)
        .execute(store)
        .and_then(|face| Extrude::new(face, frame.along * frame.length).execute(store));
    or_fallback("cooling channel", primary, || {
        let slab = MakeBox::new(Point3::origin(), Vector3::new(h, w, frame.length)).execute(store)?;
        let rotation = UnitQuaternion::from_basis_unchecked(&[frame.outward, frame.tangential, frame.along]);
        let corner = inner - t * (w / 2.0);
        Place::new(slab, Isometry3::from_parts(corner.coords.into(), rotation)).execute(store)
    })
}

/// Cuts `num_helices * 4` channels, one piece per contour segment, out of
/// `wall`.
///
/// Pieces that cannot be subtracted are skipped and recorded in `log`.
///
/// # Errors
///
/// Returns an error only if a channel piece and its fallback both fail.
pub fn cut_channels(
    store: &mut ShapeStore,
    params: &NozzleParams,
    contour: &NozzleContour,
    wall: ShapeId,
    log: &mut BuildLog,
) -> Result<(ShapeId, ChanneledWall)> {
    let slots = params.num_helices * 4;
    let mut solid = wall;
    let mut result = ChanneledWall::default();
    for slot in 0..slots {
        let phi = TAU * f64::from(slot) / f64::from(slots);
        for (segment, (p0, p1)) in contour.segments().enumerate() {
            let Some(frame) = SegmentFrame::new(phi, p0, p1) else {
                continue;
            };
            let ligament = if NozzleContour::touches_throat(segment) {
                params.ligament_min_throat
            } else {
                params.ligament_min_other
            };
            let built = channel_piece(store, params, &frame, ligament)?;
            let shape = log.take("cooling channel", built);
            let base = frame.start + frame.outward * ligament;
            let face = |base: Point3, exit: Vector3| ChannelEnd {
                base,
                exit,
                outward: frame.outward,
                tangential: frame.tangential,
                ligament,
            };
            result.pieces.push(ChannelPiece {
                shape,
                slot,
                segment,
                start: face(base, -frame.along),
                end: face(base + frame.along * frame.length, frame.along),
            });
            match Subtract::new(solid, shape).execute(store) {
                Ok(cut) => {
                    solid = cut;
                    result.cut += 1;
                }
                Err(err) => log.skip(format!("channel {slot}/{segment}"), &err),
            }
        }
    }
    tracing::debug!(pieces = result.pieces.len(), cut = result.cut, "cooling channels cut");
    Ok((solid, result))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeCylinder;
    use crate::operations::query::{ClassifyPoint, PointClassification};
    use approx::assert_relative_eq;

    #[test]
    fn frame_is_orthonormal() {
        let frame = SegmentFrame::new(0.3, (0.0, 75.0), (23.0, 25.0)).unwrap();
        assert_relative_eq!(frame.along.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.outward.dot(&frame.along), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.tangential.dot(&frame.along), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.outward.cross(&frame.tangential), frame.along, epsilon = 1e-12);
    }

    #[test]
    fn straight_wall_normal_points_outward() {
        let frame = SegmentFrame::new(0.0, (0.0, 10.0), (5.0, 10.0)).unwrap();
        assert_relative_eq!(frame.outward, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_has_no_frame() {
        assert!(SegmentFrame::new(0.0, (1.0, 2.0), (1.0, 2.0)).is_none());
    }

    #[test]
    fn piece_sits_one_ligament_off_the_bore() {
        let params = NozzleParams::default();
        let frame = SegmentFrame::new(0.0, (0.0, 30.0), (50.0, 30.0)).unwrap();
        let mut store = ShapeStore::new();
        let piece = channel_piece(&mut store, &params, &frame, 1.4).unwrap();
        assert!(!piece.is_fallback());
        let id = *piece.value();
        let hit = |x: f64| ClassifyPoint::new(id, Point3::new(x, 0.0, 25.0)).execute(&store).unwrap();
        assert_eq!(hit(31.0), PointClassification::Outside);
        assert_eq!(hit(32.4), PointClassification::Inside);
        assert_eq!(hit(33.6), PointClassification::Outside);
    }

    #[test]
    fn channels_are_cut_from_a_tube() {
        let params = NozzleParams::default();
        let contour = NozzleContour::new(&params).unwrap();
        let mut store = ShapeStore::new();
        let wall = MakeCylinder::new(Point3::origin(), 80.0, Vector3::z(), 200.0)
            .execute(&mut store)
            .unwrap();
        let mut log = BuildLog::default();
        let (_, channels) = cut_channels(&mut store, &params, &contour, wall, &mut log).unwrap();
        assert_eq!(channels.pieces.len(), 32);
        assert_eq!(channels.cut, 32);
        assert!(log.is_clean());
        let (start, end) = channels.slot_ends(0).unwrap();
        assert!(start.base.z < 5.0 && end.base.z > 195.0);
        assert!(start.exit.z < 0.0 && end.exit.z > 0.0);
        assert_relative_eq!(start.ligament, params.ligament_min_throat);
        assert_relative_eq!(end.ligament, params.ligament_min_other);
        assert!(channels.slot_ends(8).is_none());
    }
}
