use serde::{Deserialize, Serialize};

/// Dimensions of the extreme-shield probe, in mm.
///
/// Everything is solid; there is no inner cavity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeParams {
    pub nose_len: f64,
    pub nose_base_d: f64,
    /// Loft radius at 35 % of the nose length.
    pub nose_shoulder_r: f64,
    /// Loft radius at 70 % of the nose length.
    pub nose_neck_r: f64,
    pub nose_cap_d: f64,
    pub mid_len: f64,
    pub mid_d: f64,
    pub rear_len: f64,
    pub rear_d: f64,
    pub hull_fillet_r: f64,

    pub reactor_d: f64,
    pub reactor_l: f64,
    pub reactor_cx: f64,
    pub nozzle_throat_d: f64,
    pub nozzle_throat_l: f64,
    pub nozzle_exit_d: f64,
    pub nozzle_l: f64,
    pub nozzle_cx: f64,
    pub nozzle_fillet_r: f64,

    pub front_tps: ShieldDisc,
    pub rear_tps: ShieldDisc,
    pub shield_fillet_r: f64,
    pub ring_guard_r: f64,
    pub ring_guard_w: f64,
    pub ring_guard_t: f64,

    pub rad_panel_w: f64,
    pub rad_panel_h: f64,
    pub rad_panel_t: f64,
    pub rad_panel_count: u32,
    pub rad_spacing: f64,
    pub rad_fillet_r: f64,

    pub band_w: f64,
    pub band_t: f64,
    pub bands_n: u32,
    pub band_fillet_r: f64,
    pub truss_n: u32,
    pub truss_tube_w: f64,
    pub truss_len: f64,

    pub mast_l: f64,
    pub mast_r: f64,
    pub dish_r: f64,
    pub dish_depth: f64,

    /// Fuse every part into one printable solid.
    pub make_unified_solid: bool,
}

/// A bevelled shield disc: a flat disc with a short cone on its face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldDisc {
    pub r: f64,
    pub t: f64,
    pub bevel: f64,
    /// Axial gap to the hull end it protects.
    pub gap: f64,
}

impl Default for ProbeParams {
    fn default() -> Self {
        Self {
            nose_len: 800.0,
            nose_base_d: 1100.0,
            nose_shoulder_r: 520.0,
            nose_neck_r: 300.0,
            nose_cap_d: 520.0,
            mid_len: 2300.0,
            mid_d: 1800.0,
            rear_len: 1700.0,
            rear_d: 2200.0,
            hull_fillet_r: 20.0,
            reactor_d: 1500.0,
            reactor_l: 2100.0,
            reactor_cx: 3400.0,
            nozzle_throat_d: 520.0,
            nozzle_throat_l: 260.0,
            nozzle_exit_d: 2000.0,
            nozzle_l: 1900.0,
            nozzle_cx: 4500.0,
            nozzle_fillet_r: 80.0,
            front_tps: ShieldDisc {
                r: 1600.0,
                t: 240.0,
                bevel: 90.0,
                gap: 120.0,
            },
            rear_tps: ShieldDisc {
                r: 1400.0,
                t: 200.0,
                bevel: 80.0,
                gap: 80.0,
            },
            shield_fillet_r: 4.0,
            ring_guard_r: 2000.0,
            ring_guard_w: 180.0,
            ring_guard_t: 140.0,
            rad_panel_w: 1100.0,
            rad_panel_h: 80.0,
            rad_panel_t: 28.0,
            rad_panel_count: 8,
            rad_spacing: 160.0,
            rad_fillet_r: 2.0,
            band_w: 150.0,
            band_t: 32.0,
            bands_n: 6,
            band_fillet_r: 12.0,
            truss_n: 12,
            truss_tube_w: 160.0,
            truss_len: 1200.0,
            mast_l: 1100.0,
            mast_r: 48.0,
            dish_r: 420.0,
            dish_depth: 50.0,
            make_unified_solid: true,
        }
    }
}

impl ProbeParams {
    /// End of the rear section.
    #[must_use]
    pub fn tail_x(&self) -> f64 {
        self.nose_len + self.mid_len + self.rear_len
    }

    /// Axial pitch of the structural bands.
    #[must_use]
    pub fn band_pitch(&self) -> f64 {
        (self.mid_len + self.rear_len - 2.0 * self.band_w) / f64::from(self.bands_n.max(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn band_pitch_spreads_over_mid_and_rear() {
        let params = ProbeParams::default();
        assert_relative_eq!(params.band_pitch(), 3700.0 / 6.0);
        let single = ProbeParams {
            bands_n: 0,
            ..ProbeParams::default()
        };
        assert_relative_eq!(single.band_pitch(), 3700.0);
    }

    #[test]
    fn unified_flag_reads_from_json() {
        let params: ProbeParams = serde_json::from_str(r#"{"make_unified_solid": false}"#).unwrap();
        assert!(!params.make_unified_solid);
        assert_relative_eq!(params.tail_x(), 4800.0);
        assert_relative_eq!(params.front_tps.r, 1600.0);
    }
}
