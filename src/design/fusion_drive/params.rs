use serde::{Deserialize, Serialize};

/// Dimensions of the direct fusion drive, in mm.
///
/// The fuselage runs along +X: nose cone from `x = 0`, then the mid and
/// rear cylinders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionDriveParams {
    pub nose_len: f64,
    pub nose_base_d: f64,
    pub mid_len: f64,
    pub mid_d: f64,
    pub rear_len: f64,
    pub rear_d: f64,
    pub hull_t: f64,

    pub cockpit_w: f64,
    pub cockpit_h: f64,
    pub cockpit_l: f64,
    pub cockpit_x0: f64,
    pub cockpit_fillet: f64,
    pub win_w: f64,
    pub win_h: f64,
    pub win_th: f64,
    pub win_z: f64,

    pub reactor_d: f64,
    pub reactor_l: f64,
    pub reactor_cx: f64,
    pub ring_h: f64,
    pub ring_ro: f64,
    pub ring_ri: f64,
    pub ring_n: u32,
    pub ring_pitch: f64,
    pub coil_rect_w: f64,
    pub coil_rect_h: f64,
    pub coil_r: f64,
    pub coil_n: u32,
    pub coil_span: f64,

    pub moderator_t: f64,
    pub moderator_gap: f64,
    pub moderator_over: f64,
    pub tungsten_post_t: f64,

    pub nozzle_throat_d: f64,
    pub nozzle_exit_d: f64,
    pub nozzle_l: f64,
    pub nozzle_cx: f64,
    pub nozzle_fillet_r: f64,
    pub truss_n: u32,
    pub truss_tube_w: f64,
    pub truss_r_attach: f64,

    pub tank_d: f64,
    pub tank_l: f64,
    pub tank_cx: f64,
    pub tank_cy: f64,
    pub tank_cz: f64,

    pub leg_l_fold: f64,
    pub leg_foot_d: f64,
    pub leg_side_x1: f64,
    pub leg_side_x2: f64,
    pub leg_side_y: f64,
    pub leg_front_x: f64,
    pub leg_front_y: f64,
    pub leg_front_z: f64,

    pub wing_root_w: f64,
    pub wing_tip_w: f64,
    pub wing_chord: f64,
    pub fin_h: f64,
    pub fin_base: f64,
    pub rad_panel_w: f64,
    pub rad_panel_h: f64,

    pub tps: TpsParams,
    pub radiators: RadiatorParams,
}

impl Default for FusionDriveParams {
    fn default() -> Self {
        Self {
            nose_len: 2400.0,
            nose_base_d: 1800.0,
            mid_len: 4200.0,
            mid_d: 2700.0,
            rear_len: 2400.0,
            rear_d: 3600.0,
            hull_t: 30.0,
            cockpit_w: 2700.0,
            cockpit_h: 1200.0,
            cockpit_l: 1800.0,
            cockpit_x0: 1800.0,
            cockpit_fillet: 60.0,
            win_w: 1800.0,
            win_h: 750.0,
            win_th: 60.0,
            win_z: 0.0,
            reactor_d: 2400.0,
            reactor_l: 2700.0,
            reactor_cx: 7800.0,
            ring_h: 90.0,
            ring_ro: 1260.0,
            ring_ri: 1140.0,
            ring_n: 6,
            ring_pitch: 450.0,
            coil_rect_w: 240.0,
            coil_rect_h: 240.0,
            coil_r: 1320.0,
            coil_n: 4,
            coil_span: 2400.0,
            moderator_t: 300.0,
            moderator_gap: 60.0,
            moderator_over: 600.0,
            tungsten_post_t: 30.0,
            nozzle_throat_d: 900.0,
            nozzle_exit_d: 2700.0,
            nozzle_l: 2100.0,
            nozzle_cx: 8550.0,
            nozzle_fillet_r: 120.0,
            truss_n: 3,
            truss_tube_w: 240.0,
            truss_r_attach: 1650.0,
            tank_d: 900.0,
            tank_l: 2100.0,
            tank_cx: 4800.0,
            tank_cy: 900.0,
            tank_cz: -450.0,
            leg_l_fold: 1200.0,
            leg_foot_d: 540.0,
            leg_side_x1: 3150.0,
            leg_side_x2: 5850.0,
            leg_side_y: 1800.0,
            leg_front_x: 1200.0,
            leg_front_y: 0.0,
            leg_front_z: -(2700.0 / 2.0) + 150.0,
            wing_root_w: 1800.0,
            wing_tip_w: 450.0,
            wing_chord: 1350.0,
            fin_h: 1200.0,
            fin_base: 600.0,
            rad_panel_w: 2400.0,
            rad_panel_h: 1800.0,
            tps: TpsParams::default(),
            radiators: RadiatorParams::default(),
        }
    }
}

impl FusionDriveParams {
    /// Length of nose, mid and rear sections together.
    #[must_use]
    pub fn fuselage_len(&self) -> f64 {
        self.nose_len + self.mid_len + self.rear_len
    }
}

/// Heat shield carried ahead of the nose on a conical support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TpsParams {
    pub tps_d: f64,
    pub tps_t: f64,
    /// Axial gap between the nose tip and the support cone.
    pub tps_gap: f64,
    pub sup_l: f64,
    pub sup_d_base: f64,
    pub sup_d_tip: f64,
    pub join_fillet: f64,
    /// Thickness of each ablative face of the sandwich.
    pub face_t: f64,
}

impl Default for TpsParams {
    fn default() -> Self {
        Self {
            tps_d: 7200.0,
            tps_t: 300.0,
            tps_gap: 360.0,
            sup_l: 840.0,
            sup_d_base: 2700.0,
            sup_d_tip: 1800.0,
            join_fillet: 6.0,
            face_t: 20.0,
        }
    }
}

impl TpsParams {
    /// Carbon core thickness between the two faces; zero when the faces
    /// fill the shield.
    #[must_use]
    pub fn core_t(&self) -> f64 {
        (self.tps_t - 2.0 * self.face_t).max(0.0)
    }
}

/// Radiator plates mounted in pairs on both sides of the mid section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiatorParams {
    pub th: f64,
    pub mount_gap_y: f64,
    /// First pair position; defaults to 300 mm past the nose.
    pub x_start: Option<f64>,
    /// Pair pitch; defaults to a quarter panel width, at least 220 mm.
    pub gap_x: Option<f64>,
    pub count_pairs: u32,
    pub arm_len: f64,
    pub arm_r: f64,
}

impl Default for RadiatorParams {
    fn default() -> Self {
        Self {
            th: 12.0,
            mount_gap_y: 90.0,
            x_start: None,
            gap_x: None,
            count_pairs: 8,
            arm_len: 180.0,
            arm_r: 30.0,
        }
    }
}

impl RadiatorParams {
    /// Axial position of pair `index`.
    #[must_use]
    pub fn pair_x(&self, drive: &FusionDriveParams, index: u32) -> f64 {
        let start = self.x_start.unwrap_or(drive.nose_len + 300.0);
        let gap = self.gap_x.unwrap_or_else(|| (drive.rad_panel_w * 0.25).max(220.0));
        start + f64::from(index) * gap
    }
}
