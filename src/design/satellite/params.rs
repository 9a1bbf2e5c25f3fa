use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Dimensions of the modular satellite, in mm.
///
/// The hollow hull runs along +X from the nose at `x = 0`. Boxes are
/// placed by their minimum corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteParams {
    pub nose_base_d: f64,
    /// Loft radius at 35 % of the nose length.
    pub nose_shoulder_r: f64,
    /// Loft radius at 70 % of the nose length.
    pub nose_neck_r: f64,
    pub nose_cap_d: f64,
    pub nose_len: f64,
    pub mid_d: f64,
    pub mid_len: f64,
    pub rear_d: f64,
    pub rear_len: f64,
    /// Radial wall of the nose, mid and rear shells.
    pub wall_t: f64,
    /// How far the mid and rear cutters run past their shell.
    pub cut_overrun: f64,
    pub hull_fillet_r: f64,

    pub cockpit_size: [f64; 3],
    pub cockpit_corner: [f64; 3],
    pub reactor_d: f64,
    pub reactor_l: f64,

    pub front_tps_r: f64,
    /// Face radius over base radius of the front shield cone.
    pub front_tps_taper: f64,
    pub front_tps_t: f64,
    pub front_tps_gap: f64,
    pub front_tps_fillet_r: f64,
    pub nozzle_throat_d: f64,
    pub nozzle_l: f64,
    pub nozzle_fillet_r: f64,

    /// Axial offset of the external modules behind the mid section.
    pub module_x_offset: f64,
    /// Radial clearance of the panel row beyond the rear hull.
    pub panel_standoff: f64,
    /// Radial clearance of the subsystem boxes beyond the rear hull.
    pub module_standoff: f64,

    pub panel_width: f64,
    pub panel_length: f64,
    pub panel_thickness: f64,
    pub panel_count: u32,
    pub panel_spacing: f64,
    pub antenna_d: f64,
    pub antenna_l: f64,
    pub antenna_h: f64,
    pub antenna_count: u32,
    pub antenna_spacing: f64,
    pub sensor_d: f64,
    pub sensor_l: f64,
    pub sensor_h: f64,
    pub sensor_count: u32,
    pub sensor_spacing: f64,

    pub propulsion_count: u32,
    pub propulsion_d: f64,
    pub propulsion_l: f64,
    /// Lateral pitch of the propulsion units.
    pub propulsion_pitch: f64,
    pub landing_gear_count: u32,
    pub landing_gear_d: f64,
    pub landing_gear_l: f64,

    pub communication: ModuleBox,
    pub power: ModuleBox,
    pub thermal: ModuleBox,
    /// Boxes per subsystem module.
    pub module_count: u32,
    pub module_spacing: f64,
}

/// Box size of one subsystem module: `d` along X, `l` along Y, `h` along Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleBox {
    pub d: f64,
    pub l: f64,
    pub h: f64,
}

impl Default for SatelliteParams {
    fn default() -> Self {
        Self {
            nose_base_d: 500.0,
            nose_shoulder_r: 520.0,
            nose_neck_r: 300.0,
            nose_cap_d: 300.0,
            nose_len: 1000.0,
            mid_d: 300.0,
            mid_len: 2000.0,
            rear_d: 300.0,
            rear_len: 1000.0,
            wall_t: 50.0,
            cut_overrun: 200.0,
            hull_fillet_r: 10.0,
            cockpit_size: [400.0, 300.0, 200.0],
            cockpit_corner: [100.0, -150.0, -100.0],
            reactor_d: 200.0,
            reactor_l: 300.0,
            front_tps_r: 200.0,
            front_tps_taper: 0.8,
            front_tps_t: 100.0,
            front_tps_gap: 50.0,
            front_tps_fillet_r: 4.0,
            nozzle_throat_d: 100.0,
            nozzle_l: 200.0,
            nozzle_fillet_r: 10.0,
            module_x_offset: 80.0,
            panel_standoff: 90.0,
            module_standoff: 50.0,
            panel_width: 1000.0,
            panel_length: 500.0,
            panel_thickness: 10.0,
            panel_count: 4,
            panel_spacing: 200.0,
            antenna_d: 100.0,
            antenna_l: 200.0,
            antenna_h: 50.0,
            antenna_count: 4,
            antenna_spacing: 150.0,
            sensor_d: 50.0,
            sensor_l: 100.0,
            sensor_h: 20.0,
            sensor_count: 2,
            sensor_spacing: 100.0,
            propulsion_count: 4,
            propulsion_d: 200.0,
            propulsion_l: 300.0,
            propulsion_pitch: 100.0,
            landing_gear_count: 3,
            landing_gear_d: 50.0,
            landing_gear_l: 200.0,
            communication: ModuleBox {
                d: 80.0,
                l: 150.0,
                h: 30.0,
            },
            power: ModuleBox {
                d: 120.0,
                l: 180.0,
                h: 40.0,
            },
            thermal: ModuleBox {
                d: 100.0,
                l: 160.0,
                h: 25.0,
            },
            module_count: 2,
            module_spacing: 200.0,
        }
    }
}

impl SatelliteParams {
    /// End of the rear section.
    #[must_use]
    pub fn tail_x(&self) -> f64 {
        self.nose_len + self.mid_len + self.rear_len
    }

    /// Where the external modules start along X.
    #[must_use]
    pub fn module_x(&self) -> f64 {
        self.nose_len + self.mid_len + self.module_x_offset
    }

    /// Outer radii of the nose loft, base to cap.
    #[must_use]
    pub fn nose_radii(&self) -> [f64; 4] {
        [self.nose_base_d / 2.0, self.nose_shoulder_r, self.nose_neck_r, self.nose_cap_d / 2.0]
    }

    /// Checks that every dimension is positive and that the walls leave a
    /// cavity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("nose_base_d", self.nose_base_d),
            ("nose_shoulder_r", self.nose_shoulder_r),
            ("nose_neck_r", self.nose_neck_r),
            ("nose_cap_d", self.nose_cap_d),
            ("nose_len", self.nose_len),
            ("mid_d", self.mid_d),
            ("mid_len", self.mid_len),
            ("rear_d", self.rear_d),
            ("rear_len", self.rear_len),
            ("wall_t", self.wall_t),
            ("reactor_d", self.reactor_d),
            ("reactor_l", self.reactor_l),
            ("front_tps_r", self.front_tps_r),
            ("front_tps_taper", self.front_tps_taper),
            ("front_tps_t", self.front_tps_t),
            ("nozzle_throat_d", self.nozzle_throat_d),
            ("nozzle_l", self.nozzle_l),
            ("panel_width", self.panel_width),
            ("panel_length", self.panel_length),
            ("panel_thickness", self.panel_thickness),
            ("antenna_d", self.antenna_d),
            ("antenna_l", self.antenna_l),
            ("antenna_h", self.antenna_h),
            ("sensor_d", self.sensor_d),
            ("sensor_l", self.sensor_l),
            ("sensor_h", self.sensor_h),
            ("propulsion_d", self.propulsion_d),
            ("propulsion_l", self.propulsion_l),
            ("landing_gear_d", self.landing_gear_d),
            ("landing_gear_l", self.landing_gear_l),
        ];
        let counts = [
            ("panel_count", self.panel_count),
            ("antenna_count", self.antenna_count),
            ("sensor_count", self.sensor_count),
            ("propulsion_count", self.propulsion_count),
            ("landing_gear_count", self.landing_gear_count),
            ("module_count", self.module_count),
        ];
        if let Some((name, _)) = lengths.iter().find(|(_, value)| value.is_nan() || *value <= 0.0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")).into());
        }
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")).into());
        }
        if self.cockpit_size.iter().any(|value| value.is_nan() || *value <= 0.0) {
            return Err(ConfigError::Invalid("cockpit_size must be positive".to_owned()).into());
        }
        let narrowest = self
            .nose_radii()
            .into_iter()
            .chain([self.mid_d / 2.0, self.rear_d / 2.0])
            .fold(f64::INFINITY, f64::min);
        if self.wall_t >= narrowest {
            return Err(ConfigError::Invalid(format!(
                "wall_t {} leaves no cavity inside a {narrowest} mm radius",
                self.wall_t
            ))
            .into());
        }
        Ok(())
    }
}
