use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::materials::MaterialTag;

/// Dimensions of the radiation-hardened spaceship, in mm.
///
/// The hull runs along +X from nose to tail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipParams {
    pub total_length: f64,
    pub hull_outer_d: f64,
    pub hull_inner_d: f64,
    pub hull_wall_t: f64,

    pub nose_len: f64,
    pub mid_len: f64,
    pub rear_len: f64,
    pub tail_len: f64,

    pub rad_shield_layers: u32,
    pub rad_layer_t: f64,
    /// Material of each shield layer, innermost first. Layers past the end
    /// of the list are lead.
    pub rad_materials: Vec<MaterialTag>,

    pub cockpit_len: f64,
    pub cockpit_w: f64,
    pub cockpit_h: f64,
    pub reactor_len: f64,
    pub reactor_d: f64,
    pub tank_len: f64,
    pub tank_d: f64,
    pub tank_n: u32,
    pub crew_quarters_len: f64,
    pub crew_quarters_w: f64,
    pub crew_quarters_h: f64,
    pub crew_n: u32,
    pub life_support_len: f64,
    pub life_support_d: f64,
    pub control_room_len: f64,
    pub control_room_w: f64,
    pub control_room_h: f64,

    pub battery_len: f64,
    pub battery_d: f64,
    pub battery_n: u32,
    pub generator_len: f64,
    pub generator_d: f64,

    pub main_engine_d: f64,
    pub main_engine_l: f64,
    pub attitude_thruster_d: f64,
    pub attitude_thruster_l: f64,
    pub attitude_n: u32,

    pub wing_span: f64,
    pub wing_chord: f64,
    pub wing_t: f64,
    pub solar_panel_l: f64,
    pub solar_panel_w: f64,
    pub solar_panel_t: f64,
    pub solar_n: u32,
    pub antenna_h: f64,
    pub antenna_d: f64,
    pub landing_gear_l: f64,
    pub landing_gear_d: f64,
    pub landing_n: u32,

    pub min_wall_t: f64,
    pub support_spacing: f64,
    pub fillet_r: f64,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            total_length: 15000.0,
            hull_outer_d: 4000.0,
            hull_inner_d: 3800.0,
            hull_wall_t: 100.0,
            nose_len: 3000.0,
            mid_len: 6000.0,
            rear_len: 4000.0,
            tail_len: 2000.0,
            rad_shield_layers: 5,
            rad_layer_t: 50.0,
            rad_materials: vec![
                MaterialTag::Lead,
                MaterialTag::Tungsten,
                MaterialTag::Boron,
                MaterialTag::Water,
                MaterialTag::CarbonFiber,
            ],
            cockpit_len: 2000.0,
            cockpit_w: 1500.0,
            cockpit_h: 1200.0,
            reactor_len: 2500.0,
            reactor_d: 2000.0,
            tank_len: 3000.0,
            tank_d: 1800.0,
            tank_n: 4,
            crew_quarters_len: 1500.0,
            crew_quarters_w: 1200.0,
            crew_quarters_h: 1000.0,
            crew_n: 2,
            life_support_len: 1000.0,
            life_support_d: 800.0,
            control_room_len: 800.0,
            control_room_w: 1000.0,
            control_room_h: 800.0,
            battery_len: 500.0,
            battery_d: 600.0,
            battery_n: 6,
            generator_len: 1200.0,
            generator_d: 1000.0,
            main_engine_d: 1500.0,
            main_engine_l: 2000.0,
            attitude_thruster_d: 200.0,
            attitude_thruster_l: 500.0,
            attitude_n: 12,
            wing_span: 8000.0,
            wing_chord: 2000.0,
            wing_t: 100.0,
            solar_panel_l: 5000.0,
            solar_panel_w: 2000.0,
            solar_panel_t: 20.0,
            solar_n: 4,
            antenna_h: 1500.0,
            antenna_d: 800.0,
            landing_gear_l: 1000.0,
            landing_gear_d: 150.0,
            landing_n: 6,
            min_wall_t: 2.0,
            support_spacing: 500.0,
            fillet_r: 50.0,
        }
    }
}

impl ShipParams {
    /// Material of shield layer `index`, counted from the hull outward.
    #[must_use]
    pub fn shield_material(&self, index: usize) -> MaterialTag {
        self.rad_materials.get(index).copied().unwrap_or(MaterialTag::Lead)
    }

    /// Checks positivity and the hull diameters.
    ///
    /// A section sum that differs from `total_length` only logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("total_length", self.total_length),
            ("hull_outer_d", self.hull_outer_d),
            ("hull_inner_d", self.hull_inner_d),
            ("hull_wall_t", self.hull_wall_t),
            ("nose_len", self.nose_len),
            ("mid_len", self.mid_len),
            ("rear_len", self.rear_len),
            ("tail_len", self.tail_len),
            ("rad_layer_t", self.rad_layer_t),
            ("cockpit_len", self.cockpit_len),
            ("cockpit_w", self.cockpit_w),
            ("cockpit_h", self.cockpit_h),
            ("reactor_len", self.reactor_len),
            ("reactor_d", self.reactor_d),
            ("tank_len", self.tank_len),
            ("tank_d", self.tank_d),
            ("main_engine_d", self.main_engine_d),
            ("main_engine_l", self.main_engine_l),
            ("attitude_thruster_d", self.attitude_thruster_d),
            ("attitude_thruster_l", self.attitude_thruster_l),
            ("wing_span", self.wing_span),
            ("wing_chord", self.wing_chord),
            ("wing_t", self.wing_t),
            ("solar_panel_l", self.solar_panel_l),
            ("solar_panel_w", self.solar_panel_w),
            ("solar_panel_t", self.solar_panel_t),
            ("antenna_h", self.antenna_h),
            ("antenna_d", self.antenna_d),
            ("landing_gear_l", self.landing_gear_l),
            ("landing_gear_d", self.landing_gear_d),
            ("min_wall_t", self.min_wall_t),
            ("support_spacing", self.support_spacing),
            ("fillet_r", self.fillet_r),
        ];
        let counts = [
            ("rad_shield_layers", self.rad_shield_layers),
            ("tank_n", self.tank_n),
            ("attitude_n", self.attitude_n),
            ("solar_n", self.solar_n),
            ("landing_n", self.landing_n),
        ];
        if let Some((name, _)) = lengths.iter().find(|(_, value)| !(*value > 0.0)) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")).into());
        }
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")).into());
        }
        if self.hull_inner_d >= self.hull_outer_d {
            return Err(ConfigError::Invalid(format!(
                "hull_inner_d {} must be smaller than hull_outer_d {}",
                self.hull_inner_d, self.hull_outer_d
            ))
            .into());
        }
        if self.support_spacing < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "support_spacing {} must be at least 1 mm",
                self.support_spacing
            ))
            .into());
        }
        let sections = self.nose_len + self.mid_len + self.rear_len + self.tail_len;
        if (sections - self.total_length).abs() > 1e-9 * self.total_length {
            tracing::warn!(sections, total_length = self.total_length, "hull sections do not add up to total_length");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ForgeError;

    #[test]
    fn defaults_are_valid() {
        ShipParams::default().validate().unwrap();
    }

    #[test]
    fn inner_wider_than_outer_is_rejected() {
        let params = ShipParams {
            hull_inner_d: 4000.0,
            ..ShipParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, ForgeError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn non_positive_field_is_named() {
        let params = ShipParams {
            wing_t: -1.0,
            ..ShipParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("wing_t"));
    }

    #[test]
    fn zero_count_is_rejected() {
        let params = ShipParams {
            tank_n: 0,
            ..ShipParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn sub_millimetre_support_spacing_is_rejected() {
        let params = ShipParams {
            support_spacing: 0.5,
            ..ShipParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("support_spacing"));
        let params = ShipParams {
            support_spacing: 1.0,
            ..ShipParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn section_mismatch_only_warns() {
        let params = ShipParams {
            tail_len: 2500.0,
            ..ShipParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn extra_layers_default_to_lead() {
        let params = ShipParams::default();
        assert_eq!(params.shield_material(1), MaterialTag::Tungsten);
        assert_eq!(params.shield_material(4), MaterialTag::CarbonFiber);
        assert_eq!(params.shield_material(7), MaterialTag::Lead);
    }

    #[test]
    fn materials_parse_from_tags() {
        let params: ShipParams = serde_json::from_str(r#"{"rad_materials": ["LEAD", "CARBON", "WATER"]}"#).unwrap();
        assert_eq!(
            params.rad_materials,
            [MaterialTag::Lead, MaterialTag::CarbonFiber, MaterialTag::Water]
        );
    }
}
