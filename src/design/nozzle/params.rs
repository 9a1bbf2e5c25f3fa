use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::profile::{AxialProfile, Span};

/// Geometric parameters of the regeneratively cooled nozzle, in mm and
/// degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NozzleParams {
    pub throat_diameter: f64,
    pub exit_diameter: f64,
    pub convergent_angle: f64,
    pub divergent_angle: f64,
    pub nozzle_length: f64,

    pub wall_thickness_throat: f64,
    pub wall_thickness_convergent: f64,
    pub wall_thickness_div_start: f64,
    pub wall_thickness_div_end: f64,

    /// Hot-side width of the trapezoidal channel section.
    pub channel_base: f64,
    pub channel_height: f64,
    pub channel_top: f64,
    pub ligament_min_throat: f64,
    pub ligament_min_other: f64,
    pub num_helices: u32,
    pub pitch_throat: f64,
    pub pitch_mid: f64,
    pub pitch_exit: f64,

    pub inlet_manifold_thickness: f64,
    pub outlet_manifold_thickness: f64,
    pub plenum_height: f64,
    pub plenum_width: f64,
    pub end_caps_thickness: f64,

    pub flange_up_thickness: f64,
    pub flange_up_radial: f64,
    pub flange_down_thickness: f64,
    pub flange_down_radial: f64,

    pub fillet_radius: f64,
    /// Smallest printable feature.
    pub min_feature: f64,
    /// Overlap added to cutting tools so boolean faces never coincide.
    pub clearance_channels: f64,
}

impl Default for NozzleParams {
    fn default() -> Self {
        Self {
            throat_diameter: 50.0,
            exit_diameter: 150.0,
            convergent_angle: 45.0,
            divergent_angle: 15.0,
            nozzle_length: 200.0,
            wall_thickness_throat: 3.2,
            wall_thickness_convergent: 2.8,
            wall_thickness_div_start: 3.0,
            wall_thickness_div_end: 2.2,
            channel_base: 1.6,
            channel_height: 2.0,
            channel_top: 2.4,
            ligament_min_throat: 1.2,
            ligament_min_other: 1.4,
            num_helices: 2,
            pitch_throat: 4.0,
            pitch_mid: 7.0,
            pitch_exit: 10.0,
            inlet_manifold_thickness: 5.0,
            outlet_manifold_thickness: 5.0,
            plenum_height: 3.0,
            plenum_width: 8.0,
            end_caps_thickness: 2.0,
            flange_up_thickness: 8.0,
            flange_up_radial: 20.0,
            flange_down_thickness: 6.0,
            flange_down_radial: 15.0,
            fillet_radius: 1.0,
            min_feature: 0.6,
            clearance_channels: 0.05,
        }
    }
}

impl NozzleParams {
    #[must_use]
    pub fn throat_radius(&self) -> f64 {
        self.throat_diameter / 2.0
    }

    #[must_use]
    pub fn exit_radius(&self) -> f64 {
        self.exit_diameter / 2.0
    }

    /// Returns a copy with a different throat wall thickness.
    #[must_use]
    pub fn with_wall_thickness_throat(&self, thickness: f64) -> Self {
        Self {
            wall_thickness_throat: thickness,
            ..self.clone()
        }
    }

    /// Wall thickness along the axis.
    ///
    /// Convergent to throat over the first fifth, then divergent start to
    /// end. The step at the breakpoint is intentional.
    ///
    /// # Errors
    ///
    /// Returns an error if the nozzle length is not positive.
    pub fn wall_thickness_profile(&self) -> Result<AxialProfile> {
        AxialProfile::from_spans(
            self.nozzle_length,
            vec![
                Span::new(0.2, self.wall_thickness_convergent, self.wall_thickness_throat),
                Span::new(1.0, self.wall_thickness_div_start, self.wall_thickness_div_end),
            ],
        )
    }

    /// Helix pitch along the axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the nozzle length is not positive.
    pub fn pitch_profile(&self) -> Result<AxialProfile> {
        AxialProfile::from_spans(
            self.nozzle_length,
            vec![
                Span::new(0.3, self.pitch_throat, self.pitch_mid),
                Span::new(1.0, self.pitch_mid, self.pitch_exit),
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn thickness_profile_clamps_to_end_values() {
        let params = NozzleParams::default();
        let profile = params.wall_thickness_profile().unwrap();
        for x in [-50.0, -1e-9, 0.0] {
            assert_eq!(profile.at(x), params.wall_thickness_convergent);
        }
        for x in [200.0, 250.0, f64::MAX] {
            assert_eq!(profile.at(x), params.wall_thickness_div_end);
        }
    }

    #[test]
    fn thickness_profile_interior_is_bounded() {
        let profile = NozzleParams::default().wall_thickness_profile().unwrap();
        for i in 1..200 {
            let x = f64::from(i);
            let v = profile.at(x);
            if x < 40.0 {
                assert!((2.8..=3.2).contains(&v), "x = {x}: {v}");
            } else {
                assert!((2.2..=3.0).contains(&v), "x = {x}: {v}");
            }
        }
        assert_relative_eq!(profile.at(20.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn pitch_profile_breakpoints() {
        let profile = NozzleParams::default().pitch_profile().unwrap();
        assert_eq!(profile.at(-3.0), 4.0);
        assert_eq!(profile.at(60.0), 7.0);
        assert_eq!(profile.at(1000.0), 10.0);
        let v = profile.at(130.0);
        assert!(v > 7.0 && v < 10.0);
    }

    #[test]
    fn copy_with_thickness_leaves_original() {
        let params = NozzleParams::default();
        let thinner = params.with_wall_thickness_throat(2.56);
        assert_eq!(params.wall_thickness_throat, 3.2);
        assert_eq!(thinner.wall_thickness_throat, 2.56);
        assert_eq!(thinner.exit_diameter, params.exit_diameter);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: NozzleParams = serde_json::from_str(r#"{"throat_diameter": 40.0}"#).unwrap();
        assert_eq!(params.throat_diameter, 40.0);
        assert_eq!(params.nozzle_length, 200.0);
    }
}
