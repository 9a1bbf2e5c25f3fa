use std::fmt;

use serde::Serialize;

use crate::design::nozzle::NozzleParams;

use super::{NozzleAnalysis, OperatingPoint};

/// Highest wall temperature a copper alloy tolerates, K.
pub const MAX_WALL_TEMPERATURE: f64 = 1200.0;
pub const MIN_STRUCTURAL_MARGIN: f64 = 1.5;
/// Coolant velocity above which channel erosion is expected, m/s.
pub const MAX_COOLANT_VELOCITY: f64 = 50.0;

/// A design rule the nozzle violates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DesignIssue {
    WallTooThin { thickness: f64, min: f64 },
    LigamentTooThin { ligament: f64, min: f64 },
    WallTooHot { temperature: f64 },
    LowStructuralMargin { margin: f64 },
    CoolantTooFast { velocity: f64 },
}

impl fmt::Display for DesignIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WallTooThin { thickness, min } => {
                write!(f, "Wall thickness too small: {thickness:?} < {min:?} mm")
            }
            Self::LigamentTooThin { ligament, min } => {
                write!(f, "Ligament too small: {ligament:?} < {min:?} mm")
            }
            Self::WallTooHot { .. } => f.write_str("Wall temperature too high for copper alloy"),
            Self::LowStructuralMargin { .. } => f.write_str("Structural margin too low"),
            Self::CoolantTooFast { .. } => f.write_str("Coolant velocity too high (erosion risk)"),
        }
    }
}

/// Checks the nozzle against the printability and operating limits.
///
/// Issues come back in a fixed order: wall, ligament, temperature,
/// margin, velocity. An empty list means the design passes.
#[must_use]
pub fn validate_design(params: &NozzleParams, op: &OperatingPoint) -> Vec<DesignIssue> {
    let a = NozzleAnalysis::new(params, op);
    let mut issues = Vec::new();

    if params.wall_thickness_throat < params.min_feature {
        issues.push(DesignIssue::WallTooThin {
            thickness: params.wall_thickness_throat,
            min: params.min_feature,
        });
    }
    if params.ligament_min_throat < params.min_feature {
        issues.push(DesignIssue::LigamentTooThin {
            ligament: params.ligament_min_throat,
            min: params.min_feature,
        });
    }
    let temperature = a.wall_temperature();
    if temperature > MAX_WALL_TEMPERATURE {
        issues.push(DesignIssue::WallTooHot { temperature });
    }
    let margin = a.structural_margin();
    if margin < MIN_STRUCTURAL_MARGIN {
        issues.push(DesignIssue::LowStructuralMargin { margin });
    }
    let velocity = a.channel_velocity();
    if velocity > MAX_COOLANT_VELOCITY {
        issues.push(DesignIssue::CoolantTooFast { velocity });
    }
    issues
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_design_has_low_margin() {
        let issues = validate_design(&NozzleParams::default(), &OperatingPoint::default());
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, DesignIssue::LowStructuralMargin { .. })));
        assert!(!issues.iter().any(|issue| matches!(issue, DesignIssue::WallTooThin { .. })));
    }

    #[test]
    fn thin_wall_and_ligament_are_reported_first() {
        let params = NozzleParams {
            wall_thickness_throat: 0.5,
            ligament_min_throat: 0.4,
            ..NozzleParams::default()
        };
        let issues = validate_design(&params, &OperatingPoint::default());
        assert_eq!(issues[0].to_string(), "Wall thickness too small: 0.5 < 0.6 mm");
        assert_eq!(issues[1].to_string(), "Ligament too small: 0.4 < 0.6 mm");
    }

    #[test]
    fn relaxed_limits_pass() {
        let op = OperatingPoint {
            yield_strength: 1e12,
            ..OperatingPoint::default()
        };
        let issues = validate_design(&NozzleParams::default(), &op);
        assert!(!issues
            .iter()
            .any(|issue| matches!(issue, DesignIssue::LowStructuralMargin { .. })));
    }

    #[test]
    fn messages() {
        assert_eq!(
            DesignIssue::CoolantTooFast { velocity: 80.0 }.to_string(),
            "Coolant velocity too high (erosion risk)"
        );
        assert_eq!(
            DesignIssue::WallTooHot { temperature: 1500.0 }.to_string(),
            "Wall temperature too high for copper alloy"
        );
    }
}
