use serde::Serialize;

use crate::design::nozzle::NozzleParams;

use super::{NozzleAnalysis, OperatingPoint};

/// Share of the throat wall removed by the optimizer.
const WALL_REDUCTION: f64 = 0.2;
/// Thinnest throat wall the optimizer will propose, mm.
const MIN_THROAT_WALL: f64 = 2.0;

/// Weight and thrust comparison between the current design and its
/// thinner-walled variant. Masses in kg, thrust in N.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub current_weight: f64,
    pub optimized_weight: f64,
    pub weight_savings: f64,
    pub thrust_loss: f64,
    pub weight_savings_percent: f64,
}

/// Evaluates a 20 % thinner throat wall, floored at 2 mm.
///
/// The caller's parameters are not touched; the variant is a copy.
#[must_use]
pub fn optimize_design_parameters(params: &NozzleParams, op: &OperatingPoint) -> OptimizationResult {
    let current = NozzleAnalysis::new(params, op);
    let thinner = (params.wall_thickness_throat * (1.0 - WALL_REDUCTION)).max(MIN_THROAT_WALL);
    let variant = params.with_wall_thickness_throat(thinner);
    let optimized = NozzleAnalysis::new(&variant, op);

    let current_weight = current.nozzle_mass();
    let optimized_weight = optimized.nozzle_mass();
    let weight_savings = current_weight - optimized_weight;
    tracing::debug!(from = params.wall_thickness_throat, to = thinner, "throat wall variant");
    OptimizationResult {
        current_weight,
        optimized_weight,
        weight_savings,
        thrust_loss: current.thrust() - optimized.thrust(),
        weight_savings_percent: weight_savings / current_weight * 100.0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn caller_params_are_unchanged() {
        let params = NozzleParams::default();
        let before = params.clone();
        let _ = optimize_design_parameters(&params, &OperatingPoint::default());
        assert_relative_eq!(params.wall_thickness_throat, 3.2);
        assert_eq!(params, before);
    }

    #[test]
    fn frustum_weight_ignores_wall_thickness() {
        let result = optimize_design_parameters(&NozzleParams::default(), &OperatingPoint::default());
        assert!(result.current_weight > 0.0);
        assert_relative_eq!(result.optimized_weight, result.current_weight);
        assert_relative_eq!(result.weight_savings, 0.0);
        assert_relative_eq!(result.thrust_loss, 0.0);
        assert_relative_eq!(result.weight_savings_percent, 0.0);
    }
}
