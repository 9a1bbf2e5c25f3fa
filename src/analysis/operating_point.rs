use serde::{Deserialize, Serialize};

/// Physical constants the calculators assume, in SI units.
///
/// Defaults describe a 50 bar chamber at 3500 K with water cooling
/// through a copper-alloy wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingPoint {
    /// Pa
    pub chamber_pressure: f64,
    /// Pa
    pub exit_pressure: f64,
    /// Pa
    pub ambient_pressure: f64,
    /// K
    pub chamber_temperature: f64,
    pub gamma: f64,
    /// J/(kg·K)
    pub gas_constant: f64,
    /// Propellant flow used for specific impulse, kg/s.
    pub propellant_flow: f64,
    /// m/s²
    pub g0: f64,
    /// Dry mass for the payload estimate, kg.
    pub dry_mass: f64,
    /// s
    pub burn_time: f64,

    /// Hot-gas-side film coefficient, W/(m²·K).
    pub hot_gas_h: f64,
    /// Assumed hot-side wall temperature, K.
    pub hot_wall_temperature: f64,
    /// J/(kg·K)
    pub coolant_cp: f64,
    /// Allowed coolant temperature rise, K.
    pub coolant_temperature_rise: f64,
    /// K
    pub coolant_bulk_temperature: f64,
    /// kg/m³
    pub coolant_density: f64,
    /// Pa·s
    pub coolant_viscosity: f64,
    /// W/(m·K)
    pub coolant_conductivity: f64,
    pub coolant_prandtl: f64,
    pub pump_efficiency: f64,

    /// Pa
    pub youngs_modulus: f64,
    /// 1/K
    pub thermal_expansion: f64,
    /// Through-wall temperature difference, K.
    pub wall_delta_t: f64,
    /// Pa
    pub yield_strength: f64,
    /// Pa
    pub endurance_limit: f64,
    /// kg/m³
    pub wall_density: f64,
    /// W/(m·K)
    pub wall_conductivity: f64,
    /// Price of the wall alloy, $/kg.
    pub material_price_per_kg: f64,
    pub bolt_count: u32,
    /// m
    pub bolt_diameter: f64,

    pub nozzle_efficiency: f64,
    pub combustion_efficiency: f64,
    pub cooling_efficiency: f64,
    pub acoustic_efficiency: f64,
    pub boundary_layer_loss: f64,
    pub divergence_loss: f64,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        Self {
            chamber_pressure: 50e5,
            exit_pressure: 0.5e5,
            ambient_pressure: 101_325.0,
            chamber_temperature: 3500.0,
            gamma: 1.4,
            gas_constant: 287.0,
            propellant_flow: 5.0,
            g0: 9.81,
            dry_mass: 1000.0,
            burn_time: 300.0,
            hot_gas_h: 1000.0,
            hot_wall_temperature: 800.0,
            coolant_cp: 4186.0,
            coolant_temperature_rise: 500.0,
            coolant_bulk_temperature: 400.0,
            coolant_density: 1000.0,
            coolant_viscosity: 0.001,
            coolant_conductivity: 0.6,
            coolant_prandtl: 7.0,
            pump_efficiency: 0.7,
            youngs_modulus: 200e9,
            thermal_expansion: 16.5e-6,
            wall_delta_t: 1000.0,
            yield_strength: 400e6,
            endurance_limit: 300e6,
            wall_density: 8960.0,
            wall_conductivity: 16.3,
            material_price_per_kg: 12.0,
            bolt_count: 8,
            bolt_diameter: 8e-3,
            nozzle_efficiency: 0.95,
            combustion_efficiency: 0.92,
            cooling_efficiency: 0.98,
            acoustic_efficiency: 0.99,
            boundary_layer_loss: 0.02,
            divergence_loss: 0.01,
        }
    }
}
