//! Closed-form nozzle performance estimates.
//!
//! Every figure is an independent, side-effect-free formula over the
//! nozzle parameters (mm) and the operating point (SI). Lengths are
//! converted to metres where a formula needs them. Domain problems such
//! as a zero throat are not guarded and surface as NaN or infinity.

use std::f64::consts::PI;

use crate::design::nozzle::NozzleParams;
use crate::error::Result;

use super::OperatingPoint;

/// Samples used when integrating the helix pitch.
const HELIX_SAMPLES: usize = 200;

/// Performance calculators over one nozzle at one operating point.
#[derive(Debug, Clone, Copy)]
pub struct NozzleAnalysis<'a> {
    params: &'a NozzleParams,
    op: &'a OperatingPoint,
}

impl<'a> NozzleAnalysis<'a> {
    #[must_use]
    pub fn new(params: &'a NozzleParams, op: &'a OperatingPoint) -> Self {
        Self { params, op }
    }

    #[must_use]
    pub fn params(&self) -> &'a NozzleParams {
        self.params
    }

    #[must_use]
    pub fn operating_point(&self) -> &'a OperatingPoint {
        self.op
    }

    /// Throat area in m².
    fn throat_area(&self) -> f64 {
        PI * (self.params.throat_diameter / 2.0).powi(2) / 1e6
    }

    /// Exit area in m².
    fn exit_area(&self) -> f64 {
        PI * (self.params.exit_diameter / 2.0).powi(2) / 1e6
    }

    /// Hot-gas wetted area used by the thermal estimates.
    fn wetted_area(&self) -> f64 {
        PI * self.params.throat_diameter * self.params.nozzle_length / 1000.0
    }

    /// Coolant channel height in m.
    fn channel_depth(&self) -> f64 {
        self.params.channel_height / 1000.0
    }

    /// Thrust in N from the ideal thrust coefficient plus the pressure
    /// term.
    #[must_use]
    pub fn thrust(&self) -> f64 {
        let op = self.op;
        let k = op.gamma;
        let pressure_ratio = op.exit_pressure / op.chamber_pressure;
        let momentum = (2.0 * k * k / (k - 1.0) * (1.0 - pressure_ratio.powf((k - 1.0) / k))).sqrt();
        let pressure = (op.exit_pressure - op.ambient_pressure) / op.chamber_pressure
            * (self.exit_area() / self.throat_area());
        let cf = momentum + pressure;
        cf * op.chamber_pressure * self.throat_area() * 1000.0
    }

    /// Specific impulse in s.
    #[must_use]
    pub fn specific_impulse(&self) -> f64 {
        self.thrust() / (self.op.propellant_flow * self.op.g0)
    }

    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        (self.params.exit_diameter / self.params.throat_diameter).powi(2)
    }

    /// Characteristic velocity c* in m/s.
    #[must_use]
    pub fn characteristic_velocity(&self) -> f64 {
        let op = self.op;
        let k = op.gamma;
        (k * op.gas_constant * op.chamber_temperature / (k + 1.0)).sqrt()
            * ((k + 1.0) / (2.0 * (k - 1.0))).powf((k - 1.0) / (2.0 * (k + 1.0)))
    }

    /// Heat load into the wall in W.
    #[must_use]
    pub fn heat_transfer(&self) -> f64 {
        let op = self.op;
        op.hot_gas_h * (op.chamber_temperature - op.hot_wall_temperature) * self.wetted_area()
    }

    /// Coolant mass flow needed to absorb the heat load, kg/s.
    #[must_use]
    pub fn cooling_requirement(&self) -> f64 {
        self.heat_transfer() / (self.op.coolant_cp * self.op.coolant_temperature_rise)
    }

    /// Thermal stress in Pa.
    #[must_use]
    pub fn thermal_stress(&self) -> f64 {
        self.op.youngs_modulus * self.op.thermal_expansion * self.op.wall_delta_t
    }

    #[must_use]
    pub fn structural_margin(&self) -> f64 {
        self.op.yield_strength / self.thermal_stress() - 1.0
    }

    /// Material volume in mm³, approximated as a conical frustum from
    /// throat to exit.
    #[must_use]
    pub fn nozzle_volume(&self) -> f64 {
        let (rt, re) = (self.params.throat_radius(), self.params.exit_radius());
        PI * self.params.nozzle_length / 3.0 * (rt * rt + rt * re + re * re)
    }

    /// Wall mass in kg.
    #[must_use]
    pub fn nozzle_mass(&self) -> f64 {
        self.nozzle_volume() * self.op.wall_density / 1e9
    }

    /// Material cost in $.
    #[must_use]
    pub fn material_cost(&self) -> f64 {
        self.nozzle_mass() * self.op.material_price_per_kg
    }

    #[must_use]
    pub fn nozzle_efficiency(&self) -> f64 {
        self.op.nozzle_efficiency
    }

    #[must_use]
    pub fn overall_efficiency(&self) -> f64 {
        self.nozzle_efficiency() * self.op.combustion_efficiency * self.op.cooling_efficiency
    }

    /// Rocket-equation payload estimate in kg, never negative.
    #[must_use]
    pub fn payload_capacity(&self) -> f64 {
        let thrust = self.thrust();
        let ve = self.op.g0 * self.specific_impulse();
        let payload = (thrust / ve) * ((ve * self.op.burn_time / thrust).exp() - 1.0) - self.op.dry_mass;
        payload.max(0.0)
    }

    /// Fatigue life in cycles.
    #[must_use]
    pub fn fatigue_life(&self) -> f64 {
        (self.op.endurance_limit / self.thermal_stress()).powi(2)
    }

    /// Darcy-Weisbach pressure drop through the channels, Pa.
    #[must_use]
    pub fn pressure_drop(&self) -> f64 {
        let op = self.op;
        let flow = self.cooling_requirement();
        let length = self.params.nozzle_length / 1000.0;
        let d = self.channel_depth();
        let friction = 0.316 / (4.0 * flow / (PI * d * op.coolant_viscosity)).sqrt();
        let mass_flux = flow / (PI * d * d / 4.0);
        friction * length / d * mass_flux.powi(2) / (2.0 * op.coolant_density)
    }

    /// Coolant velocity in m/s.
    #[must_use]
    pub fn channel_velocity(&self) -> f64 {
        let area = self.params.channel_base * self.params.channel_height / 1e6;
        self.cooling_requirement() / (self.op.coolant_density * area)
    }

    #[must_use]
    pub fn reynolds_number(&self) -> f64 {
        let op = self.op;
        op.coolant_density * self.channel_velocity() * self.channel_depth() / op.coolant_viscosity
    }

    /// Dittus-Boelter.
    #[must_use]
    pub fn nusselt_number(&self) -> f64 {
        0.023 * self.reynolds_number().powf(0.8) * self.op.coolant_prandtl.powf(0.4)
    }

    /// Coolant-side film coefficient, W/(m²·K).
    #[must_use]
    pub fn heat_transfer_coefficient(&self) -> f64 {
        self.nusselt_number() * self.op.coolant_conductivity / self.channel_depth()
    }

    /// Peak wall temperature in K.
    #[must_use]
    pub fn wall_temperature(&self) -> f64 {
        let op = self.op;
        let h = self.heat_transfer_coefficient();
        let t_gas = op.chamber_temperature;
        t_gas - (t_gas - op.coolant_bulk_temperature) * (h / (h + op.hot_gas_h))
    }

    /// Wall conductance at the throat thickness, W/K.
    #[must_use]
    pub fn thermal_conductance(&self) -> f64 {
        let t = self.params.wall_thickness_throat / 1000.0;
        self.op.wall_conductivity * self.wetted_area() / t
    }

    /// Tensile stress per flange bolt under full thrust, Pa.
    #[must_use]
    pub fn bolt_stress(&self) -> f64 {
        let bolt_area = PI * self.op.bolt_diameter.powi(2) / 4.0;
        self.thrust() / (f64::from(self.op.bolt_count) * bolt_area)
    }

    /// Fundamental frequency of the nozzle treated as a bar, Hz.
    #[must_use]
    pub fn vibration_frequency(&self) -> f64 {
        let length = self.params.nozzle_length / 1000.0;
        0.5 / length * (self.op.youngs_modulus / self.op.wall_density).sqrt()
    }

    #[must_use]
    pub fn acoustic_efficiency(&self) -> f64 {
        self.op.acoustic_efficiency
    }

    #[must_use]
    pub fn boundary_layer_loss(&self) -> f64 {
        self.op.boundary_layer_loss
    }

    #[must_use]
    pub fn divergence_loss(&self) -> f64 {
        self.op.divergence_loss
    }

    /// Choked propellant mass flow through the throat, kg/s.
    #[must_use]
    pub fn mass_flow_rate(&self) -> f64 {
        let op = self.op;
        let k = op.gamma;
        op.chamber_pressure * self.throat_area() / (op.gas_constant * op.chamber_temperature).sqrt()
            * k.sqrt()
            * (k / 2.0).powf((k + 1.0) / (2.0 * (k - 1.0)))
    }

    /// Coolant pump power in W.
    #[must_use]
    pub fn pump_power(&self) -> f64 {
        self.cooling_requirement() * self.pressure_drop() / self.op.pump_efficiency
    }

    /// Relative score; more helices and finer features score higher.
    #[must_use]
    pub fn manufacturing_complexity(&self) -> f64 {
        let p = self.params;
        f64::from(p.num_helices) * 10.0 + p.wall_thickness_throat / p.min_feature + p.channel_height / p.min_feature
    }

    /// Turns one helix makes over the nozzle length under the pitch
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch profile is invalid.
    pub fn helix_turns(&self) -> Result<f64> {
        Ok(self.params.pitch_profile()?.integrate_reciprocal(HELIX_SAMPLES))
    }
}
