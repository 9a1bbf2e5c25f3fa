//! Engineering analysis of the cooled nozzle.
//!
//! Closed-form performance estimates, the text report, a wall-thickness
//! optimizer and design-rule checks. Everything here is pure except
//! [`export_design_report`].

mod checks;
mod operating_point;
mod optimize;
mod performance;
mod report;

pub use checks::{validate_design, DesignIssue, MAX_COOLANT_VELOCITY, MAX_WALL_TEMPERATURE, MIN_STRUCTURAL_MARGIN};
pub use operating_point::OperatingPoint;
pub use optimize::{optimize_design_parameters, OptimizationResult};
pub use performance::NozzleAnalysis;
pub use report::{export_design_report, generate_design_report};
