use std::path::Path;

use crate::design::nozzle::NozzleParams;
use crate::error::Result;
use crate::export::write_report;

use super::{NozzleAnalysis, OperatingPoint};

/// Renders the plain-text design report.
///
/// Lines are joined with `\n` and there is no trailing newline. The
/// output depends only on the inputs.
#[must_use]
pub fn generate_design_report(params: &NozzleParams, op: &OperatingPoint) -> String {
    let a = NozzleAnalysis::new(params, op);
    let p = params;
    let lines = [
        "=== ROCKET NOZZLE DESIGN REPORT ===".to_owned(),
        format!("Throat Diameter: {:?} mm", p.throat_diameter),
        format!("Exit Diameter: {:?} mm", p.exit_diameter),
        format!("Expansion Ratio: {:.2}", a.expansion_ratio()),
        format!("Nozzle Length: {:?} mm", p.nozzle_length),
        String::new(),
        "=== PERFORMANCE METRICS ===".to_owned(),
        format!("Thrust: {:.1} N", a.thrust()),
        format!("Specific Impulse: {:.1} s", a.specific_impulse()),
        format!("Mass Flow Rate: {:.3} kg/s", a.mass_flow_rate()),
        format!("Overall Efficiency: {:.3}", a.overall_efficiency()),
        String::new(),
        "=== THERMAL ANALYSIS ===".to_owned(),
        format!("Heat Transfer: {:.0} W", a.heat_transfer()),
        format!("Coolant Flow Required: {:.3} kg/s", a.cooling_requirement()),
        format!("Wall Temperature: {:.0} K", a.wall_temperature()),
        format!("Thermal Stress: {:.1} MPa", a.thermal_stress() / 1e6),
        String::new(),
        "=== STRUCTURAL ANALYSIS ===".to_owned(),
        format!("Structural Margin: {:.2}", a.structural_margin()),
        format!("Material Volume: {:.0} mm³", a.nozzle_volume()),
        format!("Material Cost: ${:.0}", a.material_cost()),
        String::new(),
        "=== COOLING SYSTEM ===".to_owned(),
        format!("Number of Helices: {}", p.num_helices),
        format!("Channel Base Width: {:?} mm", p.channel_base),
        format!("Channel Height: {:?} mm", p.channel_height),
        format!("Pressure Drop: {:.2} bar", a.pressure_drop() / 1e5),
        format!("Coolant Velocity: {:.1} m/s", a.channel_velocity()),
        format!("Reynolds Number: {:.0}", a.reynolds_number()),
    ];
    lines.join("\n")
}

/// Generates the report and writes it to `path`.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be
/// written.
pub fn export_design_report(params: &NozzleParams, op: &OperatingPoint, path: &Path) -> Result<()> {
    write_report(&generate_design_report(params, op), path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn report_is_deterministic() {
        let params = NozzleParams::default();
        let op = OperatingPoint::default();
        assert_eq!(generate_design_report(&params, &op), generate_design_report(&params, &op));
    }

    #[test]
    fn report_layout() {
        let report = generate_design_report(&NozzleParams::default(), &OperatingPoint::default());
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "=== ROCKET NOZZLE DESIGN REPORT ===");
        assert_eq!(lines[1], "Throat Diameter: 50.0 mm");
        assert_eq!(lines[2], "Exit Diameter: 150.0 mm");
        assert_eq!(lines[3], "Expansion Ratio: 9.00");
        assert_eq!(lines[4], "Nozzle Length: 200.0 mm");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "=== PERFORMANCE METRICS ===");
        assert!(lines.contains(&"Thermal Stress: 3300.0 MPa"));
        assert!(lines.contains(&"Structural Margin: -0.88"));
        assert!(lines.contains(&"Number of Helices: 2"));
        assert!(lines.contains(&"Channel Base Width: 1.6 mm"));
        assert!(report.starts_with("=== ROCKET"));
        assert!(report.lines().last().unwrap().starts_with("Reynolds Number: "));
        assert!(!report.ends_with('\n'));
        assert_eq!(report.matches("===").count(), 10);
        assert_eq!(lines.len(), 30);
        assert_eq!(lines.iter().filter(|line| line.is_empty()).count(), 4);
    }

    #[test]
    fn exported_report_matches_generated_text() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out").join("RocketNozzle_Report.txt");
        let params = NozzleParams::default();
        let op = OperatingPoint::default();
        export_design_report(&params, &op, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, generate_design_report(&params, &op));
    }
}
