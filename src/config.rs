//! Run configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at
//! all) reproduces the stock run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::OperatingPoint;
use crate::design::fusion_drive::FusionDriveParams;
use crate::design::nozzle::NozzleParams;
use crate::design::satellite::SatelliteParams;
use crate::design::shield_probe::ProbeParams;
use crate::design::spaceship::ShipParams;
use crate::error::{ConfigError, Result};
use crate::tessellation::TessellationParams;

/// Which generators a run builds besides the nozzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignToggles {
    pub spaceship: bool,
    pub fusion_drive: bool,
    pub shield_probe: bool,
    pub satellite: bool,
}

impl Default for DesignToggles {
    fn default() -> Self {
        Self {
            spaceship: true,
            fusion_drive: true,
            shield_probe: true,
            satellite: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory receiving the STL files.
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub stl_deflection: f64,
    pub max_cells_per_axis: usize,
    pub designs: DesignToggles,
    pub nozzle: NozzleParams,
    pub spaceship: ShipParams,
    pub fusion_drive: FusionDriveParams,
    pub shield_probe: ProbeParams,
    pub satellite: SatelliteParams,
    pub operating_point: OperatingPoint,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./RocketNozzle_STL"),
            report_path: PathBuf::from("RocketNozzle_Report.txt"),
            stl_deflection: 0.3,
            max_cells_per_axis: TessellationParams::default().max_cells_per_axis,
            designs: DesignToggles::default(),
            nozzle: NozzleParams::default(),
            spaceship: ShipParams::default(),
            fusion_drive: FusionDriveParams::default(),
            shield_probe: ProbeParams::default(),
            satellite: SatelliteParams::default(),
            operating_point: OperatingPoint::default(),
        }
    }
}

impl RunConfig {
    /// Loads the configuration from `path`, or returns the defaults when
    /// no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON or
    /// holds out-of-range values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file, using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and checks a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or holds
    /// out-of-range values.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::from)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> std::result::Result<(), ConfigError> {
        if self.stl_deflection.is_nan() || self.stl_deflection <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stl_deflection must be positive, got {}",
                self.stl_deflection
            )));
        }
        if self.max_cells_per_axis == 0 {
            return Err(ConfigError::Invalid("max_cells_per_axis must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// Mesh settings for STL export.
    #[must_use]
    pub fn tessellation(&self) -> TessellationParams {
        TessellationParams {
            deflection: self.stl_deflection,
            max_cells_per_axis: self.max_cells_per_axis,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ForgeError;
    use approx::assert_relative_eq;

    #[test]
    fn missing_path_gives_defaults() {
        let config = RunConfig::load(None).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("./RocketNozzle_STL"));
        assert_relative_eq!(config.tessellation().deflection, 0.3);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = RunConfig::from_json(
            r#"{
                "stl_deflection": 0.5,
                "designs": { "fusion_drive": false },
                "nozzle": { "throat_diameter": 40.0 },
                "operating_point": { "chamber_pressure": 6e6 }
            }"#,
        )
        .unwrap();
        assert_relative_eq!(config.stl_deflection, 0.5);
        assert!(!config.designs.fusion_drive);
        assert!(config.designs.spaceship);
        assert!(config.designs.satellite);
        assert_relative_eq!(config.nozzle.throat_diameter, 40.0);
        assert_relative_eq!(config.nozzle.exit_diameter, 150.0);
        assert_relative_eq!(config.operating_point.chamber_pressure, 6e6);
        assert_relative_eq!(config.operating_point.gamma, 1.4);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let err = RunConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ForgeError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn non_positive_deflection_is_rejected() {
        let err = RunConfig::from_json(r#"{"stl_deflection": 0.0}"#).unwrap_err();
        assert!(matches!(err, ForgeError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn unreadable_file_reports_its_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.json");
        let err = RunConfig::load(Some(path.as_path())).unwrap_err();
        match err {
            ForgeError::Config(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.json");
        std::fs::write(&path, r#"{"report_path": "out/report.txt"}"#).unwrap();
        let config = RunConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.report_path, PathBuf::from("out/report.txt"));
    }
}
