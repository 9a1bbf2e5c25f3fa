//! End-to-end run: build, check, export and analyse.
//!
//! The nozzle is mandatory and any failure on its path aborts the run.
//! The other designs are best effort; a design that fails to build or
//! export is logged and recorded in the summary.

use std::path::PathBuf;

use crate::analysis::{
    export_design_report, generate_design_report, optimize_design_parameters, validate_design, DesignIssue,
    NozzleAnalysis, OptimizationResult,
};
use crate::config::RunConfig;
use crate::design::fusion_drive::build_fusion_drive;
use crate::design::nozzle::{build_nozzle, validate_manifold};
use crate::design::satellite::build_satellite;
use crate::design::shield_probe::build_shield_probe;
use crate::design::spaceship::build_spaceship;
use crate::design::DesignBuild;
use crate::error::Result;
use crate::export::export_stl;
use crate::scene::SceneBuilder;

/// Scene name of the nozzle run.
pub const NOZZLE_SCENE: &str = "RocketNozzle_Param";

/// What one generator produced.
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub design: &'static str,
    pub final_label: String,
    pub object_count: usize,
    pub fallbacks: usize,
    pub skipped: usize,
    /// `None` when the STL was skipped or could not be written.
    pub stl: Option<PathBuf>,
}

/// Everything a run reports back to the caller.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub nozzle: DesignOutcome,
    pub manifold_ok: bool,
    pub report: String,
    pub report_path: PathBuf,
    pub optimization: OptimizationResult,
    pub issues: Vec<DesignIssue>,
    pub designs: Vec<DesignOutcome>,
    /// Designs that failed to build, with the error text.
    pub failed: Vec<(&'static str, String)>,
}

type Generator<P> = fn(&mut SceneBuilder, &P) -> Result<DesignBuild>;

/// Runs the configured designs.
///
/// # Errors
///
/// Returns an error if the nozzle cannot be built or registered, or the
/// report cannot be written.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let tessellation = config.tessellation();
    let op = &config.operating_point;

    tracing::info!("building nozzle");
    let mut scene = SceneBuilder::open(NOZZLE_SCENE);
    let build = build_nozzle(&mut scene, &config.nozzle)?;
    report_log("nozzle", &build);
    let scene = scene.finalize();
    scene.object(&build.final_label)?;

    let manifold_ok = validate_manifold(scene.store(), build.final_shape, config.nozzle.min_feature)?;
    let stl = if manifold_ok {
        tracing::info!("nozzle passes the print check");
        match export_stl(&scene, &build.final_label, &config.output_dir, tessellation) {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!(error = %err, "nozzle STL export failed");
                None
            }
        }
    } else {
        tracing::warn!(
            min_feature = config.nozzle.min_feature,
            "nozzle is thinner than the minimum feature, skipping STL export"
        );
        None
    };
    let nozzle = outcome("nozzle", &build, scene.objects().len(), stl);

    let analysis = NozzleAnalysis::new(&config.nozzle, op);
    tracing::info!(
        thrust = analysis.thrust(),
        isp = analysis.specific_impulse(),
        mass_flow = analysis.mass_flow_rate(),
        wall_temperature = analysis.wall_temperature(),
        pressure_drop = analysis.pressure_drop(),
        "nozzle performance"
    );
    let optimization = optimize_design_parameters(&config.nozzle, op);
    tracing::info!(
        current_weight = optimization.current_weight,
        optimized_weight = optimization.optimized_weight,
        savings_percent = optimization.weight_savings_percent,
        "wall optimization"
    );
    tracing::info!(complexity = analysis.manufacturing_complexity(), "manufacturing complexity");
    match analysis.helix_turns() {
        Ok(turns) => tracing::info!(turns, "helix turns"),
        Err(err) => tracing::warn!(error = %err, "helix turns unavailable"),
    }
    let issues = validate_design(&config.nozzle, op);
    for issue in &issues {
        tracing::warn!("design issue: {issue}");
    }

    let report = generate_design_report(&config.nozzle, op);
    export_design_report(&config.nozzle, op, &config.report_path)?;

    let mut designs = Vec::new();
    let mut failed = Vec::new();
    let mut extra = |design: &'static str, result: Result<DesignOutcome>| match result {
        Ok(done) => designs.push(done),
        Err(err) => {
            tracing::error!(design, error = %err, "design failed");
            failed.push((design, err.to_string()));
        }
    };
    if config.designs.spaceship {
        extra("spaceship", run_design(config, "spaceship", build_spaceship, &config.spaceship));
    }
    if config.designs.fusion_drive {
        extra(
            "fusion_drive",
            run_design(config, "fusion_drive", build_fusion_drive, &config.fusion_drive),
        );
    }
    if config.designs.shield_probe {
        extra(
            "shield_probe",
            run_design(config, "shield_probe", build_shield_probe, &config.shield_probe),
        );
    }
    if config.designs.satellite {
        extra("satellite", run_design(config, "satellite", build_satellite, &config.satellite));
    }

    Ok(RunSummary {
        nozzle,
        manifold_ok,
        report,
        report_path: config.report_path.clone(),
        optimization,
        issues,
        designs,
        failed,
    })
}

fn run_design<P>(config: &RunConfig, design: &'static str, generator: Generator<P>, params: &P) -> Result<DesignOutcome> {
    tracing::info!(design, "building");
    let mut scene = SceneBuilder::open(design);
    let build = generator(&mut scene, params)?;
    report_log(design, &build);
    let scene = scene.finalize();
    let stl = match export_stl(&scene, &build.final_label, &config.output_dir, config.tessellation()) {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!(design, error = %err, "STL export failed");
            None
        }
    };
    Ok(outcome(design, &build, scene.objects().len(), stl))
}

fn report_log(design: &str, build: &DesignBuild) {
    for note in &build.log.fallbacks {
        tracing::debug!(design, "fallback: {note}");
    }
    tracing::info!(
        design,
        label = %build.final_label,
        fallbacks = build.log.fallbacks.len(),
        skipped = build.log.skipped.len(),
        "design built"
    );
}

fn outcome(design: &'static str, build: &DesignBuild, object_count: usize, stl: Option<PathBuf>) -> DesignOutcome {
    DesignOutcome {
        design,
        final_label: build.final_label.clone(),
        object_count,
        fallbacks: build.log.fallbacks.len(),
        skipped: build.log.skipped.len(),
        stl,
    }
}
