//! Runs every enabled generator, exports the STL files and prints the
//! nozzle design report.
//!
//! Usage:
//! ```text
//! spaceforge                 # stock parameters
//! spaceforge run.json        # parameters overridden from JSON
//! RUST_LOG=spaceforge=debug spaceforge
//! ```

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use spaceforge::config::RunConfig;
use spaceforge::pipeline;

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let result = RunConfig::load(config_path.as_deref()).and_then(|config| pipeline::run(&config));

    match result {
        Ok(summary) => {
            println!("{}", summary.report);
            for (design, reason) in &summary.failed {
                tracing::warn!(design, reason = %reason, "design skipped");
            }
            tracing::info!(
                report = %summary.report_path.display(),
                designs = summary.designs.len() + 1,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let mut chain = vec![err.to_string()];
            let mut source = err.source();
            while let Some(cause) = source {
                chain.push(cause.to_string());
                source = cause.source();
            }
            tracing::error!(error = %chain.join(": "), "run failed");
            ExitCode::FAILURE
        }
    }
}
