//! Subcommand implementations.

pub mod completion;
pub mod hash;
pub mod sync;
pub mod verify;

use crate::error::add_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use edalib_core::Manifest;
use edalib_core::Pipeline;
use log::debug;
use std::path::Path;

/// Loads the manifest named on the command line, or the built-in one.
pub fn load_manifest(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(path) => {
            debug!("loading manifest {}", path.display());
            add_context(Manifest::load(path))
        }
        None => add_context(Manifest::builtin()),
    }
}

/// Runs `pipeline` with a progress display and prints its report.
fn run_pipeline(
    pipeline: &Pipeline<'_>,
    total: usize,
    operation: &str,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let report = {
        let mut progress = CliProgress::new(total, formatter);
        add_context(pipeline.run_with_observer(&mut progress))?
    };

    formatter.format_pipeline_report(operation, &report)
}
