//! Verify command implementation

use super::load_manifest;
use super::run_pipeline;
use crate::cli::Cli;
use crate::output::OutputFormatter;
use anyhow::Result;
use edalib_core::Pipeline;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let manifest = load_manifest(cli.manifest.as_deref())?;
    let pipeline = Pipeline::new(&manifest, &cli.root).verify_only();

    run_pipeline(&pipeline, manifest.entries().len(), "verify", formatter)
}
