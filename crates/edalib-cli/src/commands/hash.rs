//! Hash command implementation

use crate::cli::HashArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use edalib_core::list_members;

pub fn execute(args: &HashArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let digests = add_context(list_members(&args.archive))?;

    formatter.format_member_digests(&args.archive, &digests)?;

    Ok(())
}
