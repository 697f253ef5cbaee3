//! edalib CLI - verifies and unpacks the pinned EDA component libraries of a
//! hardware project.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use std::process::ExitCode;

use clap::Parser;
use cli::Commands;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let operation = match &cli.command {
        None | Some(Commands::Sync) => "sync",
        Some(Commands::Verify) => "verify",
        Some(Commands::Hash(_)) => "hash",
        Some(Commands::Completion(_)) => "completion",
    };
    let formatter = output::create_formatter(operation, cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        None | Some(Commands::Sync) => commands::sync::execute(&cli, &*formatter),
        Some(Commands::Verify) => commands::verify::execute(&cli, &*formatter),
        Some(Commands::Hash(args)) => commands::hash::execute(args, &*formatter),
        Some(Commands::Completion(args)) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            formatter.format_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Routes core `log` records to stderr; `RUST_LOG` overrides the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
