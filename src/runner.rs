//! CLI execution logic.
//!
//! Keeps `main` minimal: builds a [`CleanStep`] from the parsed arguments
//! and fires its build-start hook once, writing any report to the provided
//! stream.

use crate::cli::Cli;
use crate::engine::DeleteOptions;
use crate::plugin::{CleanConfig, CleanStep, Hook};
use anyhow::Result;
use std::io::Write;

/// Execute the parsed [`Cli`] invocation.
///
/// # Errors
///
/// Returns an error when the deletion engine rejects the request or the
/// report cannot be written.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let options = DeleteOptions {
        dry_run: cli.dry_run,
        concurrency: cli.concurrency,
        working_directory: cli.directory.clone(),
        case_insensitive: cli.case_insensitive,
        match_hidden: cli.hidden,
    };
    let mut step = CleanStep::new(CleanConfig {
        hook: Hook::BuildStart,
        run_once: false,
        targets: cli.patterns.clone(),
        verbose: cli.verbose,
        options,
    });
    step.on_hook(Hook::BuildStart, out)?;
    Ok(())
}
