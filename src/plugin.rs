//! Build-pipeline hook adapter around the deletion engine.
//!
//! A [`CleanStep`] is handed to a host pipeline, which fires lifecycle
//! hooks; the step reacts to its configured [`Hook`] by calling the engine.
//! The "already ran" gate behind `run_once` is per instance, tied to the
//! step's construction, so independent steps in one process never interfere.
//! The engine itself stays stateless across calls.

use crate::engine::{self, DeleteOptions};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::io::Write;
use tracing::debug;

/// Pipeline lifecycle stages a step can attach to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hook {
    /// Fired before the host pipeline starts building.
    #[default]
    BuildStart,
    /// Fired after the host pipeline finishes building.
    BuildEnd,
}

/// Configuration for a [`CleanStep`].
#[derive(Debug, Clone, Default)]
pub struct CleanConfig {
    /// Stage the step reacts to. Defaults to [`Hook::BuildStart`].
    pub hook: Hook,
    /// Delete the targets only once across repeated hook firings, for hosts
    /// that re-fire hooks in watch mode. Defaults to `false`.
    pub run_once: bool,
    /// Patterns of files and directories to delete. Defaults to empty.
    pub targets: Vec<String>,
    /// Report affected paths even outside dry-run. Defaults to `false`.
    pub verbose: bool,
    /// Options forwarded to the engine.
    pub options: DeleteOptions,
}

/// A pipeline step that deletes its configured targets when its hook fires.
#[derive(Debug)]
pub struct CleanStep {
    config: CleanConfig,
    ran: bool,
}

impl CleanStep {
    /// Create a step from its configuration. The run-once gate starts open.
    #[must_use]
    pub const fn new(config: CleanConfig) -> Self {
        Self { config, ran: false }
    }

    /// Name under which the step registers with the host pipeline.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        "kirei-clean"
    }

    /// React to `hook` firing, returning the affected paths when the step
    /// actually ran and `None` when the stage does not match or the
    /// `run_once` gate is closed. When `verbose` or `dry_run` is set, a
    /// count line and one line per affected path are written to `out`.
    ///
    /// # Errors
    ///
    /// Propagates engine failures and report write failures to the host
    /// pipeline; the gate stays open after a failed run.
    pub fn on_hook(&mut self, hook: Hook, out: &mut dyn Write) -> Result<Option<Vec<Utf8PathBuf>>> {
        if hook != self.config.hook {
            return Ok(None);
        }
        if self.config.run_once && self.ran {
            debug!(target: "kirei::plugin", "run-once gate closed; skipping");
            return Ok(None);
        }

        let paths = engine::delete(&self.config.targets, &self.config.options)
            .context("delete configured targets")?;
        if self.config.verbose || self.config.options.dry_run {
            report(out, self.config.options.dry_run, &paths)?;
        }
        self.ran = true;
        Ok(Some(paths))
    }
}

fn report(out: &mut dyn Write, dry_run: bool, paths: &[Utf8PathBuf]) -> Result<()> {
    let heading = if dry_run {
        format!("Expected files and folders to be deleted: {}", paths.len())
    } else {
        format!("Deleted files and folders: {}", paths.len())
    };
    writeln!(out, "{heading}").context("write deletion report")?;
    for path in paths {
        writeln!(out, "{path}").context("write deletion report")?;
    }
    Ok(())
}
