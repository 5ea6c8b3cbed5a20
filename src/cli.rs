//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure consumed by [`crate::runner`].

use camino::Utf8PathBuf;
use clap::Parser;
use std::num::NonZeroUsize;

/// Maximum concurrency accepted by the CLI.
const MAX_CONCURRENCY: usize = 512;

fn parse_concurrency(s: &str) -> Result<NonZeroUsize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("{s} is not a valid number"))?;
    if (1..=MAX_CONCURRENCY).contains(&value) {
        NonZeroUsize::new(value).ok_or_else(|| "concurrency must be at least 1".to_owned())
    } else {
        Err(format!("concurrency must be between 1 and {MAX_CONCURRENCY}"))
    }
}

/// Safely delete files and directories matching glob patterns.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Patterns of files and directories to delete.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Resolve patterns against this directory instead of the current one.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<Utf8PathBuf>,

    /// Report what would be deleted without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Cap the number of simultaneous removal tasks.
    #[arg(short = 'j', long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<NonZeroUsize>,

    /// Match entries whose name starts with a dot.
    #[arg(long)]
    pub hidden: bool,

    /// Ignore case when matching.
    #[arg(long)]
    pub case_insensitive: bool,

    /// Print each deleted path and enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
