//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This
//! module is included via `mod common;` in individual test files to share
//! fixtures while keeping test modules small.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

/// Create a workspace containing `temp/a.js`, `temp/b.js`, and `keep/c.txt`.
pub fn fixture_tree() -> Result<(TempDir, Utf8PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let root = utf8_root(&dir)?;
    fs::create_dir(root.join("temp")).context("create temp/")?;
    fs::write(root.join("temp/a.js"), "a").context("write temp/a.js")?;
    fs::write(root.join("temp/b.js"), "b").context("write temp/b.js")?;
    fs::create_dir(root.join("keep")).context("create keep/")?;
    fs::write(root.join("keep/c.txt"), "c").context("write keep/c.txt")?;
    Ok((dir, root))
}

/// UTF-8 view of a temporary directory's root.
pub fn utf8_root(dir: &TempDir) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non-UTF-8 temp dir: {}", path.display()))
}
