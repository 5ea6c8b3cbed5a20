//! The deletion engine.
//!
//! Orchestrates a single deletion call: normalize the patterns, expand them
//! through the matching collaborator, fix a deterministic deepest-first
//! processing order, then validate and remove each target under a bounded
//! worker pool. The engine holds no state across calls.

mod error;
mod pool;
mod safety;

pub use error::DeleteError;

use crate::matcher::{GlobMatcher, MatchOptions, PathMatcher};
use crate::pattern;
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use std::num::NonZeroUsize;
use tracing::debug;

/// Options controlling a single [`delete`] call.
///
/// This is a closed structure: every recognized option is a named field with
/// a documented default, and there is no pass-through of arbitrary keys.
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Report what would be removed without touching the filesystem.
    /// Defaults to `false`.
    pub dry_run: bool,
    /// Maximum number of simultaneously outstanding removal tasks.
    /// `None` (the default) means unbounded.
    pub concurrency: Option<NonZeroUsize>,
    /// Base directory for relative patterns and for the containment check.
    /// `None` (the default) means the process's current directory.
    pub working_directory: Option<Utf8PathBuf>,
    /// Ignore case when matching. Defaults to `false`.
    pub case_insensitive: bool,
    /// Let wildcards match entries whose name starts with a dot.
    /// Defaults to `false`.
    pub match_hidden: bool,
}

/// Delete every filesystem entry matching `patterns`, honouring `options`.
///
/// Returns the absolute paths that were removed (or, under `dry_run`, would
/// be removed), ascending lexicographic, with no duplicates. An empty
/// pattern list returns an empty result without touching the filesystem.
/// On failure no partial result is returned.
///
/// # Errors
///
/// Returns [`DeleteError::CurrentDirectoryDeletion`] or
/// [`DeleteError::OutsideWorkingDirectory`] when a match fails the
/// containment check, [`DeleteError::Removal`] when the filesystem removal
/// fails, and pattern or traversal errors from the matching collaborator
/// unchanged.
pub fn delete<P: AsRef<str>>(
    patterns: &[P],
    options: &DeleteOptions,
) -> Result<Vec<Utf8PathBuf>, DeleteError> {
    delete_with(patterns, options, &GlobMatcher)
}

/// Like [`delete`], with a caller-supplied matching collaborator.
///
/// # Errors
///
/// As for [`delete`], with matcher errors coming from `matcher`.
pub fn delete_with<P, M>(
    patterns: &[P],
    options: &DeleteOptions,
    matcher: &M,
) -> Result<Vec<Utf8PathBuf>, DeleteError>
where
    P: AsRef<str>,
    M: PathMatcher + ?Sized,
{
    let normalized = pattern::normalize_all(patterns);
    if normalized.is_empty() {
        return Ok(Vec::new());
    }

    let working_directory = resolve_working_directory(options)?;
    let match_options = MatchOptions {
        working_directory: working_directory.clone(),
        case_sensitive: !options.case_insensitive,
        require_literal_separator: true,
        require_literal_leading_dot: !options.match_hidden,
    };
    let mut targets = matcher.matched_paths(&normalized, &match_options)?;

    // Deepest-first processing order, fixed before any task starts, so a
    // directory and its children in one batch are handled deterministically.
    // Ordering is on the path string, not on components.
    targets.sort_by(|a, b| b.as_str().cmp(a.as_str()));
    targets.dedup();
    debug!(
        target: "kirei::engine",
        candidates = targets.len(),
        dry_run = options.dry_run,
        "dispatching removal tasks"
    );

    let dry_run = options.dry_run;
    let base = working_directory.as_path();
    let outcome = pool::run(&targets, options.concurrency, |candidate| {
        let resolved = safety::resolve(base, candidate);
        safety::check(&resolved, base)?;
        if !dry_run {
            remove(&resolved)?;
        }
        Ok(resolved)
    })?;

    debug_assert_eq!(outcome.attempted, outcome.processed.len());
    debug!(target: "kirei::engine", removed = outcome.attempted, "removal complete");
    Ok(outcome
        .processed
        .into_iter()
        .sorted_by(|a, b| a.as_str().cmp(b.as_str()))
        .collect())
}

/// Resolve the configured working directory to a normalized absolute path.
fn resolve_working_directory(options: &DeleteOptions) -> Result<Utf8PathBuf, DeleteError> {
    let directory = match &options.working_directory {
        Some(directory) if directory.is_absolute() => directory.clone(),
        Some(directory) => current_directory(directory.as_path())?.join(directory),
        None => current_directory(Utf8Path::new("."))?,
    };
    Ok(safety::normalize(&directory))
}

fn current_directory(configured: &Utf8Path) -> Result<Utf8PathBuf, DeleteError> {
    let current = std::env::current_dir().map_err(|source| DeleteError::WorkingDirectory {
        path: configured.to_owned(),
        source,
    })?;
    Utf8PathBuf::from_path_buf(current).map_err(|bad| DeleteError::NonUnicodePath { path: bad })
}

/// Recursive removal primitive. The target is a concrete path, never a
/// pattern; symlinks are removed in place, not followed. A target that has
/// already vanished counts as removed, matching the tolerance of the
/// original removal collaborator.
fn remove(path: &Utf8Path) -> Result<(), DeleteError> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(DeleteError::Removal {
                path: path.to_owned(),
                source,
            });
        }
    };
    let removal = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match removal {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(DeleteError::Removal {
            path: path.to_owned(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchOptions, PathMatcher};

    /// Matcher returning a fixed set of relative paths, independent of the
    /// filesystem, so ordering and safety behaviour can be tested alone.
    struct StubMatcher {
        paths: Vec<Utf8PathBuf>,
    }

    impl PathMatcher for StubMatcher {
        fn matched_paths(
            &self,
            _patterns: &[String],
            _options: &MatchOptions,
        ) -> Result<Vec<Utf8PathBuf>, DeleteError> {
            Ok(self.paths.clone())
        }
    }

    fn dry_run_in(directory: &str) -> DeleteOptions {
        DeleteOptions {
            dry_run: true,
            working_directory: Some(Utf8PathBuf::from(directory)),
            ..DeleteOptions::default()
        }
    }

    #[test]
    fn results_are_ascending_whatever_the_matcher_returns() {
        let matcher = StubMatcher {
            paths: vec![
                Utf8PathBuf::from("z.js"),
                Utf8PathBuf::from("a.js"),
                Utf8PathBuf::from("m/n.js"),
            ],
        };
        let removed = delete_with(&["*"], &dry_run_in("/work"), &matcher)
            .unwrap_or_else(|error| panic!("dry run failed: {error}"));
        assert_eq!(
            removed,
            vec![
                Utf8PathBuf::from("/work/a.js"),
                Utf8PathBuf::from("/work/m/n.js"),
                Utf8PathBuf::from("/work/z.js"),
            ]
        );
    }

    #[test]
    fn duplicate_matches_collapse() {
        let matcher = StubMatcher {
            paths: vec![Utf8PathBuf::from("a.js"), Utf8PathBuf::from("a.js")],
        };
        let removed = delete_with(&["*"], &dry_run_in("/work"), &matcher)
            .unwrap_or_else(|error| panic!("dry run failed: {error}"));
        assert_eq!(removed, vec![Utf8PathBuf::from("/work/a.js")]);
    }

    #[test]
    fn stub_match_on_the_working_directory_is_rejected() {
        let matcher = StubMatcher {
            paths: vec![Utf8PathBuf::from(".")],
        };
        let result = delete_with(&["."], &dry_run_in("/work"), &matcher);
        assert!(matches!(
            result,
            Err(DeleteError::CurrentDirectoryDeletion { .. })
        ));
    }

    #[test]
    fn stub_match_escaping_the_working_directory_is_rejected() {
        let matcher = StubMatcher {
            paths: vec![Utf8PathBuf::from("../sibling/a.js")],
        };
        let result = delete_with(&["../sibling/*"], &dry_run_in("/work"), &matcher);
        assert!(matches!(
            result,
            Err(DeleteError::OutsideWorkingDirectory { .. })
        ));
    }

    #[test]
    fn empty_patterns_skip_the_matcher_entirely() {
        struct PanickingMatcher;
        impl PathMatcher for PanickingMatcher {
            fn matched_paths(
                &self,
                _patterns: &[String],
                _options: &MatchOptions,
            ) -> Result<Vec<Utf8PathBuf>, DeleteError> {
                panic!("matcher must not be consulted for an empty pattern list");
            }
        }
        let patterns: [&str; 0] = [];
        let removed = delete_with(&patterns, &dry_run_in("/work"), &PanickingMatcher)
            .unwrap_or_else(|error| panic!("empty delete failed: {error}"));
        assert!(removed.is_empty());
    }
}
