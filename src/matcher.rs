//! Filesystem pattern matching.
//!
//! The engine delegates pattern-to-path expansion to a [`PathMatcher`]
//! rather than walking the filesystem itself. The default [`GlobMatcher`] is
//! backed by the `glob` crate. Keeping the collaborator behind a narrow
//! trait lets the ordering, safety, and concurrency logic run against a stub
//! matcher in tests.

use crate::engine::DeleteError;
use crate::pattern;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;

/// Options forwarded to the matching collaborator.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Absolute base directory for relative patterns and matches.
    pub working_directory: Utf8PathBuf,
    /// Whether matching distinguishes case.
    pub case_sensitive: bool,
    /// Whether `*` and `?` refuse to cross path separators.
    pub require_literal_separator: bool,
    /// Whether wildcards refuse to match a leading `.` in a file name.
    pub require_literal_leading_dot: bool,
}

impl MatchOptions {
    /// Matching defaults rooted at `working_directory`: case-sensitive,
    /// separator-literal, and blind to hidden entries.
    #[must_use]
    pub const fn new(working_directory: Utf8PathBuf) -> Self {
        Self {
            working_directory,
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        }
    }
}

/// Expands patterns into matching filesystem entries.
///
/// Implementations must treat directories as matchable entries, must not
/// expand a matched directory into its contents, and must not follow
/// symbolic links when classifying a match. Returned paths are relative to
/// [`MatchOptions::working_directory`] where possible; matches that escape
/// it may be returned absolute and are rejected later by the safety checks.
pub trait PathMatcher {
    /// Return every filesystem entry matching at least one of `patterns`,
    /// deduplicated, as a complete set (no streaming).
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::Pattern`] for invalid pattern syntax and
    /// [`DeleteError::Match`] when traversal fails mid-walk.
    fn matched_paths(
        &self,
        patterns: &[String],
        options: &MatchOptions,
    ) -> Result<Vec<Utf8PathBuf>, DeleteError>;
}

/// Default matcher backed by the `glob` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobMatcher;

impl PathMatcher for GlobMatcher {
    fn matched_paths(
        &self,
        patterns: &[String],
        options: &MatchOptions,
    ) -> Result<Vec<Utf8PathBuf>, DeleteError> {
        let glob_options = glob::MatchOptions {
            case_sensitive: options.case_sensitive,
            require_literal_separator: options.require_literal_separator,
            require_literal_leading_dot: options.require_literal_leading_dot,
        };

        let mut matches = BTreeSet::new();
        for raw in patterns {
            let rooted = root_pattern(&options.working_directory, raw);
            let entries = glob::glob_with(rooted.as_str(), glob_options).map_err(|source| {
                DeleteError::Pattern {
                    pattern: raw.clone(),
                    source,
                }
            })?;
            for entry in entries {
                let matched = entry.map_err(|source| DeleteError::Match {
                    pattern: raw.clone(),
                    source,
                })?;
                let utf8 = Utf8PathBuf::from_path_buf(matched)
                    .map_err(|bad| DeleteError::NonUnicodePath { path: bad })?;
                matches.insert(relativize(&utf8, &options.working_directory));
            }
        }
        Ok(matches.into_iter().collect())
    }
}

/// Anchor a pattern at the working directory. Literal leading `.` and `..`
/// components are folded lexically so the glob walker never sees them; once
/// a glob component appears the remainder is kept verbatim.
fn root_pattern(working_directory: &Utf8Path, raw: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(raw);
    if path.is_absolute() {
        return path.to_owned();
    }
    let mut rooted = working_directory.to_path_buf();
    let mut literal_prefix = true;
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if literal_prefix {
                    rooted.pop();
                } else {
                    rooted.push("..");
                }
            }
            other => {
                let text = other.as_str();
                if pattern::is_glob(text) {
                    literal_prefix = false;
                }
                rooted.push(text);
            }
        }
    }
    rooted
}

/// Express a matched absolute path relative to the working directory. A
/// match equal to the working directory becomes `.`; a match outside it is
/// kept absolute for the safety checks to reject.
fn relativize(path: &Utf8Path, working_directory: &Utf8Path) -> Utf8PathBuf {
    match path.strip_prefix(working_directory) {
        Ok(relative) if relative.as_str().is_empty() => Utf8PathBuf::from("."),
        Ok(relative) => relative.to_owned(),
        Err(_) => path.to_owned(),
    }
}
