//! Error types for the deletion engine.
//!
//! This submodule isolates derive-macro-affected code to scope lint
//! suppressions narrowly. The `unused_assignments` lint fires in some Rust
//! versions due to thiserror/miette derive macro expansion.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. Since `#[expect]` fails when the lint does
// not fire, `#[allow]` is required here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while matching, validating, or removing deletion targets.
///
/// The first error aborts the batch: the engine performs no retries and
/// returns no partial results.
#[derive(Debug, Error, Diagnostic)]
pub enum DeleteError {
    /// A pattern resolved to the working directory itself.
    #[error("cannot delete the working directory {path}")]
    #[diagnostic(
        code(kirei::delete_working_directory),
        help("narrow the pattern so it matches entries inside the working directory")
    )]
    CurrentDirectoryDeletion {
        /// The working directory the pattern resolved to.
        path: Utf8PathBuf,
    },

    /// A pattern resolved to a path outside the working directory.
    #[error("cannot delete {path}: it resolves outside the working directory {working_directory}")]
    #[diagnostic(
        code(kirei::outside_working_directory),
        help("set `working_directory` to a common ancestor, or drop the escaping pattern")
    )]
    OutsideWorkingDirectory {
        /// The offending resolved path.
        path: Utf8PathBuf,
        /// The working directory the containment check ran against.
        working_directory: Utf8PathBuf,
    },

    /// The underlying filesystem removal failed.
    #[error("failed to remove {path}")]
    #[diagnostic(code(kirei::removal_failed))]
    Removal {
        /// The path whose removal failed.
        path: Utf8PathBuf,
        /// The filesystem error reported by the removal primitive.
        #[source]
        source: std::io::Error,
    },

    /// A pattern was syntactically invalid.
    #[error("invalid glob pattern '{pattern}'")]
    #[diagnostic(code(kirei::invalid_pattern))]
    Pattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// The syntax error reported by the matching collaborator.
        #[source]
        source: glob::PatternError,
    },

    /// The matching collaborator failed while walking the filesystem.
    #[error("matching failed for pattern '{pattern}'")]
    #[diagnostic(code(kirei::match_failed))]
    Match {
        /// The pattern being expanded when traversal failed.
        pattern: String,
        /// The traversal error reported by the matching collaborator.
        #[source]
        source: glob::GlobError,
    },

    /// The configured working directory could not be resolved.
    #[error("working directory {path} is not usable")]
    #[diagnostic(code(kirei::working_directory))]
    WorkingDirectory {
        /// The directory that failed to resolve.
        path: Utf8PathBuf,
        /// The underlying resolution error.
        #[source]
        source: std::io::Error,
    },

    /// A matched path was not valid UTF-8.
    #[error("matched path is not valid UTF-8: {path}")]
    #[diagnostic(code(kirei::non_unicode_path))]
    NonUnicodePath {
        /// The offending path, lossily displayable only.
        path: PathBuf,
    },
}
