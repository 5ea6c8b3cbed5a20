//! Kirei core library.
//!
//! Safe, pattern-driven bulk removal of files and directories for build
//! pipelines: pattern normalization, delegated glob matching, containment
//! safety checks, and concurrency-bounded removal with deterministic
//! result ordering.

pub mod cli;
pub mod engine;
pub mod matcher;
pub mod pattern;
pub mod plugin;
pub mod runner;
