//! Error types for cargohold operations.
//!
//! This module defines [`CargoholdError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CargoholdError` for pipeline failures that need distinct handling
//! - Use `anyhow::Error` (via `CargoholdError::Other`) for unexpected errors
//! - Per-package license rejections are data (`scan::LicenseDecision`), not
//!   error variants: the scan evaluates every package and the pipeline
//!   reports all violations before aborting with `LicenseViolations`

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cargohold operations.
#[derive(Debug, Error)]
pub enum CargoholdError {
    /// Uncommitted changes beyond the allowed lock/manifest files.
    #[error("uncommitted changes to the following files:\n{}\ncommit or stash these changes, or re-run with --ignore-modified", .files.join("\n"))]
    DirtyTree { files: Vec<String> },

    /// No supported version-control working copy at the project root.
    #[error("no git or mercurial repository found at {path}")]
    NoRepository { path: PathBuf },

    /// A required external tool could not be resolved.
    #[error("could not find '{tool}' on PATH")]
    ToolMissing { tool: String },

    /// External tool is older than the minimum supported version.
    #[error("{tool} {found} is too old; {required} or newer is required")]
    ToolVersionTooOld {
        tool: String,
        found: String,
        required: String,
    },

    /// External command failed to spawn or exited nonzero.
    #[error("command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// One or more vendored packages failed the license scan.
    #[error("{count} package(s) failed the license check")]
    LicenseViolations { count: usize },

    /// Newly added files exceed the per-file size limit.
    #[error("{} added file(s) exceed the size limit:\n{}", .files.len(), .files.join("\n"))]
    OversizedFiles { files: Vec<String> },

    /// Failed to parse the project configuration file.
    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cargohold operations.
pub type Result<T> = std::result::Result<T, CargoholdError>;
