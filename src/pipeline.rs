//! The vendoring pipeline.
//!
//! Stage order is fixed: preflight, vendor invocation, license scan, size
//! audit. The vendor directory is registered with the working copy right
//! after a clean vendor run; a failing scan or audit reports every
//! violation, reverts that registration, and aborts, so no non-compliant
//! import is ever left staged.

use crate::audit;
use crate::error::{CargoholdError, Result};
use crate::report::RunRecord;
use crate::scan;
use crate::toolchain;
use crate::ui::Output;
use crate::vcs::{FileStatus, Repository};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Base names that may be dirty when vendoring starts. Refreshing the
/// manifest pair before running is the common workflow, so those two are
/// exempt from the clean-tree check.
pub const ALLOWED_DIRTY_FILES: &[&str] = &["Cargo.toml", "Cargo.lock"];

/// Options for one pipeline run, after config and flag merging.
#[derive(Debug, Clone)]
pub struct VendorOptions {
    /// Package whose lock entries get the minimal-diff refresh.
    pub lock_package: String,
    /// Vendor directory, relative to the project root.
    pub vendor_dir: PathBuf,
    /// Skip the uncommitted-changes preflight.
    pub ignore_modified: bool,
    /// Let files over the per-file limit through.
    pub allow_large_files: bool,
    /// Per-file hard size limit in bytes.
    pub file_size_limit: u64,
    /// Cumulative added-size warning threshold in bytes.
    pub cumulative_warn_threshold: u64,
    /// Explicit cargo path, if configured.
    pub cargo: Option<PathBuf>,
}

/// Modified paths that are not allowed to be dirty, by base name.
pub fn dirty_paths(modified: &[PathBuf], allowed: &[&str]) -> Vec<String> {
    let mut dirty: Vec<String> = modified
        .iter()
        .filter(|path| {
            let base = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            !allowed.contains(&base.as_str())
        })
        .map(|path| path.display().to_string())
        .collect();
    dirty.sort();
    dirty
}

/// Fail unless the working tree is clean apart from the allowed files.
pub fn check_working_tree_clean(repo: &Repository) -> Result<()> {
    let modified = repo.changed_files(FileStatus::Modified)?;
    let dirty = dirty_paths(&modified, ALLOWED_DIRTY_FILES);
    if dirty.is_empty() {
        Ok(())
    } else {
        Err(CargoholdError::DirtyTree { files: dirty })
    }
}

/// Run the full vendoring pipeline, returning the run record on success.
pub fn vendor(
    root: &Path,
    repo: &Repository,
    options: &VendorOptions,
    out: &Output,
) -> Result<RunRecord> {
    if options.ignore_modified {
        tracing::debug!("skipping modified-files preflight");
    } else {
        check_working_tree_clean(repo)?;
    }

    let tool = toolchain::ensure_vendor_tool(options.cargo.as_deref(), out)?;

    tool.update_package(root, &options.lock_package)?;

    let spinner = out.spinner(&format!(
        "Vendoring dependencies into {}",
        options.vendor_dir.display()
    ));
    let vendored = tool.vendor(root, &options.vendor_dir);
    spinner.finish_and_clear();
    vendored?;

    repo.add_remove_files(&options.vendor_dir)?;

    audit_registered_changes(root, repo, options, out)
}

/// License scan and size audit over the freshly registered vendor tree.
///
/// Any failure reverts the registration before propagating, so a
/// non-compliant import is never left staged.
fn audit_registered_changes(
    root: &Path,
    repo: &Repository,
    options: &VendorOptions,
    out: &Output,
) -> Result<RunRecord> {
    run_audits(root, repo, options, out).inspect_err(|_| {
        if let Err(revert) = repo.forget_add_remove_files(&options.vendor_dir) {
            tracing::error!("failed to revert vendor registration: {revert}");
        }
    })
}

/// License scan and size audit over the freshly vendored tree.
fn run_audits(
    root: &Path,
    repo: &Repository,
    options: &VendorOptions,
    out: &Output,
) -> Result<RunRecord> {
    let reports = scan::scan_vendor_dir(&root.join(&options.vendor_dir))?;
    let violations: Vec<_> = reports
        .iter()
        .filter(|report| !report.decision.is_approved())
        .collect();
    if !violations.is_empty() {
        for report in &violations {
            out.error(&report.describe());
        }
        out.error("the vendored changes will NOT be added to version control");
        return Err(CargoholdError::LicenseViolations {
            count: violations.len(),
        });
    }

    let added = repo.changed_files(FileStatus::Added)?;
    let sizes = audit::audit_sizes(
        root,
        &added,
        options.file_size_limit,
        options.cumulative_warn_threshold,
    )?;

    if !sizes.oversized.is_empty() && !options.allow_large_files {
        let files: Vec<String> = sizes
            .oversized
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        out.error(&format!(
            "the following files exceed the {}-byte size limit:",
            options.file_size_limit
        ));
        for file in &files {
            out.error(file);
        }
        out.error(
            "reduce their size or re-run with --allow-large-files; \
             the vendored changes will NOT be added to version control",
        );
        return Err(CargoholdError::OversizedFiles { files });
    }

    if sizes.warn_cumulative {
        out.warning(&format!(
            "this run adds {} bytes of new files; check the vendored packages \
             for unusually large test or benchmark files that need not be \
             published",
            sizes.cumulative_bytes
        ));
    }

    let record = RunRecord {
        completed_at: Utc::now(),
        lock_package: options.lock_package.clone(),
        vendor_dir: options.vendor_dir.clone(),
        packages_checked: reports.len(),
        files_added: added.len(),
        bytes_added: sizes.cumulative_bytes,
    };
    record.save(root)?;
    Ok(record)
}
