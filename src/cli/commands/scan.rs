//! The `scan` subcommand: license scan only.
//!
//! Re-audits an already-vendored tree without touching the lockfile or
//! the working copy.

use std::path::{Path, PathBuf};

use crate::cli::args::ScanArgs;
use crate::config::VendorConfig;
use crate::error::{CargoholdError, Result};
use crate::scan;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The scan command implementation.
pub struct ScanCommand {
    project_root: PathBuf,
    args: ScanArgs,
}

impl ScanCommand {
    /// Create a new scan command.
    pub fn new(project_root: &Path, args: ScanArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ScanCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let config = VendorConfig::load(&self.project_root)?;
        let vendor_dir = self.project_root.join(
            self.args
                .vendor_dir
                .clone()
                .unwrap_or_else(|| config.vendor_dir.clone()),
        );

        let reports = scan::scan_vendor_dir(&vendor_dir)?;

        let mut violations = 0usize;
        for report in &reports {
            if report.decision.is_approved() {
                tracing::debug!("{}", report.describe());
            } else {
                violations += 1;
                out.error(&report.describe());
            }
        }

        if violations > 0 {
            Err(CargoholdError::LicenseViolations { count: violations })
        } else {
            out.success(&format!(
                "{} package(s) passed the license check",
                reports.len()
            ));
            Ok(CommandResult::success())
        }
    }
}
