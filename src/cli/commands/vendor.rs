//! The `vendor` subcommand: the full pipeline.

use std::path::{Path, PathBuf};

use crate::cli::args::VendorArgs;
use crate::config::VendorConfig;
use crate::error::Result;
use crate::pipeline::{self, VendorOptions};
use crate::ui::Output;
use crate::vcs::Repository;

use super::dispatcher::{Command, CommandResult};

/// The vendor command implementation.
pub struct VendorCommand {
    project_root: PathBuf,
    args: VendorArgs,
}

impl VendorCommand {
    /// Create a new vendor command.
    pub fn new(project_root: &Path, args: VendorArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for VendorCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let config = VendorConfig::load(&self.project_root)?;

        let Some(lock_package) = self
            .args
            .lock_package
            .clone()
            .or_else(|| config.lock_package.clone())
        else {
            out.error(
                "no lock package selected; pass --lock-package or set \
                 lock_package in .cargohold.yml",
            );
            return Ok(CommandResult::failure(1));
        };

        let repo = Repository::discover(&self.project_root)?;

        let options = VendorOptions {
            lock_package,
            vendor_dir: self
                .args
                .vendor_dir
                .clone()
                .unwrap_or_else(|| config.vendor_dir.clone()),
            ignore_modified: self.args.ignore_modified,
            allow_large_files: self.args.allow_large_files,
            file_size_limit: config.file_size_limit,
            cumulative_warn_threshold: config.cumulative_warn_threshold,
            cargo: config.cargo.clone(),
        };

        let record = pipeline::vendor(&self.project_root, &repo, &options, out)?;

        out.success(&format!(
            "vendored and checked {} package(s); {} file(s) added ({} bytes)",
            record.packages_checked, record.files_added, record.bytes_added
        ));
        Ok(CommandResult::success())
    }
}
