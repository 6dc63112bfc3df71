//! Version-control collaborator.
//!
//! The pipeline needs three operations from the working copy: listing
//! modified or added files, registering the vendor directory, and
//! reverting that registration. Both git and mercurial monorepos are
//! supported. The active system is a tagged variant resolved once from
//! the marker directory at the root, so dispatch stays exhaustive at
//! compile time.

use crate::error::{CargoholdError, Result};
use crate::shell::{self, CommandOptions};
use std::path::{Path, PathBuf};

/// File status categories reported by the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Tracked files with uncommitted modifications.
    Modified,
    /// Files registered as added but not yet committed.
    Added,
}

/// A version-control working copy rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    Git(PathBuf),
    Hg(PathBuf),
}

impl Repository {
    /// Resolve the repository type from the marker directory at `root`.
    pub fn discover(root: &Path) -> Result<Self> {
        // .git is a file, not a directory, in linked worktrees
        if root.join(".git").exists() {
            Ok(Self::Git(root.to_path_buf()))
        } else if root.join(".hg").is_dir() {
            Ok(Self::Hg(root.to_path_buf()))
        } else {
            Err(CargoholdError::NoRepository {
                path: root.to_path_buf(),
            })
        }
    }

    /// Root of the working copy.
    pub fn root(&self) -> &Path {
        match self {
            Self::Git(root) | Self::Hg(root) => root,
        }
    }

    /// List repo-relative paths with the given status.
    pub fn changed_files(&self, status: FileStatus) -> Result<Vec<PathBuf>> {
        let result = match (self, status) {
            (Self::Git(root), FileStatus::Modified) => shell::run_checked(
                Path::new("git"),
                &["diff", "--name-only", "--diff-filter=M", "HEAD"],
                &CommandOptions::in_dir(root),
            )?,
            (Self::Git(root), FileStatus::Added) => shell::run_checked(
                Path::new("git"),
                &["diff", "--cached", "--name-only", "--diff-filter=A"],
                &CommandOptions::in_dir(root),
            )?,
            (Self::Hg(root), FileStatus::Modified) => shell::run_checked(
                Path::new("hg"),
                &["status", "-mn"],
                &CommandOptions::in_dir(root),
            )?,
            (Self::Hg(root), FileStatus::Added) => shell::run_checked(
                Path::new("hg"),
                &["status", "-an"],
                &CommandOptions::in_dir(root),
            )?,
        };

        Ok(result
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Register additions and removals under `dir` with the working copy.
    pub fn add_remove_files(&self, dir: &Path) -> Result<()> {
        let dir_arg = dir.to_string_lossy().into_owned();
        match self {
            Self::Git(root) => shell::run_checked(
                Path::new("git"),
                &["add", "-A", "--", &dir_arg],
                &CommandOptions::in_dir(root),
            )?,
            Self::Hg(root) => shell::run_checked(
                Path::new("hg"),
                &["addremove", &dir_arg],
                &CommandOptions::in_dir(root),
            )?,
        };
        tracing::debug!("registered {} with the working copy", dir.display());
        Ok(())
    }

    /// Undo [`Repository::add_remove_files`] for `dir`, leaving the files
    /// on disk.
    pub fn forget_add_remove_files(&self, dir: &Path) -> Result<()> {
        let dir_arg = dir.to_string_lossy().into_owned();
        match self {
            Self::Git(root) => shell::run_checked(
                Path::new("git"),
                &["reset", "-q", "--", &dir_arg],
                &CommandOptions::in_dir(root),
            )?,
            Self::Hg(root) => shell::run_checked(
                Path::new("hg"),
                &["forget", &dir_arg],
                &CommandOptions::in_dir(root),
            )?,
        };
        tracing::debug!("reverted registration of {}", dir.display());
        Ok(())
    }
}
