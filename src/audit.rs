//! Size auditing of newly vendored files.
//!
//! Individual files over the per-file limit are a hard failure; history
//! shows large-ish files typically are not needed in a vendored crate.
//! The cumulative total only warns, since legitimate large code drops
//! happen from time to time.

use crate::error::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default per-file hard limit: 100 KiB is a reasonable upper bound on
/// source file size.
pub const FILE_SIZE_LIMIT: u64 = 100 * 1024;

/// Default cumulative soft threshold.
pub const CUMULATIVE_WARN_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Outcome of auditing a set of added files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditResult {
    /// Files over the per-file limit, sorted.
    pub oversized: BTreeSet<PathBuf>,
    /// Total on-disk size of every audited file.
    pub cumulative_bytes: u64,
    /// Whether the cumulative size met the warning threshold.
    pub warn_cumulative: bool,
}

/// Sum on-disk sizes for `files` (repo-relative paths resolved against
/// `root`) and collect those exceeding `per_file_limit`.
pub fn audit_sizes(
    root: &Path,
    files: &[PathBuf],
    per_file_limit: u64,
    cumulative_warn_threshold: u64,
) -> Result<AuditResult> {
    let mut oversized = BTreeSet::new();
    let mut cumulative_bytes = 0u64;

    for file in files {
        let size = fs::metadata(root.join(file))?.len();
        cumulative_bytes += size;
        if size > per_file_limit {
            oversized.insert(file.clone());
        }
    }

    Ok(AuditResult {
        oversized,
        cumulative_bytes,
        warn_cumulative: cumulative_bytes >= cumulative_warn_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_of_size(root: &Path, name: &str, size: usize) -> PathBuf {
        fs::write(root.join(name), vec![b'x'; size]).unwrap();
        PathBuf::from(name)
    }

    #[test]
    fn small_files_pass() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            file_of_size(temp.path(), "a.rs", 100),
            file_of_size(temp.path(), "b.rs", 2000),
        ];

        let result =
            audit_sizes(temp.path(), &files, FILE_SIZE_LIMIT, CUMULATIVE_WARN_THRESHOLD).unwrap();

        assert!(result.oversized.is_empty());
        assert_eq!(result.cumulative_bytes, 2100);
        assert!(!result.warn_cumulative);
    }

    #[test]
    fn file_over_default_limit_is_flagged() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            file_of_size(temp.path(), "ok.rs", 1000),
            file_of_size(temp.path(), "huge.bin", 200_000),
        ];

        let result =
            audit_sizes(temp.path(), &files, FILE_SIZE_LIMIT, CUMULATIVE_WARN_THRESHOLD).unwrap();

        assert_eq!(result.oversized.len(), 1);
        assert!(result.oversized.contains(&PathBuf::from("huge.bin")));
        assert_eq!(result.cumulative_bytes, 201_000);
    }

    #[test]
    fn file_exactly_at_limit_is_not_flagged() {
        let temp = TempDir::new().unwrap();
        let files = vec![file_of_size(temp.path(), "edge.rs", FILE_SIZE_LIMIT as usize)];

        let result =
            audit_sizes(temp.path(), &files, FILE_SIZE_LIMIT, CUMULATIVE_WARN_THRESHOLD).unwrap();

        assert!(result.oversized.is_empty());
    }

    #[test]
    fn cumulative_threshold_is_inclusive() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            file_of_size(temp.path(), "a.bin", 600),
            file_of_size(temp.path(), "b.bin", 400),
        ];

        let result = audit_sizes(temp.path(), &files, 10_000, 1000).unwrap();

        assert!(result.warn_cumulative);
        assert!(result.oversized.is_empty());
    }

    #[test]
    fn oversized_set_is_sorted() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            file_of_size(temp.path(), "zed.bin", 5000),
            file_of_size(temp.path(), "abc.bin", 5000),
        ];

        let result = audit_sizes(temp.path(), &files, 1000, CUMULATIVE_WARN_THRESHOLD).unwrap();

        let ordered: Vec<&PathBuf> = result.oversized.iter().collect();
        assert_eq!(
            ordered,
            vec![&PathBuf::from("abc.bin"), &PathBuf::from("zed.bin")]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let files = vec![PathBuf::from("not-there.rs")];

        assert!(audit_sizes(temp.path(), &files, 1000, 1000).is_err());
    }
}
