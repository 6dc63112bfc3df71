//! Records of completed vendor runs.
//!
//! A successful run leaves `.cargohold/last-vendor.json` behind so the
//! outcome (what was vendored, how much was added, when) can be inspected
//! after the fact. Failed runs never write a record.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory for cargohold's own state, relative to the project root.
const STATE_DIR: &str = ".cargohold";

const RECORD_FILE: &str = "last-vendor.json";

/// Summary of one completed vendor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
    /// Package whose lock entries were refreshed.
    pub lock_package: String,
    /// Vendor directory, relative to the project root.
    pub vendor_dir: PathBuf,
    /// Packages evaluated by the license scan.
    pub packages_checked: usize,
    /// Files newly registered with the working copy.
    pub files_added: usize,
    /// Total size of the added files.
    pub bytes_added: u64,
}

impl RunRecord {
    /// Persist the record under the project's state directory.
    pub fn save(&self, root: &Path) -> Result<()> {
        let dir = root.join(STATE_DIR);
        fs::create_dir_all(&dir)?;

        let contents = serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?;
        fs::write(dir.join(RECORD_FILE), contents)?;
        Ok(())
    }

    /// Load the last run record, if one exists and parses.
    pub fn load(root: &Path) -> Option<RunRecord> {
        let contents = fs::read_to_string(root.join(STATE_DIR).join(RECORD_FILE)).ok()?;
        serde_json::from_str(&contents).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> RunRecord {
        RunRecord {
            completed_at: Utc::now(),
            lock_package: "app-shell".to_string(),
            vendor_dir: PathBuf::from("third_party/rust"),
            packages_checked: 42,
            files_added: 310,
            bytes_added: 1_234_567,
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let record = sample();

        record.save(temp.path()).unwrap();
        let loaded = RunRecord::load(temp.path()).unwrap();

        assert_eq!(loaded, record);
    }

    #[test]
    fn load_without_record_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(RunRecord::load(temp.path()).is_none());
    }

    #[test]
    fn load_with_corrupt_record_is_none() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(STATE_DIR)).unwrap();
        fs::write(temp.path().join(STATE_DIR).join(RECORD_FILE), "not json").unwrap();

        assert!(RunRecord::load(temp.path()).is_none());
    }

    #[test]
    fn save_creates_state_directory() {
        let temp = TempDir::new().unwrap();
        sample().save(temp.path()).unwrap();

        assert!(temp.path().join(STATE_DIR).join(RECORD_FILE).is_file());
    }
}
