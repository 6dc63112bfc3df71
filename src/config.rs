//! Project configuration.
//!
//! An optional `.cargohold.yml` at the project root overrides the built-in
//! defaults; CLI flags override both. The license policy tables are
//! deliberately NOT configurable (see [`crate::policy`]).

use crate::audit;
use crate::error::{CargoholdError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up at the project root.
pub const CONFIG_FILE: &str = ".cargohold.yml";

/// Vendoring configuration for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorConfig {
    /// Directory vendored crates are written into, relative to the root.
    #[serde(default = "default_vendor_dir")]
    pub vendor_dir: PathBuf,

    /// Top-level package whose lock entries get the minimal-diff refresh.
    #[serde(default)]
    pub lock_package: Option<String>,

    /// Per-file hard size limit in bytes.
    #[serde(default = "default_file_size_limit")]
    pub file_size_limit: u64,

    /// Cumulative added-size warning threshold in bytes.
    #[serde(default = "default_cumulative_warn_threshold")]
    pub cumulative_warn_threshold: u64,

    /// Explicit path to the cargo binary (otherwise resolved from PATH).
    #[serde(default)]
    pub cargo: Option<PathBuf>,
}

fn default_vendor_dir() -> PathBuf {
    PathBuf::from("third_party/rust")
}

fn default_file_size_limit() -> u64 {
    audit::FILE_SIZE_LIMIT
}

fn default_cumulative_warn_threshold() -> u64 {
    audit::CUMULATIVE_WARN_THRESHOLD
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            vendor_dir: default_vendor_dir(),
            lock_package: None,
            file_size_limit: default_file_size_limit(),
            cumulative_warn_threshold: default_cumulative_warn_threshold(),
            cargo: None,
        }
    }
}

impl VendorConfig {
    /// Load the config file at `root` if present, defaults otherwise.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        serde_yaml::from_str(&contents).map_err(|e| CargoholdError::ConfigParse {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let temp = TempDir::new().unwrap();

        let config = VendorConfig::load(temp.path()).unwrap();

        assert_eq!(config.vendor_dir, PathBuf::from("third_party/rust"));
        assert_eq!(config.lock_package, None);
        assert_eq!(config.file_size_limit, 102_400);
        assert_eq!(config.cumulative_warn_threshold, 5 * 1024 * 1024);
        assert_eq!(config.cargo, None);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "lock_package: workspace-hub\n",
        )
        .unwrap();

        let config = VendorConfig::load(temp.path()).unwrap();

        assert_eq!(config.lock_package.as_deref(), Some("workspace-hub"));
        assert_eq!(config.vendor_dir, PathBuf::from("third_party/rust"));
        assert_eq!(config.file_size_limit, 102_400);
    }

    #[test]
    fn full_config_parses() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            concat!(
                "vendor_dir: vendor/crates\n",
                "lock_package: app-shell\n",
                "file_size_limit: 65536\n",
                "cumulative_warn_threshold: 1048576\n",
                "cargo: /opt/rust/bin/cargo\n",
            ),
        )
        .unwrap();

        let config = VendorConfig::load(temp.path()).unwrap();

        assert_eq!(config.vendor_dir, PathBuf::from("vendor/crates"));
        assert_eq!(config.lock_package.as_deref(), Some("app-shell"));
        assert_eq!(config.file_size_limit, 65_536);
        assert_eq!(config.cumulative_warn_threshold, 1_048_576);
        assert_eq!(config.cargo, Some(PathBuf::from("/opt/rust/bin/cargo")));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "licenses: [MIT]\n").unwrap();

        let err = VendorConfig::load(temp.path()).unwrap_err();

        match err {
            CargoholdError::ConfigParse { path, message } => {
                assert!(path.ends_with(CONFIG_FILE));
                assert!(message.contains("licenses"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "vendor_dir: [unterminated\n").unwrap();

        assert!(matches!(
            VendorConfig::load(temp.path()),
            Err(CargoholdError::ConfigParse { .. })
        ));
    }
}
