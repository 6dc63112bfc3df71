//! Vendor tool resolution and preflight checks.
//!
//! Vendoring needs a cargo binary new enough to support source
//! replacement, plus a `cargo-vendor` subcommand at a version that strips
//! `.cargo-ok`/`.orig`/`.rej` droppings and handles `[patch]` replacement
//! and locally modified crates. Both gates run before anything mutates the
//! tree; the subcommand is installed (or force-reinstalled) through cargo
//! itself when missing or stale.

mod version;

pub use version::version_at_least;

use crate::error::{CargoholdError, Result};
use crate::shell::{self, CommandOptions};
use crate::ui::Output;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Minimum cargo release; source replacement first shipped here.
pub const MIN_CARGO_VERSION: &str = "0.13.0";

/// Minimum cargo-vendor release that cleans junk files and handles
/// `[patch]` replacement and local modifications.
pub const MIN_CARGO_VENDOR_VERSION: &str = "0.1.23";

static CARGO_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cargo (\d+(?:\.\d+)*)").unwrap());

// `cargo install --list` prints either of:
//   cargo-vendor v0.1.23:
//   cargo-vendor v0.1.23 (file:///path/to/local/build):
static VENDOR_INSTALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cargo-vendor v(\d+(?:\.\d+)*)").unwrap());

/// Handle to a resolved cargo binary.
#[derive(Debug, Clone)]
pub struct CargoTool {
    path: PathBuf,
}

impl CargoTool {
    /// Wrap an already-resolved cargo path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path to the cargo binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Self-reported version from `cargo --version`.
    pub fn version(&self) -> Result<String> {
        let out = shell::run_checked(&self.path, &["--version"], &CommandOptions::default())?;
        parse_cargo_version(&out.stdout).ok_or_else(|| {
            anyhow::anyhow!("unexpected cargo --version output: {}", out.stdout.trim()).into()
        })
    }

    /// Whether a `vendor` subcommand is available.
    pub fn has_vendor_subcommand(&self) -> Result<bool> {
        let out = shell::run_checked(&self.path, &["--list"], &CommandOptions::default())?;
        Ok(out
            .stdout
            .lines()
            .any(|line| line.split_whitespace().next() == Some("vendor")))
    }

    /// Version of the cargo-vendor helper according to `cargo install
    /// --list`, if it was installed that way.
    pub fn installed_vendor_version(&self) -> Result<Option<String>> {
        let out = shell::run_checked(&self.path, &["install", "--list"], &CommandOptions::default())?;
        Ok(parse_vendor_install_list(&out.stdout))
    }

    /// Install the cargo-vendor helper, optionally forcing a reinstall.
    ///
    /// `env` carries build overrides (e.g. OpenSSL paths) for the install.
    pub fn install_vendor(&self, force: bool, env: HashMap<String, String>) -> Result<()> {
        let mut args = vec!["install"];
        if force {
            args.push("--force");
        }
        args.push("cargo-vendor");
        shell::run_passthrough(&self.path, &args, &CommandOptions { cwd: None, env })
    }

    /// Refresh the lock entries for a single top-level package.
    ///
    /// `update -p` keeps the lockfile diff minimal; a full re-resolve
    /// would churn every pinned version.
    pub fn update_package(&self, root: &Path, package: &str) -> Result<()> {
        shell::run_passthrough(
            &self.path,
            &["update", "-p", package],
            &CommandOptions::in_dir(root),
        )
    }

    /// Vendor the lockfile's dependencies into `vendor_dir`.
    pub fn vendor(&self, root: &Path, vendor_dir: &Path) -> Result<()> {
        let dir_arg = vendor_dir.to_string_lossy().into_owned();
        shell::run_passthrough(
            &self.path,
            &["vendor", "--quiet", "--sync", "Cargo.lock", &dir_arg],
            &CommandOptions::in_dir(root),
        )
    }
}

/// Extract the version from `cargo --version` output.
fn parse_cargo_version(output: &str) -> Option<String> {
    let first_line = output.lines().next()?;
    CARGO_VERSION_RE
        .captures(first_line)
        .map(|captures| captures[1].to_string())
}

/// Extract the cargo-vendor version from `cargo install --list` output.
fn parse_vendor_install_list(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| VENDOR_INSTALL_RE.captures(line))
        .map(|captures| captures[1].to_string())
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by extension, not permission bits.
#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT spawn
/// `which`; its behavior varies across systems.
pub(crate) fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Probe for OpenSSL headers needed to build the cargo-vendor helper.
///
/// System headers win and need no overrides. Otherwise the Homebrew keg
/// path is tried; a miss is non-fatal since the install may work anyway.
pub fn probe_openssl() -> HashMap<String, String> {
    probe_openssl_at(
        &[
            PathBuf::from("/usr/include"),
            PathBuf::from("/usr/local/include"),
        ],
        Path::new("/usr/local/opt/openssl"),
    )
}

/// Probe with explicit candidate roots; first match wins.
pub(crate) fn probe_openssl_at(
    system_roots: &[PathBuf],
    brew_prefix: &Path,
) -> HashMap<String, String> {
    if system_roots
        .iter()
        .any(|root| root.join("openssl/ssl.h").exists())
    {
        return HashMap::new();
    }

    if brew_prefix.join("include/openssl/ssl.h").exists() {
        tracing::info!("using OpenSSL in {}", brew_prefix.display());
        return HashMap::from([
            (
                "OPENSSL_INCLUDE_DIR".to_string(),
                brew_prefix.join("include").display().to_string(),
            ),
            (
                "OPENSSL_LIB_DIR".to_string(),
                brew_prefix.join("lib").display().to_string(),
            ),
        ]);
    }

    tracing::warn!("OpenSSL headers not found; cargo-vendor install may still succeed");
    HashMap::new()
}

/// Resolve cargo and make sure the vendoring pieces are present and new
/// enough, installing the helper subcommand if needed.
pub fn ensure_vendor_tool(configured: Option<&Path>, out: &Output) -> Result<CargoTool> {
    let path = match configured {
        Some(path) => path.to_path_buf(),
        None => resolve_tool_path("cargo", &parse_system_path()).ok_or_else(|| {
            CargoholdError::ToolMissing {
                tool: "cargo".to_string(),
            }
        })?,
    };

    let tool = CargoTool::new(path);

    let found = tool.version()?;
    if !version_at_least(&found, MIN_CARGO_VERSION) {
        return Err(CargoholdError::ToolVersionTooOld {
            tool: "cargo".to_string(),
            found,
            required: MIN_CARGO_VERSION.to_string(),
        });
    }
    tracing::debug!("cargo {found} is new enough");

    if !tool.has_vendor_subcommand()? {
        out.println("Installing cargo-vendor (this may take a few minutes)...");
        tool.install_vendor(false, probe_openssl())?;
    } else {
        match tool.installed_vendor_version()? {
            Some(vendor_version)
                if version_at_least(&vendor_version, MIN_CARGO_VENDOR_VERSION) =>
            {
                tracing::debug!("cargo-vendor {vendor_version} is new enough");
            }
            _ => {
                out.println(&format!(
                    "cargo-vendor >= {MIN_CARGO_VENDOR_VERSION} required; \
                     force-reinstalling (this may take a few minutes)..."
                ));
                tool.install_vendor(true, probe_openssl())?;
            }
        }
    }

    Ok(tool)
}
