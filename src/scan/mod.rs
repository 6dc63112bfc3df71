//! License compliance scanning of vendored packages.
//!
//! Vendored manifests routinely contain `[target.'cfg(...)'.dependencies]`
//! sections that a minimal TOML reader cannot parse, so the license fields
//! are pulled out with a line-oriented scan instead of a structured parse.
//! Every package is evaluated before the result is reduced, so a single
//! run reports every violation rather than stopping at the first.

use crate::error::Result;
use crate::policy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static LICENSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*license\s*=\s*"([^"]+)""#).unwrap());

static LICENSE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*license[-_]file\s*=\s*"([^"]+)""#).unwrap());

// A standalone AND token preceded by whitespace. Conjunctive license
// expressions have no agreed automatic reading and are never approved.
static AND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+AND\b").unwrap());

// `/` and ` OR ` are treated as equivalent alternative separators.
static SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*|\s+OR\s+").unwrap());

/// Outcome of checking one vendored package against the license policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseDecision {
    /// License is acceptable for code shipped at runtime.
    Approved,
    /// Acceptable only because the package is a cleared build-time
    /// dependency.
    ApprovedBuildtimeOnly,
    /// Manifest declares no license at all.
    MissingLicense,
    /// Manifest declares more than one license field, or both `license`
    /// and `license-file`.
    AmbiguousLicenseDeclaration,
    /// License expression matched nothing in the policy tables.
    UnknownLicense { license: String },
    /// License has a build-time entry but this package is not cleared.
    UnapprovedBuildtimePackage { license: String },
    /// Package ships a license file nobody has reviewed.
    UnreviewedLicenseFile { file: String },
    /// A reviewed license file has changed since review.
    LicenseFileHashMismatch { file: String, hash: String },
}

impl LicenseDecision {
    /// Whether the package may stay in the tree.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved | Self::ApprovedBuildtimeOnly)
    }
}

/// Scan result for a single vendored package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub package: String,
    pub decision: LicenseDecision,
}

impl PackageReport {
    /// Human-readable account of the decision, naming the rule involved.
    pub fn describe(&self) -> String {
        match &self.decision {
            LicenseDecision::Approved => format!("package {} is approved", self.package),
            LicenseDecision::ApprovedBuildtimeOnly => {
                format!("package {} is approved for build-time use only", self.package)
            }
            LicenseDecision::MissingLicense => {
                format!("package {} does not provide a license", self.package)
            }
            LicenseDecision::AmbiguousLicenseDeclaration => {
                format!("package {} provides too many licenses", self.package)
            }
            LicenseDecision::UnknownLicense { license } => format!(
                "package {} has a non-approved license: {}; request license review \
                 before it can be vendored",
                self.package, license
            ),
            LicenseDecision::UnapprovedBuildtimePackage { license } => format!(
                "package {} uses {}, which is approved for build-time dependencies \
                 only, and the package is not cleared as build-time",
                self.package, license
            ),
            LicenseDecision::UnreviewedLicenseFile { file } => format!(
                "package {} has an unreviewed license file: {}",
                self.package, file
            ),
            LicenseDecision::LicenseFileHashMismatch { file, hash } => format!(
                "package {} has changed its license file: {} (hash {})",
                self.package, file, hash
            ),
        }
    }
}

/// What one manifest declares about its license.
#[derive(Debug, PartialEq, Eq)]
enum LicenseDecl {
    None,
    Expression(String),
    File(String),
    Ambiguous,
}

/// Pull the license declaration out of a manifest line by line.
fn read_license_decl(manifest: &Path) -> Result<LicenseDecl> {
    let file = File::open(manifest)?;
    let reader = BufReader::new(file);

    let mut expressions = Vec::new();
    let mut files = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if !line.trim_start().starts_with("license") {
            continue;
        }
        if let Some(captures) = LICENSE_RE.captures(&line) {
            expressions.push(captures[1].to_string());
        } else if let Some(captures) = LICENSE_FILE_RE.captures(&line) {
            files.push(captures[1].to_string());
        }
    }

    Ok(match (expressions.len(), files.len()) {
        (0, 0) => LicenseDecl::None,
        (1, 0) => LicenseDecl::Expression(expressions.remove(0)),
        (0, 1) => LicenseDecl::File(files.remove(0)),
        _ => LicenseDecl::Ambiguous,
    })
}

/// Whether `license` clears `package` for runtime use.
///
/// Any alternative in the expression being whitelisted is enough, either
/// as a license identifier or as a per-package exception.
fn runtime_license_approved(package: &str, license: &str) -> bool {
    if AND_RE.is_match(license) {
        return false;
    }

    SPLIT_RE.split(license).map(str::trim).any(|candidate| {
        policy::runtime_license_allowed(candidate)
            || policy::runtime_package_exception(candidate, package)
    })
}

/// Decide the fate of a `license = "..."` declaration.
///
/// The build-time fallback keys on the exact unsplit expression.
fn decide_expression(package: &str, license: &str) -> LicenseDecision {
    if runtime_license_approved(package, license) {
        return LicenseDecision::Approved;
    }

    match policy::buildtime_packages(license) {
        Some(cleared) if cleared.contains(&package) => LicenseDecision::ApprovedBuildtimeOnly,
        Some(_) => LicenseDecision::UnapprovedBuildtimePackage {
            license: license.to_string(),
        },
        None => LicenseDecision::UnknownLicense {
            license: license.to_string(),
        },
    }
}

/// Decide the fate of a `license-file = "..."` declaration.
fn decide_license_file(
    package_dir: &Path,
    file: &str,
    approved_hash: Option<&str>,
) -> Result<LicenseDecision> {
    let Some(approved) = approved_hash else {
        return Ok(LicenseDecision::UnreviewedLicenseFile {
            file: file.to_string(),
        });
    };

    let contents = fs::read(package_dir.join(file))?;
    let hash = sha256_hex(&contents);
    if hash == approved {
        Ok(LicenseDecision::Approved)
    } else {
        Ok(LicenseDecision::LicenseFileHashMismatch {
            file: file.to_string(),
            hash,
        })
    }
}

/// Hex digest of SHA-256 over `bytes`.
pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Evaluate one vendored package directory against the policy.
pub fn evaluate_package(vendor_dir: &Path, package: &str) -> Result<LicenseDecision> {
    tracing::debug!("checking license for {package}");
    let package_dir = vendor_dir.join(package);

    match read_license_decl(&package_dir.join("Cargo.toml"))? {
        LicenseDecl::None => Ok(LicenseDecision::MissingLicense),
        LicenseDecl::Ambiguous => Ok(LicenseDecision::AmbiguousLicenseDeclaration),
        LicenseDecl::Expression(license) => {
            tracing::debug!("{package} has license {license}");
            Ok(decide_expression(package, &license))
        }
        LicenseDecl::File(file) => {
            tracing::debug!("{package} has license-file {file}");
            decide_license_file(
                &package_dir,
                &file,
                policy::reviewed_license_file_hash(package),
            )
        }
    }
}

/// Scan every package under `vendor_dir`.
///
/// Reports come back for all packages, approved or not, sorted by name so
/// repeated scans of an unchanged tree are identical.
pub fn scan_vendor_dir(vendor_dir: &Path) -> Result<Vec<PackageReport>> {
    let mut reports = Vec::new();

    for entry in fs::read_dir(vendor_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let package = entry.file_name().to_string_lossy().to_string();
        let decision = evaluate_package(vendor_dir, &package)?;
        reports.push(PackageReport { package, decision });
    }

    reports.sort_by(|a, b| a.package.cmp(&b.package));
    Ok(reports)
}
