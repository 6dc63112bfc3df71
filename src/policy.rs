//! Compiled-in license policy tables.
//!
//! Additions to any table here are a licensing decision, not an
//! engineering one: review by a build peer alone is not sufficient, and
//! changes must be checked by somebody competent to review licensing
//! minutiae. The tables are code rather than configuration so that every
//! change goes through that review.

/// SPDX identifiers acceptable for code shipped at runtime.
///
/// BSD-2-Clause and BSD-3-Clause are deliberately absent: packages under
/// them must also appear in [`RUNTIME_LICENSE_PACKAGES`] so they get an
/// entry on the product's license page.
pub const RUNTIME_LICENSES: &[&str] = &[
    "Apache-2.0",
    "Apache-2.0 WITH LLVM-exception",
    "CC0-1.0",
    "ISC",
    "MIT",
    "MPL-2.0",
    "Unlicense",
];

/// Licenses acceptable only for build-time tooling (e.g. code
/// generators), keyed to the exact packages cleared to use them.
pub const BUILDTIME_LICENSE_PACKAGES: &[(&str, &[&str])] = &[(
    "BSD-3-Clause",
    &[
        "adler32",
        "bindgen",
        "fuchsia-zircon",
        "fuchsia-zircon-sys",
        "fuchsia-cprng",
    ],
)];

/// Runtime packages cleared under a license that additionally requires a
/// license page entry.
pub const RUNTIME_LICENSE_PACKAGES: &[(&str, &[&str])] = &[
    ("BSD-2-Clause", &["arrayref", "cloudabi", "Inflector", "mach"]),
    ("BSD-3-Clause", &[]),
];

/// Packages shipping a `license-file` instead of an SPDX expression,
/// mapped to the SHA-256 hex digest of the file text that was reviewed.
pub const REVIEWED_LICENSE_FILES: &[(&str, &str)] = &[
    // MIT
    (
        "deque",
        "6485b8ed310d3f0340bf1ad1f47645069ce4069dcc6bb46c7d5c6faf41de1fdb",
    ),
    // never built into the final product, but its license-file still has
    // to be accounted for
    (
        "fuchsia-cprng",
        "03b114f53e6587a398931762ee11e2395bfdba252a329940e2c8c9e81813845b",
    ),
];

/// Whether `license` is an approved runtime license identifier.
pub fn runtime_license_allowed(license: &str) -> bool {
    RUNTIME_LICENSES.contains(&license)
}

/// Whether `package` is individually cleared for runtime use under
/// `license`.
pub fn runtime_package_exception(license: &str, package: &str) -> bool {
    RUNTIME_LICENSE_PACKAGES
        .iter()
        .any(|(entry, packages)| *entry == license && packages.contains(&package))
}

/// Packages cleared for build-time use under `license`, if the license
/// has a build-time entry at all.
pub fn buildtime_packages(license: &str) -> Option<&'static [&'static str]> {
    BUILDTIME_LICENSE_PACKAGES
        .iter()
        .find(|(entry, _)| *entry == license)
        .map(|(_, packages)| *packages)
}

/// Reviewed SHA-256 digest for `package`'s license file, if any.
pub fn reviewed_license_file_hash(package: &str) -> Option<&'static str> {
    REVIEWED_LICENSE_FILES
        .iter()
        .find(|(entry, _)| *entry == package)
        .map(|(_, hash)| *hash)
}
