//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Cargohold - license-audited vendoring of third-party crates.
#[derive(Debug, Parser)]
#[command(name = "cargohold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the monorepo root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Vendor dependencies, then run the license and size audits
    Vendor(VendorArgs),

    /// Run only the license scan against an existing vendor directory
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `vendor` command.
#[derive(Debug, Clone, clap::Args)]
pub struct VendorArgs {
    /// Top-level package whose lock entries are refreshed
    #[arg(short, long)]
    pub lock_package: Option<String>,

    /// Directory to vendor into, relative to the project root
    #[arg(long)]
    pub vendor_dir: Option<PathBuf>,

    /// Skip the uncommitted-changes preflight check
    #[arg(long)]
    pub ignore_modified: bool,

    /// Let files over the per-file size limit through
    #[arg(long)]
    pub allow_large_files: bool,
}

/// Arguments for the `scan` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ScanArgs {
    /// Vendor directory to scan, relative to the project root
    #[arg(long)]
    pub vendor_dir: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
