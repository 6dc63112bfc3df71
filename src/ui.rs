//! Terminal output helpers.
//!
//! Status lines respect the quiet flag; warnings and errors always reach
//! stderr so violations are visible even in quiet runs.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show progress and status.
    #[default]
    Normal,
    /// Show warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows status messages and spinners.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Console writer that respects the output mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Status line, suppressed in quiet mode.
    pub fn println(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Success line with a check mark, suppressed in quiet mode.
    pub fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    /// Warning to stderr; never suppressed.
    pub fn warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }

    /// Error to stderr; never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", style("error:").red().bold(), msg);
    }

    /// Spinner for a long-running external invocation.
    ///
    /// Hidden in quiet mode so the only output is the final status.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if !self.mode.shows_status() {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }
}
