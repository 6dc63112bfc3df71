//! External process invocation.
//!
//! Every pipeline stage shells out to exactly one program at a time (the
//! vendoring tool or the version-control client) with a fixed argument
//! list, so commands run directly via argv rather than through a shell.
//! Environment overrides travel as an explicit per-invocation map that is
//! merged at call time; the process-global environment is never mutated.

use crate::error::{CargoholdError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the parent environment).
    pub env: HashMap<String, String>,
}

impl CommandOptions {
    /// Options that only set the working directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cwd: Some(dir.to_path_buf()),
            env: HashMap::new(),
        }
    }
}

/// Result of executing a command with captured output.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

/// Render a program and arguments for error messages.
fn render(program: &Path, args: &[&str]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

/// Execute a program, capturing stdout and stderr.
///
/// Spawn failure maps to `CommandFailed`; a nonzero exit is reported
/// through the result, not as an error.
pub fn run(program: &Path, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());

    let output = cmd.output().map_err(|_| CargoholdError::CommandFailed {
        command: render(program, args),
        code: None,
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}

/// Execute a program with captured output, requiring a zero exit.
pub fn run_checked(
    program: &Path,
    args: &[&str],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let result = run(program, args, options)?;
    if result.success {
        Ok(result)
    } else {
        Err(CargoholdError::CommandFailed {
            command: render(program, args),
            code: result.exit_code,
        })
    }
}

/// Execute a program with stdout/stderr inherited from the parent,
/// requiring a zero exit.
///
/// Used for the vendor tool's long-running operations so their progress
/// and error output reaches the user directly.
pub fn run_passthrough(program: &Path, args: &[&str], options: &CommandOptions) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    let status = cmd.status().map_err(|_| CargoholdError::CommandFailed {
        command: render(program, args),
        code: None,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(CargoholdError::CommandFailed {
            command: render(program, args),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_successful_command() {
        let result = run(Path::new("echo"), &["hello"], &CommandOptions::default()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn run_failing_command_reports_exit_code() {
        let result = run(
            Path::new("sh"),
            &["-c", "exit 3"],
            &CommandOptions::default(),
        )
        .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn run_missing_program_is_command_failed() {
        let err = run(
            Path::new("cargohold-no-such-binary"),
            &[],
            &CommandOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CargoholdError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn run_with_env_override() {
        let mut options = CommandOptions::default();
        options
            .env
            .insert("CARGOHOLD_TEST_VAR".to_string(), "vendored".to_string());

        let result = run(
            Path::new("sh"),
            &["-c", "echo $CARGOHOLD_TEST_VAR"],
            &options,
        )
        .unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("vendored"));
    }

    #[test]
    fn run_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions::in_dir(temp.path());

        let result = run(Path::new("pwd"), &[], &options).unwrap();

        assert!(result.success);
        let canonical = temp.path().canonicalize().unwrap();
        assert!(result.stdout.contains(&canonical.display().to_string()));
    }

    #[test]
    fn run_checked_rejects_nonzero_exit() {
        let err = run_checked(
            Path::new("sh"),
            &["-c", "exit 1"],
            &CommandOptions::default(),
        )
        .unwrap_err();

        match err {
            CargoholdError::CommandFailed { command, code } => {
                assert!(command.contains("sh"));
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn run_passthrough_succeeds_on_zero_exit() {
        assert!(run_passthrough(Path::new("true"), &[], &CommandOptions::default()).is_ok());
    }

    #[test]
    fn run_passthrough_fails_on_nonzero_exit() {
        let err =
            run_passthrough(Path::new("false"), &[], &CommandOptions::default()).unwrap_err();
        assert!(matches!(err, CargoholdError::CommandFailed { .. }));
    }
}
