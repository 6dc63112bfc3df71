//! Shell completions generation.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::Output;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _out: &Output) -> crate::error::Result<CommandResult> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "cargohold", &mut std::io::stdout());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn generates_bash_completions() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(Shell::Bash, &mut cmd, "cargohold", &mut buf);
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("cargohold"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(Shell::Zsh, &mut cmd, "cargohold", &mut buf);
        assert!(String::from_utf8(buf).unwrap().contains("cargohold"));
    }
}
