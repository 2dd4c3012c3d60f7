use std::io;

use clap::{Args, CommandFactory};
use eyre::Result;

use super::Cli;

/// Print a completion script, e.g. `rapper completions zsh > _rapper`.
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, &mut io::stdout().lock());
        Ok(())
    }
}
