use std::io;

use clap::{Args, CommandFactory};
use eyre::Result;

use super::Cli;

/// Print a completion script, e.g. `skel completions zsh > _skel`.
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell (bash, zsh, fish, elvish, powershell)
    shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "skel", &mut io::stdout());
        Ok(())
    }
}
