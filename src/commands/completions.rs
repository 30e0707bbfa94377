//! # Completions Command Implementation
//!
//! Prints a `clap_complete` completion script for `clone-repos`.
//!
//! ```bash
//! clone-repos completions bash > ~/.local/share/bash-completion/completions/clone-repos
//! clone-repos completions zsh > ~/.zfunc/_clone-repos
//! ```

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `out`.
fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_completions(args.shell, &mut handle);
    handle.flush()?;
    Ok(())
}
