//! `modmap completions`: shell completion scripts.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `args.shell` to `out`.
///
/// # Errors
///
/// Returns an error if flushing `out` fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command, out: &mut dyn Write) -> Result<()> {
    let bin_name = command.get_name().to_string();
    generate(args.shell, command, bin_name, out);
    out.flush()?;
    Ok(())
}
