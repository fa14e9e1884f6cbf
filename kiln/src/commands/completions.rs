use std::io;

use clap::{Args, CommandFactory};
use eyre::Result;
use kiln_core::Invoker;
use tracing::warn;

use super::{Cli, GlobalOpts};
use crate::host::Host;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let host = Host::load(global);
        let mut cmd = Cli::command();

        for descriptor in host.registry().list().iter() {
            match Invoker::generator_command(descriptor) {
                Ok((subcommand, _)) => cmd = cmd.subcommand(subcommand),
                Err(err) => warn!(generator = descriptor.name(), "skipping completions: {err}"),
            }
        }

        clap_complete::generate(self.shell, &mut cmd, "kiln", &mut io::stdout());
        Ok(())
    }
}
