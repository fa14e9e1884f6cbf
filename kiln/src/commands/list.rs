use clap::Args;
use eyre::Result;

use super::GlobalOpts;
use crate::{
    host::Host,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {}

impl ListCommand {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let host = Host::load(global);

        let report = ops::list(host.registry());
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
