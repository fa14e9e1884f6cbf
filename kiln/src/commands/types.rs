use clap::Args;
use eyre::{Result, bail};

use super::GlobalOpts;
use crate::{
    host::Host,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TypesCommand {
    /// Full or short type name to look up
    name: String,
}

impl TypesCommand {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let host = Host::load(global);
        let Some(resolver) = host.resolver() else {
            bail!(
                "no symbol index found at {} (use --index or KILN_INDEX to point at one)",
                global.index.display()
            );
        };

        let report = ops::types(resolver, &self.name, None);
        report.render(&mut TerminalOutput::new());

        if report.matches.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }
}
