mod completions;
mod generate;
mod list;
mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use list::ListCommand;
use types::TypesCommand;

/// Extension trait for exiting on symbol index errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for kiln_symbols::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalOpts {
    /// Symbol index describing the types of the current projects
    #[arg(long, global = true, env = "KILN_INDEX", default_value = "kiln.toml")]
    pub index: PathBuf,

    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Effective verbosity: 0 quiet, 1 default, 2 debug, 3 and up trace.
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

#[derive(Parser)]
#[command(name = "kiln")]
#[command(version)]
#[command(about = "Discover generators and run them from the command line")]
#[command(after_help = "Run `kiln list` to see the available generators.")]
pub(crate) struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::List(cmd) => cmd.run(&self.global),
            Commands::Types(cmd) => cmd.run(&self.global),
            Commands::Completions(cmd) => cmd.run(&self.global),
            Commands::Generate(args) => generate::run(&self.global, args),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the discovered generators
    List(ListCommand),

    /// Look up a type in the symbol index
    Types(TypesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),

    /// Run a generator
    #[command(external_subcommand)]
    Generate(Vec<String>),
}
