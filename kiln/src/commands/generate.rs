use eyre::Result;
use kiln_core::Error;

use super::GlobalOpts;
use crate::host::Host;

/// Run a generator named on the command line.
///
/// Failures are printed as one line and end the process with the error's
/// exit code; help requests print the generator's help and exit with 0.
pub fn run(global: &GlobalOpts, args: &[String]) -> Result<()> {
    let host = Host::load(global);

    match host.invoker().run(args.iter().cloned()) {
        Ok(()) => Ok(()),
        Err(Error::Usage(err)) => {
            err.print()?;
            std::process::exit(err.exit_code());
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
