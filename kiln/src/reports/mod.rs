//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod list;
mod output;
mod types;

pub use list::{BindingInfo, GeneratorInfo, LibraryGroup, ListReport};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
pub use types::{TypeMatch, TypesReport};
