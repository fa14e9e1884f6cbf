//! Core operations.
//!
//! Business logic for kiln commands, separated from argument parsing and
//! output rendering.

pub mod list;
pub mod types;

pub use list::list;
pub use types::types;
