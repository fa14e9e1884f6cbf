//! Generators shipped with kiln itself.

mod inspect;

use inspect::InspectGenerator;
use kiln_core::Library;

/// The built-in `kiln` library.
pub fn builtin() -> Library {
    Library::new("kiln").generator::<InspectGenerator>()
}
