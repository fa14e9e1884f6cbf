//! Types operation - symbol lookups.

use kiln_symbols::TypeResolver;

use crate::reports::{TypeMatch, TypesReport};

/// Look a type up by full or short name, optionally within one compilation.
pub fn types(resolver: &TypeResolver, name: &str, compilation: Option<&str>) -> TypesReport {
    let matches = resolver
        .find_type(name)
        .iter()
        .filter(|symbol| compilation.is_none_or(|c| symbol.origin() == Some(c)))
        .map(|symbol| TypeMatch::from_symbol(symbol))
        .collect();

    TypesReport {
        query: name.to_string(),
        matches,
    }
}
