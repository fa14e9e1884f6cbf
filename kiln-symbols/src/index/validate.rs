//! Validation of type paths declared in a symbol index.

use std::collections::HashSet;

use crate::{
    error::{Result, SourceContext},
    symbol::PATH_SEPARATOR,
};

/// Validate a `::`-separated type path.
pub(crate) fn validate_type_path(
    ctx: &SourceContext<'_>,
    path: &str,
    compilation: &str,
) -> Result<()> {
    if path.is_empty() {
        return Err(ctx.invalid_type_name_error(
            path,
            compilation,
            "type name cannot be empty",
        ));
    }

    for segment in path.split(PATH_SEPARATOR) {
        if let Some(reason) = validate_identifier(segment) {
            return Err(ctx.invalid_type_name_error(path, compilation, reason));
        }
    }

    Ok(())
}

/// Tracks full names already declared in one compilation.
#[derive(Debug, Default)]
pub(crate) struct SeenTypes<'a> {
    names: HashSet<&'a str>,
}

impl<'a> SeenTypes<'a> {
    pub(crate) fn check(
        &mut self,
        ctx: &SourceContext<'_>,
        path: &'a str,
        compilation: &str,
    ) -> Result<()> {
        if self.names.insert(path) {
            Ok(())
        } else {
            Err(ctx.duplicate_type_error(path, compilation))
        }
    }
}

/// Validate one path segment.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(':') => return Some("path segments are separated by '::', not ':'"),
        Some(_) => return Some("each segment must start with a letter or underscore"),
        None => return Some("path cannot contain empty segments"),
    }

    if chars.all(|c| c.is_alphanumeric() || c == '_') {
        None
    } else {
        Some("each segment must contain only letters, numbers, and underscores")
    }
}
