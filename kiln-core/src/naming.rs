//! Naming helpers for generator and parameter names.

/// Suffix identifying generator types by convention.
pub const GENERATOR_SUFFIX: &str = "Generator";

/// Convert a property name to kebab-case (e.g., "OutputDir" -> "output-dir")
///
/// Acronyms stay together: "HTTPPort" -> "http-port".
pub fn to_kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('-') {
                result.push('-');
            }
        }

        result.extend(c.to_lowercase());
    }

    result.trim_end_matches('-').to_string()
}

/// Strip `suffix` from the end of `s`, ignoring ASCII case.
///
/// Returns `None` if `s` does not end with the suffix.
pub fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Derive a generator's name from its type's short name.
///
/// The conventional suffix is dropped; a type named exactly `Generator`
/// keeps its name.
pub fn generator_name(type_name: &str) -> &str {
    match strip_suffix_ignore_case(type_name, GENERATOR_SUFFIX) {
        Some(head) if !head.is_empty() => head,
        _ => type_name,
    }
}
