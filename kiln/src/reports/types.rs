//! Type lookup report data structures.

use kiln_symbols::TypeSymbol;
use serde::Serialize;

use super::output::{Output, Report};

/// Types found for one query.
#[derive(Debug, Serialize)]
pub struct TypesReport {
    pub query: String,
    pub matches: Vec<TypeMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeMatch {
    pub full_name: String,
    pub name: String,
    /// Compilation declaring the type.
    pub compilation: Option<String>,
    pub visibility: String,
}

impl TypeMatch {
    pub fn from_symbol(symbol: &TypeSymbol) -> Self {
        Self {
            full_name: symbol.full_name(),
            name: symbol.name().to_string(),
            compilation: symbol.origin().map(str::to_string),
            visibility: symbol.visibility().to_string(),
        }
    }
}

impl Report for TypesReport {
    fn render(&self, out: &mut dyn Output) {
        if self.matches.is_empty() {
            out.warning(&format!("no type named '{}' was found", self.query));
            return;
        }

        out.section(&format!("Types matching '{}'", self.query));
        for found in &self.matches {
            let compilation = found.compilation.as_deref().unwrap_or("?");
            out.list_item(&format!(
                "{} ({}, {})",
                found.full_name, compilation, found.visibility
            ));
        }
    }
}
