//! Symbol index files.
//!
//! A symbol index is a TOML file listing, per compilation, the types that
//! an external indexer found in the user's projects. It is the on-disk
//! stand-in for a live compiler symbol service.
//!
//! ```toml
//! [project]
//! name = "storefront"
//!
//! [compilations.web]
//! types = ["Storefront::Models::Product", "Storefront::Web::HomeController"]
//!
//! [compilations.data]
//! types = [{ name = "Storefront::Data::ShopContext", visibility = "internal" }]
//! ```

mod validate;

use std::{path::Path, str::FromStr, sync::Arc};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{
    Compilation, ProjectGraph, TypeSymbol, Visibility,
    error::{Error, Result, SourceContext},
};

/// Root of a symbol index file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolIndex {
    pub project: ProjectInfo,

    /// Compilations keyed by name, in declaration order.
    #[serde(default)]
    pub compilations: IndexMap<String, CompilationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectInfo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilationEntry {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// A type declaration.
///
/// Supports both formats:
/// - Plain path: `"Shop::Models::Product"`
/// - Table: `{ name = "Shop::Base", abstract = true, generic_arity = 1 }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeEntry {
    Path(String),
    Detailed(TypeDetails),
}

/// Table form of a [`TypeEntry`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDetails {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub generic_arity: usize,
}

impl TypeEntry {
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Path(name) => name,
            TypeEntry::Detailed(details) => &details.name,
        }
    }

    pub fn to_symbol(&self) -> TypeSymbol {
        match self {
            TypeEntry::Path(name) => TypeSymbol::new(name),
            TypeEntry::Detailed(details) => {
                let symbol = TypeSymbol::new(&details.name)
                    .with_visibility(details.visibility)
                    .with_generic_arity(details.generic_arity);
                if details.is_abstract {
                    symbol.mark_abstract()
                } else {
                    symbol
                }
            }
        }
    }
}

impl SymbolIndex {
    /// Open and parse a symbol index file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let index = Self::from_str_with_filename(&content, &filename)?;

        debug!(
            path = %path.display(),
            compilations = index.compilations.len(),
            "loaded symbol index"
        );
        Ok(index)
    }

    /// Parse an index with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let index: SymbolIndex = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        index.validate(&ctx)?;
        Ok(index)
    }

    fn validate(&self, ctx: &SourceContext<'_>) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(ctx.validation_error("project name cannot be empty"));
        }

        for (compilation, entry) in &self.compilations {
            let mut seen = validate::SeenTypes::default();
            for ty in &entry.types {
                validate::validate_type_path(ctx, ty.name(), compilation)?;
                seen.check(ctx, ty.name(), compilation)?;
            }
        }

        Ok(())
    }

    /// Total number of declared types across all compilations.
    pub fn type_count(&self) -> usize {
        self.compilations.values().map(|c| c.types.len()).sum()
    }

    /// Build the compilation symbol trees.
    pub fn build_compilations(&self) -> Vec<Arc<Compilation>> {
        self.compilations
            .iter()
            .map(|(name, entry)| {
                let mut compilation = Compilation::new(name.clone());
                for ty in &entry.types {
                    compilation.add_type(ty.to_symbol());
                }
                Arc::new(compilation)
            })
            .collect()
    }
}

impl FromStr for SymbolIndex {
    type Err = Box<Error>;

    fn from_str(content: &str) -> Result<Self> {
        Self::from_str_with_filename(content, "kiln.toml")
    }
}

impl ProjectGraph for SymbolIndex {
    fn compilations(&self) -> Vec<Arc<Compilation>> {
        self.build_compilations()
    }
}
