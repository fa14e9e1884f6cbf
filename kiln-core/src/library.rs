//! Candidate libraries: registered units that may contain generators.

use std::sync::Arc;

use kiln_symbols::TypeSymbol;

use crate::generator::{EntryPoint, EntryShape, GENERATOR_CAPABILITY, Generator};

/// A type exported by a library, with its entry point if it has one.
#[derive(Debug, Clone)]
pub struct ExportedType {
    symbol: TypeSymbol,
    entry: Option<EntryShape>,
}

impl ExportedType {
    /// A type with no entry point.
    pub fn new(symbol: TypeSymbol) -> Self {
        Self {
            symbol,
            entry: None,
        }
    }

    /// A type that can be run, qualifying as a generator only by its name.
    pub fn entry_point<T: EntryPoint>() -> Self {
        Self {
            symbol: TypeSymbol::of::<T>(),
            entry: Some(EntryShape::of::<T>()),
        }
    }

    /// A type carrying the generator capability.
    pub fn generator<G: Generator>() -> Self {
        let mut exported = Self::entry_point::<G>();
        exported.symbol = exported.symbol.with_capability(GENERATOR_CAPABILITY);
        exported
    }

    /// Adjust the exported symbol, e.g. to change its visibility.
    pub fn map_symbol(mut self, f: impl FnOnce(TypeSymbol) -> TypeSymbol) -> Self {
        self.symbol = f(self.symbol);
        self
    }

    pub fn symbol(&self) -> &TypeSymbol {
        &self.symbol
    }

    pub fn entry(&self) -> Option<&EntryShape> {
        self.entry.as_ref()
    }
}

/// A named set of exported types.
#[derive(Debug, Clone)]
pub struct Library {
    name: String,
    types: Vec<ExportedType>,
}

impl Library {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Register a type implementing [`Generator`].
    pub fn generator<G: Generator>(self) -> Self {
        self.export(ExportedType::generator::<G>())
    }

    /// Register an entry point discovered by its `Generator` name suffix.
    pub fn convention<T: EntryPoint>(self) -> Self {
        self.export(ExportedType::entry_point::<T>())
    }

    pub fn export(mut self, exported: ExportedType) -> Self {
        let origin = self.name.clone();
        self.types
            .push(exported.map_symbol(|symbol| symbol.with_origin(origin)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every exported type, in registration order.
    pub fn candidate_types(&self) -> &[ExportedType] {
        &self.types
    }
}

/// Supplies the libraries a registry scans.
pub trait LibrarySource: Send + Sync {
    fn candidate_libraries(&self) -> Vec<Arc<Library>>;
}

impl LibrarySource for Vec<Arc<Library>> {
    fn candidate_libraries(&self) -> Vec<Arc<Library>> {
        self.clone()
    }
}

impl LibrarySource for Vec<Library> {
    fn candidate_libraries(&self) -> Vec<Arc<Library>> {
        self.iter().cloned().map(Arc::new).collect()
    }
}

impl<S: LibrarySource + ?Sized> LibrarySource for Arc<S> {
    fn candidate_libraries(&self) -> Vec<Arc<Library>> {
        (**self).candidate_libraries()
    }
}
