//! Discovery of generators across candidate libraries.

use std::{fmt, sync::Arc};

use kiln_symbols::TypeSymbol;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    fault::BoxError,
    generator::{ActionInfo, EntryShape, GENERATOR_CAPABILITY, GeneratorInstance},
    library::LibrarySource,
    model::ModelType,
    naming::{GENERATOR_SUFFIX, generator_name, strip_suffix_ignore_case},
    services::Services,
};

/// A discovered generator.
#[derive(Clone)]
pub struct GeneratorDescriptor {
    name: String,
    library: String,
    symbol: Arc<TypeSymbol>,
    entry: EntryShape,
}

impl GeneratorDescriptor {
    /// Name used on the command line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Library the generator was found in.
    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn symbol(&self) -> &TypeSymbol {
        &self.symbol
    }

    pub fn type_name(&self) -> String {
        self.symbol.full_name()
    }

    pub fn model(&self) -> &ModelType {
        self.entry.model()
    }

    pub fn action(&self) -> ActionInfo {
        self.entry.action()
    }

    /// Construct the owning generator instance for one run.
    pub fn create(&self, services: &Services) -> Result<GeneratorInstance, BoxError> {
        self.entry.create(services)
    }
}

impl fmt::Debug for GeneratorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorDescriptor")
            .field("name", &self.name)
            .field("library", &self.library)
            .field("type_name", &self.type_name())
            .field("model", &self.model().name())
            .finish_non_exhaustive()
    }
}

/// Whether a type qualifies as a generator.
///
/// It must be public, concrete and non-generic, and either carry the
/// generator capability or have a name ending in `Generator`.
pub fn qualifies(symbol: &TypeSymbol) -> bool {
    symbol.is_public()
        && !symbol.is_abstract()
        && !symbol.is_generic()
        && (symbol.has_capability(GENERATOR_CAPABILITY)
            || strip_suffix_ignore_case(symbol.name(), GENERATOR_SUFFIX).is_some())
}

type Snapshot = Arc<[GeneratorDescriptor]>;

/// Scans candidate libraries for generators.
///
/// The scan runs on the first [`list`](Self::list) and is kept until
/// [`rescan`](Self::rescan).
pub struct GeneratorRegistry {
    source: Box<dyn LibrarySource>,
    snapshot: Mutex<Option<Snapshot>>,
}

impl GeneratorRegistry {
    pub fn new(source: impl LibrarySource + 'static) -> Self {
        Self {
            source: Box::new(source),
            snapshot: Mutex::new(None),
        }
    }

    /// Every discovered generator, in library then registration order.
    pub fn list(&self) -> Snapshot {
        let mut snapshot = self.snapshot.lock();
        if let Some(descriptors) = snapshot.as_ref() {
            return Arc::clone(descriptors);
        }

        let descriptors: Snapshot = self.scan().into();
        *snapshot = Some(Arc::clone(&descriptors));
        descriptors
    }

    /// Drop the cached scan; the next lookup scans again.
    pub fn rescan(&self) {
        *self.snapshot.lock() = None;
    }

    /// Find the single generator called `name`, ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Result<GeneratorDescriptor> {
        let descriptors = self.list();
        let mut matches = descriptors
            .iter()
            .filter(|d| d.name.eq_ignore_ascii_case(name));

        match (matches.next(), matches.next()) {
            (None, _) => Err(Error::NotFound {
                name: name.to_string(),
            }),
            (Some(found), None) => Ok(found.clone()),
            (Some(_), Some(_)) => Err(Error::AmbiguousName {
                name: name.to_string(),
                libraries: descriptors
                    .iter()
                    .filter(|d| d.name.eq_ignore_ascii_case(name))
                    .map(|d| d.library.clone())
                    .collect(),
            }),
        }
    }

    fn scan(&self) -> Vec<GeneratorDescriptor> {
        let libraries = self.source.candidate_libraries();
        let mut descriptors = Vec::new();

        for library in &libraries {
            for exported in library.candidate_types() {
                let symbol = exported.symbol();
                if !qualifies(symbol) {
                    continue;
                }

                let Some(entry) = exported.entry() else {
                    warn!(
                        library = library.name(),
                        type_name = %symbol.full_name(),
                        "type looks like a generator but has no entry point, skipping"
                    );
                    continue;
                };

                let name = entry
                    .alias()
                    .unwrap_or_else(|| generator_name(symbol.name()))
                    .to_string();

                descriptors.push(GeneratorDescriptor {
                    name,
                    library: library.name().to_string(),
                    symbol: Arc::new(symbol.clone()),
                    entry: entry.clone(),
                });
            }
        }

        debug!(
            libraries = libraries.len(),
            generators = descriptors.len(),
            "scanned candidate libraries"
        );
        descriptors
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("scanned", &self.snapshot.lock().is_some())
            .finish_non_exhaustive()
    }
}
