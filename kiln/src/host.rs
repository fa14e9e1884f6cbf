//! Wiring of the registry, the symbol index and the generator services.

use std::sync::Arc;

use kiln_core::{GeneratorRegistry, Invoker, Library, Services};
use kiln_symbols::{SymbolIndex, TypeResolver};
use tracing::debug;

use crate::{
    commands::{GlobalOpts, UnwrapOrExit},
    generators,
};

/// Everything a command needs to find and run generators.
pub(crate) struct Host {
    registry: Arc<GeneratorRegistry>,
    resolver: Option<TypeResolver>,
}

impl Host {
    /// Load the registry and, when the index file exists, the symbol index.
    ///
    /// A broken index file is reported and ends the process.
    pub fn load(global: &GlobalOpts) -> Self {
        let resolver = if global.index.is_file() {
            let index = SymbolIndex::open(&global.index).unwrap_or_exit();
            Some(TypeResolver::new(index))
        } else {
            debug!(path = %global.index.display(), "no symbol index, type lookups disabled");
            None
        };

        Self {
            registry: Arc::new(GeneratorRegistry::new(libraries())),
            resolver,
        }
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> Option<&TypeResolver> {
        self.resolver.as_ref()
    }

    /// Services handed to generators.
    pub fn services(&self) -> Services {
        let mut services = Services::new();
        if let Some(resolver) = &self.resolver {
            services.insert(resolver.clone());
        }
        services
    }

    pub fn invoker(&self) -> Invoker {
        Invoker::new(Arc::clone(&self.registry), self.services()).program("kiln")
    }
}

/// Libraries scanned for generators.
pub(crate) fn libraries() -> Vec<Library> {
    vec![generators::builtin()]
}
