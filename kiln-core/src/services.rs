//! Services handed to generators when they are constructed.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use crate::{
    error::Error,
    fault::{BoxError, InvocationFault},
    invoker::Invoker,
    registry::GeneratorRegistry,
};

/// A type-keyed container of shared services.
///
/// Cloning is cheap; services are reference counted.
#[derive(Clone, Default)]
pub struct Services {
    entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, replacing any previous one of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, service: T) {
        self.insert_arc(Arc::new(service));
    }

    pub fn insert_arc<T: Send + Sync + 'static>(&mut self, service: Arc<T>) {
        self.entries.insert(TypeId::of::<T>(), service);
    }

    /// Builder form of [`Services::insert`].
    pub fn with<T: Send + Sync + 'static>(mut self, service: T) -> Self {
        self.insert(service);
        self
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|service| service.downcast::<T>().ok())
    }

    /// Like [`Services::get`], but a missing service is an error.
    pub fn require<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, MissingService> {
        self.get::<T>().ok_or(MissingService {
            service: type_name::<T>(),
        })
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// A service a generator needed was not registered.
#[derive(Debug, thiserror::Error)]
#[error("required service '{service}' is not available")]
pub struct MissingService {
    service: &'static str,
}

impl MissingService {
    pub fn service(&self) -> &'static str {
        self.service
    }
}

/// Runs other generators on behalf of a running generator.
///
/// Every run registers one in the services it hands to the generator it
/// constructs.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<GeneratorRegistry>,
    services: Services,
}

impl Dispatcher {
    pub fn new(registry: Arc<GeneratorRegistry>, services: Services) -> Self {
        Self { registry, services }
    }

    /// Run the generator `name` with `args` (without the generator name).
    ///
    /// Any failure, including lookup and parse failures, comes back wrapped
    /// in an [`InvocationFault`] naming the generator. Parse failures are
    /// cut down to their first line.
    pub fn dispatch<I, S>(&self, name: &str, args: I) -> Result<(), InvocationFault>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv = std::iter::once(name.to_string()).chain(args.into_iter().map(Into::into));
        let invoker = Invoker::new(Arc::clone(&self.registry), self.services.clone());

        invoker
            .run(argv)
            .map_err(|err| {
                let source = match err {
                    Error::Usage(_) => BoxError::from(err.summary()),
                    other => BoxError::from(other),
                };
                InvocationFault::new(name, source)
            })
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}
