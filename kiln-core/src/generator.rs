//! The generator contract and its type-erased form.

use std::{any::type_name, fmt, future::Future, thread};

use futures::{FutureExt, future::BoxFuture};

use crate::{
    fault::BoxError,
    model::{InputModel, ModelInstance, ModelType},
    services::Services,
};

/// Capability recorded on the symbols of types implementing [`Generator`].
pub const GENERATOR_CAPABILITY: &str = "kiln::Generator";

/// Outcome of a generator action: either finished or still running.
pub enum Completion {
    Ready(Result<(), BoxError>),
    Pending(BoxFuture<'static, Result<(), BoxError>>),
}

impl Completion {
    /// Wrap a future as a pending completion.
    pub fn future<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Completion::Pending(async move { future.await.map_err(Into::into) }.boxed())
    }

    /// Block until the action has finished.
    ///
    /// Pending actions run on a fresh current-thread runtime. Called from
    /// inside a runtime, that runtime lives on a separate thread.
    pub fn wait(self) -> Result<(), BoxError> {
        match self {
            Completion::Ready(result) => result,
            Completion::Pending(future) => {
                if tokio::runtime::Handle::try_current().is_ok() {
                    thread::scope(|scope| {
                        scope
                            .spawn(move || block_on(future))
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                } else {
                    block_on(future)
                }
            }
        }
    }
}

fn block_on(future: BoxFuture<'static, Result<(), BoxError>>) -> Result<(), BoxError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(future)
}

impl<E: Into<BoxError>> From<Result<(), E>> for Completion {
    fn from(result: Result<(), E>) -> Self {
        Completion::Ready(result.map_err(Into::into))
    }
}

impl From<BoxFuture<'static, Result<(), BoxError>>> for Completion {
    fn from(future: BoxFuture<'static, Result<(), BoxError>>) -> Self {
        Completion::Pending(future)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Completion::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// A type exposing one generator action.
///
/// The instance is created per invocation through [`EntryPoint::create`],
/// then consumed by [`EntryPoint::generate`] together with the populated
/// model.
///
/// # Example
///
/// ```ignore
/// struct WidgetGenerator;
///
/// impl EntryPoint for WidgetGenerator {
///     type Model = WidgetModel;
///     type Output = Result<(), BoxError>;
///
///     fn create(_services: &Services) -> Result<Self, BoxError> {
///         Ok(Self)
///     }
///
///     fn generate(self, model: WidgetModel) -> Self::Output {
///         println!("force = {}", model.force);
///         Ok(())
///     }
/// }
/// ```
pub trait EntryPoint: Sized + Send + 'static {
    type Model: InputModel;
    type Output: Into<Completion>;

    /// Name to expose instead of the one derived from the type name.
    const ALIAS: Option<&'static str> = None;

    fn create(services: &Services) -> Result<Self, BoxError>;

    fn generate(self, model: Self::Model) -> Self::Output;
}

/// Marks an [`EntryPoint`] as a generator regardless of its type name.
pub trait Generator: EntryPoint {}

/// Names the action a generator exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    owner: &'static str,
    model: &'static str,
}

impl ActionInfo {
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn model(&self) -> &'static str {
        self.model
    }
}

impl fmt::Display for ActionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::generate({})", self.owner, self.model)
    }
}

pub(crate) trait ErasedGenerator: Send {
    fn invoke(self: Box<Self>, model: Box<dyn ModelInstance>) -> Completion;
}

impl<T: EntryPoint> ErasedGenerator for T {
    fn invoke(self: Box<Self>, model: Box<dyn ModelInstance>) -> Completion {
        match model.into_any().downcast::<T::Model>() {
            Ok(model) => (*self).generate(*model).into(),
            Err(_) => Completion::Ready(Err(format!(
                "generator '{}' expects a model of type '{}'",
                type_name::<T>(),
                type_name::<T::Model>()
            )
            .into())),
        }
    }
}

pub(crate) type GeneratorFactory = fn(&Services) -> Result<Box<dyn ErasedGenerator>, BoxError>;

/// A constructed generator, ready to run once.
pub struct GeneratorInstance {
    inner: Box<dyn ErasedGenerator>,
}

impl GeneratorInstance {
    /// Run the action with a populated model.
    pub fn invoke(self, model: Box<dyn ModelInstance>) -> Completion {
        self.inner.invoke(model)
    }
}

impl fmt::Debug for GeneratorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorInstance").finish_non_exhaustive()
    }
}

/// Everything needed to run an entry point, without its concrete type.
#[derive(Clone)]
pub struct EntryShape {
    alias: Option<&'static str>,
    model: ModelType,
    action: ActionInfo,
    factory: GeneratorFactory,
}

impl EntryShape {
    pub fn of<T: EntryPoint>() -> Self {
        fn build<T: EntryPoint>(services: &Services) -> Result<Box<dyn ErasedGenerator>, BoxError> {
            Ok(Box::new(T::create(services)?))
        }

        let model = ModelType::of::<T::Model>();
        let action = ActionInfo {
            owner: type_name::<T>(),
            model: model.name(),
        };

        Self {
            alias: T::ALIAS,
            model,
            action,
            factory: build::<T>,
        }
    }

    pub fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    pub fn model(&self) -> &ModelType {
        &self.model
    }

    pub fn action(&self) -> ActionInfo {
        self.action
    }

    /// Construct the owning generator instance.
    pub fn create(&self, services: &Services) -> Result<GeneratorInstance, BoxError> {
        Ok(GeneratorInstance {
            inner: (self.factory)(services)?,
        })
    }
}

impl fmt::Debug for EntryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryShape")
            .field("alias", &self.alias)
            .field("model", &self.model.name())
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}
