//! Generator discovery, command-line binding and invocation.
//!
//! Generators are small units with one action and one input model. This
//! crate finds them in registered [`Library`] tables, derives a
//! [`clap::Command`] for each from its model, and runs the action with the
//! parsed values:
//!
//! 1. [`GeneratorRegistry::resolve`] finds the generator by name.
//! 2. [`ParameterBinder::bind`] turns model properties into arguments.
//! 3. [`Invoker::run`] parses, populates the model and calls the action,
//!    reducing any failure to one message.

mod binder;
mod error;
mod fault;
mod generator;
mod invoker;
mod library;
mod model;
pub mod naming;
mod registry;
mod services;

pub use binder::{BindingKind, ParameterBinder, ParameterBinding};
pub use error::{Error, Result};
pub use fault::{BoxError, ErrorBundle, InvocationFault, flatten, flattened_message};
pub use generator::{
    ActionInfo, Completion, EntryPoint, EntryShape, GENERATOR_CAPABILITY, Generator,
    GeneratorInstance,
};
pub use invoker::{Invoker, Stage};
pub use library::{ExportedType, Library, LibrarySource};
pub use model::{
    ArgumentMeta, BoundValue, InputModel, ModelInstance, ModelType, OptionMeta, PropertyInfo,
    PropertyType,
};
pub use registry::{GeneratorDescriptor, GeneratorRegistry, qualifies};
pub use services::{Dispatcher, MissingService, Services};
