//! Input models: the data a generator receives from the command line.
//!
//! A model type describes its settable properties through [`PropertyInfo`]
//! and accepts values by property name. The binder never sees the concrete
//! type; it works from a [`ModelType`], which erases it behind a factory.

use std::{any::Any, fmt, sync::Arc};

use kiln_symbols::PATH_SEPARATOR;

use crate::fault::BoxError;

/// Value type of a model property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Int,
    Float,
    Bool,
    Path,
}

impl PropertyType {
    /// Placeholder shown in help output.
    pub fn value_name(&self) -> &'static str {
        match self {
            PropertyType::String => "VALUE",
            PropertyType::Int => "INT",
            PropertyType::Float => "NUMBER",
            PropertyType::Bool => "BOOL",
            PropertyType::Path => "PATH",
        }
    }
}

/// Declares that a property is exposed as a named option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMeta {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl OptionMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the option name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a second spelling; one character becomes `-x`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Describes a property exposed as a positional argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMeta {
    pub description: Option<String>,
}

impl ArgumentMeta {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }
}

/// One property of an input model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub ty: PropertyType,
    pub settable: bool,
    pub option: Option<OptionMeta>,
    pub argument: Option<ArgumentMeta>,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            settable: true,
            option: None,
            argument: None,
        }
    }

    pub fn option(mut self, meta: OptionMeta) -> Self {
        self.option = Some(meta);
        self
    }

    pub fn argument(mut self, meta: ArgumentMeta) -> Self {
        self.argument = Some(meta);
        self
    }

    /// Mark the property as not settable; the binder skips it.
    pub fn read_only(mut self) -> Self {
        self.settable = false;
        self
    }

    pub fn is_bool(&self) -> bool {
        self.ty == PropertyType::Bool
    }
}

/// A value resolved from parsed arguments for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Flag(bool),
    Text(String),
    /// A positional argument that was not supplied.
    Absent,
}

impl BoundValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            BoundValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BoundValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            BoundValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, BoundValue::Absent)
    }
}

/// A type a generator accepts as its input.
///
/// Implementations are plain data holders. `create` builds the empty
/// instance, `set` assigns one property by the name given in `properties`.
pub trait InputModel: Send + Sized + 'static {
    fn properties() -> Vec<PropertyInfo>;

    fn create() -> Result<Self, BoxError>;

    fn set(&mut self, property: &str, value: BoundValue) -> Result<(), BoxError>;
}

/// A model instance with its concrete type erased.
pub trait ModelInstance: Send {
    fn set(&mut self, property: &str, value: BoundValue) -> Result<(), BoxError>;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<M: InputModel> ModelInstance for M {
    fn set(&mut self, property: &str, value: BoundValue) -> Result<(), BoxError> {
        InputModel::set(self, property, value)
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

type ModelFactory = fn() -> Result<Box<dyn ModelInstance>, BoxError>;

/// Runtime description of an [`InputModel`] type.
#[derive(Clone)]
pub struct ModelType {
    name: &'static str,
    properties: Arc<[PropertyInfo]>,
    factory: ModelFactory,
}

impl ModelType {
    pub fn of<M: InputModel>() -> Self {
        fn build<M: InputModel>() -> Result<Box<dyn ModelInstance>, BoxError> {
            Ok(Box::new(M::create()?))
        }

        Self {
            name: std::any::type_name::<M>(),
            properties: M::properties().into(),
            factory: build::<M>,
        }
    }

    /// Full Rust path of the model type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the model type, without generic arguments.
    pub fn short_name(&self) -> &'static str {
        let path = self.name.split_once('<').map_or(self.name, |(path, _)| path);
        path.rsplit_once(PATH_SEPARATOR)
            .map_or(path, |(_, short)| short)
    }

    /// All declared properties, settable or not, in declaration order.
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub fn settable_properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.iter().filter(|p| p.settable)
    }

    /// Create a fresh, unpopulated instance.
    pub fn instantiate(&self) -> Result<Box<dyn ModelInstance>, BoxError> {
        (self.factory)()
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}
