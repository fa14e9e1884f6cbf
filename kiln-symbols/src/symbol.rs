//! Type and namespace symbols.
//!
//! These mirror what a compiler's symbol service exposes for a compiled
//! project: a tree of namespaces per compilation, each declaring types.
//! Paths use `::` as the segment separator.

use std::{fmt, sync::Arc};

use serde::Deserialize;

/// Separator between namespace segments in a fully qualified name.
pub const PATH_SEPARATOR: &str = "::";

/// Declared accessibility of a type.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

impl Visibility {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named type declared in some namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    name: String,
    namespace: Vec<String>,
    visibility: Visibility,
    is_abstract: bool,
    generic_arity: usize,
    capabilities: Vec<String>,
    origin: Option<String>,
}

impl TypeSymbol {
    /// Create a public, concrete, non-generic symbol from a full path such as
    /// `Storefront::Models::Product`.
    pub fn new(path: &str) -> Self {
        let mut segments: Vec<String> = path
            .split(PATH_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let name = segments.pop().unwrap_or_default();

        Self {
            name,
            namespace: segments,
            visibility: Visibility::Public,
            is_abstract: false,
            generic_arity: 0,
            capabilities: Vec::new(),
            origin: None,
        }
    }

    /// Create a symbol for a Rust type.
    ///
    /// Generic arguments of the concrete instantiation are dropped, so the
    /// symbol always has an arity of zero.
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let path = match full.find('<') {
            Some(pos) => &full[..pos],
            None => full,
        };
        Self::new(path)
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn mark_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_generic_arity(mut self, arity: usize) -> Self {
        self.generic_arity = arity;
        self
    }

    /// Record that the type implements the named capability.
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        let capability = capability.into();
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Record the compilation or library declaring this type.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// The short (simple) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The containing namespace, `::`-joined. Empty for the global namespace.
    pub fn namespace(&self) -> String {
        self.namespace.join(PATH_SEPARATOR)
    }

    pub fn namespace_segments(&self) -> &[String] {
        &self.namespace
    }

    /// The fully qualified name.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}{}{}", self.namespace(), PATH_SEPARATOR, self.name)
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn generic_arity(&self) -> usize {
        self.generic_arity
    }

    pub fn is_generic(&self) -> bool {
        self.generic_arity > 0
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())?;
        if self.generic_arity > 0 {
            write!(f, "`{}", self.generic_arity)?;
        }
        Ok(())
    }
}

/// A namespace and everything declared directly inside it.
#[derive(Debug, Clone, Default)]
pub struct NamespaceSymbol {
    name: String,
    types: Vec<Arc<TypeSymbol>>,
    namespaces: Vec<Arc<NamespaceSymbol>>,
}

impl NamespaceSymbol {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// The namespace's own segment name. Empty for the global namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Types declared directly in this namespace.
    pub fn types(&self) -> &[Arc<TypeSymbol>] {
        &self.types
    }

    /// Child namespaces.
    pub fn namespaces(&self) -> &[Arc<NamespaceSymbol>] {
        &self.namespaces
    }

    fn child(&self, name: &str) -> Option<&NamespaceSymbol> {
        self.namespaces
            .iter()
            .find(|ns| ns.name == name)
            .map(Arc::as_ref)
    }

    fn child_mut(&mut self, name: &str) -> &mut NamespaceSymbol {
        let index = match self.namespaces.iter().position(|ns| ns.name == name) {
            Some(index) => index,
            None => {
                self.namespaces.push(Arc::new(NamespaceSymbol::named(name)));
                self.namespaces.len() - 1
            }
        };
        Arc::make_mut(&mut self.namespaces[index])
    }
}

/// One compiled project unit and its symbol tree.
#[derive(Debug, Clone)]
pub struct Compilation {
    name: String,
    global: Arc<NamespaceSymbol>,
}

impl Compilation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: Arc::new(NamespaceSymbol::default()),
        }
    }

    /// Add a type, creating intermediate namespaces as needed.
    pub fn with_type(mut self, symbol: TypeSymbol) -> Self {
        self.add_type(symbol);
        self
    }

    pub fn add_type(&mut self, symbol: TypeSymbol) {
        let symbol = symbol.with_origin(self.name.clone());
        let mut namespace = Arc::make_mut(&mut self.global);
        for segment in symbol.namespace_segments() {
            namespace = namespace.child_mut(segment);
        }
        namespace.types.push(Arc::new(symbol));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn global_namespace(&self) -> &NamespaceSymbol {
        &self.global
    }

    pub(crate) fn global_namespace_arc(&self) -> Arc<NamespaceSymbol> {
        Arc::clone(&self.global)
    }

    /// Look a type up by its exact fully qualified name.
    pub fn type_by_full_name(&self, full_name: &str) -> Option<Arc<TypeSymbol>> {
        let wanted = TypeSymbol::new(full_name);
        if wanted.name().is_empty() {
            return None;
        }

        let mut namespace = self.global.as_ref();
        for segment in wanted.namespace_segments() {
            namespace = namespace.child(segment)?;
        }

        namespace
            .types
            .iter()
            .find(|ty| ty.name() == wanted.name())
            .cloned()
    }
}
