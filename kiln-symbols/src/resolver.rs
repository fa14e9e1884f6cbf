//! Type lookup across a project graph.

use std::{fmt, sync::Arc, vec};

use tracing::trace;

use crate::symbol::{Compilation, NamespaceSymbol, TypeSymbol};

/// Source of compilations for the projects a user is working in.
///
/// Implementations stand in for the compiler's symbol service. The returned
/// set may change between calls; the resolver asks again every time.
pub trait ProjectGraph: Send + Sync {
    fn compilations(&self) -> Vec<Arc<Compilation>>;
}

impl ProjectGraph for Vec<Arc<Compilation>> {
    fn compilations(&self) -> Vec<Arc<Compilation>> {
        self.clone()
    }
}

impl ProjectGraph for Vec<Compilation> {
    fn compilations(&self) -> Vec<Arc<Compilation>> {
        self.iter().cloned().map(Arc::new).collect()
    }
}

/// Finds types declared anywhere in a [`ProjectGraph`].
///
/// # Example
///
/// ```ignore
/// let resolver = TypeResolver::new(vec![
///     Compilation::new("web").with_type(TypeSymbol::new("Shop::Models::Product")),
/// ]);
///
/// let exact = resolver.find_type("Shop::Models::Product");
/// let by_short_name = resolver.find_type("Product");
/// assert_eq!(exact, by_short_name);
/// ```
#[derive(Clone)]
pub struct TypeResolver {
    graph: Arc<dyn ProjectGraph>,
}

impl TypeResolver {
    pub fn new(graph: impl ProjectGraph + 'static) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Iterate every type declared in every compilation.
    ///
    /// The iterator is lazy and walks one namespace at a time. Compilations
    /// are fetched when this is called, so a later call observes changes in
    /// the underlying graph while an existing iterator does not.
    pub fn all_types(&self) -> AllTypes {
        AllTypes::new(self.graph.compilations())
    }

    /// Find types by fully qualified name, falling back to the short name.
    ///
    /// Exact matches from any compilation win. Without one, every type whose
    /// short name equals `name` (case-sensitive) is returned, even when the
    /// matches live in unrelated projects.
    pub fn find_type(&self, name: &str) -> Vec<Arc<TypeSymbol>> {
        let exact: Vec<_> = self
            .graph
            .compilations()
            .iter()
            .filter_map(|compilation| compilation.type_by_full_name(name))
            .collect();

        if !exact.is_empty() {
            trace!(name, matches = exact.len(), "resolved type by full name");
            return exact;
        }

        let by_name: Vec<_> = self.all_types().filter(|ty| ty.name() == name).collect();
        trace!(name, matches = by_name.len(), "resolved type by short name");
        by_name
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver").finish_non_exhaustive()
    }
}

/// Iterator returned by [`TypeResolver::all_types`].
///
/// Visits compilations in order; within one, types declared in a namespace
/// come before those of its child namespaces.
pub struct AllTypes {
    compilations: vec::IntoIter<Arc<Compilation>>,
    pending: Vec<Arc<NamespaceSymbol>>,
    current: Option<(Arc<NamespaceSymbol>, usize)>,
}

impl AllTypes {
    fn new(compilations: Vec<Arc<Compilation>>) -> Self {
        Self {
            compilations: compilations.into_iter(),
            pending: Vec::new(),
            current: None,
        }
    }
}

impl Iterator for AllTypes {
    type Item = Arc<TypeSymbol>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((namespace, index)) = self.current.as_mut() {
                if let Some(ty) = namespace.types().get(*index) {
                    *index += 1;
                    return Some(Arc::clone(ty));
                }
            }

            if let Some((namespace, _)) = self.current.take() {
                // Reversed so the first child is visited first.
                self.pending
                    .extend(namespace.namespaces().iter().rev().cloned());
                continue;
            }

            if let Some(namespace) = self.pending.pop() {
                self.current = Some((namespace, 0));
                continue;
            }

            let compilation = self.compilations.next()?;
            self.pending.push(compilation.global_namespace_arc());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn storefront() -> Vec<Compilation> {
        vec![
            Compilation::new("web")
                .with_type(TypeSymbol::new("Shop::Web::HomeController"))
                .with_type(TypeSymbol::new("Shop::Models::Product"))
                .with_type(TypeSymbol::new("Program")),
            Compilation::new("data")
                .with_type(TypeSymbol::new("Shop::Data::ShopContext"))
                .with_type(TypeSymbol::new("Legacy::Product")),
        ]
    }

    #[test]
    fn test_all_types_walks_every_namespace() {
        let resolver = TypeResolver::new(storefront());
        let names: Vec<_> = resolver.all_types().map(|ty| ty.full_name()).collect();

        assert_eq!(
            names,
            vec![
                "Program",
                "Shop::Web::HomeController",
                "Shop::Models::Product",
                "Shop::Data::ShopContext",
                "Legacy::Product",
            ]
        );
    }

    #[test]
    fn test_all_types_is_lazy() {
        let resolver = TypeResolver::new(storefront());
        let first = resolver.all_types().next().expect("at least one type");
        assert_eq!(first.full_name(), "Program");
    }

    #[test]
    fn test_all_types_empty_graph() {
        let resolver = TypeResolver::new(Vec::<Compilation>::new());
        assert_eq!(resolver.all_types().count(), 0);
    }

    #[test]
    fn test_find_type_prefers_exact_match() {
        let resolver = TypeResolver::new(storefront());
        let found = resolver.find_type("Shop::Models::Product");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].origin(), Some("web"));
    }

    #[test]
    fn test_find_type_short_name_is_permissive() {
        let resolver = TypeResolver::new(storefront());
        let found = resolver.find_type("Product");

        let names: Vec<_> = found.iter().map(|ty| ty.full_name()).collect();
        assert_eq!(names, vec!["Shop::Models::Product", "Legacy::Product"]);
    }

    #[test]
    fn test_find_type_short_name_is_case_sensitive() {
        let resolver = TypeResolver::new(storefront());
        assert!(resolver.find_type("product").is_empty());
    }

    #[test]
    fn test_find_type_no_match() {
        let resolver = TypeResolver::new(storefront());
        assert!(resolver.find_type("Shop::Models::Missing").is_empty());
        assert!(resolver.find_type("Missing").is_empty());
    }

    #[test]
    fn test_find_type_exact_match_in_several_compilations() {
        let resolver = TypeResolver::new(vec![
            Compilation::new("a").with_type(TypeSymbol::new("Shared::Money")),
            Compilation::new("b").with_type(TypeSymbol::new("Shared::Money")),
        ]);

        let origins: Vec<_> = resolver
            .find_type("Shared::Money")
            .iter()
            .filter_map(|ty| ty.origin().map(str::to_string))
            .collect();
        assert_eq!(origins, vec!["a", "b"]);
    }

    struct ChangingGraph {
        compilations: Mutex<Vec<Arc<Compilation>>>,
    }

    impl ProjectGraph for ChangingGraph {
        fn compilations(&self) -> Vec<Arc<Compilation>> {
            self.compilations.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_all_types_recomputed_per_call() {
        let graph = Arc::new(ChangingGraph {
            compilations: Mutex::new(vec![Arc::new(
                Compilation::new("web").with_type(TypeSymbol::new("A")),
            )]),
        });

        struct Shared(Arc<ChangingGraph>);
        impl ProjectGraph for Shared {
            fn compilations(&self) -> Vec<Arc<Compilation>> {
                self.0.compilations()
            }
        }

        let resolver = TypeResolver::new(Shared(Arc::clone(&graph)));
        let before = resolver.all_types();

        graph
            .compilations
            .lock()
            .unwrap()
            .push(Arc::new(Compilation::new("extra").with_type(TypeSymbol::new("B"))));

        assert_eq!(before.count(), 1);
        assert_eq!(resolver.all_types().count(), 2);
    }
}
