//! `kiln inspect`: look a type up in the current projects.

use std::sync::Arc;

use kiln_core::{
    ArgumentMeta, BoundValue, BoxError, EntryPoint, Generator, InputModel, OptionMeta,
    PropertyInfo, PropertyType, Services,
};
use kiln_symbols::TypeResolver;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Debug, Default)]
pub struct InspectModel {
    pub name: Option<String>,
    pub compilation: String,
    pub json: bool,
}

impl InputModel for InspectModel {
    fn properties() -> Vec<PropertyInfo> {
        vec![
            PropertyInfo::new("Name", PropertyType::String)
                .argument(ArgumentMeta::new("Full or short name of the type")),
            PropertyInfo::new("Compilation", PropertyType::String).option(
                OptionMeta::new()
                    .alias("c")
                    .description("Only show types declared in this compilation"),
            ),
            PropertyInfo::new("Json", PropertyType::Bool)
                .option(OptionMeta::new().description("Print matches as JSON")),
        ]
    }

    fn create() -> Result<Self, BoxError> {
        Ok(Self::default())
    }

    fn set(&mut self, property: &str, value: BoundValue) -> Result<(), BoxError> {
        match property {
            "Name" => self.name = value.into_string(),
            "Compilation" => self.compilation = value.into_string().unwrap_or_default(),
            "Json" => self.json = value.as_flag().unwrap_or_default(),
            other => return Err(format!("InspectModel has no property '{other}'").into()),
        }
        Ok(())
    }
}

/// Resolves a type name through the symbol index and prints the matches.
pub struct InspectGenerator {
    resolver: Arc<TypeResolver>,
}

impl EntryPoint for InspectGenerator {
    type Model = InspectModel;
    type Output = Result<(), BoxError>;

    const ALIAS: Option<&'static str> = Some("inspect");

    fn create(services: &Services) -> Result<Self, BoxError> {
        let resolver = services
            .get::<TypeResolver>()
            .ok_or("inspect needs a symbol index (use --index or KILN_INDEX to point at one)")?;
        Ok(Self { resolver })
    }

    fn generate(self, model: InspectModel) -> Self::Output {
        let Some(name) = model.name.filter(|n| !n.is_empty()) else {
            return Err("a type name is required".into());
        };
        let compilation = Some(model.compilation.as_str()).filter(|c| !c.is_empty());

        let report = ops::types(&self.resolver, &name, compilation);
        if report.matches.is_empty() {
            return Err(format!("no type named '{name}' was found").into());
        }

        if model.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}

impl Generator for InspectGenerator {}

#[cfg(test)]
mod tests {
    use kiln_core::{Error, GeneratorRegistry, Invoker};
    use kiln_symbols::{Compilation, TypeSymbol};

    use super::*;

    fn invoker(with_index: bool) -> Invoker {
        let mut services = Services::new();
        if with_index {
            let compilations = vec![
                Compilation::new("web").with_type(TypeSymbol::new("Shop::Models::Product")),
                Compilation::new("legacy").with_type(TypeSymbol::new("Old::Product")),
            ];
            services.insert(TypeResolver::new(compilations));
        }
        let registry = GeneratorRegistry::new(vec![crate::generators::builtin()]);
        Invoker::new(Arc::new(registry), services)
    }

    fn message(err: Error) -> String {
        match err {
            Error::Invocation { message } => message,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_inspect_is_registered() {
        let registry = GeneratorRegistry::new(vec![crate::generators::builtin()]);
        let inspect = registry.resolve("Inspect").unwrap();
        let (_, bindings) = Invoker::generator_command(&inspect).unwrap();

        let templates: Vec<_> = bindings.iter().map(|b| b.template()).collect();
        assert_eq!(templates, vec!["name", "--compilation|-c", "--json"]);
    }

    #[test]
    fn test_inspect_finds_type() {
        assert!(invoker(true).run(["inspect", "Product"]).is_ok());
        assert!(invoker(true).run(["inspect", "Product", "-c", "web", "--json"]).is_ok());
    }

    #[test]
    fn test_inspect_filters_by_compilation() {
        let err = invoker(true)
            .run(["inspect", "Product", "--compilation", "data"])
            .unwrap_err();
        assert_eq!(message(err), "no type named 'Product' was found");
    }

    #[test]
    fn test_inspect_requires_name() {
        let err = invoker(true).run(["inspect"]).unwrap_err();
        assert_eq!(message(err), "a type name is required");
    }

    #[test]
    fn test_inspect_without_index() {
        let err = invoker(false).run(["inspect", "Product"]).unwrap_err();
        assert!(message(err).starts_with("inspect needs a symbol index"));
    }
}
