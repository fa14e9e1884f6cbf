//! List operation - the generator catalogue.

use kiln_core::{GeneratorRegistry, Invoker};

use crate::reports::{BindingInfo, GeneratorInfo, LibraryGroup, ListReport};

/// Collect every discovered generator, grouped by library in scan order.
pub fn list(registry: &GeneratorRegistry) -> ListReport {
    let mut libraries: Vec<LibraryGroup> = Vec::new();

    for descriptor in registry.list().iter() {
        let (bindings, problem) = match Invoker::generator_command(descriptor) {
            Ok((_, bindings)) => (
                bindings
                    .iter()
                    .map(|b| BindingInfo {
                        template: b.template().to_string(),
                        description: b.description().to_string(),
                    })
                    .collect(),
                None,
            ),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };

        let info = GeneratorInfo {
            name: descriptor.name().to_string(),
            type_name: descriptor.type_name(),
            model: descriptor.model().short_name().to_string(),
            bindings,
            problem,
        };

        match libraries
            .iter_mut()
            .find(|group| group.name == descriptor.library())
        {
            Some(group) => group.generators.push(info),
            None => libraries.push(LibraryGroup {
                name: descriptor.library().to_string(),
                generators: vec![info],
            }),
        }
    }

    ListReport { libraries }
}
