//! List command report data structures.

use super::output::{Output, Report};

/// The generator catalogue.
#[derive(Debug)]
pub struct ListReport {
    /// Libraries in scan order, each with at least one generator.
    pub libraries: Vec<LibraryGroup>,
}

#[derive(Debug)]
pub struct LibraryGroup {
    pub name: String,
    pub generators: Vec<GeneratorInfo>,
}

#[derive(Debug)]
pub struct GeneratorInfo {
    pub name: String,
    pub type_name: String,
    /// Short name of the input model.
    pub model: String,
    pub bindings: Vec<BindingInfo>,
    /// Why the generator's command could not be built, if it could not.
    pub problem: Option<String>,
}

#[derive(Debug)]
pub struct BindingInfo {
    pub template: String,
    pub description: String,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Generators");

        if self.libraries.is_empty() {
            out.newline();
            out.preformatted("No generators found. Register a library to make its generators available.");
            return;
        }

        for group in &self.libraries {
            out.newline();
            out.section(&group.name);

            for generator in &group.generators {
                out.list_item(&format!("{} ({})", generator.name, generator.model));
                out.detail("type", &generator.type_name);

                if let Some(problem) = &generator.problem {
                    out.warning(&format!("{}: {}", generator.name, problem));
                    continue;
                }
                for binding in &generator.bindings {
                    out.detail(&binding.template, &binding.description);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    fn render(report: &ListReport) -> String {
        let mut out = BufferOutput::default();
        report.render(&mut out);
        out.text
    }

    #[test]
    fn test_render_empty() {
        let report = ListReport {
            libraries: Vec::new(),
        };

        insta::assert_snapshot!(render(&report), @r"
        Generators
        ==========

        No generators found. Register a library to make its generators available.
        ");
    }

    #[test]
    fn test_render_groups() {
        let report = ListReport {
            libraries: vec![
                LibraryGroup {
                    name: "mvc".into(),
                    generators: vec![
                        GeneratorInfo {
                            name: "Controller".into(),
                            type_name: "Mvc::ControllerGenerator".into(),
                            model: "ControllerModel".into(),
                            bindings: vec![
                                BindingInfo {
                                    template: "name".into(),
                                    description: "Controller name".into(),
                                },
                                BindingInfo {
                                    template: "--area|-a".into(),
                                    description: String::new(),
                                },
                            ],
                            problem: None,
                        },
                        GeneratorInfo {
                            name: "View".into(),
                            type_name: "Mvc::ViewGenerator".into(),
                            model: "ViewModel".into(),
                            bindings: Vec::new(),
                            problem: Some("duplicate spelling '-h'".into()),
                        },
                    ],
                },
            ],
        };

        insta::assert_snapshot!(render(&report), @r"
        Generators
        ==========

        mvc:
          - Controller (ControllerModel)
              type                     Mvc::ControllerGenerator
              name                     Controller name
              --area|-a
          - View (ViewModel)
              type                     Mvc::ViewGenerator
        warning: View: duplicate spelling '-h'
        ");
    }
}
