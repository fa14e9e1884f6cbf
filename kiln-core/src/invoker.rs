//! Running one generator from a command line.

use std::{fmt, sync::Arc};

use clap::Command;
use tracing::debug;

use crate::{
    binder::{ParameterBinder, ParameterBinding},
    error::{Error, Result},
    fault::{BoxError, flattened_message},
    registry::{GeneratorDescriptor, GeneratorRegistry},
    services::{Dispatcher, Services},
};

/// Stages of one invocation. A run only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Resolved,
    Bound,
    Parsed,
    Instantiated,
    Populated,
    Invoked,
    Succeeded,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Resolved => "resolved",
            Stage::Bound => "bound",
            Stage::Parsed => "parsed",
            Stage::Instantiated => "instantiated",
            Stage::Populated => "populated",
            Stage::Invoked => "invoked",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves, binds, parses and runs generators.
#[derive(Debug, Clone)]
pub struct Invoker {
    registry: Arc<GeneratorRegistry>,
    services: Services,
    program: Option<String>,
}

impl Invoker {
    pub fn new(registry: Arc<GeneratorRegistry>, services: Services) -> Self {
        Self {
            registry,
            services,
            program: None,
        }
    }

    /// Name of the hosting program, shown before the generator name in
    /// usage and help output.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Build the command for a generator, with its bindings.
    pub fn generator_command(
        descriptor: &GeneratorDescriptor,
    ) -> Result<(Command, Vec<ParameterBinding>)> {
        let command = Command::new(descriptor.name().to_string())
            .about(format!("Run {}", descriptor.type_name()))
            .disable_version_flag(true);
        ParameterBinder::bind(descriptor.model(), command)
    }

    /// Run the generator named by the first element of `args`.
    ///
    /// The remaining elements are parsed against the generator's model.
    /// Failures after parsing are reported as a single
    /// [`Error::Invocation`] carrying the innermost meaningful message.
    pub fn run<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let name = args.first().map(String::as_str).unwrap_or_default();
        let mut run = Run::new(name);

        let descriptor = self.registry.resolve(name).inspect_err(|_| run.fail())?;
        run.advance(Stage::Resolved);

        let (command, bindings) =
            Self::generator_command(&descriptor).inspect_err(|_| run.fail())?;
        let command = match &self.program {
            Some(program) => command.bin_name(format!("{program} {}", descriptor.name())),
            None => command,
        };
        run.advance(Stage::Bound);

        let matches = command
            .try_get_matches_from(&args)
            .map_err(Error::Usage)
            .inspect_err(|_| run.fail())?;
        run.advance(Stage::Parsed);

        let mut model = descriptor.model().instantiate().map_err(|err| {
            run.fail();
            Error::ModelConstruction {
                model: descriptor.model().short_name().to_string(),
                message: err.to_string(),
            }
        })?;
        run.advance(Stage::Instantiated);

        let outcome = (|| -> std::result::Result<(), BoxError> {
            for binding in &bindings {
                model.set(binding.property(), binding.resolve(&matches))?;
            }
            run.advance(Stage::Populated);

            let mut services = self.services.clone();
            services.insert(Dispatcher::new(
                Arc::clone(&self.registry),
                self.services.clone(),
            ));
            let generator = descriptor.create(&services)?;
            let completion = generator.invoke(model);
            run.advance(Stage::Invoked);

            completion.wait()
        })();

        match outcome {
            Ok(()) => {
                run.advance(Stage::Succeeded);
                Ok(())
            }
            Err(err) => {
                run.fail();
                Err(Error::Invocation {
                    message: flattened_message(err),
                })
            }
        }
    }
}

/// Stage tracking for one run.
struct Run<'a> {
    generator: &'a str,
    stage: Stage,
}

impl<'a> Run<'a> {
    fn new(generator: &'a str) -> Self {
        Self {
            generator,
            stage: Stage::Idle,
        }
    }

    fn advance(&mut self, next: Stage) {
        debug!(
            generator = self.generator,
            from = %self.stage,
            to = %next,
            "invocation stage"
        );
        self.stage = next;
    }

    fn fail(&mut self) {
        self.advance(Stage::Failed);
    }
}
