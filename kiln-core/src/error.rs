//! Errors surfaced by discovery, binding and invocation.

/// Result type for kiln-core operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no generator named '{name}' was found")]
    NotFound { name: String },

    #[error(
        "the name '{name}' matches more than one generator (found in {})",
        .libraries.join(", ")
    )]
    AmbiguousName {
        name: String,
        libraries: Vec<String>,
    },

    #[error("property '{property}' of model '{model}' reuses the command-line spelling '{spelling}'")]
    BindingConflict {
        model: String,
        property: String,
        spelling: String,
    },

    /// A help request or a usage error reported by the argument parser.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("could not create model '{model}': {message}")]
    ModelConstruction { model: String, message: String },

    #[error("{message}")]
    Invocation { message: String },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Help and version requests exit with 0, usage errors with 2, and
    /// everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(err) => err.exit_code(),
            _ => 1,
        }
    }

    /// Whether this is a help or version request rather than a failure.
    pub fn is_help(&self) -> bool {
        matches!(self, Error::Usage(err) if !err.use_stderr())
    }

    /// One-line description of the error.
    ///
    /// Usage errors render as several lines of parser output; only the
    /// first non-empty line is kept, without its `error: ` prefix.
    pub fn summary(&self) -> String {
        match self {
            Error::Usage(err) => {
                let rendered = err.render().to_string();
                let line = rendered
                    .lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or_default();
                line.strip_prefix("error: ").unwrap_or(line).to_string()
            }
            other => other.to_string(),
        }
    }
}
