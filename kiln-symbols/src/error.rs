use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for symbol index operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the index content and filename so error factories do not
/// need both passed around.
#[derive(Debug, Clone, Copy)]
pub struct SourceContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Find the span of a quoted value in the source.
    ///
    /// Type paths always appear as TOML strings, so the quoted form is the
    /// most precise anchor. Falls back to the first bare occurrence.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        if value.is_empty() {
            return None;
        }

        for quote in ['"', '\''] {
            let pattern = format!("{quote}{value}{quote}");
            if let Some(pos) = self.src.find(&pattern) {
                return Some(SourceSpan::from((pos + 1, value.len())));
            }
        }

        self.src
            .find(value)
            .map(|pos| SourceSpan::from((pos, value.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an invalid type name error.
    pub fn invalid_type_name_error(
        &self,
        name: &str,
        compilation: &str,
        reason: &'static str,
    ) -> Box<Error> {
        Box::new(Error::InvalidTypeName {
            src: self.named_source(),
            span: self.find_span(name),
            name: name.to_string(),
            compilation: compilation.to_string(),
            reason,
        })
    }

    /// Create a duplicate type error.
    pub fn duplicate_type_error(&self, name: &str, compilation: &str) -> Box<Error> {
        let second = self
            .src
            .match_indices(name)
            .nth(1)
            .map(|(pos, _)| SourceSpan::from((pos, name.len())));

        Box::new(Error::DuplicateType {
            src: self.named_source(),
            span: second.or_else(|| self.find_span(name)),
            name: name.to_string(),
            compilation: compilation.to_string(),
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help(
        "point --index (or KILN_INDEX) at a symbol index produced for your project"
    ))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse symbol index")]
    #[diagnostic(code(kiln::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid type name '{name}' in compilation '{compilation}'")]
    #[diagnostic(
        code(kiln::invalid_type_name),
        help("{reason}. Type names are '::'-separated identifiers, e.g. 'Shop::Models::Product'.")
    )]
    InvalidTypeName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid type name")]
        span: Option<SourceSpan>,
        name: String,
        compilation: String,
        reason: &'static str,
    },

    #[error("type '{name}' is declared twice in compilation '{compilation}'")]
    #[diagnostic(code(kiln::duplicate_type), help("remove one of the declarations"))]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        name: String,
        compilation: String,
    },

    #[error("{message}")]
    #[diagnostic(code(kiln::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
