//! Error layers produced while a generator runs, and their flattening.
//!
//! A generator can fail several calls away from the action the user asked
//! for: it may dispatch to another generator ([`InvocationFault`]) or run
//! several independent steps and gather their failures ([`ErrorBundle`]).
//! These layers only carry structure. When a run fails, [`flatten`] peels
//! them so the user sees the error that actually happened.

use std::{error::Error as StdError, fmt};

/// Boxed error type accepted from generator code.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A failure that happened inside a generator invoked on behalf of another.
#[derive(Debug)]
pub struct InvocationFault {
    generator: String,
    source: BoxError,
}

impl InvocationFault {
    pub fn new(generator: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            generator: generator.into(),
            source: source.into(),
        }
    }

    /// Name of the generator that failed.
    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn into_source(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for InvocationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generator '{}' failed: {}", self.generator, self.source)
    }
}

impl StdError for InvocationFault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Several errors gathered from independent steps.
///
/// The first error is the base error; it is the one reported when a run
/// fails with a bundle.
#[derive(Debug, Default)]
pub struct ErrorBundle {
    errors: Vec<BoxError>,
}

impl ErrorBundle {
    pub fn new(errors: Vec<BoxError>) -> Self {
        Self { errors }
    }

    /// Gather the failures of several results.
    ///
    /// Returns `Ok(())` when every result succeeded.
    pub fn collect<I, E>(results: I) -> Result<(), ErrorBundle>
    where
        I: IntoIterator<Item = Result<(), E>>,
        E: Into<BoxError>,
    {
        let errors: Vec<BoxError> = results
            .into_iter()
            .filter_map(|r| r.err().map(Into::into))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn push(&mut self, error: impl Into<BoxError>) {
        self.errors.push(error.into());
    }

    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Take the base (first) error, or give the empty bundle back.
    pub fn into_base(mut self) -> Result<BoxError, Self> {
        if self.errors.is_empty() {
            Err(self)
        } else {
            Ok(self.errors.swap_remove(0))
        }
    }
}

impl fmt::Display for ErrorBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no errors were recorded"),
            1 => write!(f, "1 error occurred: {}", self.errors[0]),
            n => {
                write!(f, "{} errors occurred:", n)?;
                for error in &self.errors {
                    write!(f, " [{}]", error)?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for ErrorBundle {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.errors
            .first()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<Vec<BoxError>> for ErrorBundle {
    fn from(errors: Vec<BoxError>) -> Self {
        Self::new(errors)
    }
}

/// Peel [`InvocationFault`] and [`ErrorBundle`] layers off an error.
///
/// Faults give way to their source; non-empty bundles give way to their base
/// error. This repeats until neither applies, however deep the nesting.
pub fn flatten(error: BoxError) -> BoxError {
    let mut error = error;
    loop {
        error = match error.downcast::<InvocationFault>() {
            Ok(fault) => fault.into_source(),
            Err(other) => match other.downcast::<ErrorBundle>() {
                Ok(bundle) => match bundle.into_base() {
                    Ok(base) => base,
                    Err(empty) => return Box::new(empty),
                },
                Err(other) => return other,
            },
        };
    }
}

/// The message of an error after [`flatten`].
pub fn flattened_message(error: BoxError) -> String {
    flatten(error).to_string()
}
