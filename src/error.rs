use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Records all errors reported by this library.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Errors encountered while parsing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// A value was structurally invalid for the type being constructed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Conversion into a `semver` type failed.
    #[error("convert to semver: {0}")]
    Semver(#[from] semver::Error),
}

/// Errors encountered when parsing.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// The provided value was empty, which is invalid for this type.
    #[error("input was empty, which is invalid for this type")]
    Empty,

    /// The input did not match the required syntax.
    #[error("input '{input}' did not match required syntax: {error}")]
    Syntax {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The error encountered while parsing.
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,

        /// The location of the error.
        #[label("here")]
        span: SourceSpan,
    },

    /// The named field failed to parse.
    #[error("field '{field}' in input '{input}' is invalid: {error}")]
    Field {
        /// The field that failed.
        field: String,

        /// The input originally provided.
        #[source_code]
        input: String,

        /// The error encountered while parsing.
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,

        /// The location of the error.
        #[label("field")]
        span: SourceSpan,
    },
}

/// Errors encountered when a value cannot be represented by the requested type.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidArgumentError {
    /// Version components are non-negative.
    #[error("version component must not be negative, got {0}")]
    Negative(i128),

    /// Wildcard versions never carry a concrete patch number.
    #[error("wildcard version '{major}.{minor}.{patch}' must not have a concrete patch")]
    WildcardPatch {
        /// The major component.
        major: u64,
        /// The rendered minor component.
        minor: String,
        /// The concrete patch that was provided.
        patch: u64,
    },

    /// A component was specified after one that was left out.
    #[error("component '{component}' cannot be specified when the preceding component is absent")]
    AbsentBeforePresent {
        /// The name of the component that was specified.
        component: &'static str,
    },

    /// The version contains wildcards, which the target type cannot represent.
    #[error("version '{0}' contains wildcards")]
    Wildcard(String),
}

/// Return the span of `substr` inside `text`.
///
/// `substr` is expected to be a slice of `text`; otherwise the whole of `text` is spanned.
pub(crate) fn span(text: &str, substr: &str) -> (usize, usize) {
    let start = (substr.as_ptr() as usize).wrapping_sub(text.as_ptr() as usize);
    match start.checked_add(substr.len()) {
        Some(end) if end <= text.len() => (start, substr.len()),
        _ => (0, text.len()),
    }
}

/// Construct and return a new [`ParseError::Syntax`].
///
/// Provide the input, along with the part of it that failed, and the error.
///
/// ```ignore
/// error::syntax!(input => (0, 2), err);
/// ```
macro_rules! syntax {
    ($input:expr => $span:expr, $error:expr) => {
        $crate::error::ParseError::Syntax {
            input: $input.into(),
            span: $span.into(),
            error: $error.into(),
        }
    };
}
pub(crate) use syntax;

/// Construct and return a new [`ParseError::Field`].
///
/// Provide the input, along with the part of it that failed, and the error.
///
/// ```ignore
/// error::field!(input, "field_name" => (0, 2), err);
/// ```
macro_rules! field {
    ($input:expr, $field:expr => $span:expr, $error:expr) => {
        $crate::error::ParseError::Field {
            input: $input.into(),
            field: $field.into(),
            span: $span.into(),
            error: $error.into(),
        }
    };
}
pub(crate) use field;

/// Shorthand for conversion into [`Error`] and returning.
macro_rules! fatal {
    ($err:expr) => {
        return Err($crate::error::Error::from($err))
    };
}
pub(crate) use fatal;
