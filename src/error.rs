//! Errors reported by route construction, URL building and route introspection.
//!
//! Registration never fails eagerly: a malformed builder call stores its error
//! on the route, which then never matches. The error is reported by
//! [`RouteInfo::get_error`](crate::RouteInfo::get_error), by URL building and by
//! the template getters.

use std::fmt;

/// The error type of this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A template has an unmatched `{` or `}`.
    #[error("unbalanced braces in {0:?}")]
    UnbalancedBraces(String),

    /// A placeholder is `{}` or `{name:}`.
    #[error("missing name or pattern in {0:?}")]
    MissingNameOrPattern(String),

    /// The expanded template is not a valid regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// Path and path prefix templates must be empty or begin with `/`.
    #[error("path must start with a slash, got {0:?}")]
    PathMustStartWithSlash(String),

    /// The same variable is declared by two templates of one route.
    #[error("duplicated route variable {0:?}")]
    DuplicatedVariable(String),

    /// A call taking key/value pairs received an odd number of arguments.
    #[error("number of parameters must be multiple of 2, got {0}")]
    OddPairs(usize),

    /// A header matcher was given a name that is not a valid header name.
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    /// A methods matcher was given something that is not an HTTP method.
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    /// `name` was called twice on the same route.
    #[error("route already has name {0:?}, can't set {1:?}")]
    NameAlreadySet(String, String),

    /// URL building did not receive a value for a declared variable.
    #[error("missing route variable {0:?}")]
    MissingVariable(String),

    /// URL building received a value that doesn't satisfy the variable's pattern.
    #[error("variable {value:?} doesn't match, expected {expected:?}")]
    VariableMismatch {
        /// The offending value.
        value: String,
        /// The anchored pattern the value was checked against.
        expected: String,
    },

    /// The route doesn't have a host template.
    #[error("route doesn't have a host")]
    NoHost,

    /// The route doesn't have a path template.
    #[error("route doesn't have a path")]
    NoPath,

    /// The route doesn't have a methods matcher.
    #[error("route doesn't have methods")]
    NoMethods,

    /// The route doesn't have query templates.
    #[error("route doesn't have queries")]
    NoQueries,

    /// No metadata was attached under the requested key.
    #[error("key not found in metadata: {0:?}")]
    MetadataKeyNotFound(String),

    /// Metadata exists under the key but holds a value of another type.
    #[error("metadata value for {0:?} has a different type")]
    MetadataTypeMismatch(String),
}

/// A specialized `Result` type for route operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a request failed to match, used to pick the fallback handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// A route matched everything but the request method.
    MethodMismatch,
    /// No route matched.
    NotFound,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::MethodMismatch => f.write_str("method is not allowed"),
            MatchError::NotFound => f.write_str("no matching route was found"),
        }
    }
}

impl std::error::Error for MatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::MissingVariable("id".into()).to_string(),
            r#"missing route variable "id""#
        );
        assert_eq!(
            Error::VariableMismatch {
                value: "abc".into(),
                expected: "^[0-9]+$".into()
            }
            .to_string(),
            r#"variable "abc" doesn't match, expected "^[0-9]+$""#
        );
        assert_eq!(MatchError::MethodMismatch.to_string(), "method is not allowed");
    }
}
