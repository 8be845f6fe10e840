//! Route test error types.
//!
//! Two kinds of failure are kept apart so callers can handle one without the
//! other: [`RouteTestError::InvalidArgument`] for misuse of the API, and
//! [`AssertionError`] for a route table that does not behave as expected.
//! Errors raised by the route table itself pass through unchanged as
//! [`RouteTestError::Routing`].

use route_tester_routing::RoutingError;
use thiserror::Error;

/// Result type alias using [`RouteTestError`].
pub type RouteTestResult<T> = Result<T, RouteTestError>;

/// A failed routing expectation.
///
/// Independent of any test framework's own assertion type; the message names
/// the expected and actual values and, for incoming requests, the URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by [`RouteTester`](crate::RouteTester) and its engines.
#[derive(Error, Debug)]
pub enum RouteTestError {
    /// A required argument was missing, empty, or malformed.
    #[error("{message} (parameter: {parameter})")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The route table did not behave as expected.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// The route table itself failed.
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

impl RouteTestError {
    pub(crate) fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    pub(crate) fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(AssertionError::new(message))
    }

    /// Returns true for a failed expectation.
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Returns true for API misuse.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns the assertion failure, if this is one.
    #[must_use]
    pub fn as_assertion(&self) -> Option<&AssertionError> {
        match self {
            Self::Assertion(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the offending parameter for API misuse.
    #[must_use]
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }
}
