//! Route constraints.
//!
//! A constraint is attached to a route under a parameter name and must accept
//! the request (or the values being turned into a URL) for the route to be
//! used. Three kinds are supported: a regular expression over the
//! parameter's value, a set of allowed HTTP methods, and an arbitrary
//! closure that can inspect the request context.

use std::fmt;
use std::sync::Arc;

use http::Method;
use regex::{Regex, RegexBuilder};

use crate::context::HttpContext;
use crate::error::RoutingError;
use crate::values::RouteValues;

/// Whether a route is being matched against a request or used to build a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDirection {
    /// Matching an incoming request.
    IncomingRequest,
    /// Generating an outgoing URL.
    UrlGeneration,
}

/// Signature of a custom constraint.
pub type ConstraintFn =
    dyn Fn(&dyn HttpContext, &str, &RouteValues, RouteDirection) -> bool + Send + Sync;

/// A condition a route parameter (or the request) must satisfy.
///
/// # Example
///
/// ```rust
/// use route_tester_routing::RouteConstraint;
/// use http::Method;
///
/// let digits = RouteConstraint::pattern("id", r"\d+").unwrap();
/// let reads = RouteConstraint::methods([Method::GET, Method::HEAD]);
/// assert!(reads.allows_method(&Method::HEAD));
/// assert!(!reads.allows_method(&Method::POST));
/// # let _ = digits;
/// ```
#[derive(Clone)]
pub enum RouteConstraint {
    /// The parameter's value must match the whole expression, ignoring case.
    Pattern(Regex),
    /// The request must use one of these methods. Only checked for incoming requests.
    HttpMethod(Vec<Method>),
    /// A caller-supplied check.
    Custom(Arc<ConstraintFn>),
}

impl RouteConstraint {
    /// Compiles a regular-expression constraint for a parameter.
    ///
    /// The expression is anchored at both ends and matched case-insensitively.
    pub fn pattern(parameter: &str, expression: &str) -> Result<Self, RoutingError> {
        RegexBuilder::new(&format!("^(?:{expression})$"))
            .case_insensitive(true)
            .build()
            .map(Self::Pattern)
            .map_err(|e| RoutingError::invalid_constraint(parameter, e.to_string()))
    }

    /// Creates an HTTP method constraint.
    pub fn methods(methods: impl IntoIterator<Item = Method>) -> Self {
        Self::HttpMethod(methods.into_iter().collect())
    }

    /// Creates a custom constraint from a closure.
    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&dyn HttpContext, &str, &RouteValues, RouteDirection) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(check))
    }

    /// Returns true if an HTTP method constraint admits `method`.
    ///
    /// Always true for the other constraint kinds.
    #[must_use]
    pub fn allows_method(&self, method: &Method) -> bool {
        match self {
            Self::HttpMethod(allowed) => allowed.contains(method),
            _ => true,
        }
    }

    /// Evaluates the constraint.
    #[must_use]
    pub fn matches(
        &self,
        ctx: &dyn HttpContext,
        parameter: &str,
        values: &RouteValues,
        direction: RouteDirection,
    ) -> bool {
        match self {
            Self::Pattern(regex) => {
                let value = values.get_str(parameter).unwrap_or_default();
                regex.is_match(&value)
            }
            Self::HttpMethod(_) => {
                direction == RouteDirection::UrlGeneration || self.allows_method(ctx.http_method())
            }
            Self::Custom(check) => check(ctx, parameter, values, direction),
        }
    }
}

impl fmt::Debug for RouteConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::HttpMethod(methods) => f.debug_tuple("HttpMethod").field(methods).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
