//! The route table abstraction consumed by the assertion engines.

use std::sync::Arc;

use crate::context::HttpContext;
use crate::error::RoutingError;
use crate::handler::RouteHandler;
use crate::values::RouteValues;

/// The outcome of resolving a request against a route table.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteData {
    route_url: String,
    handler: RouteHandler,
    values: RouteValues,
}

impl RouteData {
    /// Creates route data for a matched route.
    pub fn new(route_url: impl Into<String>, handler: RouteHandler, values: RouteValues) -> Self {
        Self {
            route_url: route_url.into(),
            handler,
            values,
        }
    }

    /// The URL pattern of the matched route.
    #[must_use]
    pub fn route_url(&self) -> &str {
        &self.route_url
    }

    /// The matched route's handler.
    #[must_use]
    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    /// Values extracted from the URL, completed with the route's defaults.
    #[must_use]
    pub fn values(&self) -> &RouteValues {
        &self.values
    }
}

/// An ordered set of routes that can resolve requests and generate URLs.
pub trait RouteTable {
    /// Number of routes in the table.
    fn len(&self) -> usize;

    /// Returns true if the table holds no routes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves a request to the first matching route.
    fn resolve(&self, ctx: &dyn HttpContext) -> Option<RouteData>;

    /// Generates the URL for a named route.
    ///
    /// Returns `Ok(None)` when the route exists but cannot produce a URL from
    /// the supplied values.
    fn generate(
        &self,
        ctx: &dyn HttpContext,
        route_name: &str,
        values: &RouteValues,
    ) -> Result<Option<String>, RoutingError>;
}

impl<T: RouteTable + ?Sized> RouteTable for &T {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn resolve(&self, ctx: &dyn HttpContext) -> Option<RouteData> {
        (**self).resolve(ctx)
    }

    fn generate(
        &self,
        ctx: &dyn HttpContext,
        route_name: &str,
        values: &RouteValues,
    ) -> Result<Option<String>, RoutingError> {
        (**self).generate(ctx, route_name, values)
    }
}

impl<T: RouteTable + ?Sized> RouteTable for Box<T> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn resolve(&self, ctx: &dyn HttpContext) -> Option<RouteData> {
        (**self).resolve(ctx)
    }

    fn generate(
        &self,
        ctx: &dyn HttpContext,
        route_name: &str,
        values: &RouteValues,
    ) -> Result<Option<String>, RoutingError> {
        (**self).generate(ctx, route_name, values)
    }
}

impl<T: RouteTable + ?Sized> RouteTable for Arc<T> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn resolve(&self, ctx: &dyn HttpContext) -> Option<RouteData> {
        (**self).resolve(ctx)
    }

    fn generate(
        &self,
        ctx: &dyn HttpContext,
        route_name: &str,
        values: &RouteValues,
    ) -> Result<Option<String>, RoutingError> {
        (**self).generate(ctx, route_name, values)
    }
}
