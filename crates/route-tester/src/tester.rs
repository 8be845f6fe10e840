//! The entry point for route tests.

use http::Method;
use route_tester_routing::{RouteCollection, RouteTable, RouteValues};

use crate::error::{RouteTestError, RouteTestResult};
use crate::request_info::RequestInfo;
use crate::route_info::RouteInfo;

/// Holds the route table under test and hands out assertion engines.
///
/// One tester can serve any number of scenarios; each call to
/// [`with_route_info`](Self::with_route_info) or
/// [`with_incoming_request`](Self::with_incoming_request) starts a fresh one.
///
/// # Example
///
/// ```rust
/// use route_tester::RouteTester;
/// use route_tester_routing::RouteCollection;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut routes = RouteCollection::new();
/// routes
///     .ignore("content/{*content}")?
///     .map_page_route("Cookies", "cookies", "~/pages/cookies.aspx")?;
///
/// let tester = RouteTester::new(&routes)?;
///
/// tester.with_incoming_request("content/site.css")?.should_be_ignored()?;
/// tester.with_incoming_request("cookies")?.should_match_page_route("~/pages/cookies.aspx")?;
/// tester.with_route_info("Cookies")?.should_generate_url("/cookies")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouteTester<'a, R: RouteTable + ?Sized = RouteCollection> {
    routes: &'a R,
}

impl<'a, R: RouteTable + ?Sized> RouteTester<'a, R> {
    /// Creates a tester over a non-empty route table.
    pub fn new(routes: &'a R) -> RouteTestResult<Self> {
        Self::from_option(Some(routes))
    }

    /// Creates a tester over a route table that may be absent.
    ///
    /// Fails when `routes` is `None` or holds no routes.
    pub fn from_option(routes: Option<&'a R>) -> RouteTestResult<Self> {
        let routes = routes.ok_or_else(|| {
            RouteTestError::invalid_argument("routes", "The RouteCollection cannot be null.")
        })?;
        if routes.is_empty() {
            return Err(RouteTestError::invalid_argument(
                "routes",
                "There are no routes in the RouteCollection.",
            ));
        }
        Ok(Self { routes })
    }

    /// The route table under test.
    #[must_use]
    pub fn routes(&self) -> &'a R {
        self.routes
    }

    /// Starts an outgoing-URL scenario for a named route with no values.
    pub fn with_route_info(&self, route_name: &str) -> RouteTestResult<RouteInfo<'a, R>> {
        self.with_route_info_values(route_name, RouteValues::new())
    }

    /// Starts an outgoing-URL scenario for a named route and its values.
    ///
    /// `route_values` accepts anything convertible into [`RouteValues`]: the
    /// builder, an array of pairs, or an index map. `null` values are kept.
    pub fn with_route_info_values(
        &self,
        route_name: &str,
        route_values: impl Into<RouteValues>,
    ) -> RouteTestResult<RouteInfo<'a, R>> {
        if route_name.trim().is_empty() {
            return Err(RouteTestError::invalid_argument(
                "route_name",
                "Route name cannot be null or empty.",
            ));
        }
        Ok(RouteInfo::new(self.routes, route_name, route_values.into()))
    }

    /// Starts an incoming-request scenario for a GET of `url`.
    pub fn with_incoming_request(&self, url: &str) -> RouteTestResult<RequestInfo<'a, R>> {
        self.with_incoming_request_method(url, Method::GET.as_str())
    }

    /// Starts an incoming-request scenario for `url` with an explicit HTTP method.
    ///
    /// Method names are upper-cased, so `"post"` and `"POST"` are the same.
    pub fn with_incoming_request_method(
        &self,
        url: &str,
        http_method: &str,
    ) -> RouteTestResult<RequestInfo<'a, R>> {
        if url.trim().is_empty() {
            return Err(RouteTestError::invalid_argument("url", "Url cannot be null or empty."));
        }
        let normalized = http_method.trim().to_uppercase();
        let method = Method::from_bytes(normalized.as_bytes()).map_err(|_| {
            RouteTestError::invalid_argument(
                "http_method",
                format!("Invalid HTTP method: \"{http_method}\"."),
            )
        })?;
        Ok(RequestInfo::new(self.routes, url, method))
    }
}

impl<R: RouteTable + ?Sized> Clone for RouteTester<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: RouteTable + ?Sized> Copy for RouteTester<'_, R> {}
