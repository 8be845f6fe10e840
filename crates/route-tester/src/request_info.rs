//! Incoming request assertions.

use http::Method;
use route_tester_routing::{
    eq_ignore_case, format_value, HttpContext, RouteCollection, RouteData, RouteHandler,
    RouteTable, RouteValues,
};
use tracing::debug;

use crate::compare::values_equal;
use crate::context::TestHttpContext;
use crate::error::{RouteTestError, RouteTestResult};

/// How the route table handled a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No route accepted the request.
    NoMatch,
    /// An ignore route accepted the request.
    Ignored(RouteData),
    /// A page route accepted the request.
    PageRoute(RouteData),
    /// A route with some other handler accepted the request.
    OtherHandler(RouteData),
}

impl Resolution {
    fn from_route_data(data: Option<RouteData>) -> Self {
        match data {
            None => Self::NoMatch,
            Some(data) => match data.handler() {
                RouteHandler::StopRouting => Self::Ignored(data),
                RouteHandler::Page(_) => Self::PageRoute(data),
                RouteHandler::Custom(_) => Self::OtherHandler(data),
            },
        }
    }

    /// The matched route data, if any route matched.
    #[must_use]
    pub fn route_data(&self) -> Option<&RouteData> {
        match self {
            Self::NoMatch => None,
            Self::Ignored(data) | Self::PageRoute(data) | Self::OtherHandler(data) => Some(data),
        }
    }

    /// Returns true if any route matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// An incoming request to resolve against the route table.
///
/// Created by [`RouteTester::with_incoming_request`](crate::RouteTester::with_incoming_request).
/// Every assertion resolves the request afresh, so changes made through
/// [`http_context_mut`](Self::http_context_mut) are seen by the next one.
#[derive(Debug)]
pub struct RequestInfo<'a, R: RouteTable + ?Sized = RouteCollection> {
    routes: &'a R,
    request_url: String,
    http_context: TestHttpContext,
}

impl<'a, R: RouteTable + ?Sized> RequestInfo<'a, R> {
    pub(crate) fn new(routes: &'a R, request_url: &str, method: Method) -> Self {
        Self {
            routes,
            request_url: request_url.to_string(),
            http_context: TestHttpContext::new(Some(request_url), method),
        }
    }

    /// The URL as supplied by the test.
    #[must_use]
    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    /// The request context the URL is resolved with.
    #[must_use]
    pub fn http_context(&self) -> &TestHttpContext {
        &self.http_context
    }

    /// Mutable access to the request context, for constraints that read it.
    pub fn http_context_mut(&mut self) -> &mut TestHttpContext {
        &mut self.http_context
    }

    /// Replaces the request context.
    pub fn set_http_context(&mut self, http_context: TestHttpContext) {
        self.http_context = http_context;
    }

    /// Resolves the request against the route table.
    #[must_use]
    pub fn resolve(&self) -> Resolution {
        let resolution = Resolution::from_route_data(self.routes.resolve(&self.http_context));
        debug!(
            url = %self.request_url,
            method = %self.http_context.http_method(),
            route = resolution.route_data().map(RouteData::route_url),
            "resolved request"
        );
        resolution
    }

    /// Asserts that no route matches the request.
    pub fn should_match_no_route(&self) -> RouteTestResult<()> {
        if self.resolve().is_match() {
            return Err(RouteTestError::assertion(format!(
                "A matching route was found (for url: \"{}\").",
                self.request_url
            )));
        }
        Ok(())
    }

    /// Asserts that an ignore route matches the request.
    pub fn should_be_ignored(&self) -> RouteTestResult<()> {
        match self.resolve() {
            Resolution::Ignored(_) => Ok(()),
            _ => Err(RouteTestError::assertion(format!(
                "The request was not ignored (for url: \"{}\").",
                self.request_url
            ))),
        }
    }

    /// Asserts that a page route for `expected_virtual_path` matches the
    /// request, and that it extracted no route values.
    pub fn should_match_page_route(&self, expected_virtual_path: &str) -> RouteTestResult<()> {
        self.should_match_page_route_with_values(expected_virtual_path, RouteValues::new())
    }

    /// Asserts that a page route for `expected_virtual_path` matches the
    /// request with the expected route values.
    ///
    /// The virtual path and the values are compared without regard to case;
    /// values compare by their string form, so `33` matches `"33"`. Keys
    /// present in the match but not in `expected_values` are allowed as long
    /// as at least one value is expected.
    pub fn should_match_page_route_with_values(
        &self,
        expected_virtual_path: &str,
        expected_values: impl Into<RouteValues>,
    ) -> RouteTestResult<()> {
        if expected_virtual_path.is_empty() {
            return Err(RouteTestError::invalid_argument(
                "expected_virtual_path",
                "Expected virtual path cannot be null or empty.",
            ));
        }
        let expected_values = expected_values.into();

        let data = match self.resolve() {
            Resolution::NoMatch => {
                return Err(RouteTestError::assertion(format!(
                    "No matching route was found (for url: \"{}\").",
                    self.request_url
                )));
            }
            Resolution::Ignored(data)
            | Resolution::PageRoute(data)
            | Resolution::OtherHandler(data) => data,
        };

        let Some(page) = data.handler().as_page() else {
            return Err(RouteTestError::assertion(format!(
                "RouteHandler is not a PageRouteHandler but a \"{}\".",
                data.handler().type_name()
            )));
        };

        if !eq_ignore_case(page.virtual_path(), expected_virtual_path) {
            return Err(RouteTestError::assertion(format!(
                "Resolved path is: \"{}\", expected: \"{expected_virtual_path}\".",
                page.virtual_path()
            )));
        }

        self.check_route_values(data.values(), &expected_values)
    }

    fn check_route_values(
        &self,
        actual: &RouteValues,
        expected: &RouteValues,
    ) -> RouteTestResult<()> {
        let url = &self.request_url;

        if expected.is_empty() {
            if !actual.is_empty() {
                return Err(RouteTestError::assertion(format!(
                    "Route values mismatch. Expected 0 route values, but was: {} route values (for url: \"{url}\").",
                    actual.len()
                )));
            }
            return Ok(());
        }

        for (key, expected_value) in expected {
            let Some(actual_value) = actual.get(key) else {
                return Err(RouteTestError::assertion(format!(
                    "Route values mismatch. Expected route value with key \"{key}\" was not found (for url: \"{url}\")."
                )));
            };
            if !values_equal(actual_value, expected_value) {
                return Err(RouteTestError::assertion(format!(
                    "Route values mismatch. Expected: route value with key \"{key}\" and value \"{}\", \
                     but was: route value with key \"{key}\" and value \"{}\" (for url: \"{url}\").",
                    format_value(expected_value),
                    format_value(actual_value)
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_tester_routing::{json, Route};

    fn routes() -> RouteCollection {
        let mut routes = RouteCollection::new();
        routes
            .ignore("content/{*content}")
            .unwrap()
            .map_page_route("Cookies", "cookies", "~/pages/cookies.aspx")
            .unwrap()
            .map_page_route_with_defaults(
                "ItemDetails",
                "{culture}/items/{id}",
                "~/pages/items/details.aspx",
                RouteValues::new().with("culture", "en-US"),
            )
            .unwrap()
            .add(Route::new("api/{*rest}", RouteHandler::custom("ApiRouteHandler")).unwrap());
        routes
    }

    fn request<'a>(routes: &'a RouteCollection, url: &str) -> RequestInfo<'a> {
        RequestInfo::new(routes, url, Method::GET)
    }

    #[test]
    fn test_resolution_variants() {
        let routes = routes();
        assert_eq!(request(&routes, "nowhere/at/all").resolve(), Resolution::NoMatch);
        assert!(matches!(request(&routes, "content/site.css").resolve(), Resolution::Ignored(_)));
        assert!(matches!(request(&routes, "cookies").resolve(), Resolution::PageRoute(_)));
        assert!(matches!(request(&routes, "api/orders").resolve(), Resolution::OtherHandler(_)));
    }

    #[test]
    fn test_should_match_no_route() {
        let routes = routes();
        request(&routes, "nowhere/at/all").should_match_no_route().unwrap();

        let err = request(&routes, "cookies").should_match_no_route().unwrap_err();
        assert_eq!(err.to_string(), "A matching route was found (for url: \"cookies\").");
    }

    #[test]
    fn test_should_be_ignored() {
        let routes = routes();
        request(&routes, "content/images/logo.png").should_be_ignored().unwrap();

        let err = request(&routes, "cookies").should_be_ignored().unwrap_err();
        assert_eq!(err.to_string(), "The request was not ignored (for url: \"cookies\").");

        let err = request(&routes, "nowhere/at/all").should_be_ignored().unwrap_err();
        assert!(err.is_assertion());
    }

    #[test]
    fn test_page_route_without_values() {
        let routes = routes();
        request(&routes, "cookies")
            .should_match_page_route("~/pages/cookies.aspx")
            .unwrap();
        request(&routes, "/COOKIES")
            .should_match_page_route("~/Pages/Cookies.aspx")
            .unwrap();
    }

    #[test]
    fn test_page_route_empty_virtual_path() {
        let routes = routes();
        let err = request(&routes, "cookies").should_match_page_route("").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.parameter(), Some("expected_virtual_path"));
    }

    #[test]
    fn test_page_route_no_match() {
        let routes = routes();
        let err = request(&routes, "nowhere/at/all")
            .should_match_page_route("~/pages/cookies.aspx")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No matching route was found (for url: \"nowhere/at/all\")."
        );
    }

    #[test]
    fn test_page_route_wrong_handler() {
        let routes = routes();
        let err = request(&routes, "content/site.css")
            .should_match_page_route("~/pages/cookies.aspx")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "RouteHandler is not a PageRouteHandler but a \"StopRoutingHandler\"."
        );

        let err = request(&routes, "api/orders")
            .should_match_page_route("~/pages/cookies.aspx")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "RouteHandler is not a PageRouteHandler but a \"ApiRouteHandler\"."
        );
    }

    #[test]
    fn test_page_route_wrong_path() {
        let routes = routes();
        let err = request(&routes, "cookies")
            .should_match_page_route("~/pages/biscuits.aspx")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resolved path is: \"~/pages/cookies.aspx\", expected: \"~/pages/biscuits.aspx\"."
        );
    }

    #[test]
    fn test_page_route_with_values() {
        let routes = routes();
        let info = request(&routes, "de-DE/items/33");

        info.should_match_page_route_with_values(
            "~/pages/items/details.aspx",
            RouteValues::new().with("culture", "de-de").with("id", 33),
        )
        .unwrap();

        // A subset of the matched values is enough.
        info.should_match_page_route_with_values("~/pages/items/details.aspx", [("id", "33")])
            .unwrap();
    }

    #[test]
    fn test_unexpected_values() {
        let routes = routes();
        let err = request(&routes, "de-DE/items/33")
            .should_match_page_route("~/pages/items/details.aspx")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Route values mismatch. Expected 0 route values, but was: 2 route values (for url: \"de-DE/items/33\")."
        );
    }

    #[test]
    fn test_missing_value() {
        let routes = routes();
        let err = request(&routes, "cookies")
            .should_match_page_route_with_values("~/pages/cookies.aspx", [("id", 1)])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Route values mismatch. Expected route value with key \"id\" was not found (for url: \"cookies\")."
        );
    }

    #[test]
    fn test_value_mismatch() {
        let routes = routes();
        let err = request(&routes, "de-DE/items/33")
            .should_match_page_route_with_values(
                "~/pages/items/details.aspx",
                [("culture", json!("de-DE")), ("id", json!(34))],
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Route values mismatch. Expected: route value with key \"id\" and value \"34\", \
             but was: route value with key \"id\" and value \"33\" (for url: \"de-DE/items/33\")."
        );
    }

    #[test]
    fn test_context_changes_are_seen() {
        let mut routes = RouteCollection::new();
        let route = Route::new("secret", RouteHandler::page("~/pages/secret.aspx"))
            .unwrap()
            .with_constraint(
                "secret",
                route_tester_routing::RouteConstraint::custom(|ctx, _, _, _| {
                    ctx.items().get("role") == Some(&json!("admin"))
                }),
            );
        routes.add(route);

        let mut info = request(&routes, "secret");
        info.should_match_no_route().unwrap();

        info.http_context_mut().items_mut().insert("role", "admin");
        info.should_match_page_route("~/pages/secret.aspx").unwrap();
    }
}
