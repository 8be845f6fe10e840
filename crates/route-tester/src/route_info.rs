//! Outgoing URL assertions.

use route_tester_routing::{RouteCollection, RouteTable, RouteValues};
use tracing::debug;

use crate::context::TestHttpContext;
use crate::error::{RouteTestError, RouteTestResult};

/// A named route plus the values to generate its URL from.
///
/// Created by [`RouteTester::with_route_info`](crate::RouteTester::with_route_info).
/// URLs are generated against a root request unless another context is set.
#[derive(Debug)]
pub struct RouteInfo<'a, R: RouteTable + ?Sized = RouteCollection> {
    routes: &'a R,
    route_name: String,
    route_values: RouteValues,
    http_context: TestHttpContext,
}

impl<'a, R: RouteTable + ?Sized> RouteInfo<'a, R> {
    pub(crate) fn new(routes: &'a R, route_name: &str, route_values: RouteValues) -> Self {
        Self {
            routes,
            route_name: route_name.to_string(),
            route_values,
            http_context: TestHttpContext::root(),
        }
    }

    /// The route name this scenario generates for.
    #[must_use]
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// The values supplied for generation.
    #[must_use]
    pub fn route_values(&self) -> &RouteValues {
        &self.route_values
    }

    /// The request context used for generation.
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

    /// Generates the URL without asserting anything about it.
    ///
    /// Returns `Ok(None)` when the route cannot produce a URL from the values,
    /// and a routing error when no route has this name.
    pub fn generated_url(&self) -> RouteTestResult<Option<String>> {
        let url = self
            .routes
            .generate(&self.http_context, &self.route_name, &self.route_values)?;
        debug!(
            route = %self.route_name,
            values = %self.route_values,
            url = ?url,
            "generated url"
        );
        Ok(url)
    }

    /// Asserts that the route generates exactly `expected_url`.
    ///
    /// The comparison is case-sensitive. A blank `expected_url` is an
    /// argument error.
    pub fn should_generate_url(&self, expected_url: &str) -> RouteTestResult<()> {
        if expected_url.trim().is_empty() {
            return Err(RouteTestError::invalid_argument(
                "expected_url",
                "Expected URL cannot be null or empty.",
            ));
        }

        match self.generated_url()? {
            Some(actual) if actual == expected_url => Ok(()),
            Some(actual) => Err(RouteTestError::assertion(format!(
                "URL mismatch. Expected: \"{expected_url}\", but was: \"{actual}\"."
            ))),
            None => Err(RouteTestError::assertion(format!(
                "URL mismatch. Expected: \"{expected_url}\", but was: null."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_tester_routing::{HttpContext, Route, RouteConstraint, RouteHandler, RoutingError};

    fn routes() -> RouteCollection {
        let mut routes = RouteCollection::new();
        routes
            .map_page_route_with_defaults(
                "ItemDetails",
                "{culture}/items/{id}",
                "~/pages/items/details.aspx",
                RouteValues::new().with("culture", "en-US"),
            )
            .unwrap()
            .map_page_route("Cookies", "cookies", "~/pages/cookies.aspx")
            .unwrap();
        routes
    }

    fn info<'a>(routes: &'a RouteCollection, name: &str, values: RouteValues) -> RouteInfo<'a> {
        RouteInfo::new(routes, name, values)
    }

    #[test]
    fn test_generates_expected_url() {
        let routes = routes();
        info(&routes, "Cookies", RouteValues::new())
            .should_generate_url("/cookies")
            .unwrap();
        info(&routes, "ItemDetails", RouteValues::new().with("id", 13))
            .should_generate_url("/en-US/items/13")
            .unwrap();
    }

    #[test]
    fn test_mismatch_message() {
        let routes = routes();
        let err = info(&routes, "Cookies", RouteValues::new())
            .should_generate_url("/biscuits")
            .unwrap_err();

        assert!(err.is_assertion());
        assert_eq!(
            err.to_string(),
            "URL mismatch. Expected: \"/biscuits\", but was: \"/cookies\"."
        );
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let routes = routes();
        let err = info(&routes, "Cookies", RouteValues::new())
            .should_generate_url("/Cookies")
            .unwrap_err();
        assert!(err.is_assertion());
    }

    #[test]
    fn test_no_url_generated() {
        let routes = routes();
        // {id} has no default and no value.
        let err = info(&routes, "ItemDetails", RouteValues::new())
            .should_generate_url("/en-US/items")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "URL mismatch. Expected: \"/en-US/items\", but was: null."
        );
    }

    #[test]
    fn test_empty_expected_url() {
        let routes = routes();
        let err = info(&routes, "Cookies", RouteValues::new())
            .should_generate_url("")
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(err.parameter(), Some("expected_url"));
    }

    #[test]
    fn test_blank_expected_url() {
        let routes = routes();
        let info = info(&routes, "Cookies", RouteValues::new());

        for expected in ["", " ", "   ", "\t\n"] {
            let err = info.should_generate_url(expected).unwrap_err();
            assert!(err.is_invalid_argument(), "accepted {expected:?}");
            assert_eq!(err.parameter(), Some("expected_url"));
            assert!(err.to_string().starts_with("Expected URL cannot be null or empty."));
        }
    }

    #[test]
    fn test_unknown_route_name_is_routing_error() {
        let routes = routes();
        let err = info(&routes, "Missing", RouteValues::new())
            .should_generate_url("/missing")
            .unwrap_err();

        assert!(matches!(err, RouteTestError::Routing(RoutingError::RouteNotFound { .. })));
    }

    #[test]
    fn test_generation_sees_context_items() {
        let mut routes = RouteCollection::new();
        let route = Route::new("admin", RouteHandler::page("~/pages/admin.aspx"))
            .unwrap()
            .with_constraint(
                "admin",
                RouteConstraint::custom(|ctx, _, _, _| ctx.items().contains_key("admin")),
            );
        routes.add_named("Admin", route).unwrap();

        let mut info = info(&routes, "Admin", RouteValues::new());
        assert_eq!(info.generated_url().unwrap(), None);

        info.http_context_mut().items_mut().insert("admin", true);
        assert!(info.http_context().items().contains_key("admin"));
        info.should_generate_url("/admin").unwrap();
    }

    #[test]
    fn test_repeated_assertions_agree() {
        let routes = routes();
        let info = info(&routes, "Cookies", RouteValues::new());
        for _ in 0..3 {
            info.should_generate_url("/cookies").unwrap();
        }
    }
}
