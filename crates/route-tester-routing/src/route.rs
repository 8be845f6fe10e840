//! A single route: pattern, handler, defaults and constraints.

use indexmap::IndexMap;

use crate::constraint::{RouteConstraint, RouteDirection};
use crate::context::HttpContext;
use crate::error::RoutingError;
use crate::handler::RouteHandler;
use crate::pattern::RoutePattern;
use crate::table::RouteData;
use crate::values::{eq_ignore_case, format_value, RouteValues};

/// A route definition.
///
/// # Example
///
/// ```rust
/// use route_tester_routing::{Route, RouteHandler, RouteValues};
///
/// let route = Route::new("{culture}/items/{id}", RouteHandler::page("~/pages/items/details.aspx"))
///     .unwrap()
///     .with_defaults(RouteValues::new().with("culture", "en-US"));
///
/// assert_eq!(route.url(), "{culture}/items/{id}");
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    pattern: RoutePattern,
    handler: RouteHandler,
    defaults: RouteValues,
    constraints: IndexMap<String, RouteConstraint>,
}

impl Route {
    /// Creates a route from a URL pattern and a handler.
    pub fn new(url: &str, handler: RouteHandler) -> Result<Self, RoutingError> {
        Ok(Self {
            pattern: RoutePattern::parse(url)?,
            handler,
            defaults: RouteValues::new(),
            constraints: IndexMap::new(),
        })
    }

    /// Sets the default values.
    #[must_use]
    pub fn with_defaults(mut self, defaults: RouteValues) -> Self {
        self.defaults = defaults;
        self
    }

    /// Adds a constraint under a parameter name.
    #[must_use]
    pub fn with_constraint(
        mut self,
        parameter: impl Into<String>,
        constraint: RouteConstraint,
    ) -> Self {
        self.constraints.insert(parameter.into(), constraint);
        self
    }

    /// The URL pattern text.
    #[must_use]
    pub fn url(&self) -> &str {
        self.pattern.as_str()
    }

    /// The parsed URL pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// The route's handler.
    #[must_use]
    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    /// The route's default values.
    #[must_use]
    pub fn defaults(&self) -> &RouteValues {
        &self.defaults
    }

    /// The route's constraints, keyed by parameter name.
    #[must_use]
    pub fn constraints(&self) -> &IndexMap<String, RouteConstraint> {
        &self.constraints
    }

    /// Matches the request in `ctx` against this route.
    #[must_use]
    pub fn route_data(&self, ctx: &dyn HttpContext) -> Option<RouteData> {
        let values = self.pattern.match_path(ctx.app_relative_path(), &self.defaults)?;
        if !self.constraints_match(ctx, &values, RouteDirection::IncomingRequest) {
            return None;
        }
        Some(RouteData::new(self.url(), self.handler.clone(), values))
    }

    /// Builds the URL for this route, or `None` if the values do not fit.
    ///
    /// The returned path starts with `/` and has been passed through
    /// [`HttpContext::apply_app_path_modifier`].
    #[must_use]
    pub fn virtual_path(&self, ctx: &dyn HttpContext, values: &RouteValues) -> Option<String> {
        if self.handler.is_stop_routing() {
            return None;
        }

        let (path, consumed) = self.pattern.build_path(values, &self.defaults)?;

        let mut query = Vec::new();
        for (name, value) in values.iter() {
            if consumed.iter().any(|c| c == name) || value.is_null() {
                continue;
            }
            if let Some(default) = self.defaults.get(name) {
                // A default with no matching parameter pins the value.
                if !eq_ignore_case(&format_value(value), &format_value(default)) {
                    return None;
                }
                continue;
            }
            query.push(format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(&format_value(value))
            ));
        }

        let mut merged = self.defaults.clone();
        for (name, value) in values.iter() {
            if !value.is_null() {
                merged.insert(name, value.clone());
            }
        }
        if !self.constraints_match(ctx, &merged, RouteDirection::UrlGeneration) {
            return None;
        }

        let mut url = format!("/{path}");
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        Some(ctx.apply_app_path_modifier(&url))
    }

    fn constraints_match(
        &self,
        ctx: &dyn HttpContext,
        values: &RouteValues,
        direction: RouteDirection,
    ) -> bool {
        self.constraints
            .iter()
            .all(|(parameter, constraint)| constraint.matches(ctx, parameter, values, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextItems;
    use http::Method;
    use serde_json::json;

    struct Ctx {
        path: String,
        method: Method,
        items: ContextItems,
    }

    impl HttpContext for Ctx {
        fn app_relative_path(&self) -> &str {
            &self.path
        }

        fn http_method(&self) -> &Method {
            &self.method
        }

        fn items(&self) -> &ContextItems {
            &self.items
        }

        fn apply_app_path_modifier(&self, virtual_path: &str) -> String {
            virtual_path.to_string()
        }
    }

    fn get(path: &str) -> Ctx {
        Ctx {
            path: path.to_string(),
            method: Method::GET,
            items: ContextItems::new(),
        }
    }

    fn items_route() -> Route {
        Route::new("{culture}/items/{id}", RouteHandler::page("~/pages/items/details.aspx"))
            .unwrap()
            .with_defaults(RouteValues::new().with("culture", "en-US"))
    }

    #[test]
    fn test_route_data_for_match() {
        let data = items_route().route_data(&get("~/de-DE/items/33")).unwrap();
        assert_eq!(data.route_url(), "{culture}/items/{id}");
        assert_eq!(data.values().get("culture"), Some(&json!("de-DE")));
        assert_eq!(data.values().get("id"), Some(&json!("33")));
    }

    #[test]
    fn test_route_data_constraint_rejects() {
        let digits = RouteConstraint::pattern("id", r"\d+").unwrap();
        let route = items_route().with_constraint("id", digits);
        assert!(route.route_data(&get("~/de-DE/items/33")).is_some());
        assert!(route.route_data(&get("~/de-DE/items/abc")).is_none());
    }

    #[test]
    fn test_route_data_method_constraint() {
        let route = Route::new("orders", RouteHandler::page("~/orders.aspx"))
            .unwrap()
            .with_constraint("httpMethod", RouteConstraint::methods([Method::POST]));

        assert!(route.route_data(&get("~/orders")).is_none());
        let mut post = get("~/orders");
        post.method = Method::POST;
        assert!(route.route_data(&post).is_some());
    }

    #[test]
    fn test_virtual_path_with_default() {
        let url = items_route().virtual_path(&get("~/"), &RouteValues::new().with("id", 13));
        assert_eq!(url.as_deref(), Some("/en-US/items/13"));
    }

    #[test]
    fn test_virtual_path_overrides_default() {
        let values = RouteValues::new().with("id", 13).with("culture", "fr-FR");
        let url = items_route().virtual_path(&get("~/"), &values);
        assert_eq!(url.as_deref(), Some("/fr-FR/items/13"));
    }

    #[test]
    fn test_virtual_path_missing_value() {
        assert!(items_route().virtual_path(&get("~/"), &RouteValues::new()).is_none());
    }

    #[test]
    fn test_virtual_path_extra_values_become_query() {
        let values = RouteValues::new().with("id", 13).with("sort", "name asc");
        let url = items_route().virtual_path(&get("~/"), &values);
        assert_eq!(url.as_deref(), Some("/en-US/items/13?sort=name%20asc"));
    }

    #[test]
    fn test_virtual_path_pinned_default() {
        let route = Route::new("reports", RouteHandler::page("~/reports.aspx"))
            .unwrap()
            .with_defaults(RouteValues::new().with("area", "admin"));

        let same = RouteValues::new().with("area", "ADMIN");
        assert_eq!(route.virtual_path(&get("~/"), &same).as_deref(), Some("/reports"));

        let other = RouteValues::new().with("area", "public");
        assert!(route.virtual_path(&get("~/"), &other).is_none());
    }

    #[test]
    fn test_virtual_path_checks_constraints() {
        let digits = RouteConstraint::pattern("id", r"\d+").unwrap();
        let route = items_route().with_constraint("id", digits);
        assert!(route
            .virtual_path(&get("~/"), &RouteValues::new().with("id", "abc"))
            .is_none());
    }

    #[test]
    fn test_ignore_route_never_generates() {
        let route = Route::new("content/{*content}", RouteHandler::StopRouting).unwrap();
        assert!(route.virtual_path(&get("~/"), &RouteValues::new()).is_none());
    }
}
