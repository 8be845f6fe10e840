//! The ordered route collection.
//!
//! This module provides [`RouteCollection`], the reference [`RouteTable`]
//! implementation: routes are tried in registration order and the first one
//! that matches wins.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::constraint::RouteConstraint;
use crate::context::HttpContext;
use crate::error::RoutingError;
use crate::handler::{PageRouteHandler, RouteHandler};
use crate::route::Route;
use crate::table::{RouteData, RouteTable};
use crate::values::RouteValues;

/// An ordered list of routes, some of them named.
///
/// # Example
///
/// ```rust
/// use route_tester_routing::{RouteCollection, RouteValues};
///
/// # fn main() -> Result<(), route_tester_routing::RoutingError> {
/// let mut routes = RouteCollection::new();
/// routes
///     .ignore("content/{*content}")?
///     .map_page_route("Cookies", "cookies", "~/pages/cookies.aspx")?
///     .map_page_route_with_defaults(
///         "ItemDetails",
///         "{culture}/items/{id}",
///         "~/pages/items/details.aspx",
///         RouteValues::new().with("culture", "en-US"),
///     )?;
///
/// assert_eq!(routes.len(), 3);
/// assert!(routes.get("Cookies").is_some());
/// # Ok(())
/// # }
/// ```
///
/// # Route Priority
///
/// Unlike a radix tree, the collection does not rank literal segments above
/// parameters: the first registered route that accepts the request is used,
/// so register specific routes before general ones.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<Route>,
    names: IndexMap<String, usize>,
}

impl RouteCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unnamed route.
    pub fn add(&mut self, route: Route) -> &mut Self {
        self.routes.push(route);
        self
    }

    /// Appends a named route.
    ///
    /// Names are unique; registering a name twice fails.
    pub fn add_named(&mut self, name: &str, route: Route) -> Result<&mut Self, RoutingError> {
        if self.names.contains_key(name) {
            return Err(RoutingError::DuplicateRouteName {
                name: name.to_string(),
            });
        }
        self.names.insert(name.to_string(), self.routes.len());
        self.routes.push(route);
        Ok(self)
    }

    /// Maps a URL pattern onto a page.
    pub fn map_page_route(
        &mut self,
        name: &str,
        url: &str,
        virtual_path: &str,
    ) -> Result<&mut Self, RoutingError> {
        self.map_page_route_with_defaults(name, url, virtual_path, RouteValues::new())
    }

    /// Maps a URL pattern onto a page, with default values.
    pub fn map_page_route_with_defaults(
        &mut self,
        name: &str,
        url: &str,
        virtual_path: &str,
        defaults: RouteValues,
    ) -> Result<&mut Self, RoutingError> {
        let handler = page_handler(virtual_path, true)?;
        let route = Route::new(url, handler)?.with_defaults(defaults);
        self.add_named(name, route)
    }

    /// Maps a URL pattern onto a page with full control over the handler.
    pub fn map_page_route_with(
        &mut self,
        name: &str,
        url: &str,
        virtual_path: &str,
        check_physical_url_access: bool,
        defaults: RouteValues,
        constraints: IndexMap<String, RouteConstraint>,
    ) -> Result<&mut Self, RoutingError> {
        let handler = page_handler(virtual_path, check_physical_url_access)?;
        let mut route = Route::new(url, handler)?.with_defaults(defaults);
        for (parameter, constraint) in constraints {
            route = route.with_constraint(parameter, constraint);
        }
        self.add_named(name, route)
    }

    /// Makes the routing system ignore requests matching `url`.
    pub fn ignore(&mut self, url: &str) -> Result<&mut Self, RoutingError> {
        self.ignore_with_constraints(url, IndexMap::new())
    }

    /// Makes the routing system ignore requests matching `url` and the constraints.
    pub fn ignore_with_constraints(
        &mut self,
        url: &str,
        constraints: IndexMap<String, RouteConstraint>,
    ) -> Result<&mut Self, RoutingError> {
        let mut route = Route::new(url, RouteHandler::StopRouting)?;
        for (parameter, constraint) in constraints {
            route = route.with_constraint(parameter, constraint);
        }
        Ok(self.add(route))
    }

    /// Returns the route registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.names.get(name).map(|&index| &self.routes[index])
    }

    /// Iterates over the routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Returns the number of routes registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn page_handler(
    virtual_path: &str,
    check_physical_url_access: bool,
) -> Result<RouteHandler, RoutingError> {
    if !virtual_path.starts_with("~/") {
        return Err(RoutingError::InvalidVirtualPath {
            virtual_path: virtual_path.to_string(),
        });
    }
    Ok(RouteHandler::Page(
        PageRouteHandler::new(virtual_path)
            .with_check_physical_url_access(check_physical_url_access),
    ))
}

impl RouteTable for RouteCollection {
    fn len(&self) -> usize {
        self.routes.len()
    }

    fn resolve(&self, ctx: &dyn HttpContext) -> Option<RouteData> {
        let path = ctx.app_relative_path();
        for route in &self.routes {
            trace!(route = route.url(), path, "trying route");
            if let Some(data) = route.route_data(ctx) {
                debug!(
                    route = route.url(),
                    path,
                    handler = data.handler().type_name(),
                    "route matched"
                );
                return Some(data);
            }
        }
        debug!(path, "no route matched");
        None
    }

    fn generate(
        &self,
        ctx: &dyn HttpContext,
        route_name: &str,
        values: &RouteValues,
    ) -> Result<Option<String>, RoutingError> {
        let route = self
            .get(route_name)
            .ok_or_else(|| RoutingError::route_not_found(route_name))?;
        let url = route.virtual_path(ctx, values);
        debug!(route_name, url = url.as_deref(), "generated url");
        Ok(url)
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
