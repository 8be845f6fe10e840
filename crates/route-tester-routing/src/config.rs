//! Route tables declared as TOML fixtures.
//!
//! Test suites that share a route table across many files can describe it
//! once in TOML and load it wherever it is needed:
//!
//! ```toml
//! [[routes]]
//! kind = "ignore"
//! url = "content/{*content}"
//!
//! [[routes]]
//! kind = "page"
//! name = "ItemDetails"
//! url = "{culture}/items/{id}"
//! virtual_path = "~/pages/items/details.aspx"
//! check_physical_url_access = false
//! http_methods = ["GET", "HEAD"]
//!
//! [routes.defaults]
//! culture = "en-US"
//!
//! [routes.constraints]
//! id = '\d+'
//! ```
//!
//! Unknown fields are rejected so that typos surface as errors instead of
//! silently producing a different table.

use std::fs;
use std::path::Path;

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::collection::RouteCollection;
use crate::constraint::RouteConstraint;
use crate::error::RoutingError;
use crate::handler::{PageRouteHandler, RouteHandler};
use crate::route::Route;
use crate::values::RouteValues;

/// Constraint key used for the `http_methods` list.
pub const HTTP_METHOD_CONSTRAINT_KEY: &str = "httpMethod";

/// A route table fixture.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTableConfig {
    /// Routes in registration order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// What a configured route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// A page route; requires `virtual_path`.
    Page,
    /// An ignore route.
    Ignore,
}

/// One configured route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Handler kind.
    pub kind: RouteKind,

    /// Route name, used for URL generation.
    #[serde(default)]
    pub name: Option<String>,

    /// URL pattern.
    pub url: String,

    /// Page target (page routes only).
    #[serde(default)]
    pub virtual_path: Option<String>,

    /// Whether access to the physical page is authorized separately.
    #[serde(default = "default_check_physical_url_access")]
    pub check_physical_url_access: bool,

    /// Default values.
    #[serde(default)]
    pub defaults: IndexMap<String, Value>,

    /// Regular-expression constraints keyed by parameter.
    #[serde(default)]
    pub constraints: IndexMap<String, String>,

    /// Allowed HTTP methods; empty means any.
    #[serde(default)]
    pub http_methods: Vec<String>,
}

fn default_check_physical_url_access() -> bool {
    true
}

impl RouteTableConfig {
    /// Parses a fixture from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RoutingError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a fixture from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RoutingError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| RoutingError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Builds the route collection the fixture describes.
    pub fn build(&self) -> Result<RouteCollection, RoutingError> {
        let mut routes = RouteCollection::new();
        for (index, config) in self.routes.iter().enumerate() {
            let route = config
                .to_route()
                .map_err(|e| RoutingError::invalid_config(format!("routes[{index}]: {e}")))?;
            match config.kind {
                RouteKind::Page => {
                    let name = config.name.as_deref().ok_or_else(|| {
                        RoutingError::invalid_config(format!(
                            "routes[{index}]: page routes need a name"
                        ))
                    })?;
                    routes.add_named(name, route)?;
                }
                RouteKind::Ignore => match config.name.as_deref() {
                    Some(name) => {
                        routes.add_named(name, route)?;
                    }
                    None => {
                        routes.add(route);
                    }
                },
            }
        }
        Ok(routes)
    }
}

impl RouteConfig {
    fn to_route(&self) -> Result<Route, RoutingError> {
        let handler = match self.kind {
            RouteKind::Page => {
                let virtual_path = self.virtual_path.as_deref().ok_or_else(|| {
                    RoutingError::invalid_config("page routes need a virtual_path")
                })?;
                if !virtual_path.starts_with("~/") {
                    return Err(RoutingError::InvalidVirtualPath {
                        virtual_path: virtual_path.to_string(),
                    });
                }
                RouteHandler::Page(
                    PageRouteHandler::new(virtual_path)
                        .with_check_physical_url_access(self.check_physical_url_access),
                )
            }
            RouteKind::Ignore => {
                if self.virtual_path.is_some() {
                    return Err(RoutingError::invalid_config(
                        "ignore routes cannot have a virtual_path",
                    ));
                }
                RouteHandler::StopRouting
            }
        };

        let defaults: RouteValues = self.defaults.clone().into();
        let mut route = Route::new(&self.url, handler)?.with_defaults(defaults);

        for (parameter, expression) in &self.constraints {
            let constraint = RouteConstraint::pattern(parameter, expression)?;
            route = route.with_constraint(parameter.clone(), constraint);
        }

        if !self.http_methods.is_empty() {
            let methods = self
                .http_methods
                .iter()
                .map(|m| {
                    Method::from_bytes(m.to_uppercase().as_bytes()).map_err(|_| {
                        RoutingError::invalid_config(format!("invalid HTTP method \"{m}\""))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            route = route.with_constraint(
                HTTP_METHOD_CONSTRAINT_KEY,
                RouteConstraint::methods(methods),
            );
        }

        Ok(route)
    }
}

impl RouteCollection {
    /// Builds a collection from a TOML fixture.
    ///
    /// ```rust
    /// use route_tester_routing::RouteCollection;
    ///
    /// let routes = RouteCollection::from_toml_str(r#"
    ///     [[routes]]
    ///     kind = "page"
    ///     name = "Cookies"
    ///     url = "cookies"
    ///     virtual_path = "~/pages/cookies.aspx"
    /// "#).unwrap();
    ///
    /// assert_eq!(routes.len(), 1);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, RoutingError> {
        RouteTableConfig::from_toml_str(content)?.build()
    }

    /// Builds a collection from a TOML fixture file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, RoutingError> {
        RouteTableConfig::from_file(path)?.build()
    }
}
