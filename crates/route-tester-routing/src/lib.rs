//! Ordered route tables for route-tester.
//!
//! This crate defines the routing abstraction the route-tester assertion
//! engines drive ([`RouteTable`], [`HttpContext`], [`RouteData`]) and ships a
//! reference implementation, [`RouteCollection`], modelled on page-based web
//! frameworks: an ordered list of URL patterns, each mapped onto a page, an
//! ignore (stop-routing) handler, or a custom handler.
//!
//! # Features
//!
//! - **Ordered Matching**: the first registered route that accepts a request wins
//! - **Path Parameters**: `{culture}/items/{id}` with per-parameter defaults
//! - **Catch-all Parameters**: `content/{*content}`
//! - **Constraints**: regular expressions, HTTP methods, and context-aware closures
//! - **URL Generation**: named routes turn values back into URLs
//! - **Fixtures**: route tables declared in TOML
//!
//! # Example
//!
//! ```rust
//! use route_tester_routing::{ContextItems, HttpContext, RouteCollection, RouteTable, RouteValues};
//! use http::Method;
//!
//! struct Request {
//!     path: String,
//!     method: Method,
//!     items: ContextItems,
//! }
//!
//! impl HttpContext for Request {
//!     fn app_relative_path(&self) -> &str { &self.path }
//!     fn http_method(&self) -> &Method { &self.method }
//!     fn items(&self) -> &ContextItems { &self.items }
//!     fn apply_app_path_modifier(&self, path: &str) -> String { path.to_string() }
//! }
//!
//! let mut routes = RouteCollection::new();
//! routes
//!     .map_page_route_with_defaults(
//!         "ItemDetails",
//!         "{culture}/items/{id}",
//!         "~/pages/items/details.aspx",
//!         RouteValues::new().with("culture", "en-US"),
//!     )
//!     .unwrap();
//!
//! let request = Request {
//!     path: "~/de-DE/items/33".to_string(),
//!     method: Method::GET,
//!     items: ContextItems::new(),
//! };
//! let data = routes.resolve(&request).unwrap();
//! assert_eq!(data.values().get_str("id").as_deref(), Some("33"));
//!
//! let url = routes
//!     .generate(&request, "ItemDetails", &RouteValues::new().with("id", 13))
//!     .unwrap();
//! assert_eq!(url.as_deref(), Some("/en-US/items/13"));
//! ```

mod collection;
mod config;
mod constraint;
mod context;
mod error;
mod handler;
mod pattern;
mod route;
mod table;
mod values;

pub use collection::RouteCollection;
pub use config::{RouteConfig, RouteKind, RouteTableConfig, HTTP_METHOD_CONSTRAINT_KEY};
pub use constraint::{ConstraintFn, RouteConstraint, RouteDirection};
pub use context::{ContextItems, HttpContext};
pub use error::RoutingError;
pub use handler::{PageRouteHandler, RouteHandler};
pub use pattern::{RoutePattern, Segment};
pub use route::Route;
pub use table::{RouteData, RouteTable};
pub use values::{eq_ignore_case, format_value, RouteValues};

/// Re-exported so callers can build values without depending on `serde_json`.
pub use serde_json::{json, Value};
