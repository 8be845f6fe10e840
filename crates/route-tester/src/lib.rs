//! # Route Tester
//!
//! Assertions for a web application's route table, checked without a web
//! server, a network connection, or a real request.
//!
//! A [`RouteTester`] wraps the route table under test and hands out two kinds
//! of scenario:
//!
//! - [`RouteInfo`]: a named route plus values, asserted to generate an exact URL
//! - [`RequestInfo`]: an incoming URL, asserted to match no route, to be
//!   ignored, or to reach a page route with the expected values
//!
//! Every assertion returns `Ok(())` on success. Failures come back as
//! [`RouteTestError::Assertion`], with a message naming what was expected and
//! what was found; misuse of the API is reported separately as
//! [`RouteTestError::InvalidArgument`].
//!
//! ## Example
//!
//! ```rust
//! use route_tester::{RouteTester, RouteValues};
//! use route_tester_routing::RouteCollection;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut routes = RouteCollection::new();
//! routes
//!     .ignore("content/{*content}")?
//!     .map_page_route_with_defaults(
//!         "ItemDetails",
//!         "{culture}/items/{id}",
//!         "~/pages/items/details.aspx",
//!         RouteValues::new().with("culture", "en-US"),
//!     )?;
//!
//! let tester = RouteTester::new(&routes)?;
//!
//! tester
//!     .with_route_info_values("ItemDetails", [("id", 13)])?
//!     .should_generate_url("/en-US/items/13")?;
//!
//! tester
//!     .with_incoming_request("/de-DE/items/33")?
//!     .should_match_page_route_with_values(
//!         "~/pages/items/details.aspx",
//!         RouteValues::new().with("culture", "de-DE").with("id", 33),
//!     )?;
//!
//! tester
//!     .with_incoming_request("content/styles/site.css")?
//!     .should_be_ignored()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Route Tables
//!
//! The engines work against any [`RouteTable`]. The
//! [`route_tester_routing`] crate provides [`RouteCollection`], including
//! route tables loaded from TOML fixtures.

#![doc(html_root_url = "https://docs.rs/route-tester/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod compare;
mod context;
mod error;
mod request_info;
mod route_info;
mod tester;

pub use context::{create_context, normalize_app_relative, TestHttpContext, APP_ROOT};
pub use error::{AssertionError, RouteTestError, RouteTestResult};
pub use request_info::{RequestInfo, Resolution};
pub use route_info::RouteInfo;
pub use tester::RouteTester;

pub use route_tester_routing::{
    HttpContext, RouteCollection, RouteData, RouteHandler, RouteTable, RouteValues, RoutingError,
};
