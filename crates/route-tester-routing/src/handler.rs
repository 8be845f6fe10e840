//! Route handler kinds.

use std::fmt;

/// What a matched route dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteHandler {
    /// Serves a page at an application-relative virtual path.
    Page(PageRouteHandler),
    /// Stops routing; the request is ignored by the route table.
    StopRouting,
    /// Any other handler, identified by its type name.
    Custom(String),
}

impl RouteHandler {
    /// Creates a page handler for the given virtual path.
    pub fn page(virtual_path: impl Into<String>) -> Self {
        Self::Page(PageRouteHandler::new(virtual_path))
    }

    /// Creates a custom handler with the given type name.
    pub fn custom(type_name: impl Into<String>) -> Self {
        Self::Custom(type_name.into())
    }

    /// The handler's type name as used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Page(_) => "PageRouteHandler",
            Self::StopRouting => "StopRoutingHandler",
            Self::Custom(name) => name,
        }
    }

    /// Returns the page handler if this is one.
    #[must_use]
    pub fn as_page(&self) -> Option<&PageRouteHandler> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Returns true for the stop-routing (ignore) handler.
    #[must_use]
    pub fn is_stop_routing(&self) -> bool {
        matches!(self, Self::StopRouting)
    }
}

impl fmt::Display for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A handler that maps a route onto a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRouteHandler {
    virtual_path: String,
    check_physical_url_access: bool,
}

impl PageRouteHandler {
    /// Creates a page handler that checks physical URL access.
    pub fn new(virtual_path: impl Into<String>) -> Self {
        Self {
            virtual_path: virtual_path.into(),
            check_physical_url_access: true,
        }
    }

    /// Sets whether access to the physical page is authorized separately.
    #[must_use]
    pub fn with_check_physical_url_access(mut self, check: bool) -> Self {
        self.check_physical_url_access = check;
        self
    }

    /// The page's virtual path, e.g. `~/pages/details.aspx`.
    #[must_use]
    pub fn virtual_path(&self) -> &str {
        &self.virtual_path
    }

    /// Whether access to the physical page is authorized separately.
    #[must_use]
    pub fn check_physical_url_access(&self) -> bool {
        self.check_physical_url_access
    }
}
