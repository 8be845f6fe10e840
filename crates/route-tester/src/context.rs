//! Synthetic request contexts.
//!
//! [`TestHttpContext`] stands in for a live request: it carries a path, an
//! HTTP method and an empty item bag, and never touches the network or any
//! process-wide state.

use http::Method;
use route_tester_routing::{ContextItems, HttpContext};

/// Marker for the application root in app-relative paths.
pub const APP_ROOT: &str = "~";

/// A fake per-request context for route resolution and URL generation.
///
/// # Example
///
/// ```rust
/// use route_tester::TestHttpContext;
/// use route_tester_routing::HttpContext;
///
/// let mut ctx = TestHttpContext::get("items/33?preview=1");
/// ctx.items_mut().insert("tenant", "contoso");
///
/// assert_eq!(ctx.app_relative_path(), "~/items/33");
/// assert_eq!(ctx.raw_url(), Some("items/33?preview=1"));
/// assert_eq!(ctx.query(), Some("preview=1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TestHttpContext {
    raw_url: Option<String>,
    file_path: String,
    method: Method,
    items: ContextItems,
}

impl TestHttpContext {
    /// Creates a context for `path` (or the application root) and `method`.
    ///
    /// The path is normalized to app-relative form after its query string is
    /// removed; the text as supplied stays available through [`raw_url`](Self::raw_url).
    #[must_use]
    pub fn new(path: Option<&str>, method: Method) -> Self {
        let file_path = path.map_or_else(
            || format!("{APP_ROOT}/"),
            |p| normalize_app_relative(strip_query(p)),
        );
        Self {
            raw_url: path.map(str::to_string),
            file_path,
            method,
            items: ContextItems::new(),
        }
    }

    /// Creates a GET context for `path`.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Some(path), Method::GET)
    }

    /// Creates a GET context for the application root.
    #[must_use]
    pub fn root() -> Self {
        Self::new(None, Method::GET)
    }

    /// The path exactly as supplied.
    #[must_use]
    pub fn raw_url(&self) -> Option<&str> {
        self.raw_url.as_deref()
    }

    /// The query string of the supplied path, without the `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.raw_url
            .as_deref()
            .and_then(|url| url.split_once('?'))
            .map(|(_, query)| query)
    }

    /// Mutable access to the request-scoped items.
    pub fn items_mut(&mut self) -> &mut ContextItems {
        &mut self.items
    }

    /// Changes the HTTP method.
    pub fn set_http_method(&mut self, method: Method) {
        self.method = method;
    }
}

impl Default for TestHttpContext {
    fn default() -> Self {
        Self::root()
    }
}

impl HttpContext for TestHttpContext {
    fn app_relative_path(&self) -> &str {
        &self.file_path
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

/// Creates a synthetic context for `path` and `method`.
///
/// Shorthand for [`TestHttpContext::new`].
#[must_use]
pub fn create_context(path: Option<&str>, method: Method) -> TestHttpContext {
    TestHttpContext::new(path, method)
}

/// Puts a path into application-root-relative form.
///
/// ```rust
/// use route_tester::normalize_app_relative;
///
/// assert_eq!(normalize_app_relative("~/cookies"), "~/cookies");
/// assert_eq!(normalize_app_relative("/cookies"), "~/cookies");
/// assert_eq!(normalize_app_relative("cookies"), "~/cookies");
/// ```
#[must_use]
pub fn normalize_app_relative(path: &str) -> String {
    if path.starts_with("~/") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{APP_ROOT}{path}")
    } else {
        format!("{APP_ROOT}/{path}")
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(file_path, _)| file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_new_context() {
        let ctx = TestHttpContext::new(Some("/test"), Method::POST);
        assert_eq!(ctx.app_relative_path(), "~/test");
        assert_eq!(ctx.http_method(), &Method::POST);
        assert!(ctx.items().is_empty());
    }

    #[test]
    fn test_root_context() {
        let ctx = TestHttpContext::root();
        assert_eq!(ctx.app_relative_path(), "~/");
        assert_eq!(ctx.raw_url(), None);
        assert_eq!(ctx.query(), None);
        assert_eq!(ctx, TestHttpContext::default());
    }

    #[test]
    fn test_query_is_stripped_from_file_path() {
        let ctx = TestHttpContext::get("/search?q=rust&page=2");
        assert_eq!(ctx.app_relative_path(), "~/search");
        assert_eq!(ctx.raw_url(), Some("/search?q=rust&page=2"));
        assert_eq!(ctx.query(), Some("q=rust&page=2"));
    }

    #[test]
    fn test_items_are_mutable() {
        let mut ctx = TestHttpContext::get("test");
        ctx.items_mut().insert("key", "value");
        assert_eq!(ctx.items().get("key"), Some(&json!("value")));
    }

    #[test]
    fn test_path_modifier_is_identity() {
        let ctx = TestHttpContext::root();
        assert_eq!(ctx.apply_app_path_modifier("/cookies"), "/cookies");
    }

    #[test]
    fn test_set_http_method() {
        let mut ctx = create_context(Some("orders"), Method::GET);
        ctx.set_http_method(Method::DELETE);
        assert_eq!(ctx.http_method(), &Method::DELETE);
    }

    #[test]
    fn test_normalize_variants() {
        assert_eq!(normalize_app_relative("~/a/b"), "~/a/b");
        assert_eq!(normalize_app_relative("/a/b"), "~/a/b");
        assert_eq!(normalize_app_relative("a/b"), "~/a/b");
        assert_eq!(normalize_app_relative(""), "~/");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(path in "[a-zA-Z0-9/~._-]{0,24}") {
            let once = normalize_app_relative(&path);
            prop_assert!(once.starts_with("~/"));
            prop_assert_eq!(normalize_app_relative(&once), once);
        }
    }
}
