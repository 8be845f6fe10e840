//! The per-request view a route table works against.

use std::collections::HashMap;

use http::Method;
use serde_json::Value;

/// Request-scoped information consulted while resolving or generating routes.
///
/// Paths are application-relative: the application root is written `~` and a
/// request for `/items/33` is seen as `~/items/33`.
pub trait HttpContext {
    /// The application-relative path of the request, without a query string.
    fn app_relative_path(&self) -> &str;

    /// The HTTP method of the request.
    fn http_method(&self) -> &Method;

    /// Ambient request-scoped items.
    fn items(&self) -> &ContextItems;

    /// Rewrites a generated path on the way out (cookieless sessions and the like).
    fn apply_app_path_modifier(&self, virtual_path: &str) -> String;
}

/// A mutable bag of request-scoped values keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextItems {
    inner: HashMap<String, Value>,
}

impl ContextItems {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(key.into(), value.into())
    }

    /// Returns a stored value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Removes a stored value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.remove(key)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over the stored values in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_insert_and_get() {
        let mut items = ContextItems::new();
        assert!(items.is_empty());

        items.insert("key", "value");
        assert_eq!(items.get("key"), Some(&json!("value")));
        assert!(items.contains_key("key"));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_items_replace_and_remove() {
        let mut items = ContextItems::new();
        items.insert("tenant", "a");

        assert_eq!(items.insert("tenant", "b"), Some(json!("a")));
        assert_eq!(items.remove("tenant"), Some(json!("b")));
        assert!(items.is_empty());
    }
}
