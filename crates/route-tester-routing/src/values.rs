//! Route parameter values.
//!
//! [`RouteValues`] maps parameter names to loosely-typed values. Values are
//! stored as [`serde_json::Value`] so that strings, numbers and booleans can
//! be supplied directly, and any `Serialize` struct can stand in for an ad hoc
//! set of named values.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::RoutingError;

/// An ordered set of route parameter values.
///
/// Keys are case-sensitive and unique; inserting an existing key replaces its
/// value but keeps its position. Iteration follows insertion order.
///
/// # Example
///
/// ```rust
/// use route_tester_routing::RouteValues;
///
/// let values = RouteValues::new()
///     .with("culture", "de-DE")
///     .with("id", 33);
///
/// assert_eq!(values.len(), 2);
/// assert_eq!(values.get_str("culture").as_deref(), Some("de-DE"));
/// assert_eq!(values.get_str("id").as_deref(), Some("33"));
/// assert!(values.get("Culture").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RouteValues {
    inner: IndexMap<String, Value>,
}

impl RouteValues {
    /// Creates an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a value set with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a value set from any serializable struct or map.
    ///
    /// Every field becomes one entry; `None` fields are kept as `null`.
    ///
    /// ```rust
    /// use route_tester_routing::RouteValues;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Item<'a> {
    ///     culture: &'a str,
    ///     id: u32,
    /// }
    ///
    /// let values = RouteValues::from_serialize(&Item { culture: "fr-FR", id: 13 }).unwrap();
    /// assert_eq!(values.get_str("id").as_deref(), Some("13"));
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, RoutingError> {
        let value = serde_json::to_value(value)
            .map_err(|e| RoutingError::invalid_route_values(e.to_string()))?;
        Self::try_from(value)
    }

    /// Adds a value, returning the updated set.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a value, returning the previous value for the key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(name.into(), value.into())
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    /// Returns the string representation of a value, see [`format_value`].
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.get(name).map(format_value)
    }

    /// Returns true if the key is present, even with a `null` value.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Removes a value, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.inner.shift_remove(name)
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}

/// Renders a value the way it appears in URLs and diagnostics.
///
/// Strings are unquoted, `null` is empty, everything else uses its JSON form.
///
/// ```rust
/// use route_tester_routing::format_value;
/// use serde_json::json;
///
/// assert_eq!(format_value(&json!("en-US")), "en-US");
/// assert_eq!(format_value(&json!(33)), "33");
/// assert_eq!(format_value(&json!(null)), "");
/// ```
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compares two strings ignoring case, independent of the current locale.
///
/// Route literals, default values and virtual paths are all compared this way.
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl fmt::Display for RouteValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {}", format_value(value))?;
        }
        f.write_str("}")
    }
}

impl<'a> IntoIterator for &'a RouteValues {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RouteValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<IndexMap<String, Value>> for RouteValues {
    fn from(inner: IndexMap<String, Value>) -> Self {
        Self { inner }
    }
}

impl TryFrom<Value> for RouteValues {
    type Error = RoutingError;

    /// Accepts a JSON object (`json!({"id": 33})`); `null` yields an empty set.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Ok(Self::new()),
            other => Err(RoutingError::invalid_route_values(format!(
                "expected an object of named values, got `{other}`"
            ))),
        }
    }
}
