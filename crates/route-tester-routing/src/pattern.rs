//! Route URL patterns.
//!
//! A pattern is a `/`-separated list of segments. Each segment is a literal
//! (`items`), a named parameter (`{id}`) or, in last position only, a
//! catch-all parameter (`{*path}`) that absorbs the rest of the request path.

use serde_json::Value;
use smallvec::SmallVec;

use crate::error::RoutingError;
use crate::values::{eq_ignore_case, format_value, RouteValues};

/// Request segments stored inline before spilling to the heap.
const INLINE_SEGMENTS: usize = 8;

type RequestSegments = SmallVec<[String; INLINE_SEGMENTS]>;

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, matched case-insensitively (e.g. `items`).
    Literal(String),
    /// Named parameter (e.g. `{id}`).
    Param(String),
    /// Catch-all parameter (e.g. `{*path}`).
    CatchAll(String),
}

impl Segment {
    /// The parameter name, if this segment is a parameter.
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Param(name) | Self::CatchAll(name) => Some(name),
        }
    }
}

/// A parsed route URL pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a route URL such as `{culture}/items/{id}`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use route_tester_routing::{RoutePattern, Segment};
    ///
    /// let pattern = RoutePattern::parse("content/{*content}").unwrap();
    /// assert_eq!(pattern.segments()[0], Segment::Literal("content".to_string()));
    /// assert_eq!(pattern.segments()[1], Segment::CatchAll("content".to_string()));
    ///
    /// assert!(RoutePattern::parse("/users").is_err());
    /// ```
    pub fn parse(url: &str) -> Result<Self, RoutingError> {
        if url.starts_with('/') || url.starts_with('~') {
            return Err(RoutingError::invalid_pattern(
                url,
                "the route URL cannot start with a '/' or '~' character",
            ));
        }
        if url.contains('?') {
            return Err(RoutingError::invalid_pattern(
                url,
                "the route URL cannot contain a '?' character",
            ));
        }

        let mut segments = Vec::new();
        if url.is_empty() {
            return Ok(Self {
                source: String::new(),
                segments,
            });
        }

        for raw in url.split('/') {
            if raw.is_empty() {
                return Err(RoutingError::invalid_pattern(
                    url,
                    "the route URL cannot contain consecutive or trailing separators",
                ));
            }
            if matches!(segments.last(), Some(Segment::CatchAll(_))) {
                return Err(RoutingError::invalid_pattern(
                    url,
                    "a catch-all parameter can only appear as the last segment",
                ));
            }

            let segment = Self::parse_segment(url, raw)?;
            if let Some(name) = segment.param_name() {
                if segments.iter().any(|s: &Segment| s.param_name() == Some(name)) {
                    return Err(RoutingError::invalid_pattern(
                        url,
                        format!("the parameter \"{name}\" appears more than once"),
                    ));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            source: url.to_string(),
            segments,
        })
    }

    fn parse_segment(url: &str, raw: &str) -> Result<Segment, RoutingError> {
        let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
            if raw.contains(['{', '}']) {
                return Err(RoutingError::invalid_pattern(
                    url,
                    format!("the segment \"{raw}\" mixes literal text and parameters"),
                ));
            }
            return Ok(Segment::Literal(raw.to_string()));
        };

        let (name, catch_all) = match inner.strip_prefix('*') {
            Some(name) => (name, true),
            None => (inner, false),
        };
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RoutingError::invalid_pattern(
                url,
                format!("the segment \"{raw}\" is not a valid parameter"),
            ));
        }

        Ok(if catch_all {
            Segment::CatchAll(name.to_string())
        } else {
            Segment::Param(name.to_string())
        })
    }

    /// The pattern text as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the pattern declares a parameter with this name.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.param_name() == Some(name))
    }

    /// Iterates over the declared parameter names in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Matches an application-relative request path.
    ///
    /// Accepts `~/a/b`, `/a/b` or `a/b`. Returns the URL values completed with
    /// `defaults`, or `None` if the path does not fit the pattern.
    #[must_use]
    pub fn match_path(&self, path: &str, defaults: &RouteValues) -> Option<RouteValues> {
        let request = Self::split_request_path(path);
        let mut values = RouteValues::with_capacity(self.segments.len() + defaults.len());
        let mut position = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    let actual = request.get(position)?;
                    if !eq_ignore_case(actual, literal) {
                        return None;
                    }
                    position += 1;
                }
                Segment::Param(name) => match request.get(position) {
                    Some(actual) if !actual.is_empty() => {
                        values.insert(name.clone(), actual.clone());
                        position += 1;
                    }
                    Some(_) => return None,
                    None => {
                        // Filled from defaults below; no default means no match.
                        if !defaults.contains_key(name) {
                            return None;
                        }
                    }
                },
                Segment::CatchAll(name) => {
                    let rest = request[position.min(request.len())..].join("/");
                    position = request.len();
                    if !rest.is_empty() {
                        values.insert(name.clone(), rest);
                    }
                }
            }
        }

        if position < request.len() {
            return None;
        }

        for (name, value) in defaults.iter() {
            if !values.contains_key(name) {
                values.insert(name, value.clone());
            }
        }

        Some(values)
    }

    /// Builds a URL path (without leading `/`) from route values.
    ///
    /// Each parameter takes its value from `values`, then `defaults`. Returns
    /// the path and the names of the parameters it consumed, or `None` when a
    /// required parameter has no value.
    #[must_use]
    pub fn build_path(
        &self,
        values: &RouteValues,
        defaults: &RouteValues,
    ) -> Option<(String, Vec<String>)> {
        let mut parts: Vec<(String, bool)> = Vec::with_capacity(self.segments.len());
        let mut consumed = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push((literal.clone(), false)),
                Segment::Param(name) | Segment::CatchAll(name) => {
                    let supplied = values.get(name).filter(|v| !is_blank(v));
                    let default = defaults.get(name).filter(|v| !is_blank(v));
                    let value = match (supplied, default) {
                        (Some(value), _) | (None, Some(value)) => format_value(value),
                        (None, None) if matches!(segment, Segment::CatchAll(_)) => String::new(),
                        (None, None) => return None,
                    };
                    // A value equal to the default may be dropped from the end of the URL.
                    let omittable = match (supplied, default) {
                        (None, _) => true,
                        (Some(s), Some(d)) => eq_ignore_case(&format_value(s), &format_value(d)),
                        (Some(_), None) => false,
                    };
                    let encoded = if matches!(segment, Segment::CatchAll(_)) {
                        value
                            .split('/')
                            .map(|part| urlencoding::encode(part).into_owned())
                            .collect::<Vec<_>>()
                            .join("/")
                    } else {
                        urlencoding::encode(&value).into_owned()
                    };
                    parts.push((encoded, omittable || value.is_empty()));
                    consumed.push(name.clone());
                }
            }
        }

        while parts.last().is_some_and(|(_, omittable)| *omittable) {
            parts.pop();
        }

        let path = parts
            .into_iter()
            .map(|(part, _)| part)
            .collect::<Vec<_>>()
            .join("/");
        Some((path, consumed))
    }

    fn split_request_path(path: &str) -> RequestSegments {
        let path = path
            .strip_prefix("~/")
            .or_else(|| path.strip_prefix('~'))
            .unwrap_or(path);
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            return RequestSegments::new();
        }

        path.split('/')
            .map(|s| {
                urlencoding::decode(s)
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
