//! Routing error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or querying a route table.
#[derive(Error, Debug)]
pub enum RoutingError {
    /// The route URL pattern is malformed.
    #[error("invalid route pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// A parameter constraint could not be compiled.
    #[error("invalid constraint for \"{parameter}\": {reason}")]
    InvalidConstraint {
        /// The constrained parameter.
        parameter: String,
        /// Why the constraint was rejected.
        reason: String,
    },

    /// A page route target is not application-relative.
    #[error("the virtual path \"{virtual_path}\" must start with \"~/\"")]
    InvalidVirtualPath {
        /// The offending virtual path.
        virtual_path: String,
    },

    /// Two routes were registered under the same name.
    #[error("a route named \"{name}\" is already in the route collection")]
    DuplicateRouteName {
        /// The duplicated name.
        name: String,
    },

    /// URL generation referenced an unknown route name.
    #[error("a route named \"{name}\" could not be found in the route collection")]
    RouteNotFound {
        /// The requested name.
        name: String,
    },

    /// Route values could not be built from the supplied structure.
    #[error("invalid route values: {reason}")]
    InvalidRouteValues {
        /// Why the values were rejected.
        reason: String,
    },

    /// A route table fixture is semantically invalid.
    #[error("invalid route table configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// A route table fixture file does not exist.
    #[error("route table configuration not found: {path}")]
    ConfigNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// A route table fixture file could not be read.
    #[error("failed to read route table configuration: {path}")]
    ConfigRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A route table fixture is not valid TOML for the expected schema.
    #[error("failed to parse route table configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl RoutingError {
    /// Create a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid constraint error.
    pub fn invalid_constraint(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a new route not found error.
    pub fn route_not_found(name: impl Into<String>) -> Self {
        Self::RouteNotFound { name: name.into() }
    }

    /// Create a new invalid route values error.
    pub fn invalid_route_values(reason: impl Into<String>) -> Self {
        Self::InvalidRouteValues {
            reason: reason.into(),
        }
    }

    /// Create a new invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
