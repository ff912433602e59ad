//! Error handling types

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// A single rejected configuration field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path of the offending field (e.g. `app.secret`)
    pub field: String,
    /// What is wrong with it
    pub reason: String,
}

impl FieldViolation {
    /// Create a violation for `field`
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Renders violations as `a: reason; b: reason`
fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for behapi
#[derive(Error, Debug)]
pub enum Error {
    /// Raw configuration rejected; lists every violated field
    #[error("Configuration error: {}", join_violations(.violations))]
    Configuration {
        /// All violations found in one validation pass
        violations: Vec<FieldViolation>,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Lookup of an identifier that was never registered
    #[error("Unknown service: {id}")]
    UnknownService {
        /// The identifier that was looked up
        id: String,
    },

    /// The same identifier was registered twice
    #[error("Service already registered: {id}")]
    DuplicateService {
        /// The identifier registered twice
        id: String,
    },

    /// The reference graph contains a cycle
    #[error("Cyclic dependency: {}", .path.join(" -> "))]
    CyclicDependency {
        /// Identifiers along the cycle, first and last being equal
        path: Vec<String>,
    },

    /// A constructor, factory method or method call failed
    #[error("Failed to construct service '{id}': {message}")]
    ServiceConstruction {
        /// Service being built
        id: String,
        /// Description of the failure
        message: String,
    },

    /// A service or argument does not have the requested type
    #[error("Service '{id}' does not provide {expected}")]
    ServiceType {
        /// Service or argument position that was inspected
        id: String,
        /// Name of the requested type
        expected: String,
    },

    /// A resettable bag failed to reset
    #[error("Failed to reset bag '{bag}': {message}")]
    ResetFailure {
        /// Identifier of the bag
        bag: String,
        /// Description of the failure
        message: String,
    },

    /// HTTP client error
    #[error("HTTP error: {message}")]
    Http {
        /// Description of the HTTP error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Key-value store error
    #[error("Key-value store error: {message}")]
    KeyValue {
        /// Description of the store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Template rendering error
    #[error("Template error: {message}")]
    Template {
        /// Description of the templating error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error from the collected violations
    pub fn configuration(violations: Vec<FieldViolation>) -> Self {
        Self::Configuration { violations }
    }

    /// Create a configuration loading error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown service error
    pub fn unknown_service<S: Into<String>>(id: S) -> Self {
        Self::UnknownService { id: id.into() }
    }

    /// Create a duplicate service error
    pub fn duplicate_service<S: Into<String>>(id: S) -> Self {
        Self::DuplicateService { id: id.into() }
    }

    /// Create a cyclic dependency error
    pub fn cyclic_dependency(path: Vec<String>) -> Self {
        Self::CyclicDependency { path }
    }

    /// Create a service construction error
    pub fn construction<I: Into<String>, S: Into<String>>(id: I, message: S) -> Self {
        Self::ServiceConstruction {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a service type mismatch error
    pub fn service_type<I: Into<String>, S: Into<String>>(id: I, expected: S) -> Self {
        Self::ServiceType {
            id: id.into(),
            expected: expected.into(),
        }
    }

    /// Create a reset failure
    pub fn reset_failure<I: Into<String>, S: Into<String>>(bag: I, message: S) -> Self {
        Self::ResetFailure {
            bag: bag.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http<S: Into<String>>(message: S) -> Self {
        Self::Http {
            message: message.into(),
            source: None,
        }
    }

    /// Create a template error
    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Violated fields, when this is a [`Error::Configuration`]
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Configuration { violations } => violations,
            _ => &[],
        }
    }

    /// Whether the error happened while composing the service graph
    ///
    /// Composition errors abort the run before any scenario executes.
    pub fn is_composition_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::Config { .. }
                | Self::UnknownService { .. }
                | Self::DuplicateService { .. }
                | Self::CyclicDependency { .. }
        )
    }
}
