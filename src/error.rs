//! Error types for caisson operations.
//!
//! Errors are grouped by subsystem: reference classification, configuration
//! resolution, document validation, and profile persistence. The top-level
//! [`Error`] wraps them for CLI reporting; library callers usually match on
//! the subsystem enums directly.

use thiserror::Error;

/// Render a violation list one item per line, indented under the headline.
fn bulleted<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-level error for CLI and library entry points.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures classifying a bootstrap reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("malformed reference '{value}': {reason}")]
    Malformed { value: String, reason: String },

    #[error("reference file '{path}' is not readable: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Failures resolving configuration from the stack and secret backends.
///
/// Cloneable so a memoized resolution failure can be handed to every caller
/// of the cache, not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("secret is missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("secret document failed validation:\n{}", bulleted(.violations))]
    InvalidDocument { violations: Vec<ValidationError> },

    #[error("secret payload is not a json document: {0}")]
    MalformedPayload(String),

    #[error("stack '{stack}' is missing required outputs: {}", .keys.join(", "))]
    MissingOutputs { stack: String, keys: Vec<String> },

    #[error("stack '{0}' not found")]
    StackNotFound(String),

    #[error("secret '{0}' not found")]
    SecretNotFound(String),

    #[error("describe returned an unusable stack id '{0}'")]
    MalformedStackId(String),

    #[error("queue locator '{0}' is neither a queue url nor a queue arn")]
    MalformedQueueLocator(String),

    #[error("{service} unavailable: {reason}")]
    Unavailable { service: &'static str, reason: String },
}

/// A single field-level validation violation.
///
/// Validation never stops at the first problem; callers collect these into
/// [`ResolveError::InvalidDocument`] or [`ProfileError::Invalid`] so one
/// round trip reports everything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{field}' must not be empty")]
    Empty { field: String },

    #[error("'{field}' must be a {expected}")]
    WrongType { field: String, expected: &'static str },

    #[error("'{field}' has invalid value '{value}': expected one of {}", .allowed.join(", "))]
    InvalidEnum {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("'{field}' has invalid boolean '{value}': expected true, false, 1, or 0")]
    InvalidBoolean { field: String, value: String },

    #[error("'{field}' does not look like {kind}: '{value}'")]
    InvalidLocator {
        field: String,
        kind: String,
        value: String,
    },
}

/// Failures reading or writing the profile store.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("profile '{0}' not found")]
    NotFound(String),

    #[error("profile '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid profile name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("profile '{profile}' is not valid json: {reason}")]
    Malformed { profile: String, reason: String },

    #[error("profile '{profile}' failed validation:\n{}", bulleted(.violations))]
    Invalid {
        profile: String,
        violations: Vec<ValidationError>,
    },

    #[error("profile '{profile}' inherits from itself")]
    CyclicInheritance { profile: String },

    #[error("unknown profile field '{0}'")]
    UnknownField(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("unable to determine home directory")]
    NoHome,

    #[error("json serialize error: {0}")]
    Serialize(serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
