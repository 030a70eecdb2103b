//! Bootstrap reference classification.
//!
//! A reference names the infrastructure stack or the secret document a
//! process boots from. Three textual shapes are accepted:
//!
//! - a fully-qualified resource locator (`arn:` prefix)
//! - a local-file indirection (`@path`, the file holds the real reference)
//! - a bare inline name, resolved by the backing service
//!
//! Classification is purely syntactic; only the file indirection touches the
//! filesystem, and indirections never nest.

use std::fmt;
use std::fs;

use tracing::debug;

use crate::core::constants::ARN_PREFIX;
use crate::core::validation;
use crate::error::ReferenceError;

/// How a reference value is qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Fully-qualified resource locator.
    Arn,
    /// Bare name, resolved by the backing service.
    Name,
}

/// A classified bootstrap reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    kind: ReferenceKind,
    value: String,
}

impl Reference {
    /// Parse a raw reference, following one level of `@file` indirection.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Malformed` for empty input, whitespace in a
    /// bare name, a syntactically invalid locator, or a nested indirection,
    /// and `ReferenceError::Unreadable` when the `@file` cannot be read.
    pub fn parse(raw: &str) -> Result<Self, ReferenceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Malformed {
                value: raw.to_string(),
                reason: "reference is empty".to_string(),
            });
        }

        if let Some(path) = trimmed.strip_prefix('@') {
            debug!(path, "reading reference from file");
            let contents = fs::read_to_string(path).map_err(|e| ReferenceError::Unreadable {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

            let inner = contents.trim();
            if inner.is_empty() {
                return Err(ReferenceError::Malformed {
                    value: format!("@{path}"),
                    reason: "referenced file is empty".to_string(),
                });
            }
            if inner.starts_with('@') {
                return Err(ReferenceError::Malformed {
                    value: format!("@{path}"),
                    reason: "file indirections do not nest".to_string(),
                });
            }
            return Self::classify(inner);
        }

        Self::classify(trimmed)
    }

    fn classify(value: &str) -> Result<Self, ReferenceError> {
        if value.starts_with(ARN_PREFIX) {
            if validation::require_arn("reference", value, None).is_err() {
                return Err(ReferenceError::Malformed {
                    value: value.to_string(),
                    reason: "not a valid resource locator".to_string(),
                });
            }
            return Ok(Self {
                kind: ReferenceKind::Arn,
                value: value.to_string(),
            });
        }

        if value.chars().any(char::is_whitespace) {
            return Err(ReferenceError::Malformed {
                value: value.to_string(),
                reason: "bare names cannot contain whitespace".to_string(),
            });
        }

        Ok(Self {
            kind: ReferenceKind::Name,
            value: value.to_string(),
        })
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// The normalized reference text passed to the backing service.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Region segment of a locator reference, when present and non-empty.
    ///
    /// Bare names carry no region; the backend falls through to the ambient
    /// client configuration.
    pub fn region(&self) -> Option<&str> {
        match self.kind {
            ReferenceKind::Arn => self.value.split(':').nth(3).filter(|r| !r.is_empty()),
            ReferenceKind::Name => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The pair of references a process boots from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceBundle {
    pub stack: Reference,
    pub secret: Reference,
}

impl ReferenceBundle {
    pub fn new(stack: Reference, secret: Reference) -> Self {
        Self { stack, secret }
    }

    /// Parse both references from their raw textual forms.
    ///
    /// # Errors
    ///
    /// Returns the first `ReferenceError` encountered; references are cheap
    /// to parse, so callers re-invoke after fixing one.
    pub fn from_values(stack: &str, secret: &str) -> Result<Self, ReferenceError> {
        Ok(Self {
            stack: Reference::parse(stack)?,
            secret: Reference::parse(secret)?,
        })
    }
}
