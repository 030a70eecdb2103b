//! Profile documents.
//!
//! A profile is the on-disk, human-editable analogue of the resolved runtime
//! configuration, organized into logical groups plus a `_metadata` block the
//! store stamps on every write. Every group field is optional so a child
//! profile can set only what differs from its parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants::{ARN_PREFIX, LOG_LEVELS, SCHEMA_VERSION};
use crate::core::validation;
use crate::error::{ProfileError, ValidationError};

/// Infrastructure facts: where the service runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    /// Stack name or locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Catalog database name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    /// Ingest queue name or locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

/// Identity the service presents upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authentication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_definition_id: Option<String>,
}

/// Object storage layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg_key: Option<String>,
}

/// How the service ships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u32>,
}

/// Runtime logging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    /// One of DEBUG, INFO, WARNING, ERROR, CRITICAL (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Secret wiring and webhook policy.
///
/// `secret` names where the client secret lives; the raw value never appears
/// in a profile document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Security {
    /// Secret name or locator holding the runtime secret document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_webhook_verification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_allow_list: Option<String>,
}

/// Provenance stamped by the store on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u32,
    pub created_by: String,
}

/// A named deployment profile document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Parent profile whose values fill this one's unset fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    #[serde(default)]
    pub infrastructure: Infrastructure,
    #[serde(default)]
    pub authentication: Authentication,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub deployment: Deployment,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub security: Security,
    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ProfileConfig {
    /// Overlay this profile on its parent: set fields win, unset fields fall
    /// through. The child's `inherits` declaration and metadata survive.
    pub fn merge_over(self, parent: ProfileConfig) -> ProfileConfig {
        ProfileConfig {
            inherits: self.inherits,
            infrastructure: Infrastructure {
                stack: self.infrastructure.stack.or(parent.infrastructure.stack),
                region: self.infrastructure.region.or(parent.infrastructure.region),
                account: self.infrastructure.account.or(parent.infrastructure.account),
                catalog: self.infrastructure.catalog.or(parent.infrastructure.catalog),
                queue: self.infrastructure.queue.or(parent.infrastructure.queue),
            },
            authentication: Authentication {
                tenant: self.authentication.tenant.or(parent.authentication.tenant),
                client_id: self
                    .authentication
                    .client_id
                    .or(parent.authentication.client_id),
                app_definition_id: self
                    .authentication
                    .app_definition_id
                    .or(parent.authentication.app_definition_id),
            },
            storage: Storage {
                bucket: self.storage.bucket.or(parent.storage.bucket),
                pkg_prefix: self.storage.pkg_prefix.or(parent.storage.pkg_prefix),
                pkg_key: self.storage.pkg_key.or(parent.storage.pkg_key),
            },
            deployment: Deployment {
                service: self.deployment.service.or(parent.deployment.service),
                image: self.deployment.image.or(parent.deployment.image),
                memory_mb: self.deployment.memory_mb.or(parent.deployment.memory_mb),
                timeout_secs: self
                    .deployment
                    .timeout_secs
                    .or(parent.deployment.timeout_secs),
            },
            logging: Logging {
                level: self.logging.level.or(parent.logging.level),
            },
            security: Security {
                secret: self.security.secret.or(parent.security.secret),
                enable_webhook_verification: self
                    .security
                    .enable_webhook_verification
                    .or(parent.security.enable_webhook_verification),
                webhook_allow_list: self
                    .security
                    .webhook_allow_list
                    .or(parent.security.webhook_allow_list),
            },
            metadata: self.metadata,
        }
    }

    /// Set a field by its dotted path, e.g. `authentication.tenant`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnknownField` for a path outside the schema and
    /// `ProfileError::InvalidFieldValue` when the value does not parse.
    pub fn set_path(&mut self, path: &str, value: &str) -> Result<(), ProfileError> {
        match path {
            "inherits" => self.inherits = Some(value.to_string()),
            "infrastructure.stack" => self.infrastructure.stack = Some(value.to_string()),
            "infrastructure.region" => self.infrastructure.region = Some(value.to_string()),
            "infrastructure.account" => self.infrastructure.account = Some(value.to_string()),
            "infrastructure.catalog" => self.infrastructure.catalog = Some(value.to_string()),
            "infrastructure.queue" => self.infrastructure.queue = Some(value.to_string()),
            "authentication.tenant" => self.authentication.tenant = Some(value.to_string()),
            "authentication.client_id" => self.authentication.client_id = Some(value.to_string()),
            "authentication.app_definition_id" => {
                self.authentication.app_definition_id = Some(value.to_string())
            }
            "storage.bucket" => self.storage.bucket = Some(value.to_string()),
            "storage.pkg_prefix" => self.storage.pkg_prefix = Some(value.to_string()),
            "storage.pkg_key" => self.storage.pkg_key = Some(value.to_string()),
            "deployment.service" => self.deployment.service = Some(value.to_string()),
            "deployment.image" => self.deployment.image = Some(value.to_string()),
            "deployment.memory_mb" => self.deployment.memory_mb = Some(parse_u32(path, value)?),
            "deployment.timeout_secs" => {
                self.deployment.timeout_secs = Some(parse_u32(path, value)?)
            }
            "logging.level" => self.logging.level = Some(value.to_string()),
            "security.secret" => self.security.secret = Some(value.to_string()),
            "security.enable_webhook_verification" => {
                let flag = validation::parse_bool_token(path, value).map_err(|e| {
                    ProfileError::InvalidFieldValue {
                        field: path.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                self.security.enable_webhook_verification = Some(flag);
            }
            "security.webhook_allow_list" => {
                self.security.webhook_allow_list = Some(value.to_string())
            }
            _ => return Err(ProfileError::UnknownField(path.to_string())),
        }
        Ok(())
    }

    /// Check the minimal required-field set plus locator and level shapes.
    ///
    /// Returns every violation found, not just the first. Inheriting callers
    /// validate the merged view, so a sparse child passes as long as its
    /// parent fills the gaps.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut violations = Vec::new();

        required(
            "infrastructure.stack",
            &self.infrastructure.stack,
            &mut violations,
        );
        required(
            "infrastructure.catalog",
            &self.infrastructure.catalog,
            &mut violations,
        );
        required("storage.bucket", &self.storage.bucket, &mut violations);
        required(
            "authentication.tenant",
            &self.authentication.tenant,
            &mut violations,
        );
        required(
            "authentication.client_id",
            &self.authentication.client_id,
            &mut violations,
        );
        required("security.secret", &self.security.secret, &mut violations);

        arn_shaped(
            "infrastructure.stack",
            &self.infrastructure.stack,
            "cloudformation",
            &mut violations,
        );
        arn_shaped(
            "infrastructure.queue",
            &self.infrastructure.queue,
            "sqs",
            &mut violations,
        );
        arn_shaped(
            "security.secret",
            &self.security.secret,
            "secretsmanager",
            &mut violations,
        );

        if let Some(level) = &self.logging.level {
            if let Err(violation) = validation::require_enum("logging.level", level, &LOG_LEVELS) {
                violations.push(violation);
            }
        }

        violations
    }
}

fn required(field: &str, value: &Option<String>, violations: &mut Vec<ValidationError>) {
    match value {
        Some(v) => {
            if let Err(violation) = validation::require_non_empty(field, v) {
                violations.push(violation);
            }
        }
        None => violations.push(ValidationError::Empty {
            field: field.to_string(),
        }),
    }
}

/// Shape-check a value only when it claims to be a locator; bare names pass.
fn arn_shaped(
    field: &str,
    value: &Option<String>,
    service: &'static str,
    violations: &mut Vec<ValidationError>,
) {
    if let Some(v) = value {
        if v.starts_with(ARN_PREFIX) {
            if let Err(violation) = validation::require_arn(field, v, Some(service)) {
                violations.push(violation);
            }
        }
    }
}

fn parse_u32(field: &str, value: &str) -> Result<u32, ProfileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ProfileError::InvalidFieldValue {
            field: field.to_string(),
            reason: format!("'{value}' is not a whole number"),
        })
}

/// Stamp provenance: creation facts survive updates, `updated_at` moves.
pub(crate) fn stamp_metadata(config: &mut ProfileConfig, existing: Option<&Metadata>) {
    let now = Utc::now();
    config.metadata = Some(Metadata {
        created_at: existing.map(|m| m.created_at).unwrap_or(now),
        updated_at: now,
        schema_version: SCHEMA_VERSION,
        created_by: existing
            .map(|m| m.created_by.clone())
            .unwrap_or_else(whoami::username),
    });
}
