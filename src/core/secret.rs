//! Secret document resolution.
//!
//! Fetches the raw JSON payload from the secret store and parses it into the
//! ten-field [`SecretDocument`]. Validation runs in two passes: presence
//! first, with every missing field reported at once, then value shape, with
//! every violation reported at once. A document never half-validates.

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};
use zeroize::Zeroize;

use aws_sdk_secretsmanager::error::SdkError;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;

use crate::core::aws;
use crate::core::constants::{LOG_LEVELS, REQUIRED_SECRET_KEYS, RESOLVE_ATTEMPTS};
use crate::core::reference::Reference;
use crate::core::validation;
use crate::error::{ResolveError, ValidationError};

/// Read-only access to the secret store.
pub trait SecretBackend: Send + Sync {
    /// Fetch the raw payload for the referenced secret.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::SecretNotFound` when the reference matches no
    /// secret, and `ResolveError::Unavailable` when the store cannot be
    /// reached within the retry budget.
    fn fetch(&self, secret: &Reference) -> Result<String, ResolveError>;
}

/// Secrets Manager-backed secret fetch.
///
/// Builds a current-thread runtime per call and blocks on the SDK, so the
/// resolver stays synchronous end to end.
pub struct SecretsManager;

impl SecretBackend for SecretsManager {
    fn fetch(&self, secret: &Reference) -> Result<String, ResolveError> {
        trace!(secret = %secret, "fetching secret");

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ResolveError::Unavailable {
                service: "secretsmanager",
                reason: format!("failed to create runtime: {e}"),
            })?;

        rt.block_on(async {
            let config = aws::client_config(secret.region()).await;
            let client = aws_sdk_secretsmanager::Client::new(&config);

            let resp = client
                .get_secret_value()
                .secret_id(secret.value())
                .send()
                .await
                .map_err(|e| classify_fetch_error(secret.value(), e))?;

            let payload = resp.secret_string().ok_or_else(|| {
                ResolveError::MalformedPayload("secret carries no string payload".to_string())
            })?;

            trace!(payload_len = payload.len(), "fetched secret payload");
            Ok(payload.to_string())
        })
    }
}

/// Map an SDK fetch failure onto the resolver's error space.
fn classify_fetch_error<R: fmt::Debug>(
    secret: &str,
    err: SdkError<GetSecretValueError, R>,
) -> ResolveError {
    if err
        .as_service_error()
        .is_some_and(GetSecretValueError::is_resource_not_found_exception)
    {
        return ResolveError::SecretNotFound(secret.to_string());
    }

    let rendered = aws_sdk_secretsmanager::error::DisplayErrorContext(&err).to_string();
    ResolveError::Unavailable {
        service: "secretsmanager",
        reason: format!("fetch failed after {RESOLVE_ATTEMPTS} attempts: {rendered}"),
    }
}

/// Runtime log level carried by the secret document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Parse a token case-insensitively into the canonical level set.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEnum` naming the allowed levels.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let normalized = validation::require_enum(field, value, &LOG_LEVELS)?;
        Ok(match normalized.as_str() {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            _ => Self::Critical,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape the secret payload must carry, shown in remediation hints.
const EXAMPLE_DOCUMENT: &str = r#"{
  "tenant": "acme",
  "client_id": "service-client-id",
  "client_secret": "service-client-secret",
  "app_definition_id": "app-definition-id",
  "pkg_prefix": "packages",
  "pkg_key": "experiment_id",
  "user_bucket": "acme-user-data",
  "log_level": "INFO",
  "enable_webhook_verification": "true",
  "webhook_allow_list": ""
}"#;

/// The parsed, validated contents of the secret payload.
///
/// Every field is required. String fields must be non-empty, with the single
/// exception of `webhook_allow_list`, where an empty value means "no
/// restriction".
#[derive(Clone, PartialEq, Eq)]
pub struct SecretDocument {
    pub tenant: String,
    pub client_id: String,
    pub client_secret: String,
    pub app_definition_id: String,
    pub pkg_prefix: String,
    pub pkg_key: String,
    pub user_bucket: String,
    pub log_level: LogLevel,
    pub enable_webhook_verification: bool,
    /// Comma-separated host allow list; empty means no restriction.
    pub webhook_allow_list: String,
}

impl SecretDocument {
    /// Parse and validate a raw secret payload.
    ///
    /// The payload buffer is zeroized before this returns, success or
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::MalformedPayload` when the payload is not a
    /// JSON object, `ResolveError::MissingFields` naming every absent key,
    /// or `ResolveError::InvalidDocument` carrying every shape violation.
    pub fn from_payload(mut payload: String) -> Result<Self, ResolveError> {
        let parsed: Result<Value, serde_json::Error> = serde_json::from_str(&payload);
        payload.zeroize();

        let doc = parsed.map_err(|e| ResolveError::MalformedPayload(e.to_string()))?;
        let map = match doc.as_object() {
            Some(map) => map,
            None => {
                return Err(ResolveError::MalformedPayload(
                    "expected a json object".to_string(),
                ))
            }
        };

        // Pass 1: presence. Unknown extra keys are ignored.
        let missing: Vec<String> = REQUIRED_SECRET_KEYS
            .iter()
            .filter(|key| !map.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            debug!(missing = missing.len(), "secret document incomplete");
            return Err(ResolveError::MissingFields { fields: missing });
        }

        // Pass 2: shape. Collect everything before failing.
        let mut violations = Vec::new();

        let tenant = string_field(map, "tenant", false, &mut violations);
        let client_id = string_field(map, "client_id", false, &mut violations);
        let client_secret = string_field(map, "client_secret", false, &mut violations);
        let app_definition_id = string_field(map, "app_definition_id", false, &mut violations);
        let pkg_prefix = string_field(map, "pkg_prefix", false, &mut violations);
        let pkg_key = string_field(map, "pkg_key", false, &mut violations);
        let user_bucket = string_field(map, "user_bucket", false, &mut violations);

        let log_level = match map.get("log_level") {
            Some(Value::String(token)) => match LogLevel::parse("log_level", token) {
                Ok(level) => level,
                Err(violation) => {
                    violations.push(violation);
                    LogLevel::Info
                }
            },
            _ => {
                violations.push(ValidationError::WrongType {
                    field: "log_level".to_string(),
                    expected: "string",
                });
                LogLevel::Info
            }
        };

        let enable_webhook_verification = match map.get("enable_webhook_verification") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(token)) => {
                match validation::parse_bool_token("enable_webhook_verification", token) {
                    Ok(flag) => flag,
                    Err(violation) => {
                        violations.push(violation);
                        false
                    }
                }
            }
            _ => {
                violations.push(ValidationError::WrongType {
                    field: "enable_webhook_verification".to_string(),
                    expected: "boolean",
                });
                false
            }
        };

        let webhook_allow_list = string_field(map, "webhook_allow_list", true, &mut violations);

        if !violations.is_empty() {
            debug!(
                violations = violations.len(),
                "secret document failed validation"
            );
            return Err(ResolveError::InvalidDocument { violations });
        }

        Ok(Self {
            tenant,
            client_id,
            client_secret,
            app_definition_id,
            pkg_prefix,
            pkg_key,
            user_bucket,
            log_level,
            enable_webhook_verification,
            webhook_allow_list,
        })
    }

    /// Example document shown when validation fails.
    pub fn example() -> &'static str {
        EXAMPLE_DOCUMENT
    }
}

impl fmt::Debug for SecretDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretDocument")
            .field("tenant", &self.tenant)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("app_definition_id", &self.app_definition_id)
            .field("pkg_prefix", &self.pkg_prefix)
            .field("pkg_key", &self.pkg_key)
            .field("user_bucket", &self.user_bucket)
            .field("log_level", &self.log_level)
            .field(
                "enable_webhook_verification",
                &self.enable_webhook_verification,
            )
            .field("webhook_allow_list", &self.webhook_allow_list)
            .finish()
    }
}

/// Extract a string field, recording a violation (and substituting an empty
/// placeholder) when the value does not have the expected shape.
fn string_field(
    map: &serde_json::Map<String, Value>,
    field: &'static str,
    allow_empty: bool,
    violations: &mut Vec<ValidationError>,
) -> String {
    match map.get(field) {
        Some(Value::String(value)) => {
            if !allow_empty {
                if let Err(violation) = validation::require_non_empty(field, value) {
                    violations.push(violation);
                }
            }
            value.clone()
        }
        _ => {
            violations.push(ValidationError::WrongType {
                field: field.to_string(),
                expected: "string",
            });
            String::new()
        }
    }
}
