//! Shared validation primitives.
//!
//! Pure functions over field values, with no I/O. The secret resolver and the
//! profile store both validate through these so the two configuration paths
//! never drift in what they accept.
//!
//! Validators return [`ValidationError`] rather than the top-level error so
//! callers can collect every violation before reporting.

use crate::core::constants::ARN_PREFIX;
use crate::error::ValidationError;

/// Require a non-empty, non-blank string value.
///
/// # Arguments
///
/// * `field` - The field name (for error messages)
/// * `value` - The value to check
///
/// # Errors
///
/// Returns `ValidationError::Empty` if the value is empty or whitespace-only.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Require membership in an allowed token set, case-insensitively.
///
/// Returns the normalized (uppercase) token on success, so stored values end
/// up in the canonical spelling regardless of how they were typed.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEnum` naming the full allowed set.
pub fn require_enum(
    field: &str,
    value: &str,
    allowed: &'static [&'static str],
) -> Result<String, ValidationError> {
    let normalized = value.trim().to_ascii_uppercase();
    if allowed.contains(&normalized.as_str()) {
        return Ok(normalized);
    }

    Err(ValidationError::InvalidEnum {
        field: field.to_string(),
        value: value.to_string(),
        allowed,
    })
}

/// Coerce a boolean from its string token form.
///
/// Secret stores hand every value back as a string, so booleans arrive as
/// tokens: `true`/`false`/`1`/`0`, case-insensitive. Anything else is an
/// invalid boolean; a missing value is the caller's concern.
///
/// # Errors
///
/// Returns `ValidationError::InvalidBoolean` for unrecognized tokens.
pub fn parse_bool_token(field: &str, token: &str) -> Result<bool, ValidationError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            field: field.to_string(),
            value: token.to_string(),
        }),
    }
}

/// Check that a value has the shape of a fully-qualified resource locator.
///
/// Only the shape is checked; no call is made to verify the resource exists.
/// `service` narrows the check to one service (e.g. `"sqs"`); `None` accepts
/// any. The region and account segments may be empty, as they are for some
/// global resources.
///
/// # Errors
///
/// Returns `ValidationError::InvalidLocator` if the shape does not hold.
pub fn require_arn(
    field: &str,
    value: &str,
    service: Option<&str>,
) -> Result<(), ValidationError> {
    let parts: Vec<&str> = value.splitn(6, ':').collect();
    let shaped = value.starts_with(ARN_PREFIX)
        && parts.len() == 6
        && !parts[1].is_empty()
        && !parts[2].is_empty()
        && !parts[5].is_empty()
        && service.map_or(true, |s| parts[2] == s);

    if shaped {
        return Ok(());
    }

    let kind = match service {
        Some(s) => format!("a {s} arn"),
        None => "an arn".to_string(),
    };
    Err(ValidationError::InvalidLocator {
        field: field.to_string(),
        kind,
        value: value.to_string(),
    })
}
