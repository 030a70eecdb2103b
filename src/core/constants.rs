//! Constants used throughout caisson.
//!
//! Centralizes magic strings and resolution tunables.

use std::time::Duration;

/// Environment variable carrying the infrastructure stack reference.
pub const STACK_ENV: &str = "CAISSON_STACK";

/// Environment variable carrying the secret reference.
pub const SECRET_ENV: &str = "CAISSON_SECRET";

/// Environment variable tuning log verbosity (env-filter syntax).
pub const LOG_ENV: &str = "CAISSON_LOG";

/// Profile storage directory relative to HOME (~/.caisson/profiles).
pub const PROFILE_DIR: &str = ".caisson/profiles";

/// Profile document file name inside a profile's directory.
pub const PROFILE_FILE: &str = "profile.json";

/// Deployment history file name inside a profile's directory.
pub const HISTORY_FILE: &str = "deployments.json";

/// Version stamped into `_metadata.schema_version` on every write.
pub const SCHEMA_VERSION: u32 = 1;

/// Prefix identifying a fully-qualified resource locator.
pub const ARN_PREFIX: &str = "arn:";

/// The ten keys every secret document must carry.
pub const REQUIRED_SECRET_KEYS: [&str; 10] = [
    "tenant",
    "client_id",
    "client_secret",
    "app_definition_id",
    "pkg_prefix",
    "pkg_key",
    "user_bucket",
    "log_level",
    "enable_webhook_verification",
    "webhook_allow_list",
];

/// Allowed `log_level` tokens after uppercase normalization.
pub const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

/// Stack output holding the catalog database name.
pub const OUTPUT_DATABASE: &str = "DatabaseName";

/// Stack output holding the ingest queue locator in ARN form.
pub const OUTPUT_QUEUE_ARN: &str = "QueueArn";

/// Alternate stack output holding the ingest queue locator in URL form.
pub const OUTPUT_QUEUE_URL: &str = "QueueUrl";

/// Attempt budget for each AWS call (standard retry).
pub const RESOLVE_ATTEMPTS: u32 = 3;

/// Per-call deadline, spanning all retry attempts.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);
