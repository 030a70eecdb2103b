//! The resolved runtime configuration.
//!
//! One immutable object assembled from the stack outputs and the secret
//! document. Fields are private and read through accessors; nothing mutates
//! a configuration after assembly. The type implements no `Serialize`, and
//! its `Debug` output redacts the client secret.

use std::fmt;

use crate::core::secret::{LogLevel, SecretDocument};
use crate::core::stack::{QueueLocator, StackOutputs};

/// The single configuration object the running service reads.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    stack_name: String,
    region: String,
    account_id: String,
    database: String,
    queue: QueueLocator,
    tenant: String,
    client_id: String,
    client_secret: String,
    app_definition_id: String,
    pkg_prefix: String,
    pkg_key: String,
    user_bucket: String,
    log_level: LogLevel,
    enable_webhook_verification: bool,
    webhook_allow_list: String,
}

impl ResolvedConfig {
    /// Merge the secret document and stack outputs into one configuration.
    ///
    /// The stack contributes only infrastructure facts (its own name, the
    /// region and account, the database, the queue); every application field
    /// comes from the secret. A stack output that happens to share a name
    /// with a secret field is ignored, so the secret's value always wins.
    pub fn assemble(document: SecretDocument, outputs: StackOutputs) -> Self {
        Self {
            stack_name: outputs.stack_name().to_string(),
            region: outputs.region().to_string(),
            account_id: outputs.account_id().to_string(),
            database: outputs.database().to_string(),
            queue: outputs.queue().clone(),
            tenant: document.tenant,
            client_id: document.client_id,
            client_secret: document.client_secret,
            app_definition_id: document.app_definition_id,
            pkg_prefix: document.pkg_prefix,
            pkg_key: document.pkg_key,
            user_bucket: document.user_bucket,
            log_level: document.log_level,
            enable_webhook_verification: document.enable_webhook_verification,
            webhook_allow_list: document.webhook_allow_list,
        }
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Catalog database name exported by the stack.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Ingest queue locator, normalized into both forms.
    pub fn queue(&self) -> &QueueLocator {
        &self.queue
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The raw client secret. Handle with care; never log or serialize.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn app_definition_id(&self) -> &str {
        &self.app_definition_id
    }

    pub fn pkg_prefix(&self) -> &str {
        &self.pkg_prefix
    }

    pub fn pkg_key(&self) -> &str {
        &self.pkg_key
    }

    pub fn user_bucket(&self) -> &str {
        &self.user_bucket
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn webhook_verification_enabled(&self) -> bool {
        self.enable_webhook_verification
    }

    /// The raw comma-separated allow list, possibly empty.
    pub fn webhook_allow_list(&self) -> &str {
        &self.webhook_allow_list
    }

    /// Entries of the allow list; an empty list means no restriction.
    pub fn webhook_allow_list_entries(&self) -> Vec<&str> {
        self.webhook_allow_list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("stack_name", &self.stack_name)
            .field("region", &self.region)
            .field("account_id", &self.account_id)
            .field("database", &self.database)
            .field("queue", &self.queue)
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
