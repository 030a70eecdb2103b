//! Resolve command: fetch, validate, and print the runtime configuration.
//!
//! This is the operator-facing view of what a service instance would boot
//! with. The client secret is always masked; the raw value never reaches a
//! terminal or a shell history.

use crate::cli::output;
use crate::core::cache::ConfigCache;
use crate::core::reference::ReferenceBundle;
use crate::error::Result;

/// Placeholder printed in place of the client secret.
const MASKED: &str = "********";

/// Resolve the configuration for a stack/secret reference pair and print it.
pub fn execute(stack: &str, secret: &str, json: bool) -> Result<()> {
    let bundle = ReferenceBundle::from_values(stack, secret)?;
    let cache = ConfigCache::with_aws(bundle);

    if json {
        let resolved = cache.resolve()?;
        let value = serde_json::json!({
            "stack": resolved.stack_name(),
            "region": resolved.region(),
            "account": resolved.account_id(),
            "database": resolved.database(),
            "queue_arn": resolved.queue().arn(),
            "queue_url": resolved.queue().url(),
            "tenant": resolved.tenant(),
            "client_id": resolved.client_id(),
            "client_secret": MASKED,
            "app_definition_id": resolved.app_definition_id(),
            "pkg_prefix": resolved.pkg_prefix(),
            "pkg_key": resolved.pkg_key(),
            "user_bucket": resolved.user_bucket(),
            "log_level": resolved.log_level().as_str(),
            "enable_webhook_verification": resolved.webhook_verification_enabled(),
            "webhook_allow_list": resolved.webhook_allow_list_entries(),
        });
        println!("{value:#}");
        return Ok(());
    }

    output::progress("Resolving configuration");
    let resolved = match cache.resolve() {
        Ok(resolved) => {
            output::progress_done(true);
            resolved
        }
        Err(e) => {
            output::progress_done(false);
            return Err(e.into());
        }
    };

    output::section("Resolved Configuration");
    output::kv("stack", resolved.stack_name());
    output::kv("region", resolved.region());
    output::kv("account", resolved.account_id());
    output::kv("database", resolved.database());
    output::kv("queue", resolved.queue().arn());
    output::kv("queue url", resolved.queue().url());
    println!();
    output::kv("tenant", resolved.tenant());
    output::kv("client id", resolved.client_id());
    output::kv("client secret", MASKED);
    output::kv("app definition", resolved.app_definition_id());
    output::kv("bucket", resolved.user_bucket());
    output::kv("pkg prefix", resolved.pkg_prefix());
    output::kv("pkg key", resolved.pkg_key());
    output::kv("log level", resolved.log_level());

    let verification = match resolved.webhook_verification_enabled() {
        true => "enabled",
        false => "disabled",
    };
    output::kv("webhook verification", verification);

    let entries = resolved.webhook_allow_list_entries();
    if entries.is_empty() {
        output::kv("webhook allow list", "(no restriction)");
    } else {
        output::kv("webhook allow list", entries.join(", "));
    }

    Ok(())
}
