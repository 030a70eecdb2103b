//! Profile management commands (create, show, validate, list).

use crate::cli::output;
use crate::core::profile::{ProfileConfig, ProfileStore};
use crate::error::{ProfileError, Result};

/// Create a named profile from `--set` fields, optionally inheriting a parent.
pub fn create(name: &str, inherit: Option<&str>, sets: &[String]) -> Result<()> {
    let store = ProfileStore::open_default()?;
    if store.exists(name) {
        return Err(ProfileError::AlreadyExists(name.to_string()).into());
    }

    let mut config = ProfileConfig {
        inherits: inherit.map(str::to_string),
        ..Default::default()
    };
    for entry in sets {
        let (path, value) = entry.split_once('=').ok_or_else(|| {
            ProfileError::InvalidFieldValue {
                field: entry.clone(),
                reason: "expected PATH=VALUE".to_string(),
            }
        })?;
        config.set_path(path.trim(), value.trim())?;
    }

    store.write(name, config)?;
    output::success(&format!("created profile '{}'", name));
    output::kv(
        "file",
        output::path(&store.profile_path(name).display().to_string()),
    );
    Ok(())
}

/// Show a profile document, raw or with inheritance applied.
pub fn show(name: &str, effective: bool, json: bool) -> Result<()> {
    let store = ProfileStore::open_default()?;
    let config = if effective {
        store.read_with_inheritance(name)?
    } else {
        store.read(name)?
    };

    if json {
        let value = serde_json::to_value(&config).map_err(ProfileError::Serialize)?;
        println!("{value:#}");
        return Ok(());
    }

    output::section(&format!("Profile {}", output::name(name)));
    if let Some(parent) = &config.inherits {
        output::kv("inherits", parent);
    }

    output::header("infrastructure");
    kv_opt("stack", &config.infrastructure.stack);
    kv_opt("region", &config.infrastructure.region);
    kv_opt("account", &config.infrastructure.account);
    kv_opt("catalog", &config.infrastructure.catalog);
    kv_opt("queue", &config.infrastructure.queue);

    output::header("authentication");
    kv_opt("tenant", &config.authentication.tenant);
    kv_opt("client_id", &config.authentication.client_id);
    kv_opt("app_definition_id", &config.authentication.app_definition_id);

    output::header("storage");
    kv_opt("bucket", &config.storage.bucket);
    kv_opt("pkg_prefix", &config.storage.pkg_prefix);
    kv_opt("pkg_key", &config.storage.pkg_key);

    output::header("deployment");
    kv_opt("service", &config.deployment.service);
    kv_opt("image", &config.deployment.image);
    kv_opt("memory_mb", &config.deployment.memory_mb);
    kv_opt("timeout_secs", &config.deployment.timeout_secs);

    output::header("logging");
    kv_opt("level", &config.logging.level);

    output::header("security");
    kv_opt("secret", &config.security.secret);
    kv_opt(
        "enable_webhook_verification",
        &config.security.enable_webhook_verification,
    );
    kv_opt("webhook_allow_list", &config.security.webhook_allow_list);

    if let Some(meta) = &config.metadata {
        output::header("_metadata");
        output::kv("created_at", meta.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        output::kv("updated_at", meta.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        output::kv("created_by", &meta.created_by);
        output::kv("schema_version", meta.schema_version);
    }

    Ok(())
}

/// Validate a profile's effective document.
pub fn validate(name: &str) -> Result<()> {
    let store = ProfileStore::open_default()?;
    let effective = store.read_with_inheritance(name)?;

    let violations = effective.validate();
    if !violations.is_empty() {
        return Err(ProfileError::Invalid {
            profile: name.to_string(),
            violations,
        }
        .into());
    }

    output::success(&format!("profile '{}' is valid", name));
    Ok(())
}

/// List all stored profiles.
pub fn list(json: bool) -> Result<()> {
    let store = ProfileStore::open_default()?;
    let names = store.list()?;

    if json {
        let value = serde_json::json!({
            "profiles": names,
            "count": names.len(),
        });
        println!("{value:#}");
        return Ok(());
    }

    if names.is_empty() {
        output::dimmed("no profiles yet");
        output::hint(&format!(
            "create one with {}",
            output::cmd("caisson profile create <name>")
        ));
        return Ok(());
    }

    output::header(&format!("{} profiles", names.len()));
    for name in names {
        output::list_item(&name);
    }
    Ok(())
}

fn kv_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => output::kv(label, v),
        None => output::kv(label, "(unset)"),
    }
}
