//! Deployment history commands (record, history, active).

use crate::cli::output;
use crate::core::profile::{DeploymentRecord, ProfileStore};
use crate::error::{ProfileError, Result};

/// Record a deployment for an environment.
pub fn record(
    profile: &str,
    environment: &str,
    image: &str,
    endpoint: Option<String>,
    stack: Option<String>,
    region: Option<String>,
) -> Result<()> {
    let store = ProfileStore::open_default()?;

    let mut record = DeploymentRecord::new(environment, image);
    if let Some(endpoint) = endpoint.as_deref() {
        record = record.with_endpoint(endpoint);
    }
    if let Some(stack) = stack.as_deref() {
        record = record.with_stack(stack);
    }
    if let Some(region) = region.as_deref() {
        record = record.with_region(region);
    }

    store.record_deployment(profile, record)?;
    output::success(&format!(
        "recorded deployment of {} to {}",
        image,
        output::name(environment)
    ));
    Ok(())
}

/// Show deployment history, optionally restricted to one environment.
pub fn history(profile: &str, environment: Option<&str>, json: bool) -> Result<()> {
    let store = ProfileStore::open_default()?;
    let history = store.history(profile)?;

    let records: Vec<&DeploymentRecord> = match environment {
        Some(env) => history.for_environment(env),
        None => history.deployments.iter().collect(),
    };

    if json {
        let value = serde_json::to_value(&records).map_err(ProfileError::Serialize)?;
        println!("{value:#}");
        return Ok(());
    }

    if records.is_empty() {
        output::dimmed("no deployments recorded");
        return Ok(());
    }

    output::section(&format!("Deployments for {}", output::name(profile)));
    for record in records {
        let mut line = format!(
            "{}  {:<8}  {}",
            record.deployed_at.format("%Y-%m-%d %H:%M:%S"),
            record.environment,
            record.image
        );
        if let Some(endpoint) = &record.endpoint {
            line.push_str(&format!("  {endpoint}"));
        }
        output::list_item(&line);
    }
    Ok(())
}

/// Show the active deployment for an environment.
pub fn active(profile: &str, environment: &str, json: bool) -> Result<()> {
    let store = ProfileStore::open_default()?;

    let record = match store.active_deployment(profile, environment)? {
        Some(record) => record,
        None => {
            output::warn(&format!(
                "no active deployment for '{}' in profile '{}'",
                environment, profile
            ));
            return Ok(());
        }
    };

    if json {
        let value = serde_json::to_value(&record).map_err(ProfileError::Serialize)?;
        println!("{value:#}");
        return Ok(());
    }

    output::section(&format!(
        "Active deployment: {} / {}",
        output::name(profile),
        output::name(environment)
    ));
    output::kv("image", &record.image);
    output::kv(
        "deployed_at",
        record.deployed_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    output::kv("deployed_by", &record.deployed_by);
    if let Some(endpoint) = &record.endpoint {
        output::kv("endpoint", endpoint);
    }
    if let Some(stack) = &record.stack {
        output::kv("stack", stack);
    }
    if let Some(region) = &record.region {
        output::kv("region", region);
    }
    Ok(())
}
