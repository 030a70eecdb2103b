//! Deployment history.
//!
//! An append-only log of deployments per profile. Records are never mutated
//! or removed once written; appending also refreshes the active entry for
//! the record's environment, so the active set is always the latest record
//! per environment.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Target environment, e.g. `dev` or `prod`.
    pub environment: String,
    /// Image or version identifier that went out.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// When the deployment was recorded.
    pub deployed_at: DateTime<Utc>,
    /// Who recorded it.
    pub deployed_by: String,
}

impl DeploymentRecord {
    /// Create a record stamped with the current time and user.
    pub fn new(environment: &str, image: &str) -> Self {
        Self {
            environment: environment.to_string(),
            image: image.to_string(),
            endpoint: None,
            stack: None,
            region: None,
            deployed_at: Utc::now(),
            deployed_by: whoami::username(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn with_stack(mut self, stack: &str) -> Self {
        self.stack = Some(stack.to_string());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }
}

/// Append-only deployment history for one profile, plus the active set
/// keyed by environment name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentHistory {
    #[serde(default)]
    pub deployments: Vec<DeploymentRecord>,
    #[serde(default)]
    pub active: BTreeMap<String, DeploymentRecord>,
}

impl DeploymentHistory {
    /// Append a record and make it the active entry for its environment.
    /// Existing records are never touched.
    pub fn record(&mut self, record: DeploymentRecord) {
        self.active
            .insert(record.environment.clone(), record.clone());
        self.deployments.push(record);
    }

    /// Records for one environment, oldest first.
    pub fn for_environment(&self, environment: &str) -> Vec<&DeploymentRecord> {
        self.deployments
            .iter()
            .filter(|record| record.environment == environment)
            .collect()
    }

    /// The active deployment for an environment.
    pub fn active_for(&self, environment: &str) -> Option<&DeploymentRecord> {
        self.active.get(environment)
    }

    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }
}
