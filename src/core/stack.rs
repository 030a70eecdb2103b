//! Stack output resolution.
//!
//! Describes the infrastructure stack and extracts what the runtime needs
//! from its outputs: the catalog database, the ingest queue, and the region
//! and account the stack lives in. Queue locators are normalized into both
//! ARN and URL form here so nothing downstream parses one again.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::core::aws;
use crate::core::constants::{
    OUTPUT_DATABASE, OUTPUT_QUEUE_ARN, OUTPUT_QUEUE_URL, RESOLVE_ATTEMPTS,
};
use crate::core::reference::Reference;
use crate::error::ResolveError;

/// Read-only access to a stack description service.
pub trait StackBackend: Send + Sync {
    /// Describe the referenced stack, returning its id and output map.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::StackNotFound` when the reference matches no
    /// stack, and `ResolveError::Unavailable` when the service cannot be
    /// reached within the retry budget.
    fn describe(&self, stack: &Reference) -> Result<StackDescription, ResolveError>;
}

/// Raw describe result: the authoritative stack id plus the output map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackDescription {
    pub id: String,
    pub outputs: BTreeMap<String, String>,
}

/// An ingest queue locator in both of its interchangeable forms.
///
/// Stacks export the queue as either an ARN or a URL depending on template
/// vintage; consumers need both. Parsing one form derives the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueLocator {
    arn: String,
    url: String,
    name: String,
}

impl QueueLocator {
    /// Parse a locator arriving in either form.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::MalformedQueueLocator` when the value is
    /// neither `arn:<partition>:sqs:<region>:<account>:<name>` nor
    /// `https://sqs.<region>.../<account>/<name>`.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::MalformedQueueLocator(raw.to_string());

        if raw.starts_with("arn:") {
            let parts: Vec<&str> = raw.split(':').collect();
            if parts.len() != 6
                || parts[2] != "sqs"
                || parts[3].is_empty()
                || parts[4].is_empty()
                || parts[5].is_empty()
            {
                return Err(malformed());
            }
            let (region, account, name) = (parts[3], parts[4], parts[5]);
            return Ok(Self {
                arn: raw.to_string(),
                url: format!("https://sqs.{region}.amazonaws.com/{account}/{name}"),
                name: name.to_string(),
            });
        }

        if let Some(rest) = raw.strip_prefix("https://") {
            let segments: Vec<&str> = rest.split('/').collect();
            if segments.len() != 3 {
                return Err(malformed());
            }
            let (host, account, name) = (segments[0], segments[1], segments[2]);
            let host_parts: Vec<&str> = host.split('.').collect();
            if host_parts.len() < 3
                || host_parts[0] != "sqs"
                || host_parts[1].is_empty()
                || account.is_empty()
                || name.is_empty()
            {
                return Err(malformed());
            }
            let region = host_parts[1];
            return Ok(Self {
                arn: format!("arn:aws:sqs:{region}:{account}:{name}"),
                url: raw.to_string(),
                name: name.to_string(),
            });
        }

        Err(malformed())
    }

    pub fn arn(&self) -> &str {
        &self.arn
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The bare queue name, the last segment of either form.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Infrastructure facts resolved from a stack reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutputs {
    stack_name: String,
    region: String,
    account_id: String,
    database: String,
    queue: QueueLocator,
}

impl StackOutputs {
    /// Extract the required outputs from a describe result.
    ///
    /// The region, account, and canonical stack name come from the stack id,
    /// which is authoritative even when the stack was referenced by bare
    /// name. Missing output keys are collected and reported together.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::MissingOutputs` naming every absent key, or a
    /// malformed-value error for an unusable stack id or queue locator.
    pub fn from_description(desc: &StackDescription) -> Result<Self, ResolveError> {
        let (region, account_id, stack_name) = parse_stack_id(&desc.id)?;

        let mut missing = Vec::new();
        let database = match desc.outputs.get(OUTPUT_DATABASE) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => {
                missing.push(OUTPUT_DATABASE.to_string());
                String::new()
            }
        };

        // Either locator form satisfies the queue requirement; ARN preferred.
        let queue_raw = match desc
            .outputs
            .get(OUTPUT_QUEUE_ARN)
            .or_else(|| desc.outputs.get(OUTPUT_QUEUE_URL))
        {
            Some(v) if !v.is_empty() => v.clone(),
            _ => {
                missing.push(format!("{OUTPUT_QUEUE_ARN} (or {OUTPUT_QUEUE_URL})"));
                String::new()
            }
        };

        if !missing.is_empty() {
            return Err(ResolveError::MissingOutputs {
                stack: stack_name,
                keys: missing,
            });
        }

        let queue = QueueLocator::parse(&queue_raw)?;
        Ok(Self {
            stack_name,
            region,
            account_id,
            database,
            queue,
        })
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

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn queue(&self) -> &QueueLocator {
        &self.queue
    }
}

/// Split a stack id (`arn:…:cloudformation:region:account:stack/name/uuid`)
/// into its region, account, and stack name.
fn parse_stack_id(id: &str) -> Result<(String, String, String), ResolveError> {
    let malformed = || ResolveError::MalformedStackId(id.to_string());

    let parts: Vec<&str> = id.splitn(6, ':').collect();
    if parts.len() != 6
        || parts[0] != "arn"
        || parts[2] != "cloudformation"
        || parts[3].is_empty()
        || parts[4].is_empty()
    {
        return Err(malformed());
    }

    let mut resource = parts[5].splitn(3, '/');
    match (resource.next(), resource.next()) {
        (Some("stack"), Some(name)) if !name.is_empty() => {
            Ok((parts[3].to_string(), parts[4].to_string(), name.to_string()))
        }
        _ => Err(malformed()),
    }
}

/// CloudFormation-backed stack description.
///
/// Builds a current-thread runtime per call and blocks on the SDK, so the
/// resolver stays synchronous end to end.
pub struct CloudFormation;

impl StackBackend for CloudFormation {
    fn describe(&self, stack: &Reference) -> Result<StackDescription, ResolveError> {
        trace!(stack = %stack, "describing stack");

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ResolveError::Unavailable {
                service: "cloudformation",
                reason: format!("failed to create runtime: {e}"),
            })?;

        rt.block_on(async {
            let config = aws::client_config(stack.region()).await;
            let client = aws_sdk_cloudformation::Client::new(&config);

            let resp = client
                .describe_stacks()
                .stack_name(stack.value())
                .send()
                .await
                .map_err(|e| classify_describe_error(stack.value(), e))?;

            let described = resp
                .stacks()
                .first()
                .ok_or_else(|| ResolveError::StackNotFound(stack.value().to_string()))?;

            let mut outputs = BTreeMap::new();
            for output in described.outputs() {
                if let (Some(key), Some(value)) = (output.output_key(), output.output_value()) {
                    outputs.insert(key.to_string(), value.to_string());
                }
            }

            debug!(stack = %stack, outputs = outputs.len(), "stack described");
            Ok(StackDescription {
                id: described.stack_id().unwrap_or_default().to_string(),
                outputs,
            })
        })
    }
}

/// Map an SDK describe failure onto the resolver's error space.
///
/// A reference to a stack that does not exist comes back as a validation
/// error with a "does not exist" message rather than a typed variant.
fn classify_describe_error<E: std::error::Error>(stack: &str, err: E) -> ResolveError {
    let rendered = aws_sdk_cloudformation::error::DisplayErrorContext(err).to_string();
    if rendered.contains("does not exist") {
        return ResolveError::StackNotFound(stack.to_string());
    }
    ResolveError::Unavailable {
        service: "cloudformation",
        reason: format!("describe failed after {RESOLVE_ATTEMPTS} attempts: {rendered}"),
    }
}
