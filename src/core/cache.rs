//! Process-lifetime configuration cache.
//!
//! The first caller resolves: the stack describe and the secret fetch run on
//! parallel scoped threads, the results are validated and merged, and the
//! outcome lands in a write-once slot. Every caller, concurrent or later,
//! observes that same outcome, success or failure. The slot never refetches;
//! a changed secret or stack means the instance restarts.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::thread;

use tracing::{debug, info};

use crate::core::reference::ReferenceBundle;
use crate::core::resolved::ResolvedConfig;
use crate::core::secret::{SecretBackend, SecretDocument, SecretsManager};
use crate::core::stack::{CloudFormation, StackBackend, StackOutputs};
use crate::error::ResolveError;

type Slot = OnceLock<Result<Arc<ResolvedConfig>, ResolveError>>;

/// Resolve-once cache over the stack and secret backends.
pub struct ConfigCache {
    bundle: ReferenceBundle,
    stack: Box<dyn StackBackend>,
    secrets: Box<dyn SecretBackend>,
    slot: Slot,
}

impl ConfigCache {
    /// Create a cache over explicit backends.
    pub fn new(
        bundle: ReferenceBundle,
        stack: Box<dyn StackBackend>,
        secrets: Box<dyn SecretBackend>,
    ) -> Self {
        Self {
            bundle,
            stack,
            secrets,
            slot: OnceLock::new(),
        }
    }

    /// Create a cache wired to the live AWS backends.
    pub fn with_aws(bundle: ReferenceBundle) -> Self {
        Self::new(bundle, Box::new(CloudFormation), Box::new(SecretsManager))
    }

    /// The references this cache resolves.
    pub fn bundle(&self) -> &ReferenceBundle {
        &self.bundle
    }

    /// Whether a resolution outcome has been memoized.
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Resolve the configuration, fetching on the first call only.
    ///
    /// Concurrent callers block until the first resolution completes, then
    /// share its outcome. A memoized failure is returned as-is; the slot is
    /// never retried.
    ///
    /// # Errors
    ///
    /// Returns the (possibly memoized) `ResolveError` from classification,
    /// fetching, validation, or merging.
    pub fn resolve(&self) -> Result<Arc<ResolvedConfig>, ResolveError> {
        self.slot.get_or_init(|| self.resolve_uncached()).clone()
    }

    /// Discard the memoized outcome so the next call fetches again.
    ///
    /// Takes `&mut self` on purpose: a running service shares the cache
    /// immutably and can never reach this. Test harnesses own theirs.
    pub fn reset(&mut self) {
        self.slot = OnceLock::new();
    }

    fn resolve_uncached(&self) -> Result<Arc<ResolvedConfig>, ResolveError> {
        info!(
            stack = %self.bundle.stack,
            secret = %self.bundle.secret,
            "resolving configuration"
        );

        // Both backends are independent; fetch them in parallel.
        let (described, payload) = thread::scope(|scope| {
            let stack = scope.spawn(|| self.stack.describe(&self.bundle.stack));
            let secret = scope.spawn(|| self.secrets.fetch(&self.bundle.secret));
            (
                join(stack, "cloudformation"),
                join(secret, "secretsmanager"),
            )
        });

        let outputs = StackOutputs::from_description(&described?)?;
        let document = SecretDocument::from_payload(payload?)?;

        debug!(
            stack = outputs.stack_name(),
            region = outputs.region(),
            "configuration resolved"
        );
        Ok(Arc::new(ResolvedConfig::assemble(document, outputs)))
    }
}

impl fmt::Debug for ConfigCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigCache")
            .field("bundle", &self.bundle)
            .field("resolved", &self.slot.get().map(|outcome| outcome.is_ok()))
            .finish()
    }
}

/// Collapse a worker join, mapping a panicked resolver to an unavailability.
fn join<T>(
    handle: thread::ScopedJoinHandle<'_, Result<T, ResolveError>>,
    service: &'static str,
) -> Result<T, ResolveError> {
    handle.join().unwrap_or_else(|_| {
        Err(ResolveError::Unavailable {
            service,
            reason: "resolver thread panicked".to_string(),
        })
    })
}
