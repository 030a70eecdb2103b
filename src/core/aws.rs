//! Shared AWS client configuration.
//!
//! Every backend call rides the SDK's standard retry policy with a bounded
//! attempt budget and an overall per-call deadline, so a wedged endpoint
//! surfaces as an `Unavailable` error instead of a hang at boot.
//!
//! Credentials come from the environment (AWS_ACCESS_KEY_ID, etc.) or the
//! default provider chain. When a reference arrives in locator form, its
//! region segment pins the client region; bare names fall through to the
//! ambient configuration.

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::core::constants::{RESOLVE_ATTEMPTS, RESOLVE_TIMEOUT};

/// Load client configuration, optionally pinned to a region.
pub(crate) async fn client_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .retry_config(RetryConfig::standard().with_max_attempts(RESOLVE_ATTEMPTS))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(RESOLVE_TIMEOUT)
                .build(),
        );

    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    loader.load().await
}
