//! Retrying transient provider errors.

use std::future::Future;
use std::time::Duration;

use bucketwise_core::{ProviderError, ScanConfig};
use tracing::warn;

/// How many times, and how patiently, to retry throttled calls.
///
/// Permanent errors are returned on first occurrence.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy with linear backoff.
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Policy described by a scan config.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay(1))
    }

    /// Run a provider call, retrying while it fails transiently.
    pub async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        bucket: &str,
        mut call: F,
    ) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff * attempt;
                    warn!(bucket, operation, attempt, ?delay, error = %err, "retrying provider call");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_transient_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("list_objects", "b", || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ProviderError::throttled("list_objects", "b", "slow down"))
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(2, Duration::ZERO);

        let result: Result<(), _> = policy
            .run("list_objects", "b", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::throttled("list_objects", "b", "slow down"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Duration::ZERO);

        let result: Result<(), _> = policy
            .run("get_versioning_status", "b", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::unavailable("get_versioning_status", "b", "denied"))
            })
            .await;

        assert!(matches!(result, Err(ProviderError::Unavailable { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
