//! Scan configuration types.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::pricing::PriceTable;

/// Configuration for a scan run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum number of buckets scanned concurrently.
    #[builder(default = "8")]
    pub workers: usize,

    /// Per-bucket timeout in seconds (0 = none).
    #[builder(default = "120")]
    pub bucket_timeout_secs: u64,

    /// Deadline for the whole run in seconds (0 = none).
    #[builder(default = "1800")]
    pub run_deadline_secs: u64,

    /// Retries for transient provider errors.
    #[builder(default = "2")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds, multiplied by attempt.
    #[builder(default = "250")]
    pub retry_backoff_ms: u64,

    /// Abort the whole run on the first bucket failure.
    #[builder(default = "true")]
    pub fail_fast: bool,

    /// Storage class prices used by the estimator.
    #[builder(default)]
    pub prices: PriceTable,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.workers {
            return Err("Worker count must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Per-bucket timeout, if any.
    pub fn bucket_timeout(&self) -> Option<Duration> {
        (self.bucket_timeout_secs > 0).then(|| Duration::from_secs(self.bucket_timeout_secs))
    }

    /// Whole-run deadline, if any.
    pub fn run_deadline(&self) -> Option<Duration> {
        (self.run_deadline_secs > 0).then(|| Duration::from_secs(self.run_deadline_secs))
    }

    /// Delay before the given retry attempt (1-based).
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }

    /// Worker count clamped to at least one.
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            bucket_timeout_secs: 120,
            run_deadline_secs: 1800,
            max_retries: 2,
            retry_backoff_ms: 250,
            fail_fast: true,
            prices: PriceTable::default(),
        }
    }
}
