//! Error types for scanning and estimation.

use std::time::Duration;

use compact_str::CompactString;
use thiserror::Error;

/// Errors reported by a storage provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider could not serve the call.
    #[error("{operation} failed for {target}: {message}")]
    Unavailable {
        operation: &'static str,
        target: CompactString,
        message: String,
    },

    /// The provider asked us to slow down.
    #[error("{operation} throttled for {target}: {message}")]
    Throttled {
        operation: &'static str,
        target: CompactString,
        message: String,
    },

    /// The bucket does not exist or is not visible to the credentials.
    #[error("No such bucket: {bucket}")]
    NoSuchBucket { bucket: CompactString },
}

impl ProviderError {
    /// Create an unavailable error.
    pub fn unavailable(
        operation: &'static str,
        target: impl Into<CompactString>,
        message: impl Into<String>,
    ) -> Self {
        Self::Unavailable {
            operation,
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a throttling error.
    pub fn throttled(
        operation: &'static str,
        target: impl Into<CompactString>,
        message: impl Into<String>,
    ) -> Self {
        Self::Throttled {
            operation,
            target: target.into(),
            message: message.into(),
        }
    }

    /// Check if retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }
}

/// Errors raised when pricing data does not cover the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// Storage class missing from the price table.
    #[error("Invalid storage class: {class}")]
    InvalidStorageClass { class: CompactString },

    /// Compression scheme with no known ratio band.
    #[error("Unsupported compression scheme: {scheme}")]
    UnsupportedScheme { scheme: CompactString },
}

/// Errors that abort a scan run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A storage provider call failed.
    #[error("Storage provider unavailable: {0}")]
    Provider(#[from] ProviderError),

    /// Pricing or ratio tables do not cover the data.
    #[error("Estimate failed: {0}")]
    Estimate(#[from] EstimateError),

    /// A single bucket took longer than the per-bucket timeout.
    #[error("Scanning bucket {bucket} timed out after {timeout:?}")]
    BucketTimeout {
        bucket: CompactString,
        timeout: Duration,
    },

    /// The whole run exceeded its deadline.
    #[error("Scan run exceeded its deadline of {deadline:?}")]
    DeadlineExceeded { deadline: Duration },

    /// A scan task panicked or was cancelled.
    #[error("Scan task failed: {message}")]
    TaskFailed { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Check if this error came from the storage provider.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ProviderError::throttled("list_objects", "b", "slow down").is_transient());
        assert!(!ProviderError::unavailable("list_objects", "b", "boom").is_transient());
        assert!(
            !ProviderError::NoSuchBucket {
                bucket: "b".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_scan_error_from_provider() {
        let err: ScanError = ProviderError::unavailable("list_buckets", "*", "down").into();
        assert!(err.is_provider_error());
        assert!(err.to_string().contains("list_buckets failed for *"));
    }

    #[test]
    fn test_estimate_error_message() {
        let err = EstimateError::InvalidStorageClass {
            class: "MOON".into(),
        };
        assert_eq!(err.to_string(), "Invalid storage class: MOON");
    }
}
