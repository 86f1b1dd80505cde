//! Core types and traits for bucketwise.
//!
//! This crate provides the data model shared by the scan, analyze and
//! report stages: object listings, per-bucket summaries and configuration,
//! category findings, the pricing table and cost estimator, and the
//! [`StorageProvider`] trait the scanner reads from.

mod config;
mod error;
mod finding;
mod object;
mod pricing;
mod provider;
mod resource;
mod scan;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{EstimateError, ProviderError, ScanError};
pub use finding::{EstimatedSavings, ObjectCategory, ObjectCategoryFinding};
pub use object::{DEFAULT_STORAGE_CLASS, ObjectInfo, UploadInfo, UploadPart};
pub use pricing::{BYTES_PER_GIB, CompressionScheme, CostEstimator, PriceTable};
pub use provider::{BucketSelection, StorageProvider};
pub use resource::{
    AbortIncompleteMultipartUpload, Expiration, LifecycleRule, NoncurrentVersionExpiration,
    NoncurrentVersionTransition, ResourceConfig, ResourceSummary, RuleStatus, Transition,
    VersioningStatus,
};
pub use scan::{BucketFailure, BucketScan, ScanOutcome};
