//! Bucket scanning engine for bucketwise.
//!
//! # Overview
//!
//! `bucketwise-scan` reads listings and configuration from a
//! [`StorageProvider`] and turns them into per-bucket scan results. Key
//! features:
//!
//! - **Bounded concurrency**: buckets are scanned as independent tasks
//! - **Progress updates** via broadcast channels
//! - **Retries** for throttled provider calls
//! - **Timeouts** per bucket and for the whole run
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bucketwise_scan::{BucketScanner, BucketSelection, InMemoryProvider, Inventory, ScanConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = InMemoryProvider::from(Inventory::load("inventory.json")?);
//! let scanner = BucketScanner::new(Arc::new(provider), ScanConfig::default());
//!
//! let mut progress_rx = scanner.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("{}/{} buckets", progress.buckets_done, progress.buckets_total);
//!     }
//! });
//!
//! let outcome = scanner.scan(&BucketSelection::All).await?;
//! println!("Scanned {} objects", outcome.total_objects());
//! # Ok(())
//! # }
//! ```

mod bucket;
mod compression;
mod memory;
mod objects;
mod progress;
mod retry;
mod scanner;
mod summary;

pub use bucket::{scan_bucket_config, scan_storage_classes};
pub use compression::{CompressionClass, classify_extension, classify_object};
pub use memory::{BucketInventory, InMemoryProvider, Inventory, InventoryError, InventoryUpload};
pub use objects::{
    compressible_objects, duplicate_objects, incomplete_uploads, scan_object_categories,
};
pub use progress::ScanProgress;
pub use retry::RetryPolicy;
pub use scanner::BucketScanner;
pub use summary::build_summary;

// Re-export core types for convenience
pub use bucketwise_core::{
    BucketFailure, BucketScan, BucketSelection, ObjectInfo, ProviderError, ScanConfig, ScanError,
    ScanOutcome, StorageProvider,
};
