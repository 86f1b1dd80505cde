//! Scans of bucket-wide configuration: lifecycle, versioning, storage classes.

use bucketwise_core::{ObjectInfo, ResourceConfig, ScanError, StorageProvider};
use compact_str::CompactString;
use indexmap::IndexSet;
use tracing::debug;

use crate::retry::RetryPolicy;

/// Distinct storage classes in the order they first appear.
pub fn scan_storage_classes(objects: &[ObjectInfo]) -> IndexSet<CompactString> {
    let mut classes = IndexSet::new();
    for object in objects {
        if !classes.contains(&object.storage_class) {
            classes.insert(object.storage_class.clone());
        }
    }
    classes
}

/// Gather lifecycle rules, versioning status and storage classes.
///
/// A bucket without a lifecycle configuration gets an empty rule set.
pub async fn scan_bucket_config(
    provider: &dyn StorageProvider,
    retry: &RetryPolicy,
    bucket: &str,
    objects: &[ObjectInfo],
) -> Result<ResourceConfig, ScanError> {
    let lifecycle_rules = retry
        .run("get_lifecycle_rules", bucket, || {
            provider.get_lifecycle_rules(bucket)
        })
        .await?
        .unwrap_or_default();

    let versioning_status = retry
        .run("get_versioning_status", bucket, || {
            provider.get_versioning_status(bucket)
        })
        .await?;

    let storage_classes = scan_storage_classes(objects);

    debug!(
        bucket,
        rules = lifecycle_rules.len(),
        versioning = %versioning_status,
        classes = storage_classes.len(),
        "scanned bucket configuration"
    );

    Ok(ResourceConfig {
        lifecycle_rules,
        versioning_status,
        storage_classes,
    })
}
