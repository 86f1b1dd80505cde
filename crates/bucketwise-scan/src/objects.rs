//! Object category scans: incomplete uploads, duplicates, compressible data.
//!
//! Each scan looks at the same listing independently and always produces a
//! finding, even when nothing matched.

use std::collections::HashSet;

use bucketwise_core::{
    CostEstimator, EstimateError, EstimatedSavings, ObjectCategory, ObjectCategoryFinding,
    ObjectInfo, ScanError, StorageProvider,
};
use tracing::debug;

use crate::compression::{CompressionClass, classify_object};
use crate::retry::RetryPolicy;

/// Find objects that repeat an earlier (size, ETag) pair.
///
/// The first object with a given pair is kept as the canonical copy; every
/// later one counts as a duplicate, so N identical objects report N - 1.
pub fn duplicate_objects(
    objects: &[ObjectInfo],
    estimator: &CostEstimator,
) -> Result<ObjectCategoryFinding, EstimateError> {
    let mut finding = ObjectCategoryFinding::empty(ObjectCategory::DuplicateObjects);
    if objects.len() < 2 {
        return Ok(finding);
    }

    let mut seen: HashSet<(u64, &str)> = HashSet::with_capacity(objects.len());
    for object in objects {
        if !seen.insert((object.size, object.e_tag.as_str())) {
            let savings = estimator.deletion_savings(object.size, &object.storage_class)?;
            finding.record(object.size, EstimatedSavings::exact(savings));
        }
    }
    Ok(finding)
}

/// Find objects stored uncompressed in a format that compresses well.
pub fn compressible_objects(
    objects: &[ObjectInfo],
    estimator: &CostEstimator,
) -> Result<ObjectCategoryFinding, EstimateError> {
    let mut finding = ObjectCategoryFinding::empty(ObjectCategory::CompressibleObjects);

    for object in objects {
        let CompressionClass::Compressible(scheme) = classify_object(object) else {
            continue;
        };
        let savings = estimator.compression_savings(object.size, scheme, &object.storage_class)?;
        finding.record(object.size, savings);
    }
    Ok(finding)
}

/// Count in-progress multipart uploads and the bytes their parts occupy.
///
/// Savings are priced from listed objects whose key matches an upload.
pub async fn incomplete_uploads(
    provider: &dyn StorageProvider,
    retry: &RetryPolicy,
    bucket: &str,
    objects: &[ObjectInfo],
    estimator: &CostEstimator,
) -> Result<ObjectCategoryFinding, ScanError> {
    let uploads = retry
        .run("list_in_progress_uploads", bucket, || {
            provider.list_in_progress_uploads(bucket)
        })
        .await?;

    let mut finding = ObjectCategoryFinding::empty(ObjectCategory::IncompleteMultipartUpload);
    if uploads.is_empty() {
        return Ok(finding);
    }

    for upload in &uploads {
        let parts = retry
            .run("list_upload_parts", bucket, || {
                provider.list_upload_parts(bucket, &upload.key, &upload.upload_id)
            })
            .await?;
        finding.total_size += parts.iter().map(|p| p.size).sum::<u64>();
    }
    finding.object_count = uploads.len() as u64;

    let upload_keys: HashSet<&str> = uploads.iter().map(|u| u.key.as_str()).collect();
    let mut savings = 0.0;
    for object in objects.iter().filter(|o| upload_keys.contains(o.key.as_str())) {
        savings += estimator.deletion_savings(object.size, &object.storage_class)?;
    }
    finding.estimated_savings = EstimatedSavings::exact(savings);

    Ok(finding)
}

/// Run all three category scans for one bucket.
///
/// Findings are returned in a fixed order: incomplete uploads, duplicates,
/// compressible objects.
pub async fn scan_object_categories(
    provider: &dyn StorageProvider,
    retry: &RetryPolicy,
    bucket: &str,
    objects: &[ObjectInfo],
    estimator: &CostEstimator,
) -> Result<Vec<ObjectCategoryFinding>, ScanError> {
    let incomplete = incomplete_uploads(provider, retry, bucket, objects, estimator).await?;
    let duplicates = duplicate_objects(objects, estimator)?;
    let compressible = compressible_objects(objects, estimator)?;

    debug!(
        bucket,
        incomplete = incomplete.object_count,
        duplicates = duplicates.object_count,
        compressible = compressible.object_count,
        "scanned object categories"
    );

    Ok(vec![incomplete, duplicates, compressible])
}
