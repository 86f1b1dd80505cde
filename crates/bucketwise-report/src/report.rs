//! Final report model.

use std::time::Duration;

use bucketwise_analyze::{Analysis, Recommendation};
use bucketwise_core::{BucketFailure, BucketScan, EstimatedSavings, ResourceSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Whether every requested bucket made it into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Complete,
    Partial,
}

/// Account-wide storage totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSummary {
    pub bucket_count: u64,
    pub total_size: u64,
    pub total_objects: u64,
    /// Mean objects per bucket, rounded down.
    pub average_objects: u64,
    /// Mean bytes per bucket, rounded down.
    pub average_size: u64,
    /// Bucket summaries from smallest to largest.
    pub buckets: Vec<ResourceSummary>,
}

impl StorageSummary {
    /// Aggregate bucket summaries.
    pub fn from_summaries(summaries: impl IntoIterator<Item = ResourceSummary>) -> Self {
        let mut buckets: Vec<ResourceSummary> = summaries.into_iter().collect();
        let bucket_count = buckets.len() as u64;
        let total_size: u64 = buckets.iter().map(|b| b.total_size).sum();
        let total_objects: u64 = buckets.iter().map(|b| b.object_count).sum();

        buckets.sort_by_key(|b| b.total_size);

        Self {
            bucket_count,
            total_size,
            total_objects,
            average_objects: total_objects.checked_div(bucket_count).unwrap_or(0),
            average_size: total_size.checked_div(bucket_count).unwrap_or(0),
            buckets,
        }
    }

    /// The largest bucket, if any.
    pub fn largest(&self) -> Option<&ResourceSummary> {
        self.buckets.last()
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub status: RunStatus,
    pub generated_at: DateTime<Utc>,
    pub scan_duration: Duration,
    pub storage_summary: StorageSummary,
    pub buckets: Vec<BucketScan>,
    pub analyses: Vec<Analysis>,
    pub recommendations: Vec<Recommendation>,
    /// Savings summed over every bucket's category findings.
    pub total_potential_savings: EstimatedSavings,
    pub failures: Vec<BucketFailure>,
}

impl Report {
    /// Check if every requested bucket was scanned.
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }

    /// Recommendations that flagged at least one bucket.
    pub fn actionable(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations.iter().filter(|r| r.has_targets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, objects: u64, size: u64) -> ResourceSummary {
        ResourceSummary {
            name: name.into(),
            object_count: objects,
            total_size: size,
            last_modified: None,
        }
    }

    #[test]
    fn test_storage_summary_totals_and_order() {
        let storage = StorageSummary::from_summaries([
            summary("big", 10, 9000),
            summary("small", 1, 10),
            summary("mid", 4, 500),
        ]);

        assert_eq!(storage.bucket_count, 3);
        assert_eq!(storage.total_size, 9510);
        assert_eq!(storage.total_objects, 15);
        assert_eq!(storage.average_objects, 5);
        assert_eq!(storage.average_size, 3170);
        let order: Vec<&str> = storage.buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(order, ["small", "mid", "big"]);
        assert_eq!(storage.largest().unwrap().name, "big");
    }

    #[test]
    fn test_storage_summary_empty() {
        let storage = StorageSummary::from_summaries(Vec::new());
        assert_eq!(storage.bucket_count, 0);
        assert_eq!(storage.average_size, 0);
        assert!(storage.largest().is_none());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(RunStatus::Partial.to_string(), "partial");
        assert_eq!(
            serde_json::to_string(&RunStatus::Complete).unwrap(),
            "\"complete\""
        );
    }
}
