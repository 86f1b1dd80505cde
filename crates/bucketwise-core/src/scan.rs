//! Scan results for a set of buckets.

use std::time::Duration;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::finding::{EstimatedSavings, ObjectCategory, ObjectCategoryFinding};
use crate::resource::{ResourceConfig, ResourceSummary};

/// Everything scanned for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScan {
    /// Content summary.
    pub summary: ResourceSummary,
    /// Bucket-wide configuration.
    pub config: ResourceConfig,
    /// One finding per object category.
    pub findings: Vec<ObjectCategoryFinding>,
}

impl BucketScan {
    /// Bucket name.
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    /// Finding for a category, if scanned.
    pub fn finding(&self, category: ObjectCategory) -> Option<&ObjectCategoryFinding> {
        self.findings.iter().find(|f| f.category == category)
    }

    /// Savings summed across all category findings.
    pub fn total_savings(&self) -> EstimatedSavings {
        self.findings.iter().map(|f| f.estimated_savings).sum()
    }
}

/// A bucket that could not be scanned when the run tolerates failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketFailure {
    pub bucket: CompactString,
    pub message: String,
}

/// Results of a scan run, in input bucket order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Successfully scanned buckets.
    pub scans: Vec<BucketScan>,
    /// Buckets that failed (always empty in fail-fast mode).
    pub failures: Vec<BucketFailure>,
    /// When the run started.
    pub scanned_at: DateTime<Utc>,
    /// How long the run took.
    pub scan_duration: Duration,
}

impl ScanOutcome {
    /// Check if every requested bucket was scanned.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total objects across scanned buckets.
    pub fn total_objects(&self) -> u64 {
        self.scans.iter().map(|s| s.summary.object_count).sum()
    }

    /// Total bytes across scanned buckets.
    pub fn total_size(&self) -> u64 {
        self.scans.iter().map(|s| s.summary.total_size).sum()
    }
}
