//! Analysis categories and their results.

use bucketwise_core::{
    EstimatedSavings, LifecycleRule, ObjectCategory, ObjectCategoryFinding, ResourceSummary,
    VersioningStatus,
};
use compact_str::CompactString;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// The fixed analysis categories, in report order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    #[strum(to_string = "Archive Storage Analysis")]
    ArchiveStorage,
    #[strum(to_string = "Bucket Versioning Analysis")]
    BucketVersioning,
    #[strum(to_string = "Lifecycle Management Analysis")]
    LifecycleManagement,
    #[strum(to_string = "Temporary Storage Analysis")]
    TemporaryStorage,
    #[strum(to_string = "Compressed Data Analysis")]
    CompressedData,
    #[strum(to_string = "Duplicate Data Analysis")]
    DuplicateData,
    #[strum(to_string = "Incomplete Data Analysis")]
    IncompleteData,
}

impl AnalysisKind {
    /// Every category in report order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// What the analysis checks.
    pub fn description(self) -> &'static str {
        match self {
            Self::ArchiveStorage => {
                "Checks if you have buckets that archive data and if the storage class is suitable"
            }
            Self::BucketVersioning => "Analyzes the Versioning Status on your buckets",
            Self::LifecycleManagement => "Analyzes the Lifecycle Policies of your buckets",
            Self::TemporaryStorage => {
                "Analyzes the Lifecycle Policies on buckets that have been detected to hold temporary data"
            }
            Self::CompressedData => {
                "Analyzes if there are objects that can be compressed in your buckets"
            }
            Self::DuplicateData => {
                "Analyzes if there are potentially duplicate objects in your buckets"
            }
            Self::IncompleteData => {
                "Analyzes if there are Incomplete Multipart Uploads in your buckets and if you have the proper policies to manage them"
            }
        }
    }

    /// Display name without the trailing " Analysis".
    pub fn subject(self) -> String {
        self.to_string().replace(" Analysis", "")
    }

    /// The analysis fed by an object category scan.
    pub fn for_category(category: ObjectCategory) -> Self {
        match category {
            ObjectCategory::IncompleteMultipartUpload => Self::IncompleteData,
            ObjectCategory::DuplicateObjects => Self::DuplicateData,
            ObjectCategory::CompressibleObjects => Self::CompressedData,
        }
    }
}

/// One flagged bucket within an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// Old or archive-like data in a non-archival storage class.
    Archivable {
        summary: ResourceSummary,
        storage_classes: IndexSet<CompactString>,
    },
    /// Versioning enabled without rules for noncurrent versions.
    Versioning {
        summary: ResourceSummary,
        versioning_status: VersioningStatus,
    },
    /// No lifecycle policy, or the policy is not in effect.
    LifecycleGap {
        summary: ResourceSummary,
        lifecycle_rules: Vec<LifecycleRule>,
    },
    /// Temporary-looking bucket without lifecycle management.
    TemporaryStorage {
        summary: ResourceSummary,
        lifecycle_rules: Vec<LifecycleRule>,
    },
    /// A non-empty object category finding.
    CategoryFinding {
        summary: ResourceSummary,
        finding: ObjectCategoryFinding,
    },
}

impl AnalysisResult {
    /// The bucket this result concerns.
    pub fn summary(&self) -> &ResourceSummary {
        match self {
            Self::Archivable { summary, .. }
            | Self::Versioning { summary, .. }
            | Self::LifecycleGap { summary, .. }
            | Self::TemporaryStorage { summary, .. }
            | Self::CategoryFinding { summary, .. } => summary,
        }
    }

    /// Bucket name.
    pub fn name(&self) -> &str {
        &self.summary().name
    }

    /// Savings attached to the result. Only category findings carry any.
    pub fn estimated_savings(&self) -> EstimatedSavings {
        match self {
            Self::CategoryFinding { finding, .. } => finding.estimated_savings,
            _ => EstimatedSavings::ZERO,
        }
    }
}

/// All results of one analysis category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub kind: AnalysisKind,
    /// Display name, e.g. "Archive Storage Analysis".
    pub name: String,
    pub description: String,
    pub results: Vec<AnalysisResult>,
}

impl Analysis {
    /// Create an analysis with no results.
    pub fn new(kind: AnalysisKind) -> Self {
        Self {
            kind,
            name: kind.to_string(),
            description: kind.description().to_string(),
            results: Vec::new(),
        }
    }

    /// Append a result unless it names no bucket.
    pub fn push(&mut self, result: AnalysisResult) {
        if result.summary().has_subject() {
            self.results.push(result);
        }
    }

    /// Append an optional result.
    pub fn push_opt(&mut self, result: Option<AnalysisResult>) {
        if let Some(result) = result {
            self.push(result);
        }
    }

    /// Check if nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Savings summed over all results.
    pub fn estimated_savings(&self) -> EstimatedSavings {
        self.results.iter().map(|r| r.estimated_savings()).sum()
    }
}
