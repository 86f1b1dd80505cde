//! Per-bucket summary and configuration types.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Aggregate facts about one bucket's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Bucket name. Empty means "no subject" and marks a non-finding.
    pub name: CompactString,

    /// Number of objects in the bucket.
    pub object_count: u64,

    /// Sum of all object sizes in bytes.
    pub total_size: u64,

    /// Most recent object modification (None for an empty bucket).
    pub last_modified: Option<DateTime<Utc>>,
}

impl ResourceSummary {
    /// Summary for a bucket with no objects.
    pub fn empty(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check whether this summary names a bucket.
    pub fn has_subject(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Bucket versioning state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum VersioningStatus {
    Enabled,
    Suspended,
    /// Versioning was never turned on.
    #[default]
    #[strum(to_string = "NotEnabled", serialize = "Not Enabled")]
    NotEnabled,
}

/// Whether a lifecycle rule is in effect.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum RuleStatus {
    #[default]
    Enabled,
    Disabled,
    Suspended,
}

impl RuleStatus {
    /// Check if the rule has been suspended.
    pub fn is_suspended(self) -> bool {
        matches!(self, RuleStatus::Suspended)
    }
}

/// Transition of objects to another storage class after some days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub days: u32,
    pub storage_class: CompactString,
}

/// Expiration of current object versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub days: u32,
}

/// Transition of noncurrent versions to another storage class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoncurrentVersionTransition {
    pub noncurrent_days: u32,
    pub storage_class: CompactString,
}

/// Expiration of noncurrent versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoncurrentVersionExpiration {
    pub noncurrent_days: u32,
}

/// Abort incomplete multipart uploads after some days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortIncompleteMultipartUpload {
    pub days_after_initiation: u32,
}

/// A provider-side lifecycle rule.
///
/// Only the presence of each action is consulted during analysis, the
/// day counts are carried for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRule {
    /// Rule identifier.
    #[serde(default)]
    pub id: Option<CompactString>,

    /// Rule status.
    #[serde(default)]
    pub status: RuleStatus,

    /// Key prefix the rule is restricted to.
    #[serde(default)]
    pub prefix: Option<CompactString>,

    #[serde(default)]
    pub expiration: Option<Expiration>,

    #[serde(default)]
    pub transitions: Vec<Transition>,

    #[serde(default)]
    pub noncurrent_version_transitions: Vec<NoncurrentVersionTransition>,

    #[serde(default)]
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,

    #[serde(default)]
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
}

impl LifecycleRule {
    /// Create an enabled rule with no actions.
    pub fn enabled(id: impl Into<CompactString>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Check if the rule manages noncurrent object versions.
    pub fn manages_noncurrent_versions(&self) -> bool {
        !self.noncurrent_version_transitions.is_empty()
            || self.noncurrent_version_expiration.is_some()
    }

    /// Check if the rule cleans up incomplete multipart uploads.
    pub fn aborts_incomplete_uploads(&self) -> bool {
        self.abort_incomplete_multipart_upload.is_some()
    }
}

/// Bucket-wide configuration gathered by the config scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Lifecycle rules in provider order. Empty means no policy.
    pub lifecycle_rules: Vec<LifecycleRule>,

    /// Versioning state.
    pub versioning_status: VersioningStatus,

    /// Distinct storage classes in first-seen listing order.
    pub storage_classes: IndexSet<CompactString>,
}

impl ResourceConfig {
    /// The first lifecycle rule, the only one analysis inspects.
    pub fn first_rule(&self) -> Option<&LifecycleRule> {
        self.lifecycle_rules.first()
    }

    /// Check if no lifecycle policy is configured.
    pub fn has_no_rules(&self) -> bool {
        self.lifecycle_rules.is_empty()
    }
}
