//! The storage provider capability consumed by the scanner.

use async_trait::async_trait;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::object::{ObjectInfo, UploadInfo, UploadPart};
use crate::resource::{LifecycleRule, VersioningStatus};

/// Read-only access to bucket metadata.
///
/// Implementations return complete listings; pagination, credentials and
/// transport are their concern.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Names of all buckets visible to the current credentials.
    async fn list_buckets(&self) -> Result<Vec<CompactString>, ProviderError>;

    /// Every object in a bucket.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectInfo>, ProviderError>;

    /// Multipart uploads that were started but never completed.
    async fn list_in_progress_uploads(&self, bucket: &str)
    -> Result<Vec<UploadInfo>, ProviderError>;

    /// Parts already uploaded for one in-progress upload.
    async fn list_upload_parts(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<Vec<UploadPart>, ProviderError>;

    /// Versioning state of a bucket.
    async fn get_versioning_status(&self, bucket: &str) -> Result<VersioningStatus, ProviderError>;

    /// Lifecycle rules of a bucket; `None` when no configuration exists.
    async fn get_lifecycle_rules(
        &self,
        bucket: &str,
    ) -> Result<Option<Vec<LifecycleRule>>, ProviderError>;
}

/// Which buckets a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketSelection {
    /// Every bucket the provider lists.
    All,
    /// An explicit list of bucket names.
    Named(Vec<CompactString>),
}

impl BucketSelection {
    /// Sentinel name meaning "all buckets".
    pub const ALL_SENTINEL: &'static str = "*";

    /// Build a selection from user input. An empty list, or a `*` anywhere
    /// in it, selects every bucket.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<CompactString> = names
            .into_iter()
            .map(|n| CompactString::from(n.as_ref().trim()))
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() || names.iter().any(|n| n == Self::ALL_SENTINEL) {
            Self::All
        } else {
            Self::Named(names)
        }
    }

    /// Resolve the selection to concrete bucket names.
    pub async fn resolve(
        &self,
        provider: &dyn StorageProvider,
    ) -> Result<Vec<CompactString>, ProviderError> {
        match self {
            Self::All => provider.list_buckets().await,
            Self::Named(names) => Ok(names.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_sentinel() {
        assert_eq!(BucketSelection::from_names(["*"]), BucketSelection::All);
        assert_eq!(
            BucketSelection::from_names(["logs", "*"]),
            BucketSelection::All
        );
        assert_eq!(
            BucketSelection::from_names(Vec::<String>::new()),
            BucketSelection::All
        );
    }

    #[test]
    fn test_selection_named() {
        let selection = BucketSelection::from_names(["logs", " data ", ""]);
        assert_eq!(
            selection,
            BucketSelection::Named(vec!["logs".into(), "data".into()])
        );
    }
}
