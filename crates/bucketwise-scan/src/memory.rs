//! In-memory storage provider backed by a JSON inventory.
//!
//! Used for offline analysis of exported listings and for tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bucketwise_core::{
    LifecycleRule, ObjectInfo, ProviderError, StorageProvider, UploadInfo, UploadPart,
    VersioningStatus,
};
use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading an inventory file.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to read inventory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse inventory {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An in-progress multipart upload and the parts it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpload {
    pub key: CompactString,
    pub upload_id: CompactString,
    #[serde(default)]
    pub parts: Vec<UploadPart>,
}

impl InventoryUpload {
    pub fn new(
        key: impl Into<CompactString>,
        upload_id: impl Into<CompactString>,
        parts: Vec<UploadPart>,
    ) -> Self {
        Self {
            key: key.into(),
            upload_id: upload_id.into(),
            parts,
        }
    }
}

/// Everything known about one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketInventory {
    pub name: CompactString,
    pub objects: Vec<ObjectInfo>,
    pub uploads: Vec<InventoryUpload>,
    pub versioning: VersioningStatus,
    /// `None` means the bucket has no lifecycle configuration at all.
    pub lifecycle_rules: Option<Vec<LifecycleRule>>,
}

impl BucketInventory {
    /// Create an empty bucket.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_objects(mut self, objects: Vec<ObjectInfo>) -> Self {
        self.objects = objects;
        self
    }

    pub fn with_upload(mut self, upload: InventoryUpload) -> Self {
        self.uploads.push(upload);
        self
    }

    pub fn with_versioning(mut self, status: VersioningStatus) -> Self {
        self.versioning = status;
        self
    }

    pub fn with_lifecycle_rules(mut self, rules: Vec<LifecycleRule>) -> Self {
        self.lifecycle_rules = Some(rules);
        self
    }
}

/// A set of buckets, as exported to JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub buckets: Vec<BucketInventory>,
}

impl Inventory {
    /// Parse an inventory document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load an inventory file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| InventoryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A [`StorageProvider`] serving a fixed inventory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    buckets: IndexMap<CompactString, BucketInventory>,
}

impl InMemoryProvider {
    /// Create a provider with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a bucket.
    pub fn with_bucket(mut self, bucket: BucketInventory) -> Self {
        self.insert(bucket);
        self
    }

    /// Add or replace a bucket.
    pub fn insert(&mut self, bucket: BucketInventory) {
        self.buckets.insert(bucket.name.clone(), bucket);
    }

    /// Number of buckets served.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no buckets are served.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn bucket(&self, name: &str) -> Result<&BucketInventory, ProviderError> {
        self.buckets
            .get(name)
            .ok_or_else(|| ProviderError::NoSuchBucket {
                bucket: CompactString::from(name),
            })
    }
}

impl From<Inventory> for InMemoryProvider {
    fn from(inventory: Inventory) -> Self {
        let mut provider = Self::new();
        for bucket in inventory.buckets {
            provider.insert(bucket);
        }
        provider
    }
}

#[async_trait]
impl StorageProvider for InMemoryProvider {
    async fn list_buckets(&self) -> Result<Vec<CompactString>, ProviderError> {
        Ok(self.buckets.keys().cloned().collect())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectInfo>, ProviderError> {
        Ok(self.bucket(bucket)?.objects.clone())
    }

    async fn list_in_progress_uploads(
        &self,
        bucket: &str,
    ) -> Result<Vec<UploadInfo>, ProviderError> {
        Ok(self
            .bucket(bucket)?
            .uploads
            .iter()
            .map(|u| UploadInfo::new(u.key.clone(), u.upload_id.clone()))
            .collect())
    }

    async fn list_upload_parts(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<Vec<UploadPart>, ProviderError> {
        Ok(self
            .bucket(bucket)?
            .uploads
            .iter()
            .find(|u| u.key == key && u.upload_id == upload_id)
            .map(|u| u.parts.clone())
            .unwrap_or_default())
    }

    async fn get_versioning_status(&self, bucket: &str) -> Result<VersioningStatus, ProviderError> {
        Ok(self.bucket(bucket)?.versioning)
    }

    async fn get_lifecycle_rules(
        &self,
        bucket: &str,
    ) -> Result<Option<Vec<LifecycleRule>>, ProviderError> {
        Ok(self.bucket(bucket)?.lifecycle_rules.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketwise_core::RuleStatus;

    const INVENTORY: &str = r#"{
        "buckets": [
            {
                "name": "logs",
                "objects": [
                    {"key": "a.log", "size": 10, "last_modified": "2024-01-01T00:00:00Z", "e_tag": "1"}
                ],
                "uploads": [
                    {"key": "big.bin", "upload_id": "u1", "parts": [{"part_number": 1, "size": 5}]}
                ],
                "versioning": "Enabled",
                "lifecycle_rules": [{"id": "expire", "status": "Suspended"}]
            },
            {"name": "empty"}
        ]
    }"#;

    #[tokio::test]
    async fn test_inventory_round_trip_through_provider() {
        let provider = InMemoryProvider::from(Inventory::from_json(INVENTORY).unwrap());
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.list_buckets().await.unwrap(), ["logs", "empty"]);

        let objects = provider.list_objects("logs").await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].storage_class, "STANDARD");

        let uploads = provider.list_in_progress_uploads("logs").await.unwrap();
        assert_eq!(uploads.len(), 1);
        let parts = provider
            .list_upload_parts("logs", "big.bin", "u1")
            .await
            .unwrap();
        assert_eq!(parts[0].size, 5);

        assert_eq!(
            provider.get_versioning_status("logs").await.unwrap(),
            VersioningStatus::Enabled
        );
        let rules = provider.get_lifecycle_rules("logs").await.unwrap().unwrap();
        assert_eq!(rules[0].status, RuleStatus::Suspended);

        assert!(provider.get_lifecycle_rules("empty").await.unwrap().is_none());
        assert_eq!(
            provider.get_versioning_status("empty").await.unwrap(),
            VersioningStatus::NotEnabled
        );
    }

    #[tokio::test]
    async fn test_unknown_bucket() {
        let provider = InMemoryProvider::new();
        assert!(matches!(
            provider.list_objects("missing").await,
            Err(ProviderError::NoSuchBucket { .. })
        ));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Inventory::load(&path).unwrap_err();
        assert!(matches!(err, InventoryError::Parse { .. }));
        assert!(err.to_string().contains("inventory.json"));

        let missing = Inventory::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, InventoryError::Io { .. }));
    }
}
