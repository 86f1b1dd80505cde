//! Object listing entries reported by a storage provider.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Storage class assumed when a listing omits one.
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD";

fn default_storage_class() -> CompactString {
    CompactString::const_new(DEFAULT_STORAGE_CLASS)
}

/// A single object in a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Full object key.
    pub key: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub last_modified: DateTime<Utc>,

    /// Provider storage class identifier (e.g. `STANDARD`).
    #[serde(default = "default_storage_class")]
    pub storage_class: CompactString,

    /// Content-derived entity tag.
    #[serde(default)]
    pub e_tag: CompactString,
}

impl ObjectInfo {
    /// Create a new object entry.
    pub fn new(
        key: impl Into<CompactString>,
        size: u64,
        last_modified: DateTime<Utc>,
        storage_class: impl Into<CompactString>,
        e_tag: impl Into<CompactString>,
    ) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
            storage_class: storage_class.into(),
            e_tag: e_tag.into(),
        }
    }

    /// File extension of the key's last path segment, without the dot.
    ///
    /// A leading dot counts as an extension separator, so `logs/.env`
    /// yields `env`.
    pub fn extension(&self) -> Option<&str> {
        let name = self.key.rsplit('/').next().unwrap_or(&self.key);
        name.rfind('.')
            .map(|idx| &name[idx + 1..])
            .filter(|ext| !ext.is_empty())
    }
}

/// An in-progress multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadInfo {
    /// Key the upload will produce once completed.
    pub key: CompactString,
    /// Provider-assigned upload identifier.
    pub upload_id: CompactString,
}

impl UploadInfo {
    /// Create a new upload entry.
    pub fn new(key: impl Into<CompactString>, upload_id: impl Into<CompactString>) -> Self {
        Self {
            key: key.into(),
            upload_id: upload_id.into(),
        }
    }
}

/// A part already stored for an in-progress upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPart {
    /// One-based part number.
    #[serde(default)]
    pub part_number: u32,
    /// Part size in bytes.
    pub size: u64,
}
