//! Contract for the remote drive this workspace searches.
//!
//! The controller only ever sees [`DriveClient`]: resolve the primary drive, run one
//! search against it, and (when enabled) fetch thumbnails. Request builders, paging and
//! authentication all stay behind the trait.

mod memory;
mod thumbnails;

use std::sync::Arc;

use async_trait::async_trait;
use drivecore_item::{DriveItemResult, ItemId};
use serde::{Deserialize, Serialize};

pub use memory::MemoryDrive;
pub use thumbnails::{Thumbnails, DEFAULT_STUB_DELAY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveHandle {
    pub id: String,
    pub name: String,
}

impl DriveHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Encoded image bytes as delivered by the drive. Decoding is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailBytes(pub Arc<[u8]>);

impl ThumbnailBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ThumbnailBytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriveError {
    #[error("search failed: {0}")]
    Search(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait DriveClient: Send + Sync {
    /// `Ok(None)` means the account has no drive we can search.
    async fn resolve_primary_drive(&self) -> Result<Option<DriveHandle>, DriveError>;

    /// Results come back in the drive's relevance order. `None` and an empty vec both
    /// mean "nothing found".
    async fn search(
        &self,
        drive: &DriveHandle,
        query: &str,
    ) -> Result<Option<Vec<DriveItemResult>>, DriveError>;

    async fn fetch_thumbnail(
        &self,
        _drive: &DriveHandle,
        _item: &ItemId,
    ) -> Result<Option<ThumbnailBytes>, DriveError> {
        Ok(None)
    }
}

