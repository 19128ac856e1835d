use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use drivecore_item::{DriveItemResult, ItemId};
use tokio::sync::Notify;

use crate::{DriveClient, DriveError, DriveHandle, ThumbnailBytes};

/// In-memory drive for tests and demos.
///
/// Searches return a canned answer when one was registered for the exact query, otherwise
/// every item whose name contains the query (ASCII case-insensitive), in insertion order.
#[derive(Debug)]
pub struct MemoryDrive {
    handle: Option<DriveHandle>,
    items: Vec<DriveItemResult>,
    canned: HashMap<String, Option<Vec<DriveItemResult>>>,
    thumbnails: HashMap<ItemId, ThumbnailBytes>,
    failure: Option<DriveError>,
    search_gate: Option<Arc<Notify>>,
    resolve_calls: AtomicUsize,
    search_calls: AtomicUsize,
    thumbnail_calls: AtomicUsize,
}

impl MemoryDrive {
    pub fn new(items: Vec<DriveItemResult>) -> Self {
        Self {
            handle: Some(DriveHandle::new("memory", "Memory Drive")),
            items,
            canned: HashMap::new(),
            thumbnails: HashMap::new(),
            failure: None,
            search_gate: None,
            resolve_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            thumbnail_calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            handle: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_canned(mut self, query: &str, results: Option<Vec<DriveItemResult>>) -> Self {
        self.canned.insert(query.to_string(), results);
        self
    }

    pub fn with_thumbnail(mut self, item: &str, bytes: Vec<u8>) -> Self {
        self.thumbnails.insert(item.into(), bytes.into());
        self
    }

    pub fn failing_with(mut self, error: DriveError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Searches park until the returned `Notify` is signalled once per search.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.search_gate = Some(gate.clone());
        (self, gate)
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn thumbnail_calls(&self) -> usize {
        self.thumbnail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriveClient for MemoryDrive {
    async fn resolve_primary_drive(&self) -> Result<Option<DriveHandle>, DriveError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.handle.clone())
    }

    async fn search(
        &self,
        _drive: &DriveHandle,
        query: &str,
    ) -> Result<Option<Vec<DriveItemResult>>, DriveError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.search_gate {
            gate.notified().await;
        }

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        if let Some(canned) = self.canned.get(query) {
            return Ok(canned.clone());
        }

        let needle = query.trim().to_ascii_lowercase();
        Ok(Some(
            self.items
                .iter()
                .filter(|item| item.name.to_ascii_lowercase().contains(&needle))
                .cloned()
                .collect(),
        ))
    }

    async fn fetch_thumbnail(
        &self,
        _drive: &DriveHandle,
        item: &ItemId,
    ) -> Result<Option<ThumbnailBytes>, DriveError> {
        self.thumbnail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.thumbnails.get(item).cloned())
    }
}
