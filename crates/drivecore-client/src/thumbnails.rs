use std::time::Duration;

use drivecore_item::ItemId;
use tracing::warn;

use crate::{DriveClient, DriveHandle, ThumbnailBytes};

pub const DEFAULT_STUB_DELAY: Duration = Duration::from_millis(10);

/// Flag-gated thumbnail access.
///
/// While disabled, `fetch` never reaches the client: it waits `stub_delay` and reports
/// no thumbnail, so callers keep the same async timing either way. Already-issued
/// requests are never aborted by cancellation; callers just drop what comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnails {
    enabled: bool,
    stub_delay: Duration,
}

impl Default for Thumbnails {
    fn default() -> Self {
        Self {
            enabled: false,
            stub_delay: DEFAULT_STUB_DELAY,
        }
    }
}

impl Thumbnails {
    pub fn new(enabled: bool, stub_delay: Duration) -> Self {
        Self {
            enabled,
            stub_delay,
        }
    }

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn fetch(
        &self,
        client: &dyn DriveClient,
        drive: &DriveHandle,
        item: &ItemId,
    ) -> Option<ThumbnailBytes> {
        if !self.enabled {
            tokio::time::sleep(self.stub_delay).await;
            return None;
        }

        match client.fetch_thumbnail(drive, item).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(item = %item, "thumbnail unavailable: {err}");
                None
            }
        }
    }
}
