use super::IndexSnapshot;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// Shared handle to the current metadata index.
///
/// Readers take a cheap `Arc` snapshot; a rebuild swaps the whole snapshot in
/// one write. The handle starts out *not ready*: until the first snapshot is
/// published, [`IndexHandle::ready`] parks the caller, so no request observes
/// a half-initialized index.
pub struct IndexHandle {
    current: RwLock<Arc<IndexSnapshot>>,
    ready: watch::Sender<bool>,
}

impl IndexHandle {
    pub fn new(version: impl Into<String>) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            current: RwLock::new(Arc::new(IndexSnapshot::empty(version))),
            ready,
        }
    }

    pub async fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current.read().await.clone()
    }

    /// Replaces the current snapshot and releases everyone waiting on [`Self::ready`].
    pub async fn publish(&self, snapshot: IndexSnapshot) {
        {
            let mut guard = self.current.write().await;
            *guard = Arc::new(snapshot);
        }
        self.ready.send_replace(true);
    }

    /// Waits until a snapshot has been published.
    pub async fn ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot fail while borrowed.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}
