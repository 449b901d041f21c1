//! A continuously updated cache snapshot.
//!
//! [`LiveCache`] folds updates as they arrive and publishes every resulting
//! snapshot on a `tokio::sync::watch` channel. Readers always get a whole
//! `Arc<Cache>`: an update is never visible half-applied, and a snapshot a
//! reader already holds does not change underneath it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::cache::Cache;
use crate::update::Update;

/// Receiver side of the snapshot channel.
pub type SnapshotStream = watch::Receiver<Arc<Cache>>;

/// The current cache snapshot, fed by an update stream.
pub struct LiveCache {
    sender: watch::Sender<Arc<Cache>>,
    version: AtomicU64,
}

impl LiveCache {
    /// Start from an empty cache.
    pub fn new() -> Self {
        Self::with_snapshot(Cache::new())
    }

    /// Start from an existing snapshot.
    pub fn with_snapshot(initial: Cache) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            sender,
            version: AtomicU64::new(0),
        }
    }

    /// Fold one update into the current snapshot.
    ///
    /// No-ops are dropped without notifying subscribers. Any other update
    /// produces a new snapshot; the previous one is copied only if a reader
    /// still holds it.
    pub fn apply(&self, update: Update) {
        if update.is_noop() {
            return;
        }
        let kind = update.kind();
        let url = update.url().cloned();
        self.sender.send_modify(|snapshot| {
            Arc::make_mut(snapshot).apply(update);
            self.version.fetch_add(1, Ordering::SeqCst);
        });
        if let Some(url) = url {
            debug!(%url, kind, version = self.version(), "cache updated");
        }
    }

    /// Fold a batch of updates in order.
    pub fn apply_all<I>(&self, updates: I)
    where
        I: IntoIterator<Item = Update>,
    {
        for update in updates {
            self.apply(update);
        }
    }

    /// Consume an update feed until every sender is dropped.
    ///
    /// Updates are applied in the order they are received. Returns the
    /// snapshot left after the last update.
    pub async fn run(&self, mut feed: mpsc::Receiver<Update>) -> Arc<Cache> {
        while let Some(update) = feed.recv().await {
            self.apply(update);
        }
        let snapshot = self.snapshot();
        info!(
            version = self.version(),
            entries = snapshot.len(),
            "update feed closed"
        );
        snapshot
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Cache> {
        Arc::clone(&self.sender.borrow())
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> SnapshotStream {
        self.sender.subscribe()
    }

    /// Number of non-noop updates applied so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

impl Default for LiveCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LiveCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveCache")
            .field("entries", &self.snapshot().len())
            .field("version", &self.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn held_snapshot_is_not_mutated() {
        let live = LiveCache::new();
        live.apply(Update::upsert("/w1", json!({"name": "Ada"})));

        let before = live.snapshot();
        live.apply(Update::delete("/w1"));

        assert!(before.contains("/w1"));
        assert!(!live.snapshot().contains("/w1"));
    }

    #[test]
    fn noop_does_not_bump_version() {
        let live = LiveCache::new();
        live.apply(Update::Noop);
        assert_eq!(live.version(), 0);

        live.apply_all([Update::upsert("/a", json!(1)), Update::Noop, Update::delete("/a")]);
        assert_eq!(live.version(), 2);
        assert!(live.snapshot().is_empty());
    }

    #[test]
    fn with_snapshot_starts_from_initial_state() {
        let initial = Cache::build([Update::upsert("/a", json!(1))]);
        let live = LiveCache::with_snapshot(initial.clone());
        assert_eq!(*live.snapshot(), initial);
    }

    #[tokio::test]
    async fn run_folds_feed_in_order() {
        let live = LiveCache::new();
        let (tx, rx) = mpsc::channel(8);

        let updates = vec![
            Update::upsert("/w1", json!({"name": "Ada"})),
            Update::upsert("/w2", json!({"name": "Grace"})),
            Update::upsert("/w1", json!({"name": "Lovelace"})),
            Update::delete("/w2"),
        ];
        let expected = Cache::build(updates.clone());

        let producer = tokio::spawn(async move {
            for update in updates {
                tx.send(update).await.unwrap();
            }
        });

        let final_snapshot = live.run(rx).await;
        producer.await.unwrap();

        assert_eq!(*final_snapshot, expected);
        assert_eq!(live.version(), 4);
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshots() {
        let live = LiveCache::new();
        let mut stream = live.subscribe();

        live.apply(Update::upsert("/b1", json!({"title": "X"})));

        stream.changed().await.unwrap();
        let seen = Arc::clone(&stream.borrow_and_update());
        assert_eq!(seen.get("/b1"), Some(&json!({"title": "X"})));
    }
}
