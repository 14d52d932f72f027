use std::future::Future;
use std::hash::Hash;

use dashmap::DashMap;
use futures::Stream;
use tokio::sync::watch;

/// Keyed change signal built on `tokio::sync::watch`.
///
/// Backends bump the key's version counter after a committed mutation;
/// subscribers use the receiver to drive full-snapshot re-reads. A watch
/// channel never blocks the mutating side and coalesces rapid signals, which
/// matches the contract: every emission is the complete current snapshot.
pub struct ChangeNotifier<K>
where
    K: Eq + Hash + Clone,
{
    channels: DashMap<K, watch::Sender<u64>>,
}

impl<K> ChangeNotifier<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    fn sender(&self, key: &K) -> watch::Sender<u64> {
        self.channels
            .entry(key.clone())
            .or_insert_with(|| watch::channel(0).0)
            .clone()
    }

    /// Signal that the state under `key` changed. Non-blocking; works with
    /// or without active subscribers. Keys without listeners are pruned so
    /// the channel map does not grow with every scope that ever mutated.
    pub fn notify(&self, key: &K) {
        let tx = self.sender(key);
        let current = *tx.borrow();
        tx.send_replace(current.wrapping_add(1));
        self.channels.remove_if(key, |_, tx| tx.receiver_count() == 0);
    }

    /// Subscribe to change signals for `key`. Dropping the receiver releases
    /// the listener.
    pub fn subscribe(&self, key: &K) -> watch::Receiver<u64> {
        self.sender(key).subscribe()
    }
}

impl<K> Default for ChangeNotifier<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a change signal into a stream of full snapshots.
///
/// Emits one snapshot immediately on subscription, then one per observed
/// change signal. `load` reads the complete current state; a failed load is
/// skipped rather than terminating the stream. The stream ends only when the
/// notifier itself is dropped.
pub fn snapshot_stream<T, F, Fut>(
    rx: watch::Receiver<u64>,
    load: F,
) -> impl Stream<Item = T> + Send
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<T>> + Send,
{
    futures::stream::unfold((rx, load, true), |(mut rx, load, first)| async move {
        let mut first = first;
        loop {
            if first {
                first = false;
                // Mark the current version as seen so the initial emission
                // is not double-delivered by the first change signal.
                rx.borrow_and_update();
            } else if rx.changed().await.is_err() {
                return None;
            }
            if let Some(snapshot) = load().await {
                return Some((snapshot, (rx, load, false)));
            }
        }
    })
}
