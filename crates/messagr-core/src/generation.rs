//! Latest-wins state slot guarded by a generation counter.
//!
//! Each operation that writes shared state calls [`LatestWins::begin`] before
//! its first await and hands the returned generation back to
//! [`LatestWins::commit`] when it completes. A commit only lands if no newer
//! generation has been issued in between, so a slow, superseded response can
//! never overwrite the result of a newer call. Superseded operations are not
//! aborted; their results are simply dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

/// Shared value plus the generation that produced it.
pub struct LatestWins<T> {
    issued: AtomicU64,
    state: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> LatestWins<T> {
    /// Create an empty slot. The first generation issued is 1.
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            state: RwLock::new(None),
        }
    }

    /// Issue the next generation.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued generation (0 if none).
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Store `value` if `generation` is still the latest issued.
    ///
    /// Returns whether the value was applied.
    pub async fn commit(&self, generation: u64, value: T) -> bool {
        let mut state = self.state.write().await;
        if generation != self.issued.load(Ordering::SeqCst) {
            return false;
        }
        *state = Some((generation, value));
        true
    }

    /// Current value, if any generation has been applied.
    pub async fn current(&self) -> Option<T> {
        self.state.read().await.as_ref().map(|(_, v)| v.clone())
    }

    /// Generation of the current value.
    pub async fn applied_generation(&self) -> Option<u64> {
        self.state.read().await.as_ref().map(|(g, _)| *g)
    }
}

impl<T: Clone> Default for LatestWins<T> {
    fn default() -> Self {
        Self::new()
    }
}
