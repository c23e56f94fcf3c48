//! Per-key mutual exclusion for artifact generation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// At most one in-flight generation per artifact key.
///
/// Laggards for the same key wait on the leader's lock and re-check the
/// cache once they acquire it, so they observe the leader's result instead
/// of racing the check-then-generate sequence.
#[derive(Clone, Default)]
pub struct KeyLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard for one key, creating the entry on first use.
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let lock = {
            let mut map = self.map();
            Arc::clone(map.entry(key.to_string()).or_default())
        };
        let guard = lock.lock_owned().await;
        KeyGuard {
            locks: self.clone(),
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of tracked keys, for tests and introspection.
    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        // The map is only touched in short critical sections; recover from
        // poisoning instead of propagating a panic across requests.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Guard returned by [`KeyLocks::acquire`]. Releasing it prunes the key's
/// entry when no other task is waiting, so the map stays bounded by the
/// number of in-flight keys.
pub struct KeyGuard {
    locks: KeyLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        // Release the key lock before inspecting the map so the strong
        // count reflects only the map entry and any queued waiters.
        self.guard.take();
        let mut map = self.locks.map();
        if let Some(lock) = map.get(&self.key) {
            if Arc::strong_count(lock) == 1 {
                map.remove(&self.key);
            }
        }
    }
}
