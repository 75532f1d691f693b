//! Per-key locks for serializing same-key operations.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-key lock map.
///
/// Operations on different keys proceed concurrently; operations on the
/// same key are serialized. Vote casts key on the subject, relationship
/// operations hold both user keys, thread operations key on the root post
/// of the affected parent chain.
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn handle(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Hold a single key for the duration of the returned guard.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        self.handle(key).await.lock_owned().await
    }

    /// Hold two keys, always acquired in canonical order so that two
    /// callers locking the same pair from opposite ends cannot deadlock.
    pub async fn acquire_pair(
        &self,
        a: &str,
        b: &str,
    ) -> (OwnedMutexGuard<()>, Option<OwnedMutexGuard<()>>) {
        if a == b {
            return (self.acquire(a).await, None);
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.acquire(first).await;
        let second_guard = self.acquire(second).await;
        (first_guard, Some(second_guard))
    }

    /// Number of keys with a live lock entry.
    pub async fn active_keys(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Drop entries no longer held by any operation.
    pub async fn cleanup(&self) {
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

impl Default for KeyLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_same_key_is_serialized() {
        let locks = Arc::new(KeyLocks::new());
        let counter = Arc::new(AtomicU64::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("subject/post/1").await;
                // Non-atomic read-modify-write; only the lock keeps it exact.
                let seen = counter.load(Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                counter.store(seen + 1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_different_keys_run_in_parallel() {
        let locks = Arc::new(KeyLocks::new());
        let start = Instant::now();

        let mut handles = Vec::new();
        for i in 0..4 {
            let locks = Arc::clone(&locks);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&format!("user/{i}")).await;
                tokio::time::sleep(Duration::from_millis(50)).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        // Four 50ms holds on distinct keys should overlap. Generous margin.
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_pair_acquisition_is_deadlock_free() {
        let locks = Arc::new(KeyLocks::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let locks = Arc::clone(&locks);
            // Half the tasks lock (a, b), the other half (b, a).
            let (x, y) = if i % 2 == 0 {
                ("user/a", "user/b")
            } else {
                ("user/b", "user/a")
            };
            handles.push(tokio::spawn(async move {
                let _guards = locks.acquire_pair(x, y).await;
                tokio::time::sleep(Duration::from_millis(1)).await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_cleanup_drops_idle_entries() {
        let locks = KeyLocks::new();
        {
            let _guard = locks.acquire("user/a").await;
            assert_eq!(locks.active_keys().await, 1);
        }
        locks.cleanup().await;
        assert_eq!(locks.active_keys().await, 0);
    }
}
