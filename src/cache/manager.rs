//! Response cache keyed by request URL
//!
//! Provides a `ResponseCache` that stores parsed JSON bodies with the time they
//! were stored, and hands them back only while they are still fresh.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// How long a cached response stays fresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Entries expire once this much time has passed since they were stored
    After(Duration),
    /// Entries never expire
    Forever,
}

impl Ttl {
    /// Shorthand for `Ttl::After(Duration::from_secs(secs))`
    pub fn seconds(secs: u64) -> Self {
        Ttl::After(Duration::from_secs(secs))
    }

    /// Whether an entry stored at `stored_at` is still fresh at `now`
    ///
    /// A clock that went backwards counts as zero elapsed time.
    fn is_fresh(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Ttl::Forever => true,
            Ttl::After(ttl) => {
                let elapsed = now
                    .signed_duration_since(stored_at)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                elapsed < *ttl
            }
        }
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::seconds(60)
    }
}

/// A single cached response
#[derive(Debug)]
struct CacheEntry {
    /// When the body was stored
    stored_at: DateTime<Utc>,
    /// The parsed response body, shared with every payload handed out
    body: Arc<Value>,
}

/// Thread-safe store mapping request URLs to parsed response bodies
///
/// Holds at most one entry per URL. An entry is returned only while
/// `now - stored_at < ttl` (or always, for `Ttl::Forever`). A read that finds
/// an expired entry removes it.
#[derive(Debug, Default)]
pub struct ResponseCache {
    ttl: Ttl,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates an empty cache with the given time-to-live
    pub fn new(ttl: Ttl) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configured time-to-live
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up a fresh body for `key`
    ///
    /// Returns `None` when the key is absent or expired. Expired entries are
    /// evicted as a side effect.
    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.get_at(key, Utc::now())
    }

    /// Stores `body` under `key`, replacing any previous entry
    pub fn set(&self, key: impl Into<String>, body: Arc<Value>) {
        self.set_at(key, body, Utc::now());
    }

    fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Arc<Value>> {
        let mut entries = self.lock();
        let fresh = self.ttl.is_fresh(entries.get(key)?.stored_at, now);

        if fresh {
            debug!(key, "cache hit");
            entries.get(key).map(|entry| Arc::clone(&entry.body))
        } else {
            debug!(key, "evicting expired cache entry");
            entries.remove(key);
            None
        }
    }

    fn set_at(&self, key: impl Into<String>, body: Arc<Value>, now: DateTime<Utc>) {
        let key = key.into();
        debug!(key = %key, "storing response in cache");
        self.lock().insert(
            key,
            CacheEntry {
                stored_at: now,
                body,
            },
        );
    }

    /// Drops the entry for `key`, returning whether one was present
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Drops every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::thread;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn body(name: &str) -> Arc<Value> {
        Arc::new(json!({ "name": name }))
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let cache = ResponseCache::new(Ttl::seconds(60));

        assert!(cache.get("https://example.test/players/%23A").is_none());
    }

    #[test]
    fn test_get_returns_value_within_ttl() {
        let cache = ResponseCache::new(Ttl::seconds(60));
        let t0 = base_time();

        cache.set_at("key", body("fresh"), t0);

        for elapsed in [0, 1, 30, 59] {
            let now = t0 + chrono::Duration::seconds(elapsed);
            let hit = cache.get_at("key", now).expect("Entry should be fresh");
            assert_eq!(*hit, json!({ "name": "fresh" }), "elapsed {}s", elapsed);
        }
    }

    #[test]
    fn test_get_returns_none_at_and_after_ttl() {
        for elapsed in [60, 61, 3600] {
            let cache = ResponseCache::new(Ttl::seconds(60));
            let t0 = base_time();
            cache.set_at("key", body("stale"), t0);

            let now = t0 + chrono::Duration::seconds(elapsed);
            assert!(
                cache.get_at("key", now).is_none(),
                "Entry should be expired after {}s",
                elapsed
            );
        }
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = ResponseCache::new(Ttl::seconds(10));
        let t0 = base_time();
        cache.set_at("key", body("old"), t0);
        assert_eq!(cache.len(), 1);

        let later = t0 + chrono::Duration::seconds(11);
        assert!(cache.get_at("key", later).is_none());
        assert_eq!(cache.len(), 0, "Expired entry should be removed");

        // Even a read at the original time no longer finds it
        assert!(cache.get_at("key", t0).is_none());
    }

    #[test]
    fn test_expired_entries_are_not_swept_without_a_read() {
        let cache = ResponseCache::new(Ttl::seconds(10));
        let t0 = base_time();
        cache.set_at("a", body("a"), t0);
        cache.set_at("b", body("b"), t0);

        let later = t0 + chrono::Duration::seconds(30);
        assert!(cache.get_at("a", later).is_none());

        assert_eq!(cache.len(), 1, "Only the entry that was read is evicted");
    }

    #[test]
    fn test_forever_ttl_never_expires() {
        let cache = ResponseCache::new(Ttl::Forever);
        let t0 = base_time();
        cache.set_at("key", body("kept"), t0);

        let much_later = t0 + chrono::Duration::days(3650);
        assert!(cache.get_at("key", much_later).is_some());
    }

    #[test]
    fn test_zero_ttl_never_returns_entries() {
        let cache = ResponseCache::new(Ttl::After(Duration::ZERO));
        let t0 = base_time();
        cache.set_at("key", body("gone"), t0);

        assert!(cache.get_at("key", t0).is_none());
    }

    #[test]
    fn test_set_overwrites_and_refreshes_timestamp() {
        let cache = ResponseCache::new(Ttl::seconds(10));
        let t0 = base_time();
        cache.set_at("key", body("first"), t0);

        let t1 = t0 + chrono::Duration::seconds(8);
        cache.set_at("key", body("second"), t1);
        assert_eq!(cache.len(), 1, "One entry per key");

        let t2 = t0 + chrono::Duration::seconds(15);
        let hit = cache.get_at("key", t2).expect("Overwrite should restart the TTL");
        assert_eq!(*hit, json!({ "name": "second" }));
    }

    #[test]
    fn test_clock_going_backwards_counts_as_fresh() {
        let cache = ResponseCache::new(Ttl::seconds(10));
        let t0 = base_time();
        cache.set_at("key", body("skewed"), t0);

        let earlier = t0 - chrono::Duration::seconds(5);
        assert!(cache.get_at("key", earlier).is_some());
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = ResponseCache::new(Ttl::Forever);
        cache.set("a", body("a"));
        cache.set("b", body("b"));

        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_hit_shares_the_stored_body() {
        let cache = ResponseCache::new(Ttl::Forever);
        let stored = body("shared");
        cache.set("key", Arc::clone(&stored));

        let hit = cache.get("key").expect("Should hit");
        assert!(Arc::ptr_eq(&hit, &stored), "No copy of the body is made");
    }

    #[test]
    fn test_concurrent_set_and_get() {
        let cache = Arc::new(ResponseCache::new(Ttl::Forever));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let key = format!("key_{}", i);
                    cache.set(key.clone(), Arc::new(json!(i)));
                    cache.get(&key)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }
        assert_eq!(cache.len(), 8);
    }

    #[test]
    fn test_default_ttl_is_short() {
        assert_eq!(Ttl::default(), Ttl::After(Duration::from_secs(60)));
        assert_eq!(ResponseCache::default().ttl(), Ttl::default());
    }
}
