use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use zayt_core::Outcome;

pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: Outcome,
    pub timestamp: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry_time
    }
}

/// Memoizes whole pipeline outcomes, failures included, by exact message
/// text (trimmed and lowercased). Expired entries are dropped when read or
/// on an explicit [`RecommendationCache::purge_expired`]; nothing sweeps in
/// the background.
#[derive(Debug, Clone)]
pub struct RecommendationCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl Default for RecommendationCache {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_CACHE_TTL_MINUTES))
    }
}

pub fn cache_key(message: &str) -> String {
    message.trim().to_lowercase()
}

impl RecommendationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, message: &str) -> Option<Outcome> {
        self.get_at(message, Utc::now())
    }

    pub fn get_at(&self, message: &str, now: DateTime<Utc>) -> Option<Outcome> {
        let key = cache_key(message);
        let mut guard = self.entries.lock();

        let expired = match guard.get(&key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.result.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            guard.remove(&key);
        }
        None
    }

    pub fn set(&self, message: &str, result: Outcome) {
        self.set_at(message, result, Utc::now());
    }

    pub fn set_at(&self, message: &str, result: Outcome, now: DateTime<Utc>) {
        let entry = CacheEntry {
            result,
            timestamp: now,
            expiry_time: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.entries.lock().insert(cache_key(message), entry);
    }

    /// Drops every entry expired at `now`; returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut guard = self.entries.lock();
        let before = guard.len();
        guard.retain(|_, entry| !entry.is_expired(now));
        before - guard.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
