//! Cache module for revalidated pages
//!
//! Statically rendered pages are kept for a fixed time and then refetched
//! on the next request. If the refetch fails, the stale value keeps being
//! served until a later refetch succeeds.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A cached value and when it was fetched
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Time-to-live cache keyed by route
#[derive(Debug)]
pub struct RevalidateCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> RevalidateCache<V> {
    /// Create a cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the fresh cached value for `key`, or run `fetch` and cache its result
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: std::fmt::Display,
    {
        let stale = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                    tracing::debug!("Cache hit: {}", key);
                    return Ok(entry.value.clone());
                }
                Some(entry) => Some(entry.value.clone()),
                None => None,
            }
        };

        tracing::debug!("Revalidating: {}", key);
        match fetch().await {
            Ok(value) => {
                let entry = CacheEntry {
                    value: value.clone(),
                    fetched_at: Instant::now(),
                };
                self.entries.write().await.insert(key.to_string(), entry);
                Ok(value)
            }
            Err(e) => match stale {
                Some(value) => {
                    tracing::warn!("Revalidation of {} failed, serving stale copy: {}", key, e);
                    Ok(value)
                }
                None => Err(e),
            },
        }
    }
}
