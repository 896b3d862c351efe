//! In-process cache store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{CacheError, CacheStore};

#[derive(Debug)]
struct Slot {
    value: String,
    expires_at: Instant,
}

/// A `HashMap` behind a `RwLock`, honouring TTLs lazily on read.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Slot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(slot) if slot.expires_at > Instant::now() => {
                    return Ok(Some(slot.value.clone()));
                }
                Some(_) => {}
            }
        }

        // Expired: drop it so the map doesn't grow with dead sessions
        self.entries.write().await.remove(key);
        debug!(cache.key = %key, "Expired entry evicted");
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let slot = Slot {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), slot);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        store
            .set_raw("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.get_raw("k").await.unwrap(), Some("v".to_string()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get_raw("k").await.unwrap(), None);
        // Removing twice is fine
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let store = MemoryStore::new();
        store
            .set_raw("k", "v".to_string(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(store.get_raw("k").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = MemoryStore::new();
        let ttl = Duration::from_secs(60);
        store.set_raw("k", "a".to_string(), ttl).await.unwrap();
        store.set_raw("k", "b".to_string(), ttl).await.unwrap();

        assert_eq!(store.get_raw("k").await.unwrap(), Some("b".to_string()));
        assert_eq!(store.len().await, 1);
    }
}
