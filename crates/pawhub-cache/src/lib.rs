//! # PawHub Cache
//!
//! Per-administrator caching of expanded permissions.
//!
//! This crate provides:
//! - [`CacheStore`]: a small async key-value contract, implemented by
//!   [`MemoryStore`] (single process) and [`RedisCache`] (shared)
//! - [`PermissionCache`]: the cache-backed permission accessor used by the
//!   HTTP guard, with explicit `preload` / `invalidate` lifecycle calls
//! - Cache configuration and key generation
//!
//! # Example
//!
//! ```ignore
//! use pawhub_cache::{CacheConfig, PermissionCache, connect_store};
//!
//! let config = CacheConfig::from_env();
//! let store = connect_store(&config).await?;
//! let cache = PermissionCache::new(store, &config);
//!
//! cache.preload(&admin).await;                  // on login
//! let resolved = cache.get(&admin).await;       // on every request
//! cache.invalidate(admin.id).await;             // on logout or privilege edit
//! ```

pub mod accessor;
pub mod config;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;

use std::sync::Arc;

use tracing::info;

pub use accessor::{CacheOutcome, PermissionCache, PermissionCacheEntry};
pub use config::{CacheBackend, CacheConfig};
pub use memory::MemoryStore;
pub use redis::RedisCache;
pub use store::{CacheError, CacheStore};

/// Build the store selected by `config.backend`.
///
/// # Errors
///
/// Returns `CacheError::Connection` if the Redis backend is selected and the
/// server cannot be reached.
pub async fn connect_store(config: &CacheConfig) -> Result<Arc<dyn CacheStore>, CacheError> {
    match config.backend {
        CacheBackend::Memory => {
            info!("Using in-memory permission cache");
            Ok(Arc::new(MemoryStore::new()))
        }
        CacheBackend::Redis => {
            let cache = RedisCache::new(&config.redis_url).await?;
            info!(redis_url = %config.redis_url, "Connected to Redis permission cache");
            Ok(Arc::new(cache))
        }
    }
}
