//! Cache-backed access to an administrator's expanded permissions.
//!
//! Expansion is a pure function of the raw privilege string, so a cached
//! expansion is valid for exactly as long as the administrator's current
//! raw string equals the one it was built from. Every read compares the two
//! and treats a mismatch as a miss.
//!
//! Nothing here returns an error. A store that is down, or an entry that no
//! longer decodes, falls through to recomputing from the admin record.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use pawhub_core::permissions::{CatalogExpander, Expander, PermissionSet, ResolvedPrivileges};
use pawhub_models::AdminAccount;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::CacheConfig;
use crate::keys;
use crate::store::CacheStore;

/// What is stored per administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCacheEntry {
    /// The raw privilege string the expansion was derived from
    pub raw_privileges: String,
    /// Expanded codes in catalog order
    pub permissions: Vec<String>,
    /// Unix timestamp of when the entry was computed
    pub cached_at: i64,
}

impl PermissionCacheEntry {
    fn from_resolved(resolved: &ResolvedPrivileges) -> Self {
        Self {
            raw_privileges: resolved.raw().to_string(),
            permissions: resolved.permissions().ordered(),
            cached_at: Utc::now().timestamp(),
        }
    }

    fn into_resolved(self) -> ResolvedPrivileges {
        let permissions: PermissionSet = self.permissions.into_iter().collect();
        ResolvedPrivileges::from_parts(self.raw_privileges, permissions)
    }
}

/// How a read was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    /// An entry existed but was built from a different raw string
    Stale,
    /// An entry existed but could not be decoded
    Corrupt,
}

impl CacheOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Stale => "stale",
            CacheOutcome::Corrupt => "corrupt",
        }
    }
}

enum Lookup {
    Found(PermissionCacheEntry),
    Missing,
    Corrupt,
}

#[derive(Clone)]
pub struct PermissionCache {
    store: Arc<dyn CacheStore>,
    expander: Arc<dyn Expander>,
    prefix: String,
    ttl: Duration,
}

impl std::fmt::Debug for PermissionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionCache")
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl PermissionCache {
    pub fn new(store: Arc<dyn CacheStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            expander: Arc::new(CatalogExpander),
            prefix: config.key_prefix.clone(),
            ttl: config.ttl(),
        }
    }

    /// Replace the expander used on every recomputation.
    pub fn with_expander(mut self, expander: Arc<dyn Expander>) -> Self {
        self.expander = expander;
        self
    }

    fn key(&self, admin_id: i64) -> String {
        keys::admins::permissions(&self.prefix, admin_id)
    }

    /// The administrator's resolved privileges, from cache when the cached
    /// entry still matches `admin`'s raw privilege string.
    #[instrument(skip(self, admin), fields(admin_id = admin.id))]
    pub async fn get(&self, admin: &AdminAccount) -> ResolvedPrivileges {
        let (resolved, outcome) = self.get_with_outcome(admin).await;
        counter!("permission_cache_total", "result" => outcome.as_str()).increment(1);
        resolved
    }

    /// Like [`get`](Self::get), also reporting how the read was served.
    pub async fn get_with_outcome(
        &self,
        admin: &AdminAccount,
    ) -> (ResolvedPrivileges, CacheOutcome) {
        let current = admin.privileges().unwrap_or_default();

        let outcome = match self.lookup(admin.id).await {
            Lookup::Found(entry) if entry.raw_privileges == current => {
                debug!("Permission cache hit");
                return (entry.into_resolved(), CacheOutcome::Hit);
            }
            Lookup::Found(_) => {
                debug!("Cached permissions built from an older privilege string");
                CacheOutcome::Stale
            }
            Lookup::Missing => CacheOutcome::Miss,
            Lookup::Corrupt => CacheOutcome::Corrupt,
        };

        (self.preload(admin).await, outcome)
    }

    /// Expand `admin`'s privileges now and store the result, replacing any
    /// existing entry.
    #[instrument(skip(self, admin), fields(admin_id = admin.id))]
    pub async fn preload(&self, admin: &AdminAccount) -> ResolvedPrivileges {
        let resolved =
            ResolvedPrivileges::with_expander(admin.privileges(), self.expander.as_ref());
        let entry = PermissionCacheEntry::from_resolved(&resolved);

        match serde_json::to_string(&entry) {
            Ok(encoded) => {
                if let Err(e) = self.store.set_raw(&self.key(admin.id), encoded, self.ttl).await {
                    warn!(error = %e, "Failed to store expanded permissions");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode expanded permissions"),
        }

        resolved
    }

    /// Drop the cached expansion for `admin_id`.
    #[instrument(skip(self))]
    pub async fn invalidate(&self, admin_id: i64) {
        if let Err(e) = self.store.remove(&self.key(admin_id)).await {
            warn!(error = %e, "Failed to invalidate permission cache");
        } else {
            debug!("Permission cache invalidated");
        }
    }

    /// The stored entry for `admin_id`, if any, without recomputing.
    pub async fn peek(&self, admin_id: i64) -> Option<PermissionCacheEntry> {
        match self.lookup(admin_id).await {
            Lookup::Found(entry) => Some(entry),
            Lookup::Missing | Lookup::Corrupt => None,
        }
    }

    async fn lookup(&self, admin_id: i64) -> Lookup {
        let raw = match self.store.get_raw(&self.key(admin_id)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Lookup::Missing,
            Err(e) => {
                warn!(admin_id, error = %e, "Permission cache unavailable, recomputing");
                return Lookup::Missing;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Lookup::Found(entry),
            Err(e) => {
                warn!(admin_id, error = %e, "Discarding malformed permission cache entry");
                Lookup::Corrupt
            }
        }
    }
}
