use std::sync::Arc;

use pawhub_cache::{CacheConfig, PermissionCache, connect_store};
use pawhub_config::{CorsConfig, JwtConfig};
use pawhub_core::{AppError, ResolvedPrivileges};
use pawhub_db::{AdminDirectory, MemoryAdminDirectory, PgAdminDirectory, init_db_pool};
use pawhub_models::AdminAccount;
use tracing::info;

/// Shared handles for every request.
///
/// The directory is the source of truth for raw privilege strings; the
/// permission cache only ever holds expansions derived from it.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn AdminDirectory>,
    pub permission_cache: PermissionCache,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("permission_cache", &self.permission_cache)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// An active administrator and the privileges resolved for them.
#[derive(Debug, Clone)]
pub struct CachedPermissions {
    pub admin: AdminAccount,
    pub privileges: ResolvedPrivileges,
}

impl AppState {
    /// The administrator with `admin_id`, if present and active.
    pub async fn active_admin(&self, admin_id: i64) -> Result<Option<AdminAccount>, AppError> {
        Ok(self
            .directory
            .find_by_id(admin_id)
            .await?
            .filter(|admin| admin.is_active))
    }

    /// Resolved privileges for `admin_id`, read through the permission cache
    /// against the administrator's current record.
    ///
    /// Returns `None` when the administrator no longer exists or is inactive.
    /// Directory failures are returned as errors; the session guard decides
    /// how to surface them.
    pub async fn get_cached_permissions(
        &self,
        admin_id: i64,
    ) -> Result<Option<CachedPermissions>, AppError> {
        let Some(admin) = self.active_admin(admin_id).await? else {
            return Ok(None);
        };
        let privileges = self.permission_cache.get(&admin).await;
        Ok(Some(CachedPermissions { admin, privileges }))
    }
}

/// Build state from the environment.
///
/// With `DATABASE_URL` set, administrators come from Postgres and pending
/// migrations are applied. Without it an empty in-memory directory is used,
/// which is only useful for local experiments.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let directory: Arc<dyn AdminDirectory> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = init_db_pool(&url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Connected to database and applied migrations");
            Arc::new(PgAdminDirectory::new(pool))
        }
        Err(_) => {
            info!("DATABASE_URL not set, using in-memory admin directory");
            Arc::new(MemoryAdminDirectory::new())
        }
    };

    let cache_config = CacheConfig::from_env();
    let store = connect_store(&cache_config).await?;

    Ok(AppState {
        directory,
        permission_cache: PermissionCache::new(store, &cache_config),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}
