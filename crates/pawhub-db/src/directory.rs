//! Administrator lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use pawhub_core::AppError;
use pawhub_models::AdminAccount;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::instrument;

/// Fields for a new administrator. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub password_hash: String,
    pub privileges: Option<String>,
}

#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<AdminAccount>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AppError>;

    /// Replace the raw privilege string. Returns the updated record, or
    /// `None` if no administrator has `id`.
    async fn update_privileges(
        &self,
        id: i64,
        privileges: Option<&str>,
    ) -> Result<Option<AdminAccount>, AppError>;

    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminAccount, AppError>;
}

const ADMIN_COLUMNS: &str = "id, username, password_hash, privileges, is_active, created_at";

#[derive(Debug, Clone)]
pub struct PgAdminDirectory {
    db: PgPool,
}

impl PgAdminDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminDirectory for PgAdminDirectory {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<AdminAccount>, AppError> {
        let admin = sqlx::query_as::<_, AdminAccount>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(admin)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AppError> {
        let admin = sqlx::query_as::<_, AdminAccount>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(admin)
    }

    #[instrument(skip(self))]
    async fn update_privileges(
        &self,
        id: i64,
        privileges: Option<&str>,
    ) -> Result<Option<AdminAccount>, AppError> {
        let admin = sqlx::query_as::<_, AdminAccount>(&format!(
            "UPDATE admins SET privileges = $2, updated_at = NOW() WHERE id = $1
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(id)
        .bind(privileges)
        .fetch_optional(&self.db)
        .await?;

        Ok(admin)
    }

    #[instrument(skip(self, admin), fields(username = %admin.username))]
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminAccount, AppError> {
        let created = sqlx::query_as::<_, AdminAccount>(&format!(
            "INSERT INTO admins (username, password_hash, privileges)
             VALUES ($1, $2, $3)
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.privileges)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Username already exists"));
            }
            AppError::from(e)
        })?;

        Ok(created)
    }
}

/// An in-process directory for tests and local demos.
#[derive(Debug)]
pub struct MemoryAdminDirectory {
    admins: RwLock<HashMap<i64, AdminAccount>>,
    next_id: AtomicI64,
}

impl Default for MemoryAdminDirectory {
    fn default() -> Self {
        Self {
            admins: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryAdminDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an administrator active or inactive.
    pub async fn set_active(&self, id: i64, is_active: bool) {
        if let Some(admin) = self.admins.write().await.get_mut(&id) {
            admin.is_active = is_active;
        }
    }
}

#[async_trait]
impl AdminDirectory for MemoryAdminDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<AdminAccount>, AppError> {
        Ok(self.admins.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AppError> {
        Ok(self
            .admins
            .read()
            .await
            .values()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn update_privileges(
        &self,
        id: i64,
        privileges: Option<&str>,
    ) -> Result<Option<AdminAccount>, AppError> {
        let mut admins = self.admins.write().await;
        Ok(admins.get_mut(&id).map(|admin| {
            admin.privileges = privileges.map(str::to_string);
            admin.clone()
        }))
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminAccount, AppError> {
        let mut admins = self.admins.write().await;
        if admins.values().any(|existing| existing.username == admin.username) {
            return Err(AppError::bad_request(anyhow::anyhow!("Username already exists")));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = AdminAccount {
            id,
            username: admin.username,
            password_hash: admin.password_hash,
            privileges: admin.privileges,
            is_active: true,
            created_at: Utc::now(),
        };
        admins.insert(id, created.clone());

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_admin(username: &str, privileges: Option<&str>) -> NewAdmin {
        NewAdmin {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            privileges: privileges.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let directory = MemoryAdminDirectory::new();
        let created = directory
            .create_admin(new_admin("keeper", Some("pets:read")))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert!(created.is_active);

        let by_id = directory.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "keeper");

        let by_name = directory.find_by_username("keeper").await.unwrap().unwrap();
        assert_eq!(by_name.privileges.as_deref(), Some("pets:read"));

        assert!(directory.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let directory = MemoryAdminDirectory::new();
        directory.create_admin(new_admin("keeper", None)).await.unwrap();

        let error = directory
            .create_admin(new_admin("keeper", None))
            .await
            .unwrap_err();
        assert_eq!(error.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_update_privileges() {
        let directory = MemoryAdminDirectory::new();
        let admin = directory
            .create_admin(new_admin("keeper", Some("shop:read")))
            .await
            .unwrap();

        let updated = directory
            .update_privileges(admin.id, Some("111"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.privileges.as_deref(), Some("111"));

        let cleared = directory
            .update_privileges(admin.id, None)
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.privileges.is_none());

        assert!(directory.update_privileges(42, Some("x")).await.unwrap().is_none());
    }
}
