//! # PawHub DB
//!
//! Database pool and administrator lookup for the PawHub admin API.
//!
//! The rest of the service reads administrators through the
//! [`AdminDirectory`] trait, so the permission cache and HTTP guard can be
//! exercised against [`MemoryAdminDirectory`] without a database.
//!
//! # Example
//!
//! ```ignore
//! use pawhub_db::{PgAdminDirectory, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! sqlx::migrate!().run(&pool).await?;
//! let directory = PgAdminDirectory::new(pool);
//! ```

pub mod directory;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use directory::{AdminDirectory, MemoryAdminDirectory, NewAdmin, PgAdminDirectory};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns the connection error if the database cannot be reached.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
