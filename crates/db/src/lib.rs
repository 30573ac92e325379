//! PostgreSQL persistence for page field locks.
//!
//! - [`repositories::PageLockRepo`] -- raw access to `page_edit_lock_fields`.
//! - [`host::PgHost`] -- read-only adapter over the host CMS tables.
//! - [`lock_store::LockStore`] -- the lock relation store with its per-request cache.
//! - [`lifecycle`] -- reactions to host page and schema lifecycle events.

use sqlx::postgres::PgPoolOptions;

pub mod host;
pub mod lifecycle;
pub mod lock_store;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
