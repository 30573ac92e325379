//! Repository for the `page_edit_lock_fields` table.
//!
//! Works purely on storage ids; translation between names, properties and
//! ids happens in [`crate::lock_store`].

use pagelock_core::types::{DbId, LockFlags};
use sqlx::PgPool;

use crate::models::page_lock::PageLockRow;

/// Column list for `page_edit_lock_fields` queries.
const COLUMNS: &str = "pages_id, fields_id, flags";

/// Provides raw access to lock rows.
pub struct PageLockRepo;

impl PageLockRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All locks of one page, in primary key order.
    pub async fn list_for_page(pool: &PgPool, page_id: DbId) -> Result<Vec<PageLockRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_edit_lock_fields \
             WHERE pages_id = $1 \
             ORDER BY fields_id"
        );
        sqlx::query_as::<_, PageLockRow>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Every lock, ordered by page then field.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PageLockRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_edit_lock_fields \
             ORDER BY pages_id, fields_id"
        );
        sqlx::query_as::<_, PageLockRow>(&query).fetch_all(pool).await
    }

    /// Ids of the pages that lock the given field.
    pub async fn list_pages_for_field(pool: &PgPool, field_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT pages_id FROM page_edit_lock_fields \
             WHERE fields_id = $1 \
             ORDER BY pages_id",
        )
        .bind(field_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Inserts
    // -----------------------------------------------------------------------

    /// Insert one lock. Idempotent: returns `false` if it already existed.
    pub async fn insert(
        pool: &PgPool,
        page_id: DbId,
        field_id: DbId,
        flags: LockFlags,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO page_edit_lock_fields (pages_id, fields_id, flags) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (pages_id, fields_id) DO NOTHING",
        )
        .bind(page_id)
        .bind(field_id)
        .bind(flags)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert many locks for one page in a single statement, all with zero
    /// flags. Returns how many rows were newly inserted.
    pub async fn insert_many(pool: &PgPool, page_id: DbId, field_ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if field_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO page_edit_lock_fields (pages_id, fields_id, flags) \
             SELECT $1, f, 0 FROM UNNEST($2::BIGINT[]) AS f \
             ON CONFLICT (pages_id, fields_id) DO NOTHING",
        )
        .bind(page_id)
        .bind(field_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Replace every lock of a page with the given set in one transaction.
    ///
    /// Existing flags are discarded. Returns how many rows were inserted.
    pub async fn replace_for_page(
        pool: &PgPool,
        page_id: DbId,
        field_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM page_edit_lock_fields WHERE pages_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO page_edit_lock_fields (pages_id, fields_id, flags) \
             SELECT $1, f, 0 FROM UNNEST($2::BIGINT[]) AS f \
             ON CONFLICT (pages_id, fields_id) DO NOTHING",
        )
        .bind(page_id)
        .bind(field_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Deletes
    // -----------------------------------------------------------------------

    /// Delete one lock. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, page_id: DbId, field_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM page_edit_lock_fields \
             WHERE pages_id = $1 AND fields_id = $2",
        )
        .bind(page_id)
        .bind(field_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every lock of a page.
    pub async fn delete_for_page(pool: &PgPool, page_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_edit_lock_fields WHERE pages_id = $1")
            .bind(page_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every lock of a field across all pages.
    pub async fn delete_for_field(pool: &PgPool, field_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_edit_lock_fields WHERE fields_id = $1")
            .bind(field_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete the locks of one field on exactly the given pages.
    pub async fn delete_for_field_on_pages(
        pool: &PgPool,
        field_id: DbId,
        page_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if page_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "DELETE FROM page_edit_lock_fields \
             WHERE fields_id = $1 AND pages_id = ANY($2)",
        )
        .bind(field_id)
        .bind(page_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
