//! PostgreSQL adapter over the host CMS tables.
//!
//! Reads `fields`, `fieldgroups_fields`, `templates` and `pages`. These tables
//! are owned and migrated by the host; this crate never writes to them.

use async_trait::async_trait;
use pagelock_core::error::CoreError;
use pagelock_core::host::{FieldInfo, FieldRegistry, PageDirectory};
use pagelock_core::types::DbId;
use sqlx::PgPool;

use crate::models::host::{FieldRow, PathSegment};

/// Column list for host `fields` queries.
const FIELD_COLUMNS: &str = "f.id, f.name, f.label, f.type";

/// Guard against parent cycles in a corrupt page tree.
const MAX_PAGE_DEPTH: i32 = 64;

/// Host collaborator backed by the host's own database tables.
#[derive(Debug, Clone)]
pub struct PgHost {
    pool: PgPool,
}

impl PgHost {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn host_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("Host query failed: {err}"))
}

#[async_trait]
impl FieldRegistry for PgHost {
    async fn field_id_by_name(&self, name: &str) -> Result<Option<DbId>, CoreError> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM fields WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(host_error)
    }

    async fn field_by_id(&self, id: DbId) -> Result<Option<FieldInfo>, CoreError> {
        let query = format!("SELECT {FIELD_COLUMNS} FROM fields f WHERE f.id = $1");
        let row = sqlx::query_as::<_, FieldRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(host_error)?;
        Ok(row.map(FieldInfo::from))
    }

    async fn list_fields(&self) -> Result<Vec<FieldInfo>, CoreError> {
        let query = format!("SELECT {FIELD_COLUMNS} FROM fields f ORDER BY f.name");
        let rows = sqlx::query_as::<_, FieldRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(host_error)?;
        Ok(rows.into_iter().map(FieldInfo::from).collect())
    }
}

#[async_trait]
impl PageDirectory for PgHost {
    async fn page_path(&self, page_id: DbId) -> Result<Option<String>, CoreError> {
        let segments = sqlx::query_as::<_, PathSegment>(
            "WITH RECURSIVE chain AS ( \
                 SELECT id, parent_id, name, 0 AS depth FROM pages WHERE id = $1 \
                 UNION ALL \
                 SELECT p.id, p.parent_id, p.name, c.depth + 1 \
                 FROM pages p JOIN chain c ON p.id = c.parent_id \
                 WHERE c.depth < $2 \
             ) \
             SELECT name, parent_id FROM chain ORDER BY depth DESC",
        )
        .bind(page_id)
        .bind(MAX_PAGE_DEPTH)
        .fetch_all(&self.pool)
        .await
        .map_err(host_error)?;

        if segments.is_empty() {
            return Ok(None);
        }
        Ok(Some(build_path(&segments)))
    }

    async fn page_template(&self, page_id: DbId) -> Result<Option<DbId>, CoreError> {
        sqlx::query_scalar::<_, DbId>("SELECT templates_id FROM pages WHERE id = $1")
            .bind(page_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(host_error)
    }

    async fn page_fields(&self, page_id: DbId) -> Result<Vec<FieldInfo>, CoreError> {
        let query = format!(
            "SELECT {FIELD_COLUMNS} FROM pages p \
             JOIN templates t ON t.id = p.templates_id \
             JOIN fieldgroups_fields ff ON ff.fieldgroups_id = t.fieldgroups_id \
             JOIN fields f ON f.id = ff.fields_id \
             WHERE p.id = $1 \
             ORDER BY ff.sort, f.id"
        );
        let rows = sqlx::query_as::<_, FieldRow>(&query)
            .bind(page_id)
            .fetch_all(&self.pool)
            .await
            .map_err(host_error)?;
        Ok(rows.into_iter().map(FieldInfo::from).collect())
    }

    async fn fieldgroup_templates(&self, fieldgroup_id: DbId) -> Result<Vec<DbId>, CoreError> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM templates WHERE fieldgroups_id = $1 ORDER BY id",
        )
        .bind(fieldgroup_id)
        .fetch_all(&self.pool)
        .await
        .map_err(host_error)
    }
}

/// Join an ancestor chain (root first) into a display path. The root page
/// (parent `0`) contributes no segment.
fn build_path(segments: &[PathSegment]) -> String {
    let names: Vec<&str> = segments
        .iter()
        .filter(|s| s.parent_id != 0)
        .map(|s| s.name.as_str())
        .collect();
    if names.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", names.join("/"))
    }
}
