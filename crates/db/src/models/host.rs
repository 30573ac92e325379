//! Rows read from the host CMS tables.

use pagelock_core::host::FieldInfo;
use pagelock_core::types::DbId;
use sqlx::FromRow;

/// A row from the host `fields` table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldRow {
    pub id: DbId,
    pub name: String,
    pub label: String,
    #[sqlx(rename = "type")]
    pub type_name: String,
}

impl From<FieldRow> for FieldInfo {
    fn from(row: FieldRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            label: row.label,
            type_name: row.type_name,
        }
    }
}

/// One step of a page's ancestor chain, read root first.
#[derive(Debug, Clone, FromRow)]
pub struct PathSegment {
    pub name: String,
    pub parent_id: DbId,
}
