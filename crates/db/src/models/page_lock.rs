//! Lock rows and lock report DTOs.

use pagelock_core::types::{DbId, LockFlags};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `page_edit_lock_fields` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PageLockRow {
    pub pages_id: DbId,
    /// Field id, or a negative property sentinel.
    pub fields_id: DbId,
    pub flags: LockFlags,
}

// ---------------------------------------------------------------------------
// Report shapes
// ---------------------------------------------------------------------------

/// One locked field or property as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedField {
    /// Storage id (negative for properties).
    pub field_id: DbId,
    /// Empty when the field no longer exists in the registry.
    pub field_name: String,
}

/// All locks of one page, with its display path. Used by the admin report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLockSummary {
    pub page_id: DbId,
    /// Empty when the page no longer resolves.
    pub path: String,
    pub fields: Vec<LockedField>,
}
