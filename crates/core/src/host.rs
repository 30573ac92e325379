//! Interfaces onto the host CMS.
//!
//! Pages, templates, fieldgroups and field definitions are owned by the host.
//! The lock store only reads them through these traits; `pagelock-db`
//! provides a PostgreSQL implementation over the host's tables.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Field types that structure a form but hold no value, and so cannot be locked.
pub const FIELDSET_TYPES: [&str; 3] = ["FieldsetOpen", "FieldsetTabOpen", "FieldsetClose"];

/// A field definition as reported by the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub id: DbId,
    pub name: String,
    pub label: String,
    /// Short type name, e.g. `"Text"` or `"FieldsetOpen"`.
    pub type_name: String,
}

impl FieldInfo {
    pub fn is_fieldset(&self) -> bool {
        FIELDSET_TYPES.contains(&self.type_name.as_str())
    }
}

/// Resolves field references by name and id.
#[async_trait]
pub trait FieldRegistry: Send + Sync {
    async fn field_id_by_name(&self, name: &str) -> Result<Option<DbId>, CoreError>;

    async fn field_by_id(&self, id: DbId) -> Result<Option<FieldInfo>, CoreError>;

    async fn list_fields(&self) -> Result<Vec<FieldInfo>, CoreError>;
}

/// Read-only view of the host page tree and page schemas.
#[async_trait]
pub trait PageDirectory: Send + Sync {
    /// Display path of a page (`/` for the root, `/a/b/` otherwise).
    async fn page_path(&self, page_id: DbId) -> Result<Option<String>, CoreError>;

    /// Template (page type) of a page.
    async fn page_template(&self, page_id: DbId) -> Result<Option<DbId>, CoreError>;

    /// Fields of the fieldgroup attached to the page's template, in fieldgroup order.
    async fn page_fields(&self, page_id: DbId) -> Result<Vec<FieldInfo>, CoreError>;

    /// Templates that use the given fieldgroup.
    async fn fieldgroup_templates(&self, fieldgroup_id: DbId) -> Result<Vec<DbId>, CoreError>;
}

/// Everything the lock store needs from the host.
pub trait LockHost: FieldRegistry + PageDirectory {}

impl<T: FieldRegistry + PageDirectory> LockHost for T {}
