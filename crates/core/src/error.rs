use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A mutation touched fields that are locked on the page.
    #[error("Locked fields on page {page_id}: {}", fields.join(", "))]
    Locked { page_id: DbId, fields: Vec<String> },

    #[error("Internal error: {0}")]
    Internal(String),
}
