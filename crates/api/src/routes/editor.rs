//! Route definitions for the page editor and page list integration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// ```text
/// GET    /pages/{page_id}/lock-settings        -> lock_settings
/// POST   /pages/{page_id}/form                 -> lock_page_form
/// POST   /pages/{page_id}/edits                -> check_edits
/// POST   /pages/{page_id}/actions/{action}     -> gate_action
/// GET    /pages/{page_id}/moveable             -> moveable
/// GET    /pages/{page_id}/editable/{field}     -> editable
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages/{page_id}/lock-settings", get(editor::lock_settings))
        .route("/pages/{page_id}/form", post(editor::lock_page_form))
        .route("/pages/{page_id}/edits", post(editor::check_edits))
        .route("/pages/{page_id}/actions/{action}", post(editor::gate_action))
        .route("/pages/{page_id}/moveable", get(editor::moveable))
        .route("/pages/{page_id}/editable/{field}", get(editor::editable))
}
