pub mod editor;
pub mod health;
pub mod lifecycle;
pub mod locks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /locks                                              lock report (admin)
/// /pages/{page_id}/locks                              list, replace, add, clear
/// /pages/{page_id}/locks/{field}                      get, add, remove
/// /fields/{field}/locks                               clear field (admin)
///
/// /pages/{page_id}/lock-settings                      settings panel
/// /pages/{page_id}/form                               lock a form
/// /pages/{page_id}/edits                              reject locked edits
/// /pages/{page_id}/actions/{action}                   page list action gate
/// /pages/{page_id}/moveable                           move gate
/// /pages/{page_id}/editable/{field}                   front-end edit gate
///
/// /hooks/pages/{page_id}/deleted                      lifecycle (admin)
/// /hooks/pages/{page_id}/cloned
/// /hooks/fieldgroups/{fieldgroup_id}/fields/{field}/removed
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(locks::router())
        .merge(editor::router())
        .nest("/hooks", lifecycle::router())
}
