//! Route definitions for host lifecycle hooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::lifecycle;
use crate::state::AppState;

/// Routes mounted at `/hooks`.
///
/// ```text
/// POST   /pages/{page_id}/deleted                              -> page_deleted
/// POST   /pages/{page_id}/cloned                               -> page_cloned
/// POST   /fieldgroups/{fieldgroup_id}/fields/{field}/removed   -> field_removed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages/{page_id}/deleted", post(lifecycle::page_deleted))
        .route("/pages/{page_id}/cloned", post(lifecycle::page_cloned))
        .route(
            "/fieldgroups/{fieldgroup_id}/fields/{field}/removed",
            post(lifecycle::field_removed),
        )
}
