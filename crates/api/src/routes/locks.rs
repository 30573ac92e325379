//! Route definitions for page locks.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::locks;
use crate::state::AppState;

/// ```text
/// GET    /locks                                -> list_all
/// GET    /pages/{page_id}/locks                -> list_for_page
/// PUT    /pages/{page_id}/locks                -> replace
/// POST   /pages/{page_id}/locks                -> add_many
/// DELETE /pages/{page_id}/locks                -> clear_page
/// GET    /pages/{page_id}/locks/{field}        -> get_one
/// PUT    /pages/{page_id}/locks/{field}        -> add_one
/// DELETE /pages/{page_id}/locks/{field}        -> remove_one
/// DELETE /fields/{field}/locks                 -> clear_field
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locks", get(locks::list_all))
        .route(
            "/pages/{page_id}/locks",
            get(locks::list_for_page)
                .put(locks::replace)
                .post(locks::add_many)
                .delete(locks::clear_page),
        )
        .route(
            "/pages/{page_id}/locks/{field}",
            get(locks::get_one)
                .put(locks::add_one)
                .delete(locks::remove_one),
        )
        .route("/fields/{field}/locks", delete(locks::clear_field))
}
