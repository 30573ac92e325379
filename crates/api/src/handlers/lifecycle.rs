//! Hooks the host calls after page and schema lifecycle events.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use pagelock_core::types::DbId;
use pagelock_db::lifecycle;
use serde::{Deserialize, Serialize};

use super::locks::resolve_target;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClonedRequest {
    pub copy_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct HookResult {
    /// Lock rows added or removed by the reaction.
    pub affected: u64,
}

/// POST /api/v1/hooks/pages/{page_id}/deleted
pub async fn page_deleted(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let affected = lifecycle::on_page_deleted(&mut store, page_id).await;
    Ok(Json(DataResponse {
        data: HookResult { affected },
    }))
}

/// POST /api/v1/hooks/pages/{page_id}/cloned
pub async fn page_cloned(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<ClonedRequest>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let affected = lifecycle::on_page_cloned(&mut store, page_id, input.copy_id).await;
    Ok(Json(DataResponse {
        data: HookResult { affected },
    }))
}

/// POST /api/v1/hooks/fieldgroups/{fieldgroup_id}/fields/{field}/removed
pub async fn field_removed(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((fieldgroup_id, field)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let target = resolve_target(&store, &field).await?;
    let affected = lifecycle::on_field_removed(&mut store, fieldgroup_id, target).await;
    Ok(Json(DataResponse {
        data: HookResult { affected },
    }))
}
