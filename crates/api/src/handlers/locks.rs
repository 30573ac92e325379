//! Handlers for page lock resources.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pagelock_core::error::CoreError;
use pagelock_core::field_ref::{FieldKey, FieldRef, PageLocks};
use pagelock_core::types::{DbId, LockFlags};
use pagelock_db::lock_store::LockStore;
use pagelock_db::models::page_lock::LockedField;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireLockPermission};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body naming a set of fields or properties.
#[derive(Debug, Deserialize)]
pub struct LockSetRequest {
    pub fields: Vec<FieldKey>,
}

/// Query parameters for adding a single lock.
#[derive(Debug, Default, Deserialize)]
pub struct AddLockParams {
    #[serde(default)]
    pub flags: LockFlags,
}

/// The locks of one page.
#[derive(Debug, Serialize)]
pub struct PageLocksResponse {
    pub page_id: DbId,
    pub fields: Vec<LockedField>,
}

/// Lock state of one field on one page.
#[derive(Debug, Serialize)]
pub struct LockStatus {
    pub page_id: DbId,
    pub field_id: DbId,
    pub field_name: String,
    pub locked: bool,
    pub flags: LockFlags,
}

#[derive(Debug, Serialize)]
pub struct ReplaceResult {
    pub changed: bool,
    pub fields: Vec<LockedField>,
}

#[derive(Debug, Serialize)]
pub struct AddResult {
    pub added: u64,
    pub fields: Vec<LockedField>,
}

#[derive(Debug, Serialize)]
pub struct Outcome<T: Serialize> {
    pub result: T,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a path segment into a lock target, rejecting unknown names.
pub(crate) async fn resolve_target(store: &LockStore, field: &str) -> AppResult<FieldRef> {
    store.field_id(field).await.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown field or property '{field}'"
        )))
    })
}

pub(crate) fn to_locked_fields(locks: PageLocks) -> Vec<LockedField> {
    locks
        .into_iter()
        .map(|(target, field_name)| LockedField {
            field_id: target.storage_id(),
            field_name,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/locks
///
/// Every page with locks, ordered by page id, with display paths.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let store = state.lock_store();
    let summaries = store.get_all_locks().await;
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/pages/{page_id}/locks
pub async fn list_for_page(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let locks = store.get_locks(page_id).await;
    Ok(Json(DataResponse {
        data: PageLocksResponse {
            page_id,
            fields: to_locked_fields(locks),
        },
    }))
}

/// PUT /api/v1/pages/{page_id}/locks
///
/// Make the page's lock set exactly the submitted one.
pub async fn replace(
    RequireLockPermission(user): RequireLockPermission,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<LockSetRequest>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let changed = store.replace_locks(page_id, input.fields).await;
    if changed {
        tracing::info!(page_id, user_id = user.user_id, "Replaced page locks");
    }
    let locks = store.get_locks(page_id).await;
    Ok(Json(DataResponse {
        data: ReplaceResult {
            changed,
            fields: to_locked_fields(locks),
        },
    }))
}

/// POST /api/v1/pages/{page_id}/locks
///
/// Add several locks at once. Existing locks and unknown names are skipped.
pub async fn add_many(
    RequireLockPermission(user): RequireLockPermission,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<LockSetRequest>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let added = store.add_locks(page_id, input.fields).await;
    tracing::info!(page_id, added, user_id = user.user_id, "Added page locks");
    let locks = store.get_locks(page_id).await;
    Ok(Json(DataResponse {
        data: AddResult {
            added,
            fields: to_locked_fields(locks),
        },
    }))
}

/// DELETE /api/v1/pages/{page_id}/locks
pub async fn clear_page(
    RequireLockPermission(user): RequireLockPermission,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let removed = store.remove_all_locks_for_page(page_id).await;
    tracing::info!(page_id, removed, user_id = user.user_id, "Cleared page locks");
    Ok(Json(DataResponse {
        data: Outcome { result: removed },
    }))
}

/// GET /api/v1/pages/{page_id}/locks/{field}
pub async fn get_one(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((page_id, field)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let target = resolve_target(&store, &field).await?;
    let locked = store.is_locked(page_id, target).await;
    let flags = store.get_lock_flags(page_id, target).await;
    let field_name = store.field_name(target).await;
    Ok(Json(DataResponse {
        data: LockStatus {
            page_id,
            field_id: target.storage_id(),
            field_name,
            locked,
            flags,
        },
    }))
}

/// PUT /api/v1/pages/{page_id}/locks/{field}?flags=0
///
/// 201 when the lock was created, 200 when it already existed.
pub async fn add_one(
    RequireLockPermission(user): RequireLockPermission,
    State(state): State<AppState>,
    Path((page_id, field)): Path<(DbId, String)>,
    Query(params): Query<AddLockParams>,
) -> AppResult<impl IntoResponse> {
    if params.flags < 0 {
        return Err(AppError::BadRequest("flags must not be negative".into()));
    }
    let mut store = state.lock_store();
    let target = resolve_target(&store, &field).await?;
    let added = store.add_lock(page_id, target, params.flags).await;
    if added {
        tracing::info!(page_id, field = %target, user_id = user.user_id, "Locked field");
    }
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((
        status,
        Json(DataResponse {
            data: Outcome { result: added },
        }),
    ))
}

/// DELETE /api/v1/pages/{page_id}/locks/{field}
pub async fn remove_one(
    RequireLockPermission(user): RequireLockPermission,
    State(state): State<AppState>,
    Path((page_id, field)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let target = resolve_target(&store, &field).await?;
    let removed = store.remove_lock(page_id, target).await;
    if removed {
        tracing::info!(page_id, field = %target, user_id = user.user_id, "Unlocked field");
    }
    Ok(Json(DataResponse {
        data: Outcome { result: removed },
    }))
}

/// DELETE /api/v1/fields/{field}/locks
///
/// Remove a field's locks on every page.
pub async fn clear_field(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let target = resolve_target(&store, &field).await?;
    let removed = store.remove_all_locks_for_field(target).await;
    tracing::info!(field = %target, removed, user_id = admin.user_id, "Cleared field locks");
    Ok(Json(DataResponse {
        data: Outcome { result: removed },
    }))
}
