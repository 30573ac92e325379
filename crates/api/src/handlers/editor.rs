//! Handlers backing the host's page editor and page list.
//!
//! The host asks these endpoints how to present a page's form, whether a
//! submitted edit may be saved, and whether page-list actions may run.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use pagelock_core::editor::{lock_options, review_edits, EditReview, EditorScriptConfig, LockOption};
use pagelock_core::error::CoreError;
use pagelock_core::field_ref::PageProperty;
use pagelock_core::host::PageDirectory;
use pagelock_core::inputfield_lock::{lock_form, InputfieldState, LockContext};
use pagelock_core::page_actions::{gate_page_list_action, is_editable, is_moveable, ActionResponse};
use pagelock_core::types::DbId;
use serde::{Deserialize, Serialize};

use super::locks::resolve_target;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireLockPermission;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LockSettingsParams {
    /// The editor was opened from the lock report.
    #[serde(default)]
    pub jump_to_locks: bool,
}

/// Settings tab content for one page.
#[derive(Debug, Serialize)]
pub struct LockSettingsPanel {
    pub page_id: DbId,
    pub options: Vec<LockOption>,
    pub script: EditorScriptConfig,
}

/// A page editor form as described by the host.
#[derive(Debug, Deserialize)]
pub struct FormRequest {
    pub controls: Vec<InputfieldState>,
    #[serde(default)]
    pub context: LockContext,
}

#[derive(Debug, Serialize)]
pub struct LockedForm {
    pub controls: Vec<InputfieldState>,
    /// Names of the controls that were locked.
    pub locked: Vec<String>,
}

/// Input names the user is trying to save.
#[derive(Debug, Deserialize)]
pub struct EditsRequest {
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionGate {
    pub allowed: bool,
    /// Replacement response for the page list when the action is refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ActionResponse>,
}

#[derive(Debug, Serialize)]
pub struct Moveable {
    pub moveable: bool,
}

#[derive(Debug, Serialize)]
pub struct Editable {
    pub editable: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pages/{page_id}/lock-settings?jump_to_locks=false
///
/// The lockable fields of a page with their checked state, and the editor
/// script configuration.
pub async fn lock_settings(
    RequireLockPermission(_user): RequireLockPermission,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(params): Query<LockSettingsParams>,
) -> AppResult<impl IntoResponse> {
    if state.host.page_template(page_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }));
    }
    let page_fields = state.host.page_fields(page_id).await?;

    let mut store = state.lock_store();
    let locks = store.get_locks(page_id).await;

    Ok(Json(DataResponse {
        data: LockSettingsPanel {
            page_id,
            options: lock_options(&page_fields, &locks),
            script: EditorScriptConfig::new(&state.config.locks, params.jump_to_locks),
        },
    }))
}

/// POST /api/v1/pages/{page_id}/form
///
/// Apply the locked presentation to every control of the submitted form.
pub async fn lock_page_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<FormRequest>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let locks = store.get_locks(page_id).await;

    let mut controls = input.controls;
    let locked = lock_form(&mut controls, &locks, &state.config.locks, &input.context);

    Ok(Json(DataResponse {
        data: LockedForm { controls, locked },
    }))
}

/// POST /api/v1/pages/{page_id}/edits
///
/// 200 with the accepted names when nothing locked is touched, 423 naming the
/// locked inputs otherwise.
pub async fn check_edits(
    user: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<EditsRequest>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let locks = store.get_locks(page_id).await;

    let review: EditReview = review_edits(input.fields, &locks);
    if !review.is_clean() {
        tracing::warn!(
            page_id,
            user_id = user.user_id,
            rejected = ?review.rejected,
            "Rejected edit of locked fields"
        );
        return Err(AppError::Core(CoreError::Locked {
            page_id,
            fields: review.rejected,
        }));
    }
    Ok(Json(DataResponse { data: review }))
}

/// POST /api/v1/pages/{page_id}/actions/{action}
///
/// Status-changing page-list actions are refused while `status` is locked.
pub async fn gate_action(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((page_id, action)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let status_locked = store.is_locked(page_id, PageProperty::Status).await;

    let response = gate_page_list_action(&action, status_locked);
    if response.is_some() {
        tracing::debug!(page_id, action = %action, "Refused page list action");
    }
    Ok(Json(DataResponse {
        data: ActionGate {
            allowed: response.is_none(),
            response,
        },
    }))
}

/// GET /api/v1/pages/{page_id}/moveable
pub async fn moveable(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let parent_locked = store.is_locked(page_id, PageProperty::ParentId).await;
    Ok(Json(DataResponse {
        data: Moveable {
            moveable: is_moveable(parent_locked),
        },
    }))
}

/// GET /api/v1/pages/{page_id}/editable/{field}
pub async fn editable(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((page_id, field)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let mut store = state.lock_store();
    let target = resolve_target(&store, &field).await?;
    let field_locked = store.is_locked(page_id, target).await;
    Ok(Json(DataResponse {
        data: Editable {
            editable: is_editable(field_locked),
        },
    }))
}
