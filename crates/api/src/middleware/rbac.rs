//! Authorization extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests that fail its rule
//! with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pagelock_core::error::CoreError;
use pagelock_core::permissions::can_lock;
use pagelock_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires permission to lock and unlock fields: membership in the
/// configured allow-list when it is set, the `page-lock` permission otherwise.
pub struct RequireLockPermission(pub AuthUser);

impl FromRequestParts<AppState> for RequireLockPermission {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_lock(&state.config.locks, &user.actor()) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Not allowed to change page locks".into(),
            )));
        }
        Ok(RequireLockPermission(user))
    }
}
