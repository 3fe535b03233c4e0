use axum::{
    Json,
    extract::{Path, State},
};
use catalog_core::{AppError, ErrorResponse};
use catalog_models::{AuthResponse, SetAdminRequest, UpdateProfileRequest, UserProfile};
use tracing::instrument;

use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserService::get_profile(&*state.store, auth_user.id()).await?;
    Ok(Json(profile))
}

/// Update the current user's name, email or password
#[utoipa::path(
    post,
    path = "/api/users/profile/edit",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated, with a fresh token", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Attempt to change own administrator status", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response =
        UserService::update_profile(&*state.store, &state.jwt_config, &auth_user.0, dto).await?;
    Ok(Json(response))
}

/// Grant or revoke another user's administrator status
#[utoipa::path(
    put,
    path = "/api/users/{id}/admin",
    params(("id" = String, Path, description = "User ID")),
    request_body = SetAdminRequest,
    responses(
        (status = 200, description = "Updated user", body = UserProfile),
        (status = 400, description = "Malformed user id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an administrator, or targeting self", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, body), fields(admin.id = %admin.id()))]
pub async fn set_admin(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<SetAdminRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserService::set_admin(&*state.store, &admin.0, &id, body.is_admin).await?;
    Ok(Json(profile))
}
