use axum::{Json, extract::State, http::StatusCode};
use catalog_core::{AppError, ErrorResponse};
use catalog_models::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register_user(&*state.store, &state.jwt_config, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login_user(&*state.store, &state.jwt_config, dto).await?;
    Ok(Json(response))
}
