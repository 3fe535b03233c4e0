use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use catalog_auth::verify_token;
use catalog_core::AppError;
use catalog_models::{User, UserId};
use tracing::{debug, warn};

use crate::state::AppState;

/// The caller, resolved from a valid bearer token to a stored user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Not authorized, no token".to_string()))?;

        let claims = verify_token(bearer.token(), &state.jwt_config).inspect_err(|_| {
            debug!("Rejected bearer token");
        })?;

        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Not authorized, user not found".to_string()))?;

        let user = state.store.find_user(user_id).await?.ok_or_else(|| {
            warn!(user.id = %user_id, "Token subject no longer exists");
            AppError::unauthorized("Not authorized, user not found".to_string())
        })?;

        Ok(AuthUser(user))
    }
}

/// An [`AuthUser`] whose administrator flag is set.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl AdminUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            warn!(user.id = %user.id, "Admin route refused");
            return Err(AppError::forbidden("Not authorized as an admin".to_string()));
        }

        Ok(AdminUser(user))
    }
}
