use anyhow::anyhow;
use catalog_auth::create_access_token;
use catalog_config::JwtConfig;
use catalog_core::{AppError, hash_password, verify_password};
use catalog_models::{AuthResponse, LoginRequest, NewUser, RegisterRequest};
use tracing::{info, instrument, warn};

use crate::metrics;
use crate::store::{DUPLICATE_EMAIL, UserStore};

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password".to_string())
}

pub struct AuthService;

impl AuthService {
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(store, jwt_config, dto), fields(user.email = %dto.email))]
    pub async fn login_user<S: UserStore + ?Sized>(
        store: &S,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let Some(user) = store.find_user_by_email(&dto.email).await? else {
            warn!("Login attempt for unknown email");
            metrics::track_user_login_failure("unknown_email");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user.id = %user.id, "Login attempt with wrong password");
            metrics::track_user_login_failure("wrong_password");
            return Err(invalid_credentials());
        }

        let token = create_access_token(user.id.into_inner(), jwt_config)?;

        metrics::track_user_login_success();
        info!(user.id = %user.id, "User logged in");

        Ok(AuthResponse::new(&user, token))
    }

    #[instrument(skip(store, jwt_config, dto), fields(user.email = %dto.email))]
    pub async fn register_user<S: UserStore + ?Sized>(
        store: &S,
        jwt_config: &JwtConfig,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        if store.find_user_by_email(&dto.email).await?.is_some() {
            warn!("Registration with an email already in use");
            return Err(AppError::bad_request(anyhow!(DUPLICATE_EMAIL)));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = store
            .insert_user(NewUser {
                name: dto.name.trim().to_string(),
                email: dto.email,
                password_hash,
                is_admin: false,
            })
            .await?;

        let token = create_access_token(user.id.into_inner(), jwt_config)?;

        metrics::track_user_registered();
        info!(user.id = %user.id, "User registered");

        Ok(AuthResponse::new(&user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::http::StatusCode;
    use catalog_auth::verify_token;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 3600,
        }
    }

    fn register_dto(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let config = jwt_config();

        let registered = AuthService::register_user(&store, &config, register_dto("jane@example.com"))
            .await
            .unwrap();
        assert!(!registered.is_admin);
        let claims = verify_token(&registered.token, &config).unwrap();
        assert_eq!(claims.sub, registered.id.to_string());

        let logged_in = AuthService::login_user(
            &store,
            &config,
            LoginRequest {
                email: "jane@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let store = MemoryStore::new();
        let config = jwt_config();
        AuthService::register_user(&store, &config, register_dto("jane@example.com"))
            .await
            .unwrap();

        let err = AuthService::register_user(&store, &config, register_dto("jane@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "User already exists");
    }

    #[tokio::test]
    async fn test_login_failures_share_a_message() {
        let store = MemoryStore::new();
        let config = jwt_config();
        AuthService::register_user(&store, &config, register_dto("jane@example.com"))
            .await
            .unwrap();

        let wrong_password = AuthService::login_user(
            &store,
            &config,
            LoginRequest {
                email: "jane@example.com".to_string(),
                password: "not-it".to_string(),
            },
        )
        .await
        .unwrap_err();
        let unknown_email = AuthService::login_user(
            &store,
            &config,
            LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.public_message(), unknown_email.public_message());
    }
}
