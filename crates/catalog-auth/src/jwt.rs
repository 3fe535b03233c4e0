//! HS256 access tokens.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use catalog_config::JwtConfig;
use catalog_core::AppError;

use crate::claims::Claims;

/// Signs a token for `user_id` valid for `jwt_config.token_expiry` seconds.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp().max(0) as usize;
    let exp = now + jwt_config.token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Checks signature and expiry, returning the claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Not authorized, token failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 3600,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token(Uuid::new_v4(), &config()).unwrap();
        let other = JwtConfig {
            secret: "a-completely-different-secret-value!!".to_string(),
            token_expiry: 3600,
        };

        let err = verify_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), "Not authorized, token failed");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(verify_token("not.a.token", &config()).is_err());
        assert!(verify_token("", &config()).is_err());
    }
}
