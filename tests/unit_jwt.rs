use axum::http::StatusCode;
use catalog::catalog_auth::{create_access_token, verify_token};
use catalog::catalog_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let token = create_access_token(Uuid::new_v4(), &get_test_jwt_config()).unwrap();

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_token_returns_subject() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let token = create_access_token(user_id, &jwt_config).unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_token_expiry_follows_config() {
    let jwt_config = JwtConfig {
        token_expiry: 30 * 24 * 60 * 60,
        ..get_test_jwt_config()
    };
    let token = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.exp - claims.iat, 2_592_000);
}

#[test]
fn test_verify_token_wrong_secret() {
    let token = create_access_token(Uuid::new_v4(), &get_test_jwt_config()).unwrap();
    let other = JwtConfig {
        secret: "a_different_secret".to_string(),
        ..get_test_jwt_config()
    };

    let err = verify_token(&token, &other).unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.public_message(), "Not authorized, token failed");
}

#[test]
fn test_verify_token_tampered() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(Uuid::new_v4(), &jwt_config).unwrap();
    let tampered = format!("{}x", token);

    assert!(verify_token(&tampered, &jwt_config).is_err());
    assert!(verify_token("", &jwt_config).is_err());
    assert!(verify_token("not.a.token", &jwt_config).is_err());
}
