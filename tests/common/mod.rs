#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use catalog::catalog_auth::create_access_token;
use catalog::catalog_config::{CorsConfig, JwtConfig};
use catalog::catalog_core::hash_password;
use catalog::catalog_models::{NewProduct, NewUser, Product, User};
use catalog::router::init_router;
use catalog::state::AppState;
use catalog::store::{MemoryStore, ProductStore, UserStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub jwt_config: JwtConfig,
}

pub struct TestUser {
    pub user: User,
    pub password: String,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        token_expiry: 3600,
    }
}

pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let jwt_config = test_jwt_config();
    let state = AppState::new(
        store.clone(),
        jwt_config.clone(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

impl TestApp {
    /// Sends a request and returns the status and body. Non-JSON bodies come
    /// back as a JSON string.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(build_request("GET", uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(build_request("POST", uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(build_request("PUT", uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(build_request("DELETE", uri, token, None)).await
    }

    pub async fn create_user(&self, name: &str, password: &str, is_admin: bool) -> TestUser {
        let user = self
            .store
            .insert_user(NewUser {
                name: name.to_string(),
                email: generate_unique_email(),
                password_hash: hash_password(password).unwrap(),
                is_admin,
            })
            .await
            .unwrap();
        let token = create_access_token(user.id.into_inner(), &self.jwt_config).unwrap();

        TestUser {
            user,
            password: password.to_string(),
            token,
        }
    }

    pub async fn create_admin(&self) -> TestUser {
        self.create_user("Admin", "adminpass", true).await
    }

    pub async fn create_product(
        &self,
        name: &str,
        price: f64,
        category: &str,
        description: Option<&str>,
    ) -> Product {
        self.store
            .insert_product(NewProduct {
                name: name.to_string(),
                price,
                description: description.map(str::to_string),
                category: category.to_string(),
                stock: 5,
            })
            .await
            .unwrap()
    }
}

pub fn build_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
