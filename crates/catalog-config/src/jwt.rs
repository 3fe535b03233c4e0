use std::env;

use crate::env_or;

/// Default token lifetime: 30 days.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 30 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_expiry: env_or("JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY),
        }
    }
}
