//! # Catalog Config
//!
//! Configuration types for the Catalog API, loaded from environment variables:
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`cors`]: Allowed browser origins
//! - [`database`]: Connection string and pool sizing
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use catalog_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! println!("listening on {}", server.addr());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, falling back to `default`.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
