//! # Catalog Auth
//!
//! Bearer tokens for the Catalog API. A token identifies a user by id and
//! carries nothing else; admin status is always read from the store.
//!
//! # Example
//!
//! ```ignore
//! use catalog_auth::{create_access_token, verify_token};
//! use catalog_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
