//! Request extractors guarding protected routes.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the token and loads the user from the store
//! 3. [`auth::AdminUser`] additionally requires the administrator flag
//!
//! ```ignore
//! use crate::middleware::auth::{AdminUser, AuthUser};
//!
//! async fn get_profile(AuthUser(user): AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! async fn delete_product(AdminUser(admin): AdminUser, Path(id): Path<String>) { /* ... */ }
//! ```

pub mod auth;
