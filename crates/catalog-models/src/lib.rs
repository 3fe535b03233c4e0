//! # Catalog Models
//!
//! Entities and request/response DTOs shared by the API server, the store
//! implementations and the CLI.
//!
//! - [`ids`]: Typed UUID identifiers
//! - [`products`]: Products, listing parameters and pages
//! - [`users`]: Users, credentials and profile changes
//!
//! All JSON shapes are camelCase.

pub mod ids;
pub mod products;
pub mod users;
mod validation;

pub use ids::{ProductId, UserId};

pub use products::{
    CreateProductDto, MessageResponse, NewProduct, Product, ProductFilter, ProductListParams,
    ProductPage, ProductSort, SearchParams, SortField, SortOrder, UpdateProductDto,
};

pub use users::{
    AuthResponse, LoginRequest, NewUser, ProfileChanges, RegisterRequest, SetAdminRequest,
    UpdateProfileRequest, User, UserProfile, normalize_email,
};
