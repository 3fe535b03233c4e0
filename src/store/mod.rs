//! Persistence seam.
//!
//! Services talk to storage only through [`ProductStore`] and [`UserStore`].
//! [`PgStore`] is the production implementation; [`MemoryStore`] backs tests.
//!
//! Stores report failures as [`AppError`]: a duplicate email surfaces as a
//! 400 `"User already exists"`, everything else as a 500.

use async_trait::async_trait;
use catalog_core::{AppError, PageWindow};
use catalog_models::{
    NewProduct, NewUser, Product, ProductFilter, ProductId, ProductSort, ProfileChanges,
    UpdateProductDto, User, UserId,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;

pub(crate) const DUPLICATE_EMAIL: &str = "User already exists";

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a product, assigning its id and timestamps.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, AppError>;

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64, AppError>;

    /// Products matching `filter`, ordered by `sort` then id, restricted to `window`.
    async fn find_products(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        window: PageWindow,
    ) -> Result<Vec<Product>, AppError>;

    /// Products whose name or description contains `keyword`, newest first.
    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, AppError>;

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, AppError>;

    /// Overwrites the fields present in `changes`. `None` when the product is absent.
    async fn update_product(
        &self,
        id: ProductId,
        changes: &UpdateProductDto,
    ) -> Result<Option<Product>, AppError>;

    /// Returns whether a product was removed.
    async fn delete_product(&self, id: ProductId) -> Result<bool, AppError>;

    /// Distinct categories in ascending order.
    async fn categories(&self) -> Result<Vec<String>, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError>;

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<Option<User>, AppError>;
}

/// Everything the API needs from storage, plus lifecycle hooks.
#[async_trait]
pub trait Store: ProductStore + UserStore {
    /// Round-trips to the backend.
    async fn ping(&self) -> Result<(), AppError>;

    /// Releases backend resources. Called once during shutdown.
    async fn close(&self);
}
