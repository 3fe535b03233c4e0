//! Database seeding and bootstrap.
//!
//! - [`admins`]: Create or promote an administrator account
//! - [`products`]: Generate fake products in parallel and batch-insert them

pub mod admins;
pub mod models;
pub mod products;

pub use admins::{AdminOutcome, create_or_promote_admin};
pub use models::{ProductSeed, SeedConfig};
pub use products::{clear_products, generate_products, seed_products};

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;
