//! # Catalog CLI
//!
//! Administrative and seeding utilities behind the `catalog-cli` binary.
//!
//! ```ignore
//! use catalog_cli::seeder::{seed_products, SeedConfig};
//!
//! seed_products(&pool, SeedConfig::new(200)).await?;
//! ```

pub mod seeder;
