//! # Catalog Core
//!
//! Core types, errors, and utilities for the Catalog API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Fixed-size page windows and page count math
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Lenient deserializers for query strings and form-style JSON
//!
//! # Example
//!
//! ```ignore
//! use catalog_core::errors::AppError;
//! use catalog_core::pagination::PageWindow;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Product not found"));
//! let window = PageWindow::new(Some(3), 10);
//! assert_eq!(window.offset, 20);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::{AppError, ErrorResponse};
pub use pagination::{PAGE_SIZE, PageWindow, total_pages};
pub use password::{hash_password, verify_password};
