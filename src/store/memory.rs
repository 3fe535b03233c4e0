//! In-process store for tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use catalog_core::{AppError, PageWindow};
use catalog_models::{
    NewProduct, NewUser, Product, ProductFilter, ProductId, ProductSort, ProfileChanges,
    SortField, SortOrder, UpdateProductDto, User, UserId,
};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{DUPLICATE_EMAIL, ProductStore, Store, UserStore};

#[derive(Default)]
struct Inner {
    products: HashMap<ProductId, Product>,
    users: HashMap<UserId, User>,
    last_tick: Option<DateTime<Utc>>,
}

impl Inner {
    /// Strictly increasing timestamps so insertion order is observable.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(next);
        next
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

fn compare(a: &Product, b: &Product, sort: ProductSort) -> Ordering {
    let by_field = match sort.field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Stock => a.stock.cmp(&b.stock),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    let ordering = by_field.then_with(|| a.id.cmp(&b.id));
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// A [`Store`] kept in memory behind a [`RwLock`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut inner = self.inner.write().await;
        let now = inner.tick();
        let created = Product {
            id: ProductId::new(),
            name: product.name,
            price: product.price,
            description: product.description,
            category: product.category,
            stock: product.stock,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        let count = inner.products.values().filter(|p| filter.matches(p)).count();
        Ok(count as i64)
    }

    async fn find_products(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        window: PageWindow,
    ) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<Product> = inner
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| compare(a, b, sort));

        Ok(matching
            .into_iter()
            .skip(window.offset.max(0) as usize)
            .take(window.limit.max(0) as usize)
            .collect())
    }

    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, AppError> {
        let needle = keyword.to_lowercase();
        let inner = self.inner.read().await;
        let mut found: Vec<Product> = inner
            .products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| compare(a, b, ProductSort::default()));
        Ok(found)
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, AppError> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn update_product(
        &self,
        id: ProductId,
        changes: &UpdateProductDto,
    ) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.write().await;
        let now = inner.tick();
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            product.name = name.clone();
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(description) = &changes.description {
            product.description = Some(description.clone());
        }
        if let Some(category) = &changes.category {
            product.category = category.clone();
        }
        if let Some(stock) = changes.stock {
            product.stock = stock;
        }
        product.updated_at = now;

        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, AppError> {
        Ok(self.inner.write().await.products.remove(&id).is_some())
    }

    async fn categories(&self) -> Result<Vec<String>, AppError> {
        let inner = self.inner.read().await;
        let mut categories: Vec<String> =
            inner.products.values().map(|p| p.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, None) {
            return Err(AppError::bad_request(anyhow!(DUPLICATE_EMAIL)));
        }

        let now = inner.tick();
        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write().await;
        if let Some(email) = &changes.email
            && inner.email_taken(email, Some(id))
        {
            return Err(AppError::bad_request(anyhow!(DUPLICATE_EMAIL)));
        }

        let now = inner.tick();
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password_hash = password_hash.clone();
        }
        user.updated_at = now;

        Ok(Some(user.clone()))
    }

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write().await;
        let now = inner.tick();
        Ok(inner.users.get_mut(&id).map(|user| {
            user.is_admin = is_admin;
            user.updated_at = now;
            user.clone()
        }))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}
