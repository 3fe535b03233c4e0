use anyhow::anyhow;
use async_trait::async_trait;
use catalog_core::{AppError, PageWindow};
use catalog_models::{
    NewProduct, NewUser, Product, ProductFilter, ProductId, ProductSort, ProfileChanges,
    UpdateProductDto, User, UserId,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use super::{DUPLICATE_EMAIL, ProductStore, Store, UserStore};

/// Escapes `LIKE` metacharacters so `keyword` matches literally.
pub(crate) fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}

fn map_user_write_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::bad_request(anyhow!(DUPLICATE_EMAIL))
        }
        _ => AppError::internal(err),
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE TRUE");
    if let Some(keyword) = &filter.keyword {
        builder.push(r" AND name ILIKE ");
        builder.push_bind(contains_pattern(keyword));
        builder.push(r" ESCAPE '\'");
    }
    if let Some(category) = &filter.category {
        builder.push(" AND category = ");
        builder.push_bind(category.clone());
    }
}

/// PostgreSQL-backed store.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgStore {
    #[instrument(skip(self, product), fields(product.name = %product.name))]
    async fn insert_product(&self, product: NewProduct) -> Result<Product, AppError> {
        let created = sqlx::query_as::<_, Product>(
            r#"INSERT INTO products (id, name, price, description, category, stock)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, name, price, description, category, stock, created_at, updated_at"#,
        )
        .bind(ProductId::new())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filter(&mut builder, filter);

        let count = builder.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(count)
    }

    #[instrument(skip(self, filter))]
    async fn find_products(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        window: PageWindow,
    ) -> Result<Vec<Product>, AppError> {
        let mut builder = QueryBuilder::new(
            "SELECT id, name, price, description, category, stock, created_at, updated_at FROM products",
        );
        push_filter(&mut builder, filter);

        // Column and direction come from closed enums, never from user text.
        builder.push(format!(
            " ORDER BY {} {}, id {}",
            sort.field.column(),
            sort.order.keyword(),
            sort.order.keyword()
        ));
        builder.push(" LIMIT ");
        builder.push_bind(window.limit);
        builder.push(" OFFSET ");
        builder.push_bind(window.offset);

        debug!(sql = builder.sql(), "Listing products");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"SELECT id, name, price, description, category, stock, created_at, updated_at
               FROM products
               WHERE name ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\'
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(contains_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"SELECT id, name, price, description, category, stock, created_at, updated_at
               FROM products WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self, changes), fields(product.id = %id))]
    async fn update_product(
        &self,
        id: ProductId,
        changes: &UpdateProductDto,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"UPDATE products SET
                   name = COALESCE($2, name),
                   price = COALESCE($3, price),
                   description = COALESCE($4, description),
                   category = COALESCE($5, category),
                   stock = COALESCE($6, stock),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, price, description, category, stock, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price)
        .bind(&changes.description)
        .bind(&changes.category)
        .bind(changes.stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn categories(&self) -> Result<Vec<String>, AppError> {
        let categories =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM products ORDER BY category")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password_hash, is_admin, created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password_hash, is_admin, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, user), fields(user.email = %user.email))]
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, name, email, password_hash, is_admin)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, email, password_hash, is_admin, created_at, updated_at"#,
        )
        .bind(UserId::new())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_write_error)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users SET
                   name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   password_hash = COALESCE($4, password_hash),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, email, password_hash, is_admin, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_write_error)
    }

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users SET is_admin = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, email, password_hash, is_admin, created_at, updated_at"#,
        )
        .bind(id)
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        catalog_db::close_db_pool(&self.pool).await;
    }
}
