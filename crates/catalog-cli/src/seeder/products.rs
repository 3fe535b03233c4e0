use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Sentence;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;

use catalog_models::ProductId;

use super::SeedResult;
use super::models::{ProductSeed, SeedConfig};

const BATCH_SIZE: usize = 500;

/// Generates product rows in parallel with Rayon.
pub fn generate_products(config: &SeedConfig) -> Vec<ProductSeed> {
    let categories = &config.categories;

    (0..config.products)
        .into_par_iter()
        .map(|i| {
            let price: f64 = (1.0..500.0).fake();
            let category = categories
                .get(i % categories.len().max(1))
                .cloned()
                .unwrap_or_else(|| "General".to_string());

            ProductSeed {
                name: CatchPhrase().fake(),
                price: (price * 100.0).round() / 100.0,
                description: Sentence(6..14).fake(),
                category,
                stock: (0..250).fake(),
            }
        })
        .collect()
}

/// Generates and inserts `config.products` products.
pub async fn seed_products(db: &PgPool, config: SeedConfig) -> SeedResult<usize> {
    let start_time = Instant::now();
    println!("📦 Seeding {} products...", config.products);

    let products = generate_products(&config);
    let inserted = insert_products_batch(db, &products).await?;

    println!(
        "   ✓ Inserted {} products in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts products with multi-row `INSERT`s inside one transaction.
pub async fn insert_products_batch(db: &PgPool, products: &[ProductSeed]) -> SeedResult<usize> {
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in products.chunks(BATCH_SIZE) {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO products (id, name, price, description, category, stock) ",
        );
        builder.push_values(chunk, |mut row, product| {
            row.push_bind(ProductId::new())
                .push_bind(&product.name)
                .push_bind(product.price)
                .push_bind(&product.description)
                .push_bind(&product.category)
                .push_bind(product.stock);
        });

        inserted += builder.build().execute(&mut *tx).await?.rows_affected() as usize;
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Deletes every product.
pub async fn clear_products(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing products...");

    let deleted = sqlx::query("DELETE FROM products")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} products in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
