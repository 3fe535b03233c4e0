use anyhow::anyhow;
use catalog_core::{AppError, PAGE_SIZE, PageWindow, total_pages};
use catalog_models::{
    CreateProductDto, MessageResponse, NewProduct, Product, ProductId, ProductListParams,
    ProductPage, UpdateProductDto,
};
use tracing::{debug, info, instrument, warn};

use crate::metrics;
use crate::store::ProductStore;

fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(anyhow!("Invalid product id")))
}

fn product_not_found() -> AppError {
    AppError::not_found(anyhow!("Product not found"))
}

pub struct ProductService;

impl ProductService {
    #[instrument(skip(store, params), fields(page = ?params.page_number))]
    pub async fn list_products<S: ProductStore + ?Sized>(
        store: &S,
        params: ProductListParams,
    ) -> Result<ProductPage, AppError> {
        let filter = params.filter();
        let sort = params.sort();
        let window = PageWindow::new(params.page_number, PAGE_SIZE);

        debug!(
            filter.keyword = ?filter.keyword,
            filter.category = ?filter.category,
            sort = %sort,
            offset = window.offset,
            "Listing products"
        );

        let total_count = store.count_products(&filter).await?;
        let items = store.find_products(&filter, sort, window).await?;

        debug!(total = total_count, returned = items.len(), "Products listed");

        Ok(ProductPage {
            items,
            page: window.page,
            total_pages: total_pages(total_count, PAGE_SIZE),
            total_count,
        })
    }

    #[instrument(skip(store))]
    pub async fn search_products<S: ProductStore + ?Sized>(
        store: &S,
        keyword: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let keyword = keyword.map(str::trim).unwrap_or_default();
        if keyword.is_empty() {
            return Err(AppError::bad_request(anyhow!("Search keyword is required")));
        }

        let products = store.search_products(keyword).await?;
        debug!(matches = products.len(), "Search finished");
        Ok(products)
    }

    pub async fn list_categories<S: ProductStore + ?Sized>(
        store: &S,
    ) -> Result<Vec<String>, AppError> {
        store.categories().await
    }

    #[instrument(skip(store))]
    pub async fn get_product<S: ProductStore + ?Sized>(
        store: &S,
        id: &str,
    ) -> Result<Product, AppError> {
        let id = parse_product_id(id)?;
        store.find_product(id).await?.ok_or_else(product_not_found)
    }

    #[instrument(skip(store, dto), fields(product.name = %dto.name))]
    pub async fn create_product<S: ProductStore + ?Sized>(
        store: &S,
        dto: CreateProductDto,
    ) -> Result<Product, AppError> {
        let product = store.insert_product(NewProduct::from(dto)).await?;

        metrics::track_product_created();
        info!(product.id = %product.id, product.name = %product.name, "Product created");

        Ok(product)
    }

    /// Merges the supplied fields into the stored product.
    ///
    /// An empty update returns the product as stored, without a write.
    #[instrument(skip(store, dto))]
    pub async fn update_product<S: ProductStore + ?Sized>(
        store: &S,
        id: &str,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        let id = parse_product_id(id)?;

        if dto.is_empty() {
            debug!(product.id = %id, "Empty update, returning stored product");
            return store.find_product(id).await?.ok_or_else(product_not_found);
        }

        let product = store
            .update_product(id, &dto.trimmed())
            .await?
            .ok_or_else(|| {
                warn!(product.id = %id, "Update of missing product");
                product_not_found()
            })?;

        info!(product.id = %product.id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(store))]
    pub async fn delete_product<S: ProductStore + ?Sized>(
        store: &S,
        id: &str,
    ) -> Result<MessageResponse, AppError> {
        let id = parse_product_id(id)?;

        if !store.delete_product(id).await? {
            warn!(product.id = %id, "Delete of missing product");
            return Err(product_not_found());
        }

        info!(product.id = %id, "Product removed");
        Ok(MessageResponse::new("Product removed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::http::StatusCode;
    use catalog_models::{SortField, SortOrder};

    fn create_dto(name: &str, price: f64, category: &str) -> CreateProductDto {
        CreateProductDto {
            name: name.to_string(),
            price,
            description: None,
            category: category.to_string(),
            stock: None,
        }
    }

    async fn seeded(count: usize) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 0..count {
            let category = if i % 2 == 0 { "Even" } else { "Odd" };
            ProductService::create_product(&store, create_dto(&format!("Item {i}"), i as f64, category))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_list_pages_and_counts() {
        let store = seeded(23).await;

        let page = ProductService::list_products(&store, ProductListParams::default())
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_count, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].name, "Item 22");

        let last = ProductService::list_products(
            &store,
            ProductListParams {
                page_number: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(last.items.len(), 3);
    }

    #[tokio::test]
    async fn test_list_out_of_range_page_is_empty() {
        let store = seeded(5).await;
        let page = ProductService::list_products(
            &store,
            ProductListParams {
                page_number: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 4);
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let store = seeded(6).await;
        let page = ProductService::list_products(
            &store,
            ProductListParams {
                category: Some("Odd".to_string()),
                sort_by: Some(SortField::Price),
                sort_order: Some(SortOrder::Desc),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let prices: Vec<f64> = page.items.iter().map(|p| p.price).collect();
        assert_eq!(prices, [5.0, 3.0, 1.0]);
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_search_requires_keyword() {
        let store = MemoryStore::new();
        for keyword in [None, Some(""), Some("   ")] {
            let err = ProductService::search_products(&store, keyword)
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.public_message(), "Search keyword is required");
        }
    }

    #[tokio::test]
    async fn test_search_matches_description() {
        let store = MemoryStore::new();
        let mut dto = create_dto("Chair", 20.0, "Home");
        dto.description = Some("Solid OAK frame".to_string());
        ProductService::create_product(&store, dto).await.unwrap();
        ProductService::create_product(&store, create_dto("Table", 50.0, "Home"))
            .await
            .unwrap();

        let found = ProductService::search_products(&store, Some("oak"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Chair");
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let store = MemoryStore::new();
        let err = ProductService::get_product(&store, "abc").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let missing = ProductId::new().to_string();
        let err = ProductService::get_product(&store, &missing)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let created = ProductService::create_product(&store, create_dto("Lamp", 10.0, "Home"))
            .await
            .unwrap();

        let updated = ProductService::update_product(
            &store,
            &created.id.to_string(),
            UpdateProductDto {
                price: Some(0.0),
                stock: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Lamp");
        assert_eq!(updated.price, 0.0);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_empty_update_is_a_no_op() {
        let store = MemoryStore::new();
        let created = ProductService::create_product(&store, create_dto("Lamp", 10.0, "Home"))
            .await
            .unwrap();

        let same = ProductService::update_product(
            &store,
            &created.id.to_string(),
            UpdateProductDto::default(),
        )
        .await
        .unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn test_delete_then_fetch() {
        let store = MemoryStore::new();
        let created = ProductService::create_product(&store, create_dto("Lamp", 10.0, "Home"))
            .await
            .unwrap();
        let id = created.id.to_string();

        let message = ProductService::delete_product(&store, &id).await.unwrap();
        assert_eq!(message.message, "Product removed");

        let err = ProductService::delete_product(&store, &id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let err = ProductService::get_product(&store, &id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
