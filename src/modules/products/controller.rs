use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use catalog_core::{AppError, ErrorResponse};
use catalog_models::{
    CreateProductDto, MessageResponse, Product, ProductListParams, ProductPage, SearchParams,
    UpdateProductDto,
};
use tracing::instrument;

use crate::middleware::auth::AdminUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ProductService;

fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::bad_request(anyhow!("Invalid query parameters: {}", rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state, params))]
pub async fn get_products(
    State(state): State<AppState>,
    params: Result<Query<ProductListParams>, QueryRejection>,
) -> Result<Json<ProductPage>, AppError> {
    let Query(params) = params.map_err(invalid_query)?;
    let page = ProductService::list_products(&*state.store, params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Every product whose name or description matches", body = Vec<Product>),
        (status = 400, description = "Missing keyword", body = ErrorResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state, params))]
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Query(params) = params.map_err(invalid_query)?;
    let products =
        ProductService::search_products(&*state.store, params.keyword.as_deref()).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/categories",
    responses(
        (status = 200, description = "Distinct categories, sorted", body = Vec<String>)
    ),
    tag = "Products"
)]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let categories = ProductService::list_categories(&*state.store).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 400, description = "Malformed product id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::get_product(&*state.store, &id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.id()))]
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductService::create_product(&*state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error or malformed id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(admin.id = %admin.id()))]
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::update_product(&*state.store, &id, dto).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product removed", body = MessageResponse),
        (status = 400, description = "Malformed product id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(admin.id = %admin.id()))]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = ProductService::delete_product(&*state.store, &id).await?;
    Ok(Json(message))
}
