use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_product, delete_product, get_categories, get_product, get_products, search_products,
    update_product,
};

pub fn init_products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route("/search", get(search_products))
        .route("/categories", get(get_categories))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
