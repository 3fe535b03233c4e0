use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use catalog_core::ErrorResponse;
use catalog_models::{
    AuthResponse, CreateProductDto, LoginRequest, MessageResponse, Product, ProductPage,
    RegisterRequest, SetAdminRequest, SortField, SortOrder, UpdateProductDto,
    UpdateProfileRequest, UserProfile,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::search_products,
        crate::modules::products::controller::get_categories,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::set_admin,
    ),
    components(
        schemas(
            Product,
            ProductPage,
            CreateProductDto,
            UpdateProductDto,
            SortField,
            SortOrder,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserProfile,
            UpdateProfileRequest,
            SetAdminRequest,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Products", description = "Catalog browsing and administration"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profile management")
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog REST API built with Rust, Axum and PostgreSQL, with JWT bearer authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
