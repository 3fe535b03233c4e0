//! Product entity, payloads and listing parameters.

use std::fmt;
use std::str::FromStr;

use catalog_core::serde::{
    empty_string_as_none, number_from_string, optional_integer_from_string,
    optional_number_from_string,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::ProductId;
use crate::validation::not_blank;

/// A catalog product as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/products`.
///
/// `price` and `stock` accept numbers or numeric strings. `stock` defaults to 0.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(
        custom(function = "not_blank", message = "Product name is required"),
        length(max = 200, message = "Product name must be at most 200 characters")
    )]
    pub name: String,
    #[serde(deserialize_with = "number_from_string")]
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Category is required"),
        length(max = 100, message = "Category must be at most 100 characters")
    )]
    pub category: String,
    #[serde(default, deserialize_with = "optional_integer_from_string")]
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: Option<i32>,
}

/// Body of `PUT /api/products/{id}`. Absent or `null` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Product name cannot be empty"),
        length(max = 200, message = "Product name must be at most 200 characters")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_number_from_string")]
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Category cannot be empty"),
        length(max = 100, message = "Category must be at most 100 characters")
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_integer_from_string")]
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: Option<i32>,
}

impl UpdateProductDto {
    /// True when the update would not change any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.stock.is_none()
    }

    /// Trims the text fields that are matched or displayed verbatim.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.map(|s| s.trim().to_string());
        self.category = self.category.map(|s| s.trim().to_string());
        self
    }
}

/// A validated product about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
    pub stock: i32,
}

impl From<CreateProductDto> for NewProduct {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            price: dto.price,
            description: dto.description,
            category: dto.category.trim().to_string(),
            stock: dto.stock.unwrap_or(0),
        }
    }
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Price,
    Stock,
    CreatedAt,
}

impl SortField {
    /// The database column backing this field.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Stock => "stock",
            SortField::CreatedAt => "created_at",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "stock" => Ok(SortField::Stock),
            "createdAt" => Ok(SortField::CreatedAt),
            other => Err(format!(
                "Invalid sortBy `{}`; expected one of name, price, stock, createdAt",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sortOrder `{}`; expected asc or desc", other)),
        }
    }
}

/// Resolved ordering for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl ProductSort {
    /// Newest first when no field is requested; a requested field without an
    /// order sorts ascending. `order` alone is ignored.
    pub fn from_params(field: Option<SortField>, order: Option<SortOrder>) -> Self {
        match field {
            Some(field) => Self {
                field,
                order: order.unwrap_or(SortOrder::Asc),
            },
            None => Self::default(),
        }
    }
}

impl Default for ProductSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.column(), self.order.keyword())
    }
}

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// 1-indexed page, default 1
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_number: Option<i64>,
    /// Case-insensitive substring of the product name
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub keyword: Option<String>,
    /// Exact category
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort_order: Option<SortOrder>,
}

impl ProductListParams {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(self.keyword.as_deref(), self.category.as_deref())
    }

    pub fn sort(&self) -> ProductSort {
        ProductSort::from_params(self.sort_by, self.sort_order)
    }
}

/// Predicate shared by the listing count and the listing window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Trimmed, never empty
    pub keyword: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new(keyword: Option<&str>, category: Option<&str>) -> Self {
        let non_blank = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            keyword: non_blank(keyword),
            category: non_blank(category),
        }
    }

    /// In-process evaluation of the filter.
    pub fn matches(&self, product: &Product) -> bool {
        let keyword_ok = self.keyword.as_deref().is_none_or(|keyword| {
            product
                .name
                .to_lowercase()
                .contains(&keyword.to_lowercase())
        });
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        keyword_ok && category_ok
    }
}

/// Query string of `GET /api/products/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Matched against name and description, case-insensitively
    pub keyword: Option<String>,
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn product(name: &str, category: &str) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            price: 10.0,
            description: None,
            category: category.to_string(),
            stock: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let value = serde_json::to_value(product("Lamp", "Home")).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_create_dto_accepts_form_strings() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"name": "Lamp", "price": "19.50", "category": "Home", "stock": "3"}"#,
        )
        .unwrap();
        assert_eq!(dto.price, 19.5);
        assert_eq!(dto.stock, Some(3));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rules() {
        let dto: CreateProductDto =
            serde_json::from_str(r#"{"name": "  ", "price": 1, "category": "Home"}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: CreateProductDto =
            serde_json::from_str(r#"{"name": "Lamp", "price": -1, "category": "Home"}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: CreateProductDto = serde_json::from_str(
            r#"{"name": "Lamp", "price": 1, "category": "Home", "stock": -2}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());

        assert!(serde_json::from_str::<CreateProductDto>(r#"{"name": "Lamp", "price": 1}"#).is_err());
    }

    #[test]
    fn test_new_product_defaults_stock_and_trims() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"name": " Lamp ", "price": 5, "category": " Home"}"#,
        )
        .unwrap();
        let new = NewProduct::from(dto);
        assert_eq!(new.name, "Lamp");
        assert_eq!(new.category, "Home");
        assert_eq!(new.stock, 0);
    }

    #[test]
    fn test_update_dto_is_empty() {
        let dto: UpdateProductDto = serde_json::from_str("{}").unwrap();
        assert!(dto.is_empty());

        let dto: UpdateProductDto = serde_json::from_str(r#"{"stock": 0}"#).unwrap();
        assert!(!dto.is_empty());
        assert_eq!(dto.stock, Some(0));
    }

    #[test]
    fn test_sort_defaults() {
        assert_eq!(
            ProductSort::from_params(None, None),
            ProductSort {
                field: SortField::CreatedAt,
                order: SortOrder::Desc
            }
        );
        assert_eq!(
            ProductSort::from_params(Some(SortField::Price), None).order,
            SortOrder::Asc
        );
        assert_eq!(
            ProductSort::from_params(None, Some(SortOrder::Asc)),
            ProductSort::default()
        );
        assert_eq!(ProductSort::default().to_string(), "created_at DESC");
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!("createdAt".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert!("password".parse::<SortField>().is_err());
        assert!("name; DROP TABLE products".parse::<SortField>().is_err());
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_filter_trims_and_drops_blank_values() {
        let filter = ProductFilter::new(Some("  lamp "), Some(""));
        assert_eq!(filter.keyword.as_deref(), Some("lamp"));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_filter_matches() {
        let lamp = product("Desk Lamp", "Home");
        assert!(ProductFilter::new(Some("LAMP"), None).matches(&lamp));
        assert!(ProductFilter::new(None, Some("Home")).matches(&lamp));
        assert!(!ProductFilter::new(None, Some("home")).matches(&lamp));
        assert!(!ProductFilter::new(Some("chair"), Some("Home")).matches(&lamp));
        assert!(ProductFilter::default().matches(&lamp));
    }
}
