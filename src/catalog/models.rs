// Catalog data models and DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "product_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "category_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    #[schema(example = "Cordless drill")]
    pub name: String,
    #[schema(value_type = f64, example = 129.99)]
    pub price: Decimal,
    pub status: ProductStatus,
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    #[schema(example = "Power tools")]
    pub name: String,
    pub status: CategoryStatus,
}

/// Create/update payload for products
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveProduct {
    #[validate(length(min = 2, message = "Product name must be at least 2 characters long"))]
    pub name: String,
    #[validate(custom = "crate::validation::validate_price")]
    #[schema(value_type = f64, example = 129.99)]
    pub price: Decimal,
    pub category_id: i64,
}

/// Create/update payload for categories
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveCategory {
    #[validate(length(min = 2, message = "Category name must be at least 2 characters long"))]
    pub name: String,
}
