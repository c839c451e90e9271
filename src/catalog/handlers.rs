// HTTP handlers for the catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::catalog::error::CatalogError;
use crate::catalog::models::{Category, Product, SaveCategory, SaveProduct};
use crate::query::{Page, PageParams};
use crate::AppState;

// --- products ---

/// GET /products
pub async fn product_page_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Product>>, CatalogError> {
    let page = state.catalog.product_page(params).await?;
    Ok(Json(page))
}

/// GET /products/{id}
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, CatalogError> {
    let product = state.catalog.product(id).await?;
    Ok(Json(product))
}

/// POST /products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(save): Json<SaveProduct>,
) -> Result<(StatusCode, Json<Product>), CatalogError> {
    let product = state.catalog.create_product(&save).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(save): Json<SaveProduct>,
) -> Result<Json<Product>, CatalogError> {
    let product = state.catalog.update_product(id, &save).await?;
    Ok(Json(product))
}

/// PUT /products/{id}/disabled
pub async fn disable_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, CatalogError> {
    let product = state.catalog.disable_product(id).await?;
    Ok(Json(product))
}

// --- categories ---

/// GET /categories
pub async fn category_page_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Category>>, CatalogError> {
    let page = state.catalog.category_page(params).await?;
    Ok(Json(page))
}

/// GET /categories/{id}
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, CatalogError> {
    let category = state.catalog.category(id).await?;
    Ok(Json(category))
}

/// POST /categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(save): Json<SaveCategory>,
) -> Result<(StatusCode, Json<Category>), CatalogError> {
    let category = state.catalog.create_category(&save).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/{id}
pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(save): Json<SaveCategory>,
) -> Result<Json<Category>, CatalogError> {
    let category = state.catalog.update_category(id, &save).await?;
    Ok(Json(category))
}

/// PUT /categories/{id}/disabled
pub async fn disable_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, CatalogError> {
    let category = state.catalog.disable_category(id).await?;
    Ok(Json(category))
}
