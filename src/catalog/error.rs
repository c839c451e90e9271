// Catalog domain error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::error::ErrorDetails;
use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    ProductNotFound(i64),
    #[error("category not found: {0}")]
    CategoryNotFound(i64),
    #[error("validation failure: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CatalogError::Validation(_) | CatalogError::Query(_) => StatusCode::BAD_REQUEST,
            CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::ProductNotFound(_) => "Product not found",
            CatalogError::CategoryNotFound(_) => "Category not found",
            CatalogError::Validation(_) => "Invalid request payload",
            CatalogError::Query(_) => "Unsupported search or sort column",
            CatalogError::Database(_) => "Internal server error",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match &self {
            CatalogError::Database(_) => error!("Internal catalog error: {}", self),
            _ => debug!("{}", self),
        }

        ErrorDetails::new(self.to_string(), self.user_message())
            .into_response_with(self.status_code())
    }
}
