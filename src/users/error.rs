// User domain error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::error::ErrorDetails;
use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("passwords don't match")]
    InvalidPassword,
    #[error("invalid role assignment: {0}")]
    InvalidRoleAssignment(String),
    #[error("validation failure: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("password hashing failed")]
    PasswordHash,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::UserNotFound => StatusCode::NOT_FOUND,
            UserError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            UserError::InvalidPassword
            | UserError::InvalidRoleAssignment(_)
            | UserError::Validation(_)
            | UserError::Query(_) => StatusCode::BAD_REQUEST,
            UserError::PasswordHash | UserError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic client-facing message, distinct from the internal text
    pub fn user_message(&self) -> &'static str {
        match self {
            UserError::UserNotFound => "User not found",
            UserError::UserAlreadyExists(_) => "User already exists",
            UserError::InvalidPassword => "Passwords don't match",
            UserError::InvalidRoleAssignment(_) => "Invalid role assignment",
            UserError::Validation(_) => "Invalid request payload",
            UserError::Query(_) => "Unsupported search or sort column",
            UserError::PasswordHash | UserError::Database(_) => "Internal server error",
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match &self {
            UserError::UserNotFound | UserError::Validation(_) | UserError::Query(_) => {
                debug!("{}", self);
            }
            UserError::UserAlreadyExists(_)
            | UserError::InvalidPassword
            | UserError::InvalidRoleAssignment(_) => {
                warn!("{}", self);
            }
            UserError::PasswordHash | UserError::Database(_) => {
                error!("Internal user-service error: {}", self);
            }
        }

        ErrorDetails::new(self.to_string(), self.user_message())
            .into_response_with(self.status_code())
    }
}
