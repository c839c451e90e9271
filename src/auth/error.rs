// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::models::Role;
use crate::error::ErrorDetails;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed token, bad signature, or otherwise unverifiable
    #[error("invalid token")]
    InvalidToken,
    /// Structurally valid token past its expiry
    #[error("token has expired")]
    ExpiredToken,
    /// Bad credentials at login; deliberately does not distinguish
    /// unknown username from wrong password
    #[error("invalid username or password")]
    InvalidCredentials,
    /// A verified token's subject no longer resolves to an active
    /// account; treated as an authentication failure
    #[error("token subject no longer resolves: {0}")]
    UnresolvedIdentity(String),
    /// A protected operation was reached without a bound identity
    #[error("no authenticated identity bound to the request")]
    MissingIdentity,
    /// The bound identity lacks every role the operation requires
    #[error("access requires one of the roles {required:?}")]
    Forbidden { required: &'static [Role] },
    /// The authenticated username failed an explicit profile lookup
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("token generation failed: {0}")]
    TokenGeneration(String),
    #[error("password hashing failed")]
    PasswordHash,
    #[error("database error: {0}")]
    Database(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::InvalidCredentials
            | AuthError::UnresolvedIdentity(_)
            | AuthError::MissingIdentity => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AuthError::TokenGeneration(_) | AuthError::PasswordHash | AuthError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Generic client-facing message, distinct from the internal text
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidToken | AuthError::ExpiredToken => "Invalid or expired token",
            AuthError::InvalidCredentials => "Invalid username or password",
            AuthError::UnresolvedIdentity(_) | AuthError::MissingIdentity => {
                "Authentication required"
            }
            AuthError::Forbidden { .. } => "Access denied",
            AuthError::UserNotFound(_) => "User not found",
            AuthError::TokenGeneration(_) | AuthError::PasswordHash | AuthError::Database(_) => {
                "Internal server error"
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InvalidToken | AuthError::ExpiredToken => {
                warn!("Rejected token: {}", self);
            }
            AuthError::InvalidCredentials => {
                warn!("Failed login attempt");
            }
            AuthError::UnresolvedIdentity(username) => {
                warn!("Token subject {} no longer resolves to an active user", username);
            }
            AuthError::MissingIdentity | AuthError::Forbidden { .. } => {
                warn!("Authorization failure: {}", self);
            }
            AuthError::UserNotFound(_) => {
                tracing::debug!("{}", self);
            }
            AuthError::TokenGeneration(_) | AuthError::PasswordHash | AuthError::Database(_) => {
                error!("Internal auth error: {}", self);
            }
        }

        ErrorDetails::new(self.to_string(), self.user_message())
            .into_response_with(self.status_code())
    }
}
