// Shared error envelope for the API
// Every domain error is rendered as the same JSON body; the request's
// URL and method are stamped on by the `error_envelope` middleware.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Internal error details deposited in response extensions by each
/// domain error's `IntoResponse` impl. The envelope middleware reads
/// them back and builds the final body.
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    /// Internal diagnostic text (exception message equivalent)
    pub backend_message: String,
    /// Generic user-facing message for this error kind
    pub message: String,
}

impl ErrorDetails {
    pub fn new(backend_message: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend_message: backend_message.into(),
            message: message.into(),
        }
    }

    /// Build an error response carrying these details, to be completed
    /// by the envelope middleware.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let mut response = status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Structured error body returned to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Internal error text, kept for diagnostics
    pub backend_message: String,
    /// User-facing message
    pub message: String,
    pub url: String,
    pub method: String,
    pub timestamp: DateTime<Utc>,
}

/// Middleware that completes error responses with the request URL,
/// method and a timestamp. Mounted outermost so it sees the errors
/// produced by the authentication filter as well as by handlers.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;

    if let Some(details) = response.extensions_mut().remove::<ErrorDetails>() {
        let status = response.status();
        let body = ErrorBody {
            backend_message: details.backend_message,
            message: details.message,
            url: uri.to_string(),
            method: method.to_string(),
            timestamp: Utc::now(),
        };
        return (status, Json(body)).into_response();
    }

    response
}
