// Per-request authentication filter and role-based authorization layer

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, models::CurrentUser, models::Role};
use crate::AppState;

/// Authentication filter, run once per inbound request before any
/// authorization check or handler.
///
/// Requests without a `Bearer` credential pass through anonymously;
/// downstream authorization rejects them if the operation requires an
/// identity. A present-but-invalid token terminates the request with
/// 401, as does a verified token whose subject no longer resolves to
/// an active account.
pub async fn authentication_filter(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match header_value.and_then(|value| value.strip_prefix("Bearer ")) {
        Some(token) => token,
        // Anonymous pass-through; no identity is bound
        None => return Ok(next.run(request).await),
    };

    // Verifies signature and expiry as a side effect
    let username = state.auth.tokens().extract_username(token)?;

    let identity = state.auth.resolve_identity(&username).await?;
    debug!("Bound identity {} to the request", identity.username);

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingIdentity)
    }
}

/// Route layer gating an operation on a set of allowed roles.
///
/// The bound identity's roles must intersect the required set (OR
/// semantics). No identity at all is 401; an identity without any of
/// the roles is 403.
#[derive(Debug, Clone)]
pub struct RequireRoles {
    required: &'static [Role],
}

impl RequireRoles {
    pub const fn new(required: &'static [Role]) -> Self {
        Self { required }
    }

    pub async fn middleware(self, request: Request, next: Next) -> Result<Response, AuthError> {
        let endpoint = request.uri().path().to_string();

        let user = request
            .extensions()
            .get::<CurrentUser>()
            .ok_or_else(|| {
                warn!("Unauthenticated request to protected endpoint {}", endpoint);
                AuthError::MissingIdentity
            })?;

        if !user.has_any_role(self.required) {
            warn!(
                "Authorization failed: user={}, roles={:?}, required={:?}, endpoint={}",
                user.username, user.roles, self.required, endpoint
            );
            return Err(AuthError::Forbidden {
                required: self.required,
            });
        }

        debug!(
            "Authorization successful: user={}, endpoint={}",
            user.username, endpoint
        );
        Ok(next.run(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
    use axum_test::TestServer;

    const ADMIN_ONLY: &[Role] = &[Role::Administrator];

    async fn ok_handler() -> impl IntoResponse {
        StatusCode::OK
    }

    /// Test layer standing in for the authentication filter: binds a
    /// fixed identity to every request.
    async fn inject_identity(mut request: Request<Body>, next: Next) -> Response {
        request.extensions_mut().insert(CurrentUser {
            id: 7,
            username: "johndoe".to_string(),
            name: "John".to_string(),
            roles: vec![Role::Student],
        });
        next.run(request).await
    }

    fn protected_router() -> Router {
        Router::new().route("/admin", get(ok_handler)).route_layer(
            middleware::from_fn(|request: Request, next: Next| {
                RequireRoles::new(ADMIN_ONLY).middleware(request, next)
            }),
        )
    }

    #[tokio::test]
    async fn no_identity_is_unauthorized() {
        let server = TestServer::new(protected_router()).unwrap();
        let response = server.get("/admin").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_role_is_forbidden() {
        let app = protected_router().layer(middleware::from_fn(inject_identity));
        let server = TestServer::new(app).unwrap();
        let response = server.get("/admin").await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn matching_role_is_allowed() {
        async fn inject_admin(mut request: Request<Body>, next: Next) -> Response {
            request.extensions_mut().insert(CurrentUser {
                id: 1,
                username: "admin".to_string(),
                name: "Admin".to_string(),
                roles: vec![Role::Administrator, Role::Teacher],
            });
            next.run(request).await
        }

        let app = protected_router().layer(middleware::from_fn(inject_admin));
        let server = TestServer::new(app).unwrap();
        let response = server.get("/admin").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn extractor_reads_bound_identity() {
        async fn whoami(user: CurrentUser) -> String {
            user.username
        }

        let app = Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn(inject_identity));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/whoami").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), "johndoe");
    }

    #[tokio::test]
    async fn extractor_rejects_when_no_identity_bound() {
        async fn whoami(user: CurrentUser) -> String {
            user.username
        }

        let server = TestServer::new(Router::new().route("/whoami", get(whoami))).unwrap();
        let response = server.get("/whoami").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
