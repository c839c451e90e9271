// HTTP handlers for authentication endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{CurrentUser, LoginRequest, ProfileResponse, Role, TokenResponse, ValidateTokenParams},
};
use crate::error::ErrorBody;
use crate::AppState;

/// Authenticate a user and return a signed token
#[utoipa::path(
    post,
    path = "/auth/authenticate",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User authenticated successfully", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn authenticate_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    // Blank credentials get the same generic failure as wrong ones
    request.validate().map_err(|_| AuthError::InvalidCredentials)?;

    let jwt = state.auth.login(&request).await?;
    Ok(Json(TokenResponse { jwt }))
}

/// Validate a token; returns a plain boolean
#[utoipa::path(
    get,
    path = "/auth/validate-token",
    params(
        ("jwt" = String, Query, description = "Token to validate")
    ),
    responses(
        (status = 200, description = "Token validation result", body = bool)
    ),
    tag = "auth"
)]
pub async fn validate_token_handler(
    State(state): State<AppState>,
    Query(params): Query<ValidateTokenParams>,
) -> Json<bool> {
    Json(state.auth.validate_token(&params.jwt))
}

/// Return the profile of the currently authenticated user
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Authenticated user profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn profile_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, AuthError> {
    let profile = state.auth.current_user(&user).await?;
    Ok(Json(profile))
}

/// List the closed set of assignable roles
#[utoipa::path(
    get,
    path = "/roles",
    responses(
        (status = 200, description = "All assignable roles", body = [Role]),
        (status = 403, description = "Caller lacks the ADMINISTRATOR role", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn roles_handler() -> Json<Vec<Role>> {
    Json(Role::ALL.to_vec())
}
