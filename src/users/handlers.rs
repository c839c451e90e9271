// HTTP handlers for user management endpoints (ADMINISTRATOR only)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::error::ErrorBody;
use crate::query::{Page, PageParams};
use crate::users::error::UserError;
use crate::users::models::{UserRequest, UserResponse};
use crate::AppState;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User successfully registered", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 409, description = "Username already exists", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UserError> {
    request.validate()?;

    let user = state.users.register(&request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "ID of the user to update")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UserRequest>,
) -> Result<Json<UserResponse>, UserError> {
    request.validate()?;

    let user = state.users.update(id, &request).await?;
    Ok(Json(user))
}

/// Deactivate a user (soft delete)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, UserError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Paginated list of active users with optional column search
#[utoipa::path(
    get,
    path = "/users",
    params(PageParams),
    responses(
        (status = 200, description = "Users retrieved successfully"),
        (status = 400, description = "Invalid search parameters", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn page_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<UserResponse>>, UserError> {
    let page = state.users.get_page(params).await?;
    Ok(Json(page))
}

/// Fetch one user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = i64, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, UserError> {
    let user = state.users.get_one(id).await?;
    Ok(Json(user))
}
