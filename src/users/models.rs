// User data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::models::Role;

/// User database row. Carries the password hash, so it is never
/// serialized; responses go through `UserResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub status: bool,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
    pub updated_at: DateTime<Utc>,
    pub updated_by: i64,
}

/// Registration/update request payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(length(min = 4, message = "Name must be at least 4 characters long"))]
    #[schema(example = "John")]
    pub name: String,
    #[validate(length(min = 4, message = "Username must be at least 4 characters long"))]
    #[schema(example = "johndoe")]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    #[validate(length(min = 8, message = "Repeated password must be at least 8 characters long"))]
    pub repeated_password: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[validate(custom = "crate::validation::validate_phone")]
    #[schema(example = "1234567890")]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "john@example.com")]
    pub email: String,
    /// Roles to assign; validated by the service (absent roles and
    /// STUDENT combined with another role are rejected there)
    pub roles: Option<Vec<Role>>,
    pub created_by: i64,
    pub updated_by: i64,
}

/// User representation returned by the API; never carries a password
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub roles: Vec<Role>,
}

impl UserResponse {
    pub fn from_user(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            roles,
        }
    }
}
