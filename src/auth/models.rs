// Authentication data models and DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Authorization levels. The set is closed; roles are flat and
/// independent of each other (no hierarchy).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    ToolAdministrator,
    Teacher,
    Student,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: &'static [Role] = &[
        Role::Administrator,
        Role::ToolAdministrator,
        Role::Teacher,
        Role::Student,
    ];

    /// Static mapping from role to its granted authority string
    pub fn authority(&self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRATOR",
            Role::ToolAdministrator => "TOOL_ADMINISTRATOR",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}

/// The authenticated identity bound to a request by the authentication
/// filter. Travels in the request's extension map; handlers read it
/// back through the `FromRequestParts` impl in the middleware module.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    /// Authority strings granted by this identity's roles
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.authority().to_string()).collect()
    }

    pub fn has_any_role(&self, required: &[Role]) -> bool {
        self.roles.iter().any(|role| required.contains(role))
    }
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "johndoe")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub jwt: String,
}

/// Token validation probe query
#[derive(Debug, Deserialize)]
pub struct ValidateTokenParams {
    pub jwt: String,
}

/// Public view of the authenticated user
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub roles: Vec<Role>,
}
