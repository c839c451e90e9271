// Authentication module
// JWT issuance/verification, the per-request authentication filter,
// and role-based authorization.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use middleware::{authentication_filter, RequireRoles};
pub use models::{CurrentUser, LoginRequest, ProfileResponse, Role, TokenResponse};
pub use password::PasswordService;
pub use service::AuthService;
pub use token::TokenService;
