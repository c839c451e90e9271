// User management module
// Registration, profile updates, soft deletion, and the role-assignment
// rules enforced on both paths.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::UserError;
pub use models::{User, UserRequest, UserResponse};
pub use repository::UserRepository;
pub use service::UserService;
