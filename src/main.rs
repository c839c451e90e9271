pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod users;
pub mod validation;

use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, RequireRoles, Role, TokenService};
use catalog::{CatalogRepository, CatalogService};
use config::AppConfig;
use users::{UserRepository, UserService};

/// Roles allowed to manage users and mutate the catalog
const ADMIN: &[Role] = &[Role::Administrator];
/// Roles allowed to read and edit catalog entries
const CATALOG_STAFF: &[Role] = &[Role::Administrator, Role::ToolAdministrator];
/// Any authenticated role
const ANY_ROLE: &[Role] = Role::ALL;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::authenticate_handler,
        auth::handlers::validate_token_handler,
        auth::handlers::profile_handler,
        auth::handlers::roles_handler,
        users::handlers::register_handler,
        users::handlers::update_handler,
        users::handlers::delete_handler,
        users::handlers::page_handler,
        users::handlers::get_handler,
    ),
    components(
        schemas(
            auth::models::LoginRequest,
            auth::models::TokenResponse,
            auth::models::ProfileResponse,
            auth::models::Role,
            users::models::UserRequest,
            users::models::UserResponse,
            catalog::models::Product,
            catalog::models::ProductStatus,
            catalog::models::SaveProduct,
            catalog::models::Category,
            catalog::models::CategoryStatus,
            catalog::models::SaveCategory,
            error::ErrorBody,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints")
    ),
    info(
        title = "Toolflow API",
        version = "1.0.0",
        description = "Back-office service for user, role and catalog management"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthService,
    pub users: UserService,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        let tokens = TokenService::new(config.jwt_secret.clone(), config.jwt_ttl_seconds);
        let user_repository = UserRepository::new(db.clone());
        let auth = AuthService::new(user_repository.clone(), tokens);
        let users = UserService::new(user_repository);
        let catalog = CatalogService::new(CatalogRepository::new(db.clone()));
        Self {
            db,
            auth,
            users,
            catalog,
        }
    }
}

/// Endpoints reachable without a token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/authenticate", post(auth::handlers::authenticate_handler))
        .route("/auth/validate-token", get(auth::handlers::validate_token_handler))
}

/// Endpoints open to every authenticated role
fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/profile", get(auth::handlers::profile_handler))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            RequireRoles::new(ANY_ROLE).middleware(request, next)
        }))
}

/// User management and catalog mutations, ADMINISTRATOR only
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::handlers::register_handler))
        .route("/users", get(users::handlers::page_handler))
        .route("/users/:id", get(users::handlers::get_handler))
        .route("/users/:id", put(users::handlers::update_handler))
        .route("/users/:id", delete(users::handlers::delete_handler))
        .route("/roles", get(auth::handlers::roles_handler))
        .route("/products", post(catalog::handlers::create_product_handler))
        .route("/products/:id/disabled", put(catalog::handlers::disable_product_handler))
        .route("/categories", post(catalog::handlers::create_category_handler))
        .route("/categories/:id/disabled", put(catalog::handlers::disable_category_handler))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            RequireRoles::new(ADMIN).middleware(request, next)
        }))
}

/// Catalog reads and edits, shared by administrators and tool administrators
fn catalog_staff_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::handlers::product_page_handler))
        .route("/products/:id", get(catalog::handlers::get_product_handler))
        .route("/products/:id", put(catalog::handlers::update_product_handler))
        .route("/categories", get(catalog::handlers::category_page_handler))
        .route("/categories/:id", get(catalog::handlers::get_category_handler))
        .route("/categories/:id", put(catalog::handlers::update_category_handler))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            RequireRoles::new(CATALOG_STAFF).middleware(request, next)
        }))
}

/// Creates and configures the application router.
///
/// The authentication filter runs on every route; per-route
/// `RequireRoles` layers gate the protected operations. The error
/// envelope sits outside both so every failure carries the request
/// URL and method.
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes())
        .merge(authenticated_routes())
        .merge(admin_routes())
        .merge(catalog_staff_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authentication_filter,
        ))
        .layer(middleware::from_fn(error::error_envelope))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Toolflow API - Starting...");

    let config = AppConfig::from_env().expect("Invalid configuration");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let addr = format!("{}:{}", config.host, config.port);
    let app = create_router(AppState::new(db_pool, &config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Toolflow API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
