// Catalog module: products and their categories

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::CatalogError;
pub use models::{Category, CategoryStatus, Product, ProductStatus, SaveCategory, SaveProduct};
pub use repository::CatalogRepository;
pub use service::CatalogService;
