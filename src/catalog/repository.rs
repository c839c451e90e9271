// Database access for the product/category catalog

use sqlx::PgPool;

use crate::catalog::error::CatalogError;
use crate::catalog::models::{Category, CategoryStatus, Product, ProductStatus, SaveCategory, SaveProduct};
use crate::query::PageRequest;

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- products ---

    pub async fn page_products(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<Product>, i64), CatalogError> {
        let mut builder = crate::query::SqlQueryBuilder::new(
            "SELECT id, name, price, status, category_id FROM product",
        );
        if let Some((column, term)) = &request.search {
            builder.add_search(column, term);
        }
        builder.set_sort(&request.sort_column, request.descending);
        builder.set_pagination(request.size, request.offset());

        let (query, params) = builder.build();
        let mut select = sqlx::query_as::<_, Product>(&query);
        for param in &params {
            select = select.bind(param);
        }
        let products = select.fetch_all(&self.pool).await?;

        let (count_query, count_params) = builder.build_count("product");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &count_params {
            count = count.bind(param);
        }
        let total = count.fetch_one(&self.pool).await?;

        Ok((products, total))
    }

    pub async fn find_product(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, status, category_id FROM product WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn insert_product(&self, save: &SaveProduct) -> Result<Product, CatalogError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO product (name, price, status, category_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, price, status, category_id",
        )
        .bind(&save.name)
        .bind(save.price)
        .bind(ProductStatus::Enabled)
        .bind(save.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: i64,
        save: &SaveProduct,
    ) -> Result<Option<Product>, CatalogError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE product SET name = $1, price = $2, category_id = $3 \
             WHERE id = $4 \
             RETURNING id, name, price, status, category_id",
        )
        .bind(&save.name)
        .bind(save.price)
        .bind(save.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn set_product_status(
        &self,
        id: i64,
        status: ProductStatus,
    ) -> Result<Option<Product>, CatalogError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE product SET status = $1 WHERE id = $2 \
             RETURNING id, name, price, status, category_id",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    // --- categories ---

    pub async fn category_exists(&self, id: i64) -> Result<bool, CatalogError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM category WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.unwrap_or(false))
    }

    pub async fn page_categories(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<Category>, i64), CatalogError> {
        let mut builder =
            crate::query::SqlQueryBuilder::new("SELECT id, name, status FROM category");
        if let Some((column, term)) = &request.search {
            builder.add_search(column, term);
        }
        builder.set_sort(&request.sort_column, request.descending);
        builder.set_pagination(request.size, request.offset());

        let (query, params) = builder.build();
        let mut select = sqlx::query_as::<_, Category>(&query);
        for param in &params {
            select = select.bind(param);
        }
        let categories = select.fetch_all(&self.pool).await?;

        let (count_query, count_params) = builder.build_count("category");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &count_params {
            count = count.bind(param);
        }
        let total = count.fetch_one(&self.pool).await?;

        Ok((categories, total))
    }

    pub async fn find_category(&self, id: i64) -> Result<Option<Category>, CatalogError> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name, status FROM category WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    pub async fn insert_category(&self, save: &SaveCategory) -> Result<Category, CatalogError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO category (name, status) VALUES ($1, $2) \
             RETURNING id, name, status",
        )
        .bind(&save.name)
        .bind(CategoryStatus::Enabled)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: i64,
        save: &SaveCategory,
    ) -> Result<Option<Category>, CatalogError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE category SET name = $1 WHERE id = $2 RETURNING id, name, status",
        )
        .bind(&save.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn set_category_status(
        &self,
        id: i64,
        status: CategoryStatus,
    ) -> Result<Option<Category>, CatalogError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE category SET status = $1 WHERE id = $2 RETURNING id, name, status",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }
}
