// Database access for users and their role associations

use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::auth::models::Role;
use crate::query::PageRequest;
use crate::users::error::UserError;
use crate::users::models::{User, UserRequest};

const USER_COLUMNS_SQL: &str =
    "id, username, name, last_name, phone, email, status, password, \
     created_at, created_by, updated_at, updated_by";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by username regardless of status. Used for the
    /// uniqueness check at registration; soft-deleted users still
    /// occupy their username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS_SQL} FROM app_user WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find an active user by username. This is the credential-store
    /// lookup used during authentication.
    pub async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS_SQL} FROM app_user WHERE username = $1 AND status = TRUE"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS_SQL} FROM app_user WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Current role set for one user
    pub async fn roles_for(&self, user_id: i64) -> Result<Vec<Role>, UserError> {
        let roles = sqlx::query_scalar::<_, Role>(
            "SELECT role FROM user_role WHERE user_id = $1 ORDER BY role",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    /// Role sets for a batch of users, keyed by user id
    pub async fn roles_for_many(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<Role>>, UserError> {
        let rows = sqlx::query_as::<_, (i64, Role)>(
            "SELECT user_id, role FROM user_role WHERE user_id = ANY($1) ORDER BY role",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Role>> = HashMap::new();
        for (user_id, role) in rows {
            grouped.entry(user_id).or_default().push(role);
        }
        Ok(grouped)
    }

    /// Insert a new user and its role associations in one transaction.
    /// A unique-index violation on the username surfaces as
    /// `UserAlreadyExists`; racing registrations are settled here.
    pub async fn insert_with_roles(
        &self,
        request: &UserRequest,
        password_hash: &str,
        roles: &[Role],
    ) -> Result<User, UserError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO app_user \
             (username, name, last_name, phone, email, status, password, \
              created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7, $8, $9, $10) \
             RETURNING {USER_COLUMNS_SQL}"
        ))
        .bind(&request.username)
        .bind(&request.name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(password_hash)
        .bind(now)
        .bind(request.created_by)
        .bind(now)
        .bind(request.updated_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return UserError::UserAlreadyExists(request.username.clone());
                }
            }
            UserError::Database(e)
        })?;

        for role in roles {
            sqlx::query(
                "INSERT INTO user_role (user_id, role, created_at, created_by) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(user.id)
            .bind(role)
            .bind(user.created_at)
            .bind(user.created_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Update a user's profile and replace its role set in full
    /// (delete-then-insert), all inside one transaction.
    pub async fn update_with_roles(
        &self,
        id: i64,
        request: &UserRequest,
        roles: &[Role],
    ) -> Result<User, UserError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE app_user \
             SET username = $1, name = $2, last_name = $3, phone = $4, email = $5, \
                 updated_at = $6, updated_by = $7 \
             WHERE id = $8 \
             RETURNING {USER_COLUMNS_SQL}"
        ))
        .bind(&request.username)
        .bind(&request.name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(now)
        .bind(request.updated_by)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return UserError::UserAlreadyExists(request.username.clone());
                }
            }
            UserError::Database(e)
        })?
        .ok_or(UserError::UserNotFound)?;

        sqlx::query("DELETE FROM user_role WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for role in roles {
            sqlx::query(
                "INSERT INTO user_role (user_id, role, created_at, created_by) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(role)
            .bind(now)
            .bind(request.updated_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    /// Soft delete: flip the status flag, never remove the row.
    /// Returns false when no user with the id exists.
    pub async fn soft_delete(&self, id: i64) -> Result<bool, UserError> {
        let result = sqlx::query("UPDATE app_user SET status = FALSE, updated_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Page of active users with optional column search
    pub async fn page(&self, request: &PageRequest) -> Result<(Vec<User>, i64), UserError> {
        let mut builder = crate::query::SqlQueryBuilder::new(&format!(
            "SELECT {USER_COLUMNS_SQL} FROM app_user"
        ));
        builder.add_filter("status = TRUE");
        if let Some((column, term)) = &request.search {
            builder.add_search(column, term);
        }
        builder.set_sort(&request.sort_column, request.descending);
        builder.set_pagination(request.size, request.offset());

        let (query, params) = builder.build();
        let mut select = sqlx::query_as::<_, User>(&query);
        for param in &params {
            select = select.bind(param);
        }
        let users = select.fetch_all(&self.pool).await?;

        let (count_query, count_params) = builder.build_count("app_user");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &count_params {
            count = count.bind(param);
        }
        let total = count.fetch_one(&self.pool).await?;

        Ok((users, total))
    }
}
