//! Repositories for database operations

use common::{
    error::{DatabaseError, DatabaseResult},
    query,
};
use sqlx::{FromRow, SqlitePool, sqlite::SqliteRow};
use tracing::info;

use crate::models::{CreateUserRequest, UpdateUserRequest, User};

fn to_user(row: &SqliteRow) -> DatabaseResult<User> {
    User::from_row(row).map_err(DatabaseError::Query)
}

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user and return it as stored
    pub async fn create(&self, payload: &CreateUserRequest) -> DatabaseResult<User> {
        let (sql, values) = query::insert_user(&payload.name);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let user_id = result.last_insert_rowid();
        info!("Created user {}", user_id);

        self.find_by_id(user_id)
            .await?
            .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
    }

    /// Find a user by ID
    ///
    /// A missing row is `Ok(None)`, not an error.
    pub async fn find_by_id(&self, user_id: i64) -> DatabaseResult<Option<User>> {
        let (sql, values) = query::select_user_by_id(user_id);

        let row = sqlx::query_with(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.as_ref().map(to_user).transpose()
    }

    /// Get all users, newest first
    pub async fn get_all(&self) -> DatabaseResult<Vec<User>> {
        let (sql, values) = query::select_all_users();

        let rows = sqlx::query_with(&sql, values)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        rows.iter().map(to_user).collect()
    }

    /// Rename a user and return the updated row
    ///
    /// Returns `Ok(None)` when no user has the given ID.
    pub async fn update(
        &self,
        user_id: i64,
        payload: &UpdateUserRequest,
    ) -> DatabaseResult<Option<User>> {
        let (sql, values) = query::update_user_name(user_id, &payload.name);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!("Updated user {}", user_id);
        self.find_by_id(user_id).await
    }

    /// Delete a user by ID
    ///
    /// Fails with [`DatabaseError::NotFound`] when no row matched.
    pub async fn delete(&self, user_id: i64) -> DatabaseResult<()> {
        let (sql, values) = query::delete_user(user_id);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity: "user",
                id: user_id,
            });
        }

        info!("Deleted user {}", user_id);
        Ok(())
    }

    /// Count stored users
    pub async fn count(&self) -> DatabaseResult<i64> {
        let (sql, values) = query::count_users();

        sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }
}
