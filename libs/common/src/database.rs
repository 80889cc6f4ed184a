//! Database module for handling SQLite connections and schema setup
//!
//! This module provides configuration, the shared [`Database`] handle, health
//! checks and idempotent creation of the `users` table.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{env, str::FromStr};
use tracing::{error, info};

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_at DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    )
"#;

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: SQLite connection URL (default: `sqlite://./sample.db`)
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./sample.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Handle to the SQLite database, cheap to clone
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database, verify connectivity and ensure the schema exists
    ///
    /// The database file is created when missing. Any failure here leaves the
    /// service unable to run.
    pub async fn initialize(config: &DatabaseConfig) -> DatabaseResult<Self> {
        info!("Opening database at {}", config.database_url);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(DatabaseError::Connection)?;

        let database = Self { pool };

        database.health_check().await?;
        info!("Successfully connected to SQLite database");

        database.run_migrations().await?;

        Ok(database)
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity
    ///
    /// # Returns
    ///
    /// * `DatabaseResult<bool>` - True if connection is successful, error otherwise
    pub async fn health_check(&self) -> DatabaseResult<bool> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                DatabaseError::Query(e)
            })?;

        Ok(true)
    }

    /// Create the `users` table if it does not exist yet
    pub async fn run_migrations(&self) -> DatabaseResult<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Release all connections; closing an already closed handle does nothing
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }

        self.pool.close().await;
        info!("Database connection closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
