//! Common library for the user service
//!
//! This crate provides the storage layer shared by services: SQLite
//! connectivity and schema setup, the parameterized statement builders, and
//! the database error taxonomy.

pub mod database;
pub mod error;
pub mod query;

pub use database::{Database, DatabaseConfig};
pub use error::{DatabaseError, DatabaseResult};

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{Database, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let database = Database::initialize(&config).await?;
///     let is_healthy = database.health_check().await?;
///     println!("Database health check: {}", is_healthy);
///     database.close().await;
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
