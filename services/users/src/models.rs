//! API models for request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A persisted user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    /// Identifier assigned by storage on creation
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "Alice")]
    pub name: String,
    /// Insertion time assigned by storage
    pub created_at: DateTime<Utc>,
}

/// Request for user creation
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: String,
}

/// Request for user update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[schema(example = "Bob")]
    pub name: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }
}

/// Validate a user name
///
/// Only the empty string is rejected; whitespace is stored as given.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name is required".to_string());
    }

    Ok(())
}

/// Response for the health check
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
}

/// Response for the bearer-protected endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProtectedResponse {
    #[schema(example = "Access granted to protected resource")]
    pub message: String,
    #[schema(example = "authenticated_user")]
    pub user_id: String,
}

/// Body returned with every error status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "User not found")]
    pub error: String,
}
