//! HTTP service exposing CRUD operations on users
//!
//! Handlers validate input, call [`repositories::UserRepository`] and map its
//! outcomes to status codes. Storage lives in the `common` crate.

pub mod config;
pub mod docs;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
