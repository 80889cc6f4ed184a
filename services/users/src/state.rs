//! Application state shared across handlers

use std::sync::Arc;

use crate::repositories::UserRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub bearer_token: Arc<str>,
}

impl AppState {
    pub fn new(user_repository: UserRepository, bearer_token: impl Into<Arc<str>>) -> Self {
        Self {
            user_repository,
            bearer_token: bearer_token.into(),
        }
    }
}
