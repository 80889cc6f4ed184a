//! Bearer token authentication middleware

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// Reject requests whose bearer token does not match the configured secret
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Missing header, non-Bearer scheme and unparsable values all land here
    let Some(Authorization(bearer)) = req.headers().typed_get::<Authorization<Bearer>>() else {
        warn!("Rejected request without a valid bearer Authorization header");
        return Err(ApiError::Unauthorized);
    };

    if !token_matches(bearer.token(), &state.bearer_token) {
        warn!("Rejected request with an invalid bearer token");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// Compare tokens in time independent of where they first differ
fn token_matches(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
