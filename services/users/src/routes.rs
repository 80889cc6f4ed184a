//! User service routes

use std::any::Any;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    error::{ApiError, ApiResult},
    middleware::bearer_auth_middleware,
    models::{
        CreateUserRequest, ErrorResponse, HealthResponse, ProtectedResponse, UpdateUserRequest,
        User,
    },
    state::AppState,
};

/// Create the router for the user service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/protected", get(protected_route))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_middleware,
        ));

    Router::new()
        .route("/hello", get(hello))
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/swagger/doc.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("Request handler panicked");
    ApiError::InternalServerError("Internal server error".to_string()).into_response()
}

fn parse_user_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".to_string()))
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|_| ApiError::BadRequest("Invalid request body".to_string()))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/hello",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn hello() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request body or empty name", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = parse_body(payload)?;
    payload.validate().map_err(ApiError::BadRequest)?;

    let user = state.user_repository.create(&payload).await.map_err(|e| {
        error!("Failed to create user: {}", e);
        ApiError::InternalServerError("Failed to create user".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get all users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_repository.get_all().await.map_err(|e| {
        error!("Failed to get users: {}", e);
        ApiError::InternalServerError("Failed to get users".to_string())
    })?;

    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user_id = parse_user_id(&id)?;

    let user = state
        .user_repository
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to get user {}: {}", user_id, e);
            ApiError::InternalServerError("Failed to get user".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update a user's name
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Invalid user ID, body or empty name", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let user_id = parse_user_id(&id)?;
    let payload = parse_body(payload)?;
    payload.validate().map_err(ApiError::BadRequest)?;

    let user = state
        .user_repository
        .update(user_id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update user {}: {}", user_id, e);
            ApiError::InternalServerError("Failed to update user".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = parse_user_id(&id)?;

    state
        .user_repository
        .delete(user_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                return ApiError::NotFound("User not found".to_string());
            }
            error!("Failed to delete user {}: {}", user_id, e);
            ApiError::InternalServerError("Failed to delete user".to_string())
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Protected route that requires a bearer token
#[utoipa::path(
    get,
    path = "/protected",
    tag = "protected",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Access granted", body = ProtectedResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    )
)]
pub async fn protected_route() -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Access granted to protected resource".to_string(),
        user_id: "authenticated_user".to_string(),
    })
}
