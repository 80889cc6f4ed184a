//! OpenAPI document for the user service

use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::{
    models::{
        CreateUserRequest, ErrorResponse, HealthResponse, ProtectedResponse, UpdateUserRequest,
        User,
    },
    routes,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0",
        description = "CRUD operations on users plus a bearer-protected sample endpoint"
    ),
    paths(
        routes::hello,
        routes::create_user,
        routes::get_users,
        routes::get_user,
        routes::update_user,
        routes::delete_user,
        routes::protected_route
    ),
    components(schemas(
        User,
        CreateUserRequest,
        UpdateUserRequest,
        HealthResponse,
        ProtectedResponse,
        ErrorResponse
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "health", description = "Liveness"),
        (name = "users", description = "User management"),
        (name = "protected", description = "Requires a bearer token")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected routes
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
