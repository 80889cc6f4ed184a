//! API integration tests
//!
//! Drive the full router against a temporary SQLite database.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::database::{Database, DatabaseConfig};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;
use users::{AppState, create_router, repositories::UserRepository};

const TEST_TOKEN: &str = "test-bearer-token";

struct TestApp {
    router: Router,
    repository: UserRepository,
    database: Database,
    _dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            database_url: format!("sqlite://{}", dir.path().join("api.db").display()),
            max_connections: 1,
        };
        let database = Database::initialize(&config).await.unwrap();
        let repository = UserRepository::new(database.pool().clone());
        let router = create_router(AppState::new(repository.clone(), TEST_TOKEN));

        Self {
            router,
            repository,
            database,
            _dir: dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<Value>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Option<Value>) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Option<Value>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Option<Value>) {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn create(&self, name: &str) -> Value {
        let (status, body) = self.send_json("POST", "/users", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        body.unwrap()
    }
}

#[tokio::test]
async fn test_hello() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new().await;

    let user = app.create("Alice").await;

    assert!(user["user_id"].as_i64().unwrap() > 0);
    assert_eq!(user["name"], "Alice");
    assert!(user["created_at"].is_string());
}

#[tokio::test]
async fn test_create_with_empty_name_touches_no_storage() {
    let app = TestApp::new().await;

    let (status, body) = app.send_json("POST", "/users", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Name is required");

    let (status, _) = app.send_json("POST", "/users", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_keeps_whitespace_name() {
    let app = TestApp::new().await;

    let user = app.create("   ").await;

    assert_eq!(user["name"], "   ");
    assert_eq!(app.repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_with_malformed_body() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Invalid request body");
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::new().await;
    let created = app.create("Alice").await;

    let (status, body) = app.get(&format!("/users/{}", created["user_id"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), created);
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/users/12345").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], "User not found");
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "Invalid user ID");

    let (status, _) = app
        .send_json("PUT", "/users/abc", json!({ "name": "Bob" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_newest_first() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!([]));

    for name in ["A", "B", "C"] {
        app.create(name).await;
    }

    let (status, body) = app.get("/users").await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "B", "A"]);
}

#[tokio::test]
async fn test_update_user_changes_only_name() {
    let app = TestApp::new().await;
    let created = app.create("Alice").await;
    let uri = format!("/users/{}", created["user_id"]);

    let (status, body) = app.send_json("PUT", &uri, json!({ "name": "Alicia" })).await;

    assert_eq!(status, StatusCode::OK);
    let updated = body.unwrap();
    assert_eq!(updated["user_id"], created["user_id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["name"], "Alicia");
}

#[tokio::test]
async fn test_update_validation_and_missing_user() {
    let app = TestApp::new().await;
    let created = app.create("Alice").await;
    let uri = format!("/users/{}", created["user_id"]);

    let (status, _) = app.send_json("PUT", &uri, json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get(&uri).await;
    assert_eq!(body.unwrap()["name"], "Alice");

    let (status, body) = app
        .send_json("PUT", "/users/999", json!({ "name": "Nobody" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], "User not found");
}

#[tokio::test]
async fn test_delete_user_twice() {
    let app = TestApp::new().await;
    let created = app.create("Alice").await;
    let uri = format!("/users/{}", created["user_id"]);

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], "User not found");

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_is_opaque_server_error() {
    let app = TestApp::new().await;
    app.database.close().await;

    let (status, body) = app.get("/users").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap(), json!({ "error": "Failed to get users" }));
}

#[tokio::test]
async fn test_protected_requires_bearer_token() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/protected").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    for value in [
        "Basic dXNlcjpwYXNz".to_string(),
        "Bearer".to_string(),
        "Bearer wrong-token".to_string(),
        TEST_TOKEN.to_string(),
    ] {
        let request = Request::builder()
            .uri("/protected")
            .header(header::AUTHORIZATION, value.as_str())
            .body(Body::empty())
            .unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "accepted {:?}", value);
        assert_eq!(body.unwrap()["error"], "Unauthorized");
    }

    let request = Request::builder()
        .uri("/protected")
        .header(header::AUTHORIZATION, format!("Bearer {}", TEST_TOKEN))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({
            "message": "Access granted to protected resource",
            "user_id": "authenticated_user"
        })
    );
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/swagger/doc.json").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["info"]["title"], "User Service API");
    assert!(body["paths"]["/users/{id}"]["delete"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_swagger_ui_is_served() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .uri("/swagger-ui/index.html")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("swagger"));
}
