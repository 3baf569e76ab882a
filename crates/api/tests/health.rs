mod common;

use axum::http::{Method, StatusCode};
use sqlx::PgPool;

use common::{body_json, build_test_app, send};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_api_requires_bearer_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(app, Method::GET, "/api/v1/projects", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(app, Method::GET, "/api/v1/tasks", Some("not-a-jwt"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
