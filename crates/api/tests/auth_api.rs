//! HTTP-level tests for registration, login, refresh and logout.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, get, send};

async fn register(pool: &PgPool, email: &str) -> serde_json::Value {
    let response = send(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Jo Tester",
            "email": email,
            "password": "long-enough-pw",
            "password_confirmation": "long-enough-pw",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_tokens_and_user(pool: PgPool) {
    let json = register(&pool, "jo@example.com").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], "jo@example.com");
    assert!(json["user"].get("password_hash").is_none());

    let token = json["access_token"].as_str().unwrap();
    let me = get(build_test_app(pool), "/api/v1/user", token).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["name"], "Jo Tester");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_mismatched_confirmation(pool: PgPool) {
    let response = send(
        build_test_app(pool),
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Jo",
            "email": "jo@example.com",
            "password": "long-enough-pw",
            "password_confirmation": "something-else",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["password_confirmation"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    register(&pool, "dup@example.com").await;

    let response = send(
        build_test_app(pool),
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Again",
            "email": "DUP@example.com",
            "password": "long-enough-pw",
            "password_confirmation": "long-enough-pw",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_checks_password(pool: PgPool) {
    register(&pool, "login@example.com").await;

    let ok = send(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"email": "login@example.com", "password": "long-enough-pw"})),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let bad = send(
        build_test_app(pool),
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"email": "login@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_and_logout_revokes(pool: PgPool) {
    let registered = register(&pool, "rot@example.com").await;
    let first_refresh = registered["refresh_token"].as_str().unwrap().to_string();

    let rotated = send(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": first_refresh})),
    )
    .await;
    assert_eq!(rotated.status(), StatusCode::OK);
    let rotated = body_json(rotated).await;

    // The consumed token cannot be replayed.
    let replay = send(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": first_refresh})),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);

    let access = rotated["access_token"].as_str().unwrap();
    let logout = send(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/auth/logout",
        Some(access),
        None,
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let after_logout = send(
        build_test_app(pool),
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": rotated["refresh_token"]})),
    )
    .await;
    assert_eq!(after_logout.status(), StatusCode::UNAUTHORIZED);
}
