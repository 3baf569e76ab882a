//! HTTP-level tests for the project listing, detail and CRUD endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

use common::{body_json, build_test_app, create_user, delete, get, post_json, put_json};

async fn create_project(pool: &PgPool, token: &str, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/projects", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn create_task(pool: &PgPool, token: &str, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/tasks", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_stamps_owner_and_defaults(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let json = create_project(&pool, &user.token, json!({"name": "Launch"})).await;

    assert_eq!(json["name"], "Launch");
    assert_eq!(json["owner_id"], user.id);
    assert_eq!(json["status"], "planned");
    assert!(json["deadline"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_with_empty_name_is_422(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/projects",
        &user.token,
        json!({"name": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["details"]["name"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_and_delete_project(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let created = create_project(&pool, &user.token, json!({"name": "Draft"})).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}"),
        &user.token,
        json!({"status": "in_progress", "deadline": "2030-01-31"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Draft");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["deadline"], "2030-01-31");

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{id}"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_project_is_404(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let response = get(build_test_app(pool), "/api/v1/projects/999999", &user.token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_projects_envelope_and_counts(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let project = create_project(&pool, &user.token, json!({"name": "Counted"})).await;
    let project_id = project["id"].as_i64().unwrap();
    create_task(
        &pool,
        &user.token,
        json!({"project_id": project_id, "title": "done", "status": "done"}),
    )
    .await;
    create_task(
        &pool,
        &user.token,
        json!({"project_id": project_id, "title": "open"}),
    )
    .await;

    let response = get(build_test_app(pool), "/api/v1/projects", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["current_page"], 1);
    assert_eq!(json["last_page"], 1);
    assert_eq!(json["per_page"], 10);
    assert_eq!(json["data"][0]["id"], project_id);
    assert_eq!(json["data"][0]["tasks_count"], 2);
    assert_eq!(json["data"][0]["completed_tasks_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_projects_filters_by_status(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    create_project(&pool, &user.token, json!({"name": "Planned"})).await;
    create_project(
        &pool,
        &user.token,
        json!({"name": "Archived", "status": "archived"}),
    )
    .await;

    let response = get(
        build_test_app(pool),
        "/api/v1/projects?status=archived",
        &user.token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["name"], "Archived");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_status_value_is_422(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let response = get(
        build_test_app(pool),
        "/api/v1/projects?status=sleeping",
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_per_page_above_cap_is_clamped(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    create_project(&pool, &user.token, json!({"name": "One"})).await;

    let response = get(
        build_test_app(pool),
        "/api/v1/projects?per_page=1000",
        &user.token,
    )
    .await;
    assert_eq!(body_json(response).await["per_page"], 100);
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_project_detail(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let project = create_project(&pool, &user.token, json!({"name": "Empty"})).await;
    let id = project["id"].as_i64().unwrap();

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{id}"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["name"], "Empty");
    assert_eq!(
        json["stats"],
        json!({"total": 0, "todo": 0, "in_progress": 0, "completed": 0})
    );
    assert_eq!(json["tasks"], json!([]));
    assert_eq!(json["tasks_pagination"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_detail_pages_nested_tasks(pool: PgPool) {
    let user = create_user(&pool, "Owner").await;
    let project = create_project(&pool, &user.token, json!({"name": "Nested"})).await;
    let id = project["id"].as_i64().unwrap();
    for i in 0..12 {
        create_task(
            &pool,
            &user.token,
            json!({"project_id": id, "title": format!("Task {i}")}),
        )
        .await;
    }

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/projects/{id}?tasks_page=2"),
        &user.token,
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["stats"]["total"], 12);
    assert_eq!(json["stats"]["todo"], 12);
    assert_eq!(json["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(json["tasks_pagination"]["current_page"], 2);
    assert_eq!(json["tasks_pagination"]["last_page"], 2);
    assert_eq!(json["tasks"][0]["comments_count"], 0);
}
