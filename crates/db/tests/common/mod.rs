//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use taskboard_db::models::project::{CreateProject, Project};
use taskboard_db::models::status::{TaskPriority, TaskStatus};
use taskboard_db::models::task::{CreateTask, Task};
use taskboard_db::models::user::{CreateUser, User};
use taskboard_db::repositories::{ProjectRepo, TaskRepo, UserRepo};

pub async fn create_user(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

pub fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        status: None,
        deadline: None,
    }
}

pub async fn create_project(pool: &PgPool, owner_id: i64, name: &str) -> Project {
    ProjectRepo::create(pool, owner_id, &new_project(name))
        .await
        .unwrap()
}

pub fn new_task(project_id: i64, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        title: title.to_string(),
        description: None,
        assigned_to: None,
        status: None,
        priority: None,
        estimated_hours: None,
        actual_hours: None,
    }
}

pub async fn create_task(pool: &PgPool, project_id: i64, title: &str) -> Task {
    TaskRepo::create(pool, &new_task(project_id, title))
        .await
        .unwrap()
}

pub async fn create_task_with(
    pool: &PgPool,
    project_id: i64,
    title: &str,
    status: TaskStatus,
    priority: TaskPriority,
) -> Task {
    let input = CreateTask {
        status: Some(status),
        priority: Some(priority),
        ..new_task(project_id, title)
    };
    TaskRepo::create(pool, &input).await.unwrap()
}
