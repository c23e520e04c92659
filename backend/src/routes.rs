use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{AddTaskRequest, MutationResponse, TaskId, TaskListResponse};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::error::ApiError;
use crate::repository::{NewTask, TaskRepository};

pub type SharedRepository = Arc<dyn TaskRepository>;

/// The three API routes, without static files or middleware.
pub fn api(repo: SharedRepository) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks))
        .route("/api/add-task", post(add_task))
        .route("/api/delete-task", post(delete_task))
        .with_state(repo)
}

/// API plus the built frontend for every other path.
pub fn app(repo: SharedRepository, static_dir: &Path) -> Router {
    api(repo)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn list_tasks(State(repo): State<SharedRepository>) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = repo.list().await?;
    Ok(Json(TaskListResponse { tasks }))
}

async fn add_task(
    State(repo): State<SharedRepository>,
    body: Bytes,
) -> Result<Json<MutationResponse>, ApiError> {
    let request: AddTaskRequest = parse_body(&body)?;
    let content = request.user_input.trim();
    if content.is_empty() {
        return Err(ApiError::EmptyInput);
    }

    let task = repo
        .insert(NewTask::from_input(content, Local::now().naive_local()))
        .await?;
    info!(task_id = %task.id, "task added");

    let all_tasks = repo.list().await?;
    Ok(Json(MutationResponse {
        success: Some(true),
        message: "✅ 成功添加 1 个任务".to_string(),
        all_tasks,
    }))
}

async fn delete_task(
    State(repo): State<SharedRepository>,
    body: Bytes,
) -> Result<Json<MutationResponse>, ApiError> {
    let request: Value = parse_body(&body)?;
    let task_id: TaskId = match request.get("task_id") {
        None | Some(Value::Null) => return Err(ApiError::MissingTaskId),
        Some(raw) => serde_json::from_value(raw.clone()).map_err(|_| ApiError::InvalidTaskId)?,
    };

    if !repo.remove(task_id).await? {
        return Err(ApiError::NotFound);
    }
    info!(%task_id, "task deleted");

    let all_tasks = repo.list().await?;
    Ok(Json(MutationResponse {
        success: Some(true),
        message: "任务已删除".to_string(),
        all_tasks,
    }))
}
