use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, AppQuery};
use crate::features::tasks::dtos::{
    CreateTaskDto, TaskCompletionQuery, TaskIdQuery, TaskListResponseDto, TaskMessageResponseDto,
    TaskResponseDto,
};
use crate::features::tasks::services::TaskService;
use crate::shared::constants::TASK_NOT_FOUND;
use crate::shared::params::{decode_id_param, parse_id};
use crate::shared::types::ErrorResponse;

fn task_id(raw: &str) -> Result<i32> {
    parse_id(raw).ok_or_else(|| {
        tracing::warn!("Task id '{}' is not an id", raw);
        AppError::NotFound(TASK_NOT_FOUND.to_string())
    })
}

/// Add a new task
#[utoipa::path(
    post,
    path = "/tarefa/",
    request_body(content = CreateTaskDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Task created", body = TaskResponseDto),
        (status = 400, description = "Invalid input or task could not be saved", body = ErrorResponse),
        (status = 409, description = "Integrity error (e.g. unknown category)", body = ErrorResponse)
    ),
    tag = "Tarefa"
)]
pub async fn create_task(
    State(service): State<Arc<TaskService>>,
    AppForm(dto): AppForm<CreateTaskDto>,
) -> Result<Json<TaskResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task = service.create(dto).await?;
    Ok(Json(task))
}

/// List every registered task
#[utoipa::path(
    get,
    path = "/tarefas",
    responses(
        (status = 200, description = "List of tasks", body = TaskListResponseDto),
    ),
    tag = "Tarefa"
)]
pub async fn list_tasks(
    State(service): State<Arc<TaskService>>,
) -> Result<Json<TaskListResponseDto>> {
    let tasks = service.list().await?;
    Ok(Json(tasks))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/tarefa",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "Task found", body = TaskResponseDto),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Tarefa"
)]
pub async fn get_task(
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<TaskIdQuery>,
) -> Result<Json<TaskResponseDto>> {
    let id = task_id(&query.id)?;
    let task = service.get(id).await?;
    Ok(Json(task))
}

/// Delete a task permanently
#[utoipa::path(
    delete,
    path = "/tarefa",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "Task removed", body = TaskMessageResponseDto),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Tarefa"
)]
pub async fn delete_task(
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<TaskIdQuery>,
) -> Result<Json<TaskMessageResponseDto>> {
    let id = task_id(&decode_id_param(&query.id))?;
    let response = service.delete(id).await?;
    Ok(Json(response))
}

/// Mark a task as completed or reopen it
#[utoipa::path(
    put,
    path = "/tarefa",
    params(TaskCompletionQuery),
    responses(
        (status = 200, description = "Task status updated", body = TaskMessageResponseDto),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Tarefa"
)]
pub async fn update_task(
    State(service): State<Arc<TaskService>>,
    AppQuery(query): AppQuery<TaskCompletionQuery>,
) -> Result<Json<TaskMessageResponseDto>> {
    let id = task_id(&decode_id_param(&query.id))?;
    let response = service.set_completed(id, query.completed).await?;
    Ok(Json(response))
}
