use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result, StoreError};
use crate::features::tasks::dtos::{
    CreateTaskDto, TaskListResponseDto, TaskMessageResponseDto, TaskResponseDto,
};
use crate::features::tasks::models::NewTask;
use crate::features::tasks::repositories::TaskRepository;
use crate::shared::constants::{
    INTEGRITY_ERROR, TASK_NOT_FOUND, TASK_NOT_SAVED, TASK_REMOVED, TASK_STATUS_UPDATED,
};

/// Service for task operations
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Create a new, uncompleted task. Missing dates default to now.
    ///
    /// The category is not checked here; the foreign key rejects unknown ids.
    pub async fn create(&self, dto: CreateTaskDto) -> Result<TaskResponseDto> {
        let now = Utc::now();
        let new_task = NewTask {
            category_id: dto.category_id,
            description: dto.description,
            scheduled_date: dto.scheduled_date.unwrap_or(now),
            creation_date: dto.creation_date.unwrap_or(now),
        };
        let description = new_task.description.clone();

        tracing::debug!("Adding task: '{}'", description);

        let task = self.tasks.insert(new_task).await.map_err(|e| match e {
            StoreError::Integrity(detail) => {
                tracing::warn!(
                    "Failed to add task '{}': integrity violation ({})",
                    description,
                    detail
                );
                AppError::Conflict(INTEGRITY_ERROR.to_string())
            }
            StoreError::Database(e) => {
                tracing::warn!("Failed to add task '{}': {:?}", description, e);
                AppError::Validation(TASK_NOT_SAVED.to_string())
            }
        })?;

        tracing::debug!("Added task #{}: '{}'", task.id, task.description);

        Ok(task.into())
    }

    /// List all tasks with their category description
    pub async fn list(&self) -> Result<TaskListResponseDto> {
        let tasks = self.tasks.list().await.map_err(|e| {
            tracing::error!("Failed to list tasks: {:?}", e);
            AppError::from(e)
        })?;

        tracing::debug!("{} tasks found", tasks.len());

        Ok(TaskListResponseDto {
            tasks: tasks.into_iter().map(Into::into).collect(),
        })
    }

    /// Get task by ID
    pub async fn get(&self, id: i32) -> Result<TaskResponseDto> {
        tracing::debug!("Fetching task #{}", id);

        let task = self.tasks.find_by_id(id).await.map_err(|e| {
            tracing::error!("Failed to fetch task #{}: {:?}", id, e);
            AppError::from(e)
        })?;

        match task {
            Some(task) => {
                tracing::debug!("Task found: '{}'", task.description);
                Ok(task.into())
            }
            None => {
                tracing::warn!("Failed to fetch task #{}: {}", id, TASK_NOT_FOUND);
                Err(AppError::NotFound(TASK_NOT_FOUND.to_string()))
            }
        }
    }

    /// Delete a task permanently
    pub async fn delete(&self, id: i32) -> Result<TaskMessageResponseDto> {
        tracing::debug!("Deleting task #{}", id);

        let deleted = self.tasks.delete(id).await.map_err(|e| {
            tracing::error!("Failed to delete task #{}: {:?}", id, e);
            AppError::from(e)
        })?;

        if deleted == 0 {
            tracing::warn!("Failed to delete task #{}: {}", id, TASK_NOT_FOUND);
            return Err(AppError::NotFound(TASK_NOT_FOUND.to_string()));
        }

        tracing::debug!("Deleted task #{}", id);

        Ok(TaskMessageResponseDto {
            message: TASK_REMOVED.to_string(),
            id,
        })
    }

    /// Mark a task as completed or reopen it
    pub async fn set_completed(&self, id: i32, completed: bool) -> Result<TaskMessageResponseDto> {
        tracing::debug!("Setting task #{} completed={}", id, completed);

        let updated = self
            .tasks
            .set_completed(id, completed)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update task #{}: {:?}", id, e);
                AppError::from(e)
            })?;

        if updated == 0 {
            tracing::warn!("Failed to update task #{}: {}", id, TASK_NOT_FOUND);
            return Err(AppError::NotFound(TASK_NOT_FOUND.to_string()));
        }

        tracing::debug!("Updated task #{}", id);

        Ok(TaskMessageResponseDto {
            message: TASK_STATUS_UPDATED.to_string(),
            id,
        })
    }
}
