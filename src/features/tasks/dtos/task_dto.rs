use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::tasks::models::Task;
use crate::shared::datetime::deserialize_optional_timestamp;
use crate::shared::params::deserialize_flag;

/// Form body for creating a task
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    /// Category the task belongs to
    pub category_id: i32,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    #[schema(example = "Schedule a test meeting with the team", max_length = 200)]
    pub description: String,

    /// Defaults to now
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub scheduled_date: Option<DateTime<Utc>>,

    /// Defaults to now
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Response DTO for task, with the category description denormalized
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskResponseDto {
    pub id: i32,
    pub category_id: i32,
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    pub creation_date: DateTime<Utc>,
    pub completed: bool,
    /// Description of the category
    #[schema(example = "Work")]
    pub category: String,
}

impl From<Task> for TaskResponseDto {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            category_id: t.category_id,
            description: t.description,
            scheduled_date: t.scheduled_date,
            creation_date: t.creation_date,
            completed: t.completed,
            category: t.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskListResponseDto {
    pub tasks: Vec<TaskResponseDto>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskIdQuery {
    /// Task ID
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskCompletionQuery {
    /// Task ID
    pub id: String,

    /// New value of the completed flag (`true`/`false`, `1`/`0`, `on`/`off`, `yes`/`no`)
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
}

/// Confirmation returned by delete and status update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskMessageResponseDto {
    #[schema(example = "Task removed")]
    pub message: String,
    pub id: i32,
}
