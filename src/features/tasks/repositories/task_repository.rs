use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::StoreError;
use crate::features::tasks::models::{NewTask, Task};

/// Persistence operations for tasks.
///
/// Every read returns the task joined with its category description.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task. An unknown `category_id` is an integrity violation.
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// All tasks, ordered by id
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, StoreError>;

    /// Returns the number of deleted rows
    async fn delete(&self, id: i32) -> Result<u64, StoreError>;

    /// Returns the number of updated rows
    async fn set_completed(&self, id: i32, completed: bool) -> Result<u64, StoreError>;

    async fn count_by_category(&self, category_id: i32) -> Result<i64, StoreError>;
}

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            WITH inserted AS (
                INSERT INTO tasks (category_id, description, scheduled_date, creation_date, completed)
                VALUES ($1, $2, $3, $4, FALSE)
                RETURNING id, category_id, description, scheduled_date, creation_date, completed
            )
            SELECT i.id, i.category_id, i.description, i.scheduled_date, i.creation_date,
                   i.completed, c.description AS category
            FROM inserted i
            JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(task.category_id)
        .bind(&task.description)
        .bind(task.scheduled_date)
        .bind(task.creation_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.category_id, t.description, t.scheduled_date, t.creation_date,
                   t.completed, c.description AS category
            FROM tasks t
            JOIN categories c ON c.id = t.category_id
            ORDER BY t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.category_id, t.description, t.scheduled_date, t.creation_date,
                   t.completed, c.description AS category
            FROM tasks t
            JOIN categories c ON c.id = t.category_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn set_completed(&self, id: i32, completed: bool) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE tasks SET completed = $2 WHERE id = $1")
            .bind(id)
            .bind(completed)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_by_category(&self, category_id: i32) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
