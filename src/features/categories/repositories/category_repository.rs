use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::StoreError;
use crate::features::categories::models::Category;

/// Persistence operations for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category and return the stored row
    async fn insert(&self, description: &str) -> Result<Category, StoreError>;

    /// All categories, ordered by id
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    /// Delete the category unless a task still references it.
    ///
    /// Returns the number of deleted rows (0 or 1).
    async fn delete_unreferenced(&self, id: i32) -> Result<u64, StoreError>;
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, description: &str) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (description)
            VALUES ($1)
            RETURNING id, description
            "#,
        )
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, description
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn delete_unreferenced(&self, id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories c
            WHERE c.id = $1
              AND NOT EXISTS (SELECT 1 FROM tasks t WHERE t.category_id = c.id)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// These run against a real PostgreSQL server: `DATABASE_URL=... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::ensure_schema;
    use crate::features::tasks::models::NewTask;
    use crate::features::tasks::{PgTaskRepository, TaskRepository};
    use chrono::Utc;

    #[sqlx::test(migrations = false)]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_delete_is_blocked_while_a_task_references_the_category(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();
        let categories = PgCategoryRepository::new(pool.clone());
        let tasks = PgTaskRepository::new(pool);

        let work = categories.insert("Work").await.unwrap();
        let task = tasks
            .insert(NewTask {
                category_id: work.id,
                description: "Call client".to_string(),
                scheduled_date: Utc::now(),
                creation_date: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(categories.delete_unreferenced(work.id).await.unwrap(), 0);
        assert_eq!(categories.list().await.unwrap(), vec![work.clone()]);

        tasks.delete(task.id).await.unwrap();
        assert_eq!(categories.delete_unreferenced(work.id).await.unwrap(), 1);
        assert!(categories.list().await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_insert_accepts_empty_description(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();
        let categories = PgCategoryRepository::new(pool);

        let category = categories.insert("").await.unwrap();
        assert_eq!(category.description, "");
        assert_eq!(categories.delete_unreferenced(category.id + 1).await.unwrap(), 0);
    }
}
