use std::sync::Arc;

use crate::core::error::{AppError, Result, StoreError};
use crate::features::categories::dtos::{
    CategoryListResponseDto, CategoryResponseDto, CreateCategoryDto, DeleteCategoryResponseDto,
};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::tasks::repositories::TaskRepository;
use crate::shared::constants::{
    CATEGORY_NOT_FOUND, CATEGORY_NOT_SAVED, CATEGORY_REMOVED, INTEGRITY_ERROR,
};

/// Service for category operations
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { categories, tasks }
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        tracing::debug!("Adding category: '{}'", dto.description);

        let category = self
            .categories
            .insert(&dto.description)
            .await
            .map_err(|e| match e {
                StoreError::Integrity(detail) => {
                    tracing::warn!(
                        "Failed to add category '{}': integrity violation ({})",
                        dto.description,
                        detail
                    );
                    AppError::Conflict(INTEGRITY_ERROR.to_string())
                }
                StoreError::Database(e) => {
                    tracing::warn!("Failed to add category '{}': {:?}", dto.description, e);
                    AppError::Validation(CATEGORY_NOT_SAVED.to_string())
                }
            })?;

        tracing::debug!("Added category #{}: '{}'", category.id, category.description);

        Ok(category.into())
    }

    /// List all categories
    pub async fn list(&self) -> Result<CategoryListResponseDto> {
        let categories = self.categories.list().await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::from(e)
        })?;

        tracing::debug!("{} categories found", categories.len());

        Ok(CategoryListResponseDto {
            categories: categories.into_iter().map(Into::into).collect(),
        })
    }

    /// Delete a category that no task references.
    ///
    /// A category still in use is reported exactly like a missing one.
    pub async fn delete(&self, id: i32) -> Result<DeleteCategoryResponseDto> {
        tracing::debug!("Deleting category #{}", id);

        let deleted = match self.categories.delete_unreferenced(id).await {
            Ok(count) => count,
            // A task inserted concurrently can still trip the foreign key
            Err(StoreError::Integrity(detail)) => {
                tracing::warn!("Category #{} is still referenced ({})", id, detail);
                0
            }
            Err(e) => {
                tracing::error!("Failed to delete category #{}: {:?}", id, e);
                return Err(e.into());
            }
        };

        if deleted == 0 {
            tracing::warn!("Failed to delete category #{}: {}", id, CATEGORY_NOT_FOUND);
            return Err(AppError::NotFound(CATEGORY_NOT_FOUND.to_string()));
        }

        tracing::debug!("Deleted category #{}", id);

        Ok(DeleteCategoryResponseDto {
            message: CATEGORY_REMOVED.to_string(),
            category_id: id,
        })
    }

    /// Whether at least one task belongs to the category
    pub async fn has_tasks(&self, category_id: i32) -> Result<bool> {
        tracing::debug!("Checking whether category #{} has tasks", category_id);

        let count = self
            .tasks
            .count_by_category(category_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to count tasks of category #{}: {:?}",
                    category_id,
                    e
                );
                AppError::from(e)
            })?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tasks::models::NewTask;
    use crate::shared::test_helpers::MemoryStore;
    use chrono::Utc;

    fn service(store: &MemoryStore) -> CategoryService {
        CategoryService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn dto(description: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let service = service(&store);

        let work = service.create(dto("Work")).await.unwrap();
        let home = service.create(dto("Home")).await.unwrap();

        assert_eq!(work.id, 1);
        assert_eq!(work.description, "Work");
        assert_eq!(home.id, 2);
    }

    #[tokio::test]
    async fn test_create_storage_failure_is_validation_error() {
        let store = MemoryStore::new();
        store.fail_next_write();

        let err = service(&store).create(dto("Work")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == CATEGORY_NOT_SAVED));
        assert!(store.categories().is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let service = service(&store);

        let first = service.create(dto("Work")).await.unwrap();
        service.delete(first.id).await.unwrap();
        let second = service.create(dto("Work")).await.unwrap();

        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_delete_referenced_category_is_not_found() {
        let store = MemoryStore::new();
        let service = service(&store);
        let category = service.create(dto("Work")).await.unwrap();
        store
            .insert_task(NewTask {
                category_id: category.id,
                description: "Call client".to_string(),
                scheduled_date: Utc::now(),
                creation_date: Utc::now(),
            })
            .unwrap();

        let err = service.delete(category.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == CATEGORY_NOT_FOUND));
        assert_eq!(store.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_has_tasks_for_unknown_category_is_false() {
        let store = MemoryStore::new();
        assert!(!service(&store).has_tasks(404).await.unwrap());
    }
}
