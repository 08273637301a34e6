use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, AppQuery};
use crate::features::categories::dtos::{
    CategoryIdQuery, CategoryListResponseDto, CategoryResponseDto, CreateCategoryDto,
    DeleteCategoryResponseDto, HasTasksResponseDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::constants::CATEGORY_NOT_FOUND;
use crate::shared::params::{decode_id_param, parse_id};
use crate::shared::types::ErrorResponse;

/// Add a new category
#[utoipa::path(
    post,
    path = "/categoria/",
    request_body(content = CreateCategoryDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Category created", body = CategoryResponseDto),
        (status = 400, description = "Invalid input or category could not be saved", body = ErrorResponse),
        (status = 409, description = "Integrity error", body = ErrorResponse)
    ),
    tag = "Categoria"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppForm(dto): AppForm<CreateCategoryDto>,
) -> Result<Json<CategoryResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok(Json(category))
}

/// List every registered category
#[utoipa::path(
    get,
    path = "/categorias",
    responses(
        (status = 200, description = "List of categories", body = CategoryListResponseDto),
    ),
    tag = "Categoria"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<CategoryListResponseDto>> {
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Delete a category permanently
///
/// Only categories without tasks can be deleted; a category that still has
/// tasks is reported as not found.
#[utoipa::path(
    delete,
    path = "/categoria",
    params(CategoryIdQuery),
    responses(
        (status = 200, description = "Category removed", body = DeleteCategoryResponseDto),
        (status = 404, description = "Category not found or still has tasks", body = ErrorResponse)
    ),
    tag = "Categoria"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<CategoryIdQuery>,
) -> Result<Json<DeleteCategoryResponseDto>> {
    let raw_id = decode_id_param(&query.category_id);
    let id = parse_id(&raw_id).ok_or_else(|| {
        tracing::warn!("Failed to delete category '{}': not an id", raw_id);
        AppError::NotFound(CATEGORY_NOT_FOUND.to_string())
    })?;

    let response = service.delete(id).await?;
    Ok(Json(response))
}

/// Check whether a category has tasks
#[utoipa::path(
    get,
    path = "/categoria/tem_tarefas",
    params(CategoryIdQuery),
    responses(
        (status = 200, description = "Whether the category has tasks", body = HasTasksResponseDto),
    ),
    tag = "Categoria"
)]
pub async fn has_tasks(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<CategoryIdQuery>,
) -> Result<Json<HasTasksResponseDto>> {
    let has_tasks = match parse_id(&query.category_id) {
        Some(id) => service.has_tasks(id).await?,
        None => false,
    };

    Ok(Json(has_tasks.into()))
}
