use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::Category;

/// Form body for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(max = 50, message = "Description must be at most 50 characters"))]
    #[schema(example = "Work", max_length = 50)]
    pub description: String,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    #[schema(example = "Work")]
    pub description: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            description: c.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponseDto {
    pub categories: Vec<CategoryResponseDto>,
}

/// Query params addressing a single category.
///
/// The id stays a string so the delete path can decode it before parsing.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryIdQuery {
    /// Category ID
    pub category_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCategoryResponseDto {
    #[schema(example = "Category removed")]
    pub message: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HasTasksDto {
    pub has_tasks: bool,
}

/// Wrapper kept for compatibility with existing clients: `{has_tasks: {has_tasks}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HasTasksResponseDto {
    pub has_tasks: HasTasksDto,
}

impl From<bool> for HasTasksResponseDto {
    fn from(has_tasks: bool) -> Self {
        Self {
            has_tasks: HasTasksDto { has_tasks },
        }
    }
}
