use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::tasks::{dtos as tasks_dtos, handlers as tasks_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Tasks
        tasks_handlers::create_task,
        tasks_handlers::list_tasks,
        tasks_handlers::get_task,
        tasks_handlers::delete_task,
        tasks_handlers::update_task,
        // Categories
        categories_handlers::create_category,
        categories_handlers::list_categories,
        categories_handlers::delete_category,
        categories_handlers::has_tasks,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Tasks
            tasks_dtos::CreateTaskDto,
            tasks_dtos::TaskResponseDto,
            tasks_dtos::TaskListResponseDto,
            tasks_dtos::TaskMessageResponseDto,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryListResponseDto,
            categories_dtos::DeleteCategoryResponseDto,
            categories_dtos::HasTasksDto,
            categories_dtos::HasTasksResponseDto,
        )
    ),
    tags(
        (name = "Tarefa", description = "Create, view, complete and remove tasks"),
        (name = "Categoria", description = "Create, view and remove categories"),
    ),
    info(
        title = "Task Board API",
        version = "1.0.0",
        description = "Tasks and categories management",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/tarefa/",
            "/tarefas",
            "/tarefa",
            "/categoria/",
            "/categorias",
            "/categoria",
            "/categoria/tem_tarefas",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("desc"));
    }
}
