use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::tasks::{routes as tasks_routes, TaskService};

const OPENAPI_JSON: &str = "/api-docs/openapi.json";

const DOCS_CHOOSER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Task Board API documentation</title>
</head>
<body>
  <h1>Task Board API</h1>
  <p>Pick a documentation style:</p>
  <ul>
    <li><a href="/swagger-ui/">Swagger</a></li>
    <li><a href="/redoc">Redoc</a></li>
    <li><a href="/rapidoc">RapiDoc</a></li>
  </ul>
  <p>Raw document: <a href="/api-docs/openapi.json">openapi.json</a></p>
</body>
</html>
"#;

/// Landing page: send visitors to the documentation chooser
async fn home() -> Redirect {
    Redirect::to("/openapi")
}

async fn docs_chooser() -> Html<&'static str> {
    Html(DOCS_CHOOSER)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble every route (docs, health, tasks, categories) without middleware
pub fn build_router(
    openapi: utoipa::openapi::OpenApi,
    category_service: Arc<CategoryService>,
    task_service: Arc<TaskService>,
) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/openapi", get(docs_chooser))
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON, openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
        .merge(tasks_routes::routes(task_service))
        .merge(categories_routes::routes(category_service))
}
