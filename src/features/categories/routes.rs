use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categoria/", post(handlers::create_category))
        .route("/categoria", delete(handlers::delete_category))
        .route("/categorias", get(handlers::list_categories))
        .route("/categoria/tem_tarefas", get(handlers::has_tasks))
        .with_state(service)
}
