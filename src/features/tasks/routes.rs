use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::tasks::handlers;
use crate::features::tasks::services::TaskService;

/// Create routes for the tasks feature
pub fn routes(service: Arc<TaskService>) -> Router {
    Router::new()
        .route("/tarefa/", post(handlers::create_task))
        .route(
            "/tarefa",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tarefas", get(handlers::list_tasks))
        .with_state(service)
}
