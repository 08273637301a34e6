pub mod task_repository;

pub use task_repository::{PgTaskRepository, TaskRepository};
