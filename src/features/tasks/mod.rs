//! Tasks, each belonging to exactly one category.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/tarefa/` | Create a task (form body) |
//! | GET | `/tarefas` | List every task with its category |
//! | GET | `/tarefa?id=` | Fetch one task |
//! | DELETE | `/tarefa?id=` | Delete a task |
//! | PUT | `/tarefa?id=&completed=` | Set the completed flag |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgTaskRepository, TaskRepository};
pub use services::TaskService;
