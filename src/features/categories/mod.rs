//! Categories group tasks.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/categoria/` | Create a category (form body) |
//! | GET | `/categorias` | List every category |
//! | DELETE | `/categoria?category_id=` | Delete a category without tasks |
//! | GET | `/categoria/tem_tarefas?category_id=` | Whether a category has tasks |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
