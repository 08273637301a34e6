use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum_test::TestServer;
use fake::faker::lorem::en::Words;
use fake::Fake;
use utoipa::OpenApi;

use crate::core::app::build_router;
use crate::core::error::StoreError;
use crate::core::openapi::ApiDoc;
use crate::features::categories::models::Category;
use crate::features::categories::{CategoryRepository, CategoryService};
use crate::features::tasks::models::{NewTask, Task};
use crate::features::tasks::{TaskRepository, TaskService};

struct StoredTask {
    category_id: i32,
    description: String,
    scheduled_date: chrono::DateTime<chrono::Utc>,
    creation_date: chrono::DateTime<chrono::Utc>,
    completed: bool,
}

#[derive(Default)]
struct State {
    categories: BTreeMap<i32, String>,
    tasks: BTreeMap<i32, StoredTask>,
    last_category_id: i32,
    last_task_id: i32,
    fail_next_write: bool,
    fail_next_read: bool,
}

impl State {
    fn take_write_failure(&mut self) -> Result<(), StoreError> {
        if std::mem::take(&mut self.fail_next_write) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn take_read_failure(&mut self) -> Result<(), StoreError> {
        if std::mem::take(&mut self.fail_next_read) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn joined(&self, id: i32, task: &StoredTask) -> Task {
        Task {
            id,
            category_id: task.category_id,
            description: task.description.clone(),
            scheduled_date: task.scheduled_date,
            creation_date: task.creation_date,
            completed: task.completed,
            category: self
                .categories
                .get(&task.category_id)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// In-memory store implementing both repositories.
///
/// Enforces the task → category foreign key, never reuses ids, and can be
/// told to fail the next read or write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn fail_next_write(&self) {
        self.lock().fail_next_write = true;
    }

    pub fn fail_next_read(&self) {
        self.lock().fail_next_read = true;
    }

    pub fn categories(&self) -> Vec<Category> {
        self.lock()
            .categories
            .iter()
            .map(|(id, description)| Category {
                id: *id,
                description: description.clone(),
            })
            .collect()
    }

    pub fn tasks(&self) -> Vec<Task> {
        let state = self.lock();
        let tasks: Vec<Task> = state
            .tasks
            .iter()
            .map(|(id, task)| state.joined(*id, task))
            .collect();
        tasks
    }

    pub fn insert_category(&self, description: &str) -> Result<Category, StoreError> {
        let mut state = self.lock();
        state.take_write_failure()?;
        state.last_category_id += 1;
        let id = state.last_category_id;
        state.categories.insert(id, description.to_string());
        Ok(Category {
            id,
            description: description.to_string(),
        })
    }

    pub fn insert_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut state = self.lock();
        state.take_write_failure()?;
        if !state.categories.contains_key(&task.category_id) {
            return Err(StoreError::Integrity("tasks_category_id_fkey".to_string()));
        }
        state.last_task_id += 1;
        let id = state.last_task_id;
        let stored = StoredTask {
            category_id: task.category_id,
            description: task.description,
            scheduled_date: task.scheduled_date,
            creation_date: task.creation_date,
            completed: false,
        };
        let joined = state.joined(id, &stored);
        state.tasks.insert(id, stored);
        Ok(joined)
    }

    /// Flip the flag directly, bypassing the service
    pub fn set_completed_flag(&self, id: i32, completed: bool) {
        if let Some(task) = self.lock().tasks.get_mut(&id) {
            task.completed = completed;
        }
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert(&self, description: &str) -> Result<Category, StoreError> {
        self.insert_category(description)
    }

    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        self.lock().take_read_failure()?;
        Ok(self.categories())
    }

    async fn delete_unreferenced(&self, id: i32) -> Result<u64, StoreError> {
        let mut state = self.lock();
        state.take_write_failure()?;
        if state.tasks.values().any(|t| t.category_id == id) {
            return Ok(0);
        }
        Ok(state.categories.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        self.insert_task(task)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.lock().take_read_failure()?;
        Ok(self.tasks())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, StoreError> {
        let mut state = self.lock();
        state.take_read_failure()?;
        let task = state.tasks.get(&id).map(|task| state.joined(id, task));
        Ok(task)
    }

    async fn delete(&self, id: i32) -> Result<u64, StoreError> {
        let mut state = self.lock();
        state.take_write_failure()?;
        Ok(state.tasks.remove(&id).map_or(0, |_| 1))
    }

    async fn set_completed(&self, id: i32, completed: bool) -> Result<u64, StoreError> {
        let mut state = self.lock();
        state.take_write_failure()?;
        match state.tasks.get_mut(&id) {
            Some(task) => {
                task.completed = completed;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count_by_category(&self, category_id: i32) -> Result<i64, StoreError> {
        let mut state = self.lock();
        state.take_read_failure()?;
        let count = state
            .tasks
            .values()
            .filter(|t| t.category_id == category_id)
            .count();
        Ok(count as i64)
    }
}

/// Full router backed by a fresh [`MemoryStore`]
pub fn test_server() -> (TestServer, MemoryStore) {
    let store = MemoryStore::new();
    let category_service = Arc::new(CategoryService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    ));
    let task_service = Arc::new(TaskService::new(Arc::new(store.clone())));

    let app = build_router(ApiDoc::openapi(), category_service, task_service);
    let server = TestServer::new(app).unwrap();
    (server, store)
}

/// Random lorem description no longer than `max_len` characters
pub fn fake_description(max_len: usize) -> String {
    let words: Vec<String> = Words(2..6).fake();
    words.join(" ").chars().take(max_len).collect()
}
