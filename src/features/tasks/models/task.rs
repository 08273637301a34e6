use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Task row joined with the description of its category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Task {
    pub id: i32,
    pub category_id: i32,
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    pub creation_date: DateTime<Utc>,
    pub completed: bool,
    pub category: String,
}

/// Values for a task insert. New tasks always start uncompleted.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub category_id: i32,
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    pub creation_date: DateTime<Utc>,
}
