// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

/// Returned when a create hits a unique or foreign key constraint
pub const INTEGRITY_ERROR: &str = "Integrity error";

pub const TASK_NOT_FOUND: &str = "Task not found";

pub const TASK_NOT_SAVED: &str = "Could not save new task";

pub const TASK_REMOVED: &str = "Task removed";

pub const TASK_STATUS_UPDATED: &str = "Task status updated";

/// Also returned when the category is still referenced by a task
pub const CATEGORY_NOT_FOUND: &str = "Category not found";

pub const CATEGORY_NOT_SAVED: &str = "Could not save new category";

pub const CATEGORY_REMOVED: &str = "Category removed";

