use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::todos::models::Todo;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, PRIORITY_MEDIUM, STATUS_TODO};

/// Request DTO for creating a todo
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTodoDto {
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: String,

    #[validate(length(max = 512, message = "Description must be at most 512 characters"))]
    pub description: Option<String>,

    #[serde(default = "default_priority")]
    pub priority: String,

    #[serde(default = "default_status")]
    pub status: String,

    pub due_date: Option<NaiveDate>,
    pub remind_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
}

fn default_priority() -> String {
    PRIORITY_MEDIUM.to_string()
}

fn default_status() -> String {
    STATUS_TODO.to_string()
}

/// Request DTO for partially updating a todo.
///
/// Absent fields (and explicit nulls) leave the stored value unchanged;
/// there is no way to clear a field through this payload. `completed_at`
/// is not patchable: it is stamped by the service on the first transition
/// to "done" and never moved.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoDto {
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 512, message = "Description must be at most 512 characters"))]
    pub description: Option<String>,

    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub remind_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
}

/// Request DTO for updating the status of a batch of todos
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TodoBatchStatusDto {
    #[validate(length(min = 1, message = "At least one id is required"))]
    pub ids: Vec<Uuid>,

    #[validate(length(min = 1, max = 16, message = "Status must be 1-16 characters"))]
    pub status: String,
}

/// Query parameters for listing todos
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListTodosQuery {
    /// Exact status match
    pub status: Option<String>,
    /// Exact category match
    pub category_id: Option<Uuid>,
    /// Exact priority match
    pub priority: Option<String>,
    /// Case-insensitive substring match against title or description
    pub keyword: Option<String>,
    /// Due window: today | week | overdue | none (unknown values ignored)
    pub due: Option<String>,
    /// Sort column: created_at (default) | due_date | priority
    pub sort_by: Option<String>,
    /// Sort direction: asc | desc (default)
    pub sort_order: Option<String>,
    /// Include soft-deleted todos in the result
    #[serde(default)]
    pub include_deleted: bool,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Response DTO for a todo
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub remind_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponseDto {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            priority: t.priority,
            status: t.status,
            due_date: t.due_date,
            remind_at: t.remind_at,
            category_id: t.category_id,
            tags: t.tags.map(|j| j.0),
            is_deleted: t.is_deleted,
            deleted_at: t.deleted_at,
            completed_at: t.completed_at,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
