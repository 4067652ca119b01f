use chrono::{DateTime, Local, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::todos::dtos::{
    CreateTodoDto, ListTodosQuery, TodoBatchStatusDto, TodoResponseDto, UpdateTodoDto,
};
use crate::features::todos::models::Todo;
use crate::features::todos::services::todo_query::{
    push_filters, push_order_by, SortBy, SortOrder, TodoFilter,
};
use crate::shared::constants::{MAX_PAGE_SIZE, STATUS_DONE};

pub(crate) const TODO_COLUMNS: &str = "id, user_id, title, description, priority, status, \
     due_date, remind_at, category_id, tags, is_deleted, deleted_at, completed_at, \
     created_at, updated_at";

/// Service for todo operations
pub struct TodoService {
    pool: PgPool,
}

impl TodoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List todos matching the filter set. Returns the ordered page plus the
    /// total count of matching rows before pagination. A page past the end
    /// yields an empty list with the correct total.
    pub async fn list(
        &self,
        user_id: Uuid,
        query: &ListTodosQuery,
    ) -> Result<(Vec<TodoResponseDto>, i64)> {
        let filter = TodoFilter::from_query(query);
        let today = Local::now().date_naive();

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        push_filters(&mut count_qb, user_id, &filter, today);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count todos: {:?}", e);
                AppError::Database(e)
            })?;

        let limit = query.page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (query.page.max(1) - 1) * limit;

        let mut qb = QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos"));
        push_filters(&mut qb, user_id, &filter, today);
        push_order_by(
            &mut qb,
            SortBy::parse(query.sort_by.as_deref()),
            SortOrder::parse(query.sort_order.as_deref()),
        );
        qb.push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let todos: Vec<Todo> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list todos: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((todos.into_iter().map(|t| t.into()).collect(), total))
    }

    /// Create a todo owned by the user
    pub async fn create(&self, user_id: Uuid, dto: CreateTodoDto) -> Result<TodoResponseDto> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            INSERT INTO todos (
                id, user_id, title, description, priority, status,
                due_date, remind_at, category_id, tags
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.priority)
        .bind(&dto.status)
        .bind(dto.due_date)
        .bind(dto.remind_at)
        .bind(dto.category_id)
        .bind(dto.tags.map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create todo: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Todo created: id={}, user={}", todo.id, user_id);

        Ok(todo.into())
    }

    /// Partially update a todo. Present fields are applied; absent fields
    /// (and explicit nulls) are left unchanged. The first transition to
    /// "done" stamps `completed_at`; later edits never move it.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        dto: UpdateTodoDto,
    ) -> Result<TodoResponseDto> {
        let mut todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get todo: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("todo_not_found".to_string()))?;

        apply_patch(&mut todo, dto, Utc::now());

        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            UPDATE todos SET
                title = $1, description = $2, priority = $3, status = $4,
                due_date = $5, remind_at = $6, category_id = $7, tags = $8,
                completed_at = $9, updated_at = now()
            WHERE id = $10 AND user_id = $11
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(&todo.priority)
        .bind(&todo.status)
        .bind(todo.due_date)
        .bind(todo.remind_at)
        .bind(todo.category_id)
        .bind(&todo.tags)
        .bind(todo.completed_at)
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update todo: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(todo.into())
    }

    /// Soft-delete a todo. Re-deleting an already-deleted todo refreshes
    /// its deletion timestamp but is otherwise a no-op.
    pub async fn soft_delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE todos SET is_deleted = TRUE, deleted_at = now(), updated_at = now() \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to soft-delete todo: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("todo_not_found".to_string()));
        }

        Ok(())
    }

    /// Apply one status to a batch of todos in a single statement. Ids not
    /// owned by the user are silently skipped. The completion stamp follows
    /// the same first-transition rule as single updates.
    pub async fn batch_status(&self, user_id: Uuid, dto: TodoBatchStatusDto) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE todos SET status = $1, \
             completed_at = CASE WHEN $1 = $2 AND completed_at IS NULL THEN now() \
                                 ELSE completed_at END, \
             updated_at = now() \
             WHERE user_id = $3 AND id = ANY($4)",
        )
        .bind(&dto.status)
        .bind(STATUS_DONE)
        .bind(user_id)
        .bind(&dto.ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to batch-update todo status: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }

    /// Bulk soft-delete of all the user's non-deleted done todos
    pub async fn clear_done(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE todos SET is_deleted = TRUE, deleted_at = now(), updated_at = now() \
             WHERE user_id = $1 AND status = $2 AND is_deleted = FALSE",
        )
        .bind(user_id)
        .bind(STATUS_DONE)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to clear done todos: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }
}

/// Apply a sparse patch to a todo in memory.
///
/// `completed_at` records the FIRST transition to "done": it is stamped when
/// the patched status lands on "done" while unset, and deliberately kept when
/// the status later moves away from "done" or back again.
fn apply_patch(todo: &mut Todo, dto: UpdateTodoDto, now: DateTime<Utc>) {
    if let Some(title) = dto.title {
        todo.title = title;
    }
    if let Some(description) = dto.description {
        todo.description = Some(description);
    }
    if let Some(priority) = dto.priority {
        todo.priority = priority;
    }
    if let Some(status) = dto.status {
        todo.status = status;
    }
    if let Some(due_date) = dto.due_date {
        todo.due_date = Some(due_date);
    }
    if let Some(remind_at) = dto.remind_at {
        todo.remind_at = Some(remind_at);
    }
    if let Some(category_id) = dto.category_id {
        todo.category_id = Some(category_id);
    }
    if let Some(tags) = dto.tags {
        todo.tags = Some(Json(tags));
    }

    if todo.status == STATUS_DONE && todo.completed_at.is_none() {
        todo.completed_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixture() -> Todo {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        Todo {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "write report".to_string(),
            description: None,
            priority: "medium".to_string(),
            status: "todo".to_string(),
            due_date: None,
            remind_at: None,
            category_id: None,
            tags: None,
            is_deleted: false,
            deleted_at: None,
            completed_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_absent_fields_left_unchanged() {
        let mut todo = fixture();
        apply_patch(&mut todo, UpdateTodoDto::default(), Utc::now());

        assert_eq!(todo.title, "write report");
        assert_eq!(todo.status, "todo");
        assert_eq!(todo.priority, "medium");
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_present_fields_applied() {
        let mut todo = fixture();
        let patch = UpdateTodoDto {
            title: Some("write quarterly report".to_string()),
            priority: Some("high".to_string()),
            ..UpdateTodoDto::default()
        };
        apply_patch(&mut todo, patch, Utc::now());

        assert_eq!(todo.title, "write quarterly report");
        assert_eq!(todo.priority, "high");
        // untouched field
        assert_eq!(todo.status, "todo");
    }

    #[test]
    fn test_done_stamps_completed_at_once() {
        let mut todo = fixture();
        let first = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        apply_patch(
            &mut todo,
            UpdateTodoDto {
                status: Some("done".to_string()),
                ..UpdateTodoDto::default()
            },
            first,
        );
        assert_eq!(todo.completed_at, Some(first));

        // Moving away from done keeps the original stamp
        apply_patch(
            &mut todo,
            UpdateTodoDto {
                status: Some("doing".to_string()),
                ..UpdateTodoDto::default()
            },
            Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap(),
        );
        assert_eq!(todo.status, "doing");
        assert_eq!(todo.completed_at, Some(first));

        // Completing again does not re-stamp
        apply_patch(
            &mut todo,
            UpdateTodoDto {
                status: Some("done".to_string()),
                ..UpdateTodoDto::default()
            },
            Utc.with_ymd_and_hms(2024, 1, 4, 10, 0, 0).unwrap(),
        );
        assert_eq!(todo.completed_at, Some(first));
    }

    #[test]
    fn test_non_status_edit_while_done_keeps_stamp() {
        let mut todo = fixture();
        let first = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        apply_patch(
            &mut todo,
            UpdateTodoDto {
                status: Some("done".to_string()),
                ..UpdateTodoDto::default()
            },
            first,
        );

        apply_patch(
            &mut todo,
            UpdateTodoDto {
                title: Some("renamed".to_string()),
                ..UpdateTodoDto::default()
            },
            Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
        );
        assert_eq!(todo.title, "renamed");
        assert_eq!(todo.completed_at, Some(first));
    }

    #[test]
    fn test_creating_done_like_patch_on_open_status_strings() {
        // status is an open string: arbitrary values are accepted and do
        // not stamp completion
        let mut todo = fixture();
        apply_patch(
            &mut todo,
            UpdateTodoDto {
                status: Some("blocked".to_string()),
                ..UpdateTodoDto::default()
            },
            Utc::now(),
        );
        assert_eq!(todo.status, "blocked");
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_tags_replaced_wholesale() {
        let mut todo = fixture();
        apply_patch(
            &mut todo,
            UpdateTodoDto {
                tags: Some(vec!["work".to_string(), "urgent".to_string()]),
                ..UpdateTodoDto::default()
            },
            Utc::now(),
        );
        assert_eq!(
            todo.tags.as_ref().map(|j| j.0.clone()),
            Some(vec!["work".to_string(), "urgent".to_string()])
        );
    }
}
