use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::todos::dtos::TodoResponseDto;
use crate::features::todos::models::Todo;
use crate::features::todos::services::todo_service::TODO_COLUMNS;
use crate::shared::types::PaginationQuery;

/// Service for the soft-deleted todo bin: listing, restore, purge
pub struct TrashService {
    pool: PgPool,
}

impl TrashService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's soft-deleted todos, most recently deleted first
    pub async fn list(
        &self,
        user_id: Uuid,
        page: &PaginationQuery,
    ) -> Result<(Vec<TodoResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND is_deleted = TRUE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count trashed todos: {:?}", e);
            AppError::Database(e)
        })?;

        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos \
             WHERE user_id = $1 AND is_deleted = TRUE \
             ORDER BY deleted_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list trashed todos: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((todos.into_iter().map(|t| t.into()).collect(), total))
    }

    /// Restore a soft-deleted todo. Restoring a todo that is not in the
    /// trash is a not-found condition, never a silent success.
    pub async fn restore(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE todos SET is_deleted = FALSE, deleted_at = NULL, updated_at = now() \
             WHERE id = $1 AND user_id = $2 AND is_deleted = TRUE",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to restore todo: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("todo_not_found".to_string()));
        }

        Ok(())
    }

    /// Permanently delete a soft-deleted todo. Irreversible; no tombstone.
    /// Purging a todo that is not in the trash is a not-found condition.
    pub async fn purge(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM todos WHERE id = $1 AND user_id = $2 AND is_deleted = TRUE",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to purge todo: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("todo_not_found".to_string()));
        }

        tracing::info!("Todo purged: id={}, user={}", id, user_id);

        Ok(())
    }

    /// Permanently delete everything in the user's trash
    pub async fn clear(&self, user_id: Uuid) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM todos WHERE user_id = $1 AND is_deleted = TRUE")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to clear trash: {:?}", e);
                    AppError::Database(e)
                })?;

        tracing::info!(
            "Trash cleared: user={}, purged={}",
            user_id,
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }
}
