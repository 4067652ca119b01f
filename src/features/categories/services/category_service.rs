use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;

const CATEGORY_COLUMNS: &str =
    "id, user_id, name, color, display_order, is_system, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's categories, ordered by display position
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE user_id = $1 ORDER BY display_order ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Create a category. Duplicate names per user are a conflict.
    pub async fn create(&self, user_id: Uuid, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM categories WHERE user_id = $1 AND name = $2",
        )
        .bind(user_id)
        .bind(&dto.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check category name: {:?}", e);
            AppError::Database(e)
        })?;

        if existing.is_some() {
            return Err(AppError::Conflict("category_exists".to_string()));
        }

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (id, user_id, name, color, display_order, is_system)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&dto.name)
        .bind(&dto.color)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category created: id={}, user={}", category.id, user_id);

        Ok(category.into())
    }

    /// Partially update a category. Absent fields are left unchanged.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<CategoryResponseDto> {
        let mut category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("category_not_found".to_string()))?;

        if let Some(name) = dto.name {
            category.name = name;
        }
        if let Some(color) = dto.color {
            category.color = color;
        }
        if let Some(display_order) = dto.display_order {
            category.display_order = display_order;
        }

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $1, color = $2, display_order = $3, updated_at = now()
            WHERE id = $4 AND user_id = $5
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&category.name)
        .bind(&category.color)
        .bind(category.display_order)
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(category.into())
    }

    /// Delete a category, first clearing the reference on every todo that
    /// points at it. Referencing todos are otherwise untouched and never
    /// deleted. Both steps run in one transaction.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM categories WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category for delete: {:?}", e);
            AppError::Database(e)
        })?;

        if exists.is_none() {
            return Err(AppError::NotFound("category_not_found".to_string()));
        }

        let cleared = sqlx::query(
            "UPDATE todos SET category_id = NULL WHERE user_id = $1 AND category_id = $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to clear category references: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit category delete: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Category deleted: id={}, user={}, todos cleared={}",
            id,
            user_id,
            cleared.rows_affected()
        );

        Ok(())
    }
}
