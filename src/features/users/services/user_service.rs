use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::ProfileResponseDto;
use crate::features::users::models::User;

/// Service for user profile lookups
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's profile by id
    pub async fn get_profile(&self, user_id: Uuid) -> Result<ProfileResponseDto> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, avatar_url, password_hash, role, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user profile: {:?}", e);
            AppError::Database(e)
        })?;

        user.map(|u| u.into())
            .ok_or_else(|| AppError::NotFound("user_not_found".to_string()))
    }
}
