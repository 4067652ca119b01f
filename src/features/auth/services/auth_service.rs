use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, RegisterRequestDto, RegisteredUserDto,
};
use crate::features::auth::services::password::{hash_password, verify_password};
use crate::features::auth::services::TokenService;
use crate::features::users::models::User;
use crate::shared::constants::ROLE_USER;

/// Service for registration and credential login
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Register a new user. Duplicate usernames are a conflict.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<RegisteredUserDto> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE username = $1")
            .bind(&dto.username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check username availability: {:?}", e);
                AppError::Database(e)
            })?;

        if existing.is_some() {
            return Err(AppError::Conflict("username_exists".to_string()));
        }

        let password_hash = hash_password(&dto.password)?;
        let id = Uuid::new_v4();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, avatar_url, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(ROLE_USER)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User registered: id={}, username={}", user.id, user.username);

        Ok(RegisteredUserDto {
            id: user.id,
            username: user.username,
        })
    }

    /// Login with username and password, issuing an access token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, avatar_url, password_hash, role, created_at, updated_at \
             FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user for login: {:?}", e);
            AppError::Database(e)
        })?;

        // Same rejection for unknown user and bad password
        let user = match user {
            Some(u) if verify_password(&dto.password, &u.password_hash) => u,
            _ => return Err(AppError::Unauthorized("invalid_credentials".to_string())),
        };

        let (access_token, expires_in) = self.tokens.issue(user.id)?;

        Ok(AuthResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: AuthUserDto {
                id: user.id,
                username: user.username,
                avatar_url: user.avatar_url.unwrap_or_default(),
            },
        })
    }
}
