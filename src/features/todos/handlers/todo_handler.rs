use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::todos::dtos::{
    CreateTodoDto, ListTodosQuery, TodoBatchStatusDto, TodoResponseDto, UpdateTodoDto,
};
use crate::features::todos::services::TodoService;
use crate::shared::types::{ApiResponse, Meta};

/// List todos with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Page of todos", body = ApiResponse<Vec<TodoResponseDto>>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn list_todos(
    State(service): State<Arc<TodoService>>,
    user: AuthenticatedUser,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<ApiResponse<Vec<TodoResponseDto>>>> {
    let (items, total) = service.list(user.id, &query).await?;
    let meta = Meta {
        page: query.page.max(1),
        page_size: query.page_size.clamp(1, crate::shared::constants::MAX_PAGE_SIZE),
        total,
    };
    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoDto,
    responses(
        (status = 201, description = "Todo created", body = ApiResponse<TodoResponseDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn create_todo(
    State(service): State<Arc<TodoService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateTodoDto>,
) -> Result<(StatusCode, Json<ApiResponse<TodoResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let todo = service.create(user.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(todo), None, None)),
    ))
}

/// Partially update a todo
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo id")),
    request_body = UpdateTodoDto,
    responses(
        (status = 200, description = "Todo updated", body = ApiResponse<TodoResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Todo not found")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn update_todo(
    State(service): State<Arc<TodoService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateTodoDto>,
) -> Result<Json<ApiResponse<TodoResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let todo = service.update(user.id, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(todo), None, None)))
}

/// Soft-delete a todo (moves it to the trash)
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo moved to trash"),
        (status = 404, description = "Todo not found")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn delete_todo(
    State(service): State<Arc<TodoService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.soft_delete(user.id, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Apply one status to a batch of todos.
/// Ids not owned by the caller are silently skipped.
#[utoipa::path(
    patch,
    path = "/api/todos/batch/status",
    request_body = TodoBatchStatusDto,
    responses(
        (status = 200, description = "Batch status applied"),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn batch_status(
    State(service): State<Arc<TodoService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<TodoBatchStatusDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.batch_status(user.id, dto).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Soft-delete all of the caller's done todos
#[utoipa::path(
    delete,
    path = "/api/todos/clear-done",
    responses(
        (status = 200, description = "Done todos moved to trash")
    ),
    security(("bearer_auth" = [])),
    tag = "todos"
)]
pub async fn clear_done(
    State(service): State<Arc<TodoService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    service.clear_done(user.id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
