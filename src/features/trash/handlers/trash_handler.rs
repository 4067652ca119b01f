use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::todos::dtos::TodoResponseDto;
use crate::features::trash::services::TrashService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List the trash (soft-deleted todos), most recently deleted first
#[utoipa::path(
    get,
    path = "/api/trash",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of trashed todos", body = ApiResponse<Vec<TodoResponseDto>>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "trash"
)]
pub async fn list_trash(
    State(service): State<Arc<TrashService>>,
    user: AuthenticatedUser,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<TodoResponseDto>>>> {
    let (items, total) = service.list(user.id, &page).await?;
    let meta = Meta {
        page: page.page(),
        page_size: page.limit(),
        total,
    };
    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

/// Restore a todo from the trash
#[utoipa::path(
    post,
    path = "/api/trash/{id}/restore",
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo restored"),
        (status = 404, description = "Todo not found in trash")
    ),
    security(("bearer_auth" = [])),
    tag = "trash"
)]
pub async fn restore(
    State(service): State<Arc<TrashService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.restore(user.id, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Permanently delete a todo from the trash
#[utoipa::path(
    delete,
    path = "/api/trash/{id}/purge",
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo permanently deleted"),
        (status = 404, description = "Todo not found in trash")
    ),
    security(("bearer_auth" = [])),
    tag = "trash"
)]
pub async fn purge(
    State(service): State<Arc<TrashService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.purge(user.id, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Permanently delete everything in the trash
#[utoipa::path(
    delete,
    path = "/api/trash/clear",
    responses(
        (status = 200, description = "Trash emptied")
    ),
    security(("bearer_auth" = [])),
    tag = "trash"
)]
pub async fn clear(
    State(service): State<Arc<TrashService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    service.clear(user.id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
