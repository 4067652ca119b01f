use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::stats::dtos::StatsSummaryDto;
use crate::features::stats::services::StatsService;
use crate::shared::types::ApiResponse;

/// Get the current user's summary statistics
#[utoipa::path(
    get,
    path = "/api/stats/summary",
    responses(
        (status = 200, description = "Summary statistics", body = ApiResponse<StatsSummaryDto>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "stats"
)]
pub async fn summary(
    State(service): State<Arc<StatsService>>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<StatsSummaryDto>>> {
    let summary = service.summary(user.id).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
