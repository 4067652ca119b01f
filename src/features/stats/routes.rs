use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::stats::handlers;
use crate::features::stats::services::StatsService;

/// Create routes for the stats feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<StatsService>) -> Router {
    Router::new()
        .route("/api/stats/summary", get(handlers::summary))
        .with_state(service)
}
