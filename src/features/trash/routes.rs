use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::trash::handlers;
use crate::features::trash::services::TrashService;

/// Create routes for the trash feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<TrashService>) -> Router {
    Router::new()
        .route("/api/trash", get(handlers::list_trash))
        .route("/api/trash/clear", delete(handlers::clear))
        .route("/api/trash/{id}/restore", post(handlers::restore))
        .route("/api/trash/{id}/purge", delete(handlers::purge))
        .with_state(service)
}
