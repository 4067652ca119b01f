use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, put},
    Router,
};

use crate::features::todos::handlers;
use crate::features::todos::services::TodoService;

/// Create routes for the todos feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<TodoService>) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/api/todos/clear-done", delete(handlers::clear_done))
        .route("/api/todos/batch/status", patch(handlers::batch_status))
        .route(
            "/api/todos/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .with_state(service)
}
