use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Point-in-time summary over a user's todos
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsSummaryDto {
    /// Count of non-deleted todos
    pub total_todos: i64,
    /// Todos completed on the current calendar date
    pub today_completed: i64,
    /// Completions this ISO week / todos created this ISO week, 2 decimals
    pub week_completion_rate: f64,
}
