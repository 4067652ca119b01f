use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::categories::{dtos as category_dtos, handlers as category_handlers};
use crate::features::stats::{dtos as stats_dtos, handlers as stats_handlers};
use crate::features::todos::{dtos as todo_dtos, handlers as todo_handlers};
use crate::features::trash::handlers as trash_handlers;
use crate::features::users::{dtos as users_dtos, handlers::profile_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        // Users
        profile_handler::me,
        // Categories
        category_handlers::list_categories,
        category_handlers::create_category,
        category_handlers::update_category,
        category_handlers::delete_category,
        // Todos
        todo_handlers::list_todos,
        todo_handlers::create_todo,
        todo_handlers::update_todo,
        todo_handlers::delete_todo,
        todo_handlers::batch_status,
        todo_handlers::clear_done,
        // Trash
        trash_handlers::list_trash,
        trash_handlers::restore,
        trash_handlers::purge,
        trash_handlers::clear,
        // Stats
        stats_handlers::summary,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::RegisteredUserDto,
            auth_dtos::AuthResponseDto,
            auth_dtos::AuthUserDto,
            ApiResponse<auth_dtos::RegisteredUserDto>,
            ApiResponse<auth_dtos::AuthResponseDto>,
            // Users
            users_dtos::ProfileResponseDto,
            ApiResponse<users_dtos::ProfileResponseDto>,
            // Categories
            category_dtos::CreateCategoryDto,
            category_dtos::UpdateCategoryDto,
            category_dtos::CategoryResponseDto,
            ApiResponse<category_dtos::CategoryResponseDto>,
            ApiResponse<Vec<category_dtos::CategoryResponseDto>>,
            // Todos
            todo_dtos::CreateTodoDto,
            todo_dtos::UpdateTodoDto,
            todo_dtos::TodoBatchStatusDto,
            todo_dtos::TodoResponseDto,
            ApiResponse<todo_dtos::TodoResponseDto>,
            ApiResponse<Vec<todo_dtos::TodoResponseDto>>,
            // Stats
            stats_dtos::StatsSummaryDto,
            ApiResponse<stats_dtos::StatsSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User profile management"),
        (name = "categories", description = "Todo categories"),
        (name = "todos", description = "Todo items with filtering, sorting and pagination"),
        (name = "trash", description = "Soft-deleted todos (restore, purge)"),
        (name = "stats", description = "Completion statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Taskbox API",
        version = "0.1.0",
        description = "API documentation for Taskbox",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
