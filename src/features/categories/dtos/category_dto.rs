use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::HEX_COLOR_REGEX;

/// Request DTO for creating a category
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be a hex color code"))]
    pub color: String,

    /// Display sort position (default: 0)
    #[serde(default)]
    pub display_order: i32,
}

/// Request DTO for updating a category.
/// Absent fields (and explicit nulls) leave the stored value unchanged.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be a hex color code"))]
    pub color: Option<String>,

    pub display_order: Option<i32>,
}

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub display_order: i32,
    pub is_system: bool,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            color: c.color,
            display_order: c.display_order,
            is_system: c.is_system,
        }
    }
}
