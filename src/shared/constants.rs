/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Regular user role - owns and manages their own todos and categories
pub const ROLE_USER: &str = "user";

/// Super admin role - reserved for operational access
#[allow(dead_code)]
pub const ROLE_SUPERADMIN: &str = "superadmin";

// =============================================================================
// STATUS CONSTANTS
// =============================================================================

/// The status literal with completion semantics. Status is otherwise an open
/// string, but the first transition to this value stamps `completed_at`.
pub const STATUS_DONE: &str = "done";

/// Default status for newly created todos
pub const STATUS_TODO: &str = "todo";

/// Default priority for newly created todos
pub const PRIORITY_MEDIUM: &str = "medium";
