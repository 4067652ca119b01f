//! Compiles loose filter/sort parameters into SQL over the todos relation.
//!
//! All predicates are AND-combined; optional conditions are only emitted
//! when present. Unrecognized `due`, `sort_by` and `sort_order` values fail
//! open (no constraint / default ordering) rather than erroring.

use chrono::{Days, NaiveDate};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::features::todos::dtos::ListTodosQuery;
use crate::features::todos::models::Priority;

/// Due-date window filter, parsed from the wire value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWindow {
    /// due_date is exactly today
    Today,
    /// due_date within [today, today + 7 days], both ends inclusive
    Week,
    /// due_date strictly before today
    Overdue,
    /// due_date is absent
    None,
}

impl DueWindow {
    /// Fail-open parse: unknown values mean no due filter
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "today" => Some(DueWindow::Today),
            "week" => Some(DueWindow::Week),
            "overdue" => Some(DueWindow::Overdue),
            "none" => Some(DueWindow::None),
            _ => Option::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    CreatedAt,
    DueDate,
    Priority,
}

impl SortBy {
    /// Fail-open parse, defaulting to created_at
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("due_date") => SortBy::DueDate,
            Some("priority") => SortBy::Priority,
            _ => SortBy::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Fail-open parse, defaulting to desc
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter set compiled from a list request
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
    pub priority: Option<String>,
    pub keyword: Option<String>,
    pub due: Option<DueWindow>,
    pub include_deleted: bool,
}

impl TodoFilter {
    pub fn from_query(query: &ListTodosQuery) -> Self {
        Self {
            status: query.status.clone(),
            category_id: query.category_id,
            priority: query.priority.clone(),
            keyword: query.keyword.clone(),
            due: DueWindow::parse(query.due.as_deref()),
            include_deleted: query.include_deleted,
        }
    }
}

/// Last day of the inclusive week due-window starting at `today`
pub fn week_due_end(today: NaiveDate) -> NaiveDate {
    today + Days::new(7)
}

/// Append the WHERE clause for the filter set. Ownership always applies;
/// soft-deleted rows are excluded unless explicitly requested.
pub fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    user_id: Uuid,
    filter: &TodoFilter,
    today: NaiveDate,
) {
    qb.push(" WHERE user_id = ").push_bind(user_id);

    if !filter.include_deleted {
        qb.push(" AND is_deleted = FALSE");
    }

    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status.clone());
    }

    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }

    if let Some(priority) = &filter.priority {
        qb.push(" AND priority = ").push_bind(priority.clone());
    }

    if let Some(keyword) = &filter.keyword {
        let pattern = format!("%{}%", keyword);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    match filter.due {
        Some(DueWindow::Today) => {
            qb.push(" AND due_date = ").push_bind(today);
        }
        Some(DueWindow::Week) => {
            qb.push(" AND due_date >= ")
                .push_bind(today)
                .push(" AND due_date <= ")
                .push_bind(week_due_end(today));
        }
        Some(DueWindow::Overdue) => {
            qb.push(" AND due_date < ").push_bind(today);
        }
        Some(DueWindow::None) => {
            qb.push(" AND due_date IS NULL");
        }
        Option::None => {}
    }
}

/// SQL CASE expression mapping priority keywords to their sort rank
pub fn priority_rank_case() -> String {
    let mut case = String::from("CASE priority");
    for p in [Priority::High, Priority::Medium, Priority::Low] {
        case.push_str(&format!(" WHEN '{}' THEN {}", p.as_str(), p.rank()));
    }
    case.push_str(&format!(" ELSE {} END", Priority::Other.rank()));
    case
}

/// Append the ORDER BY clause for the requested sort
pub fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, sort_by: SortBy, order: SortOrder) {
    let column = match sort_by {
        SortBy::CreatedAt => "created_at".to_string(),
        SortBy::DueDate => "due_date".to_string(),
        SortBy::Priority => priority_rank_case(),
    };
    qb.push(format!(" ORDER BY {} {}", column, order.as_sql()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_window_parse() {
        assert_eq!(DueWindow::parse(Some("today")), Some(DueWindow::Today));
        assert_eq!(DueWindow::parse(Some("week")), Some(DueWindow::Week));
        assert_eq!(DueWindow::parse(Some("overdue")), Some(DueWindow::Overdue));
        assert_eq!(DueWindow::parse(Some("none")), Some(DueWindow::None));
    }

    #[test]
    fn test_due_window_parse_fails_open() {
        assert_eq!(DueWindow::parse(Some("next-month")), Option::None);
        assert_eq!(DueWindow::parse(Some("")), Option::None);
        assert_eq!(DueWindow::parse(Option::None), Option::None);
    }

    #[test]
    fn test_sort_parse_defaults_and_fails_open() {
        assert_eq!(SortBy::parse(Option::None), SortBy::CreatedAt);
        assert_eq!(SortBy::parse(Some("bogus")), SortBy::CreatedAt);
        assert_eq!(SortBy::parse(Some("due_date")), SortBy::DueDate);
        assert_eq!(SortBy::parse(Some("priority")), SortBy::Priority);

        assert_eq!(SortOrder::parse(Option::None), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
    }

    #[test]
    fn test_week_due_end_is_inclusive_plus_seven() {
        // A todo due exactly 7 days out is still inside the window
        assert_eq!(week_due_end(date(2024, 1, 1)), date(2024, 1, 8));
    }

    #[test]
    fn test_ownership_and_soft_delete_always_present() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        push_filters(
            &mut qb,
            Uuid::nil(),
            &TodoFilter::default(),
            date(2024, 1, 1),
        );
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND is_deleted = FALSE"
        );
    }

    #[test]
    fn test_include_deleted_drops_soft_delete_clause() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        let filter = TodoFilter {
            include_deleted: true,
            ..TodoFilter::default()
        };
        push_filters(&mut qb, Uuid::nil(), &filter, date(2024, 1, 1));
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM todos WHERE user_id = $1");
    }

    #[test]
    fn test_all_filters_and_combined() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        let filter = TodoFilter {
            status: Some("doing".to_string()),
            category_id: Some(Uuid::nil()),
            priority: Some("high".to_string()),
            keyword: Some("groceries".to_string()),
            due: Some(DueWindow::Week),
            include_deleted: false,
        };
        push_filters(&mut qb, Uuid::nil(), &filter, date(2024, 1, 1));

        let sql = qb.sql();
        assert!(sql.contains("WHERE user_id = $1"));
        assert!(sql.contains("AND is_deleted = FALSE"));
        assert!(sql.contains("AND status = $2"));
        assert!(sql.contains("AND category_id = $3"));
        assert!(sql.contains("AND priority = $4"));
        assert!(sql.contains("AND (title ILIKE $5 OR description ILIKE $6)"));
        assert!(sql.contains("AND due_date >= $7 AND due_date <= $8"));
    }

    #[test]
    fn test_due_none_is_null_check() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        let filter = TodoFilter {
            due: Some(DueWindow::None),
            ..TodoFilter::default()
        };
        push_filters(&mut qb, Uuid::nil(), &filter, date(2024, 1, 1));
        assert!(qb.sql().ends_with("AND due_date IS NULL"));
    }

    #[test]
    fn test_due_overdue_is_strict() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        let filter = TodoFilter {
            due: Some(DueWindow::Overdue),
            ..TodoFilter::default()
        };
        push_filters(&mut qb, Uuid::nil(), &filter, date(2024, 1, 1));
        assert!(qb.sql().ends_with("AND due_date < $2"));
    }

    #[test]
    fn test_priority_rank_case() {
        assert_eq!(
            priority_rank_case(),
            "CASE priority WHEN 'high' THEN 3 WHEN 'medium' THEN 2 WHEN 'low' THEN 1 ELSE 0 END"
        );
    }

    #[test]
    fn test_order_by_priority_uses_rank_not_column() {
        let mut qb = QueryBuilder::new("SELECT * FROM todos");
        push_order_by(&mut qb, SortBy::Priority, SortOrder::Desc);
        let sql = qb.sql();
        assert!(sql.contains("ORDER BY CASE priority"));
        assert!(sql.ends_with("DESC"));
    }

    #[test]
    fn test_order_by_default() {
        let mut qb = QueryBuilder::new("SELECT * FROM todos");
        push_order_by(&mut qb, SortBy::CreatedAt, SortOrder::Desc);
        assert!(qb.sql().ends_with(" ORDER BY created_at DESC"));
    }

    #[test]
    fn test_order_by_due_date_asc() {
        let mut qb = QueryBuilder::new("SELECT * FROM todos");
        push_order_by(&mut qb, SortBy::DueDate, SortOrder::Asc);
        assert!(qb.sql().ends_with(" ORDER BY due_date ASC"));
    }
}
