use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a todo item.
///
/// `status` is an open string; only the literal "done" carries completion
/// semantics (see the service layer). `completed_at` records the FIRST
/// transition to done and is never moved afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub remind_at: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Json<Vec<String>>>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Priority keywords, closed over with an explicit fallback so the rank
/// table is total. Sorting uses `rank()`, never lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Other,
}

impl Priority {
    /// Total parse: unrecognized values become `Other` instead of an error
    pub fn parse(raw: &str) -> Self {
        match raw {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other => "other",
        }
    }

    /// Sort rank: high > medium > low > anything else
    pub fn rank(&self) -> i32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::Other => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_priorities() {
        assert_eq!(Priority::parse("high"), Priority::High);
        assert_eq!(Priority::parse("medium"), Priority::Medium);
        assert_eq!(Priority::parse("low"), Priority::Low);
    }

    #[test]
    fn test_parse_unknown_priority_falls_back() {
        assert_eq!(Priority::parse("urgent"), Priority::Other);
        assert_eq!(Priority::parse(""), Priority::Other);
        assert_eq!(Priority::parse("HIGH"), Priority::Other);
    }

    #[test]
    fn test_rank_is_not_lexicographic() {
        // Sorted desc by rank: high > medium > low, even though
        // lexicographically "medium" > "low" > "high".
        let mut priorities = vec!["low", "high", "medium"];
        priorities.sort_by_key(|p| std::cmp::Reverse(Priority::parse(p).rank()));
        assert_eq!(priorities, vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_unknown_ranks_below_low() {
        assert!(Priority::parse("whatever").rank() < Priority::Low.rank());
    }
}
