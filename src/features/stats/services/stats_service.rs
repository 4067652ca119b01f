use chrono::{DateTime, Datelike, Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::stats::dtos::StatsSummaryDto;
use crate::shared::constants::STATUS_DONE;

/// Service for per-user summary aggregation.
///
/// `total_todos` counts non-deleted rows only, while the completion counters
/// count `status = 'done'` rows regardless of the delete flag. The asymmetry
/// is intentional: completions remain part of history after soft-deletion.
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self, user_id: Uuid) -> Result<StatsSummaryDto> {
        let today = Local::now().date_naive();
        let (today_start, today_end) = local_day_range(today, today);
        let (monday, sunday) = week_bounds(today);
        let (week_start, week_end) = local_day_range(monday, sunday);

        let total_todos = self
            .count(
                "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND is_deleted = FALSE",
                user_id,
            )
            .await?;

        let today_completed: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND status = $2 \
             AND completed_at >= $3 AND completed_at < $4",
        )
        .bind(user_id)
        .bind(STATUS_DONE)
        .bind(today_start)
        .bind(today_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count today's completions: {:?}", e);
            AppError::Database(e)
        })?;

        let week_done: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND status = $2 \
             AND completed_at >= $3 AND completed_at < $4",
        )
        .bind(user_id)
        .bind(STATUS_DONE)
        .bind(week_start)
        .bind(week_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count week completions: {:?}", e);
            AppError::Database(e)
        })?;

        let week_total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND is_deleted = FALSE \
             AND created_at >= $2 AND created_at < $3",
        )
        .bind(user_id)
        .bind(week_start)
        .bind(week_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count week creations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(StatsSummaryDto {
            total_todos,
            today_completed,
            week_completion_rate: completion_rate(week_done, week_total),
        })
    }

    async fn count(&self, sql: &str, user_id: Uuid) -> Result<i64> {
        sqlx::query_scalar(sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run stats count: {:?}", e);
                AppError::Database(e)
            })
    }
}

/// Monday and Sunday of the ISO week containing `date`
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Days::new(date.weekday().num_days_from_monday() as u64);
    let sunday = monday + Days::new(6);
    (monday, sunday)
}

/// `done / total` rounded to 2 decimal places, `0.0` when total is zero
pub fn completion_rate(done: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (done as f64 / total as f64 * 100.0).round() / 100.0
}

/// Instant of local midnight on `date`. A midnight made ambiguous or skipped
/// by a DST shift resolves to the earlier candidate, or to UTC midnight.
pub fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}

/// Half-open instant range [start-of-first-day, start-of-day-after-last)
/// covering the inclusive local date span `first..=last`
pub fn local_day_range(first: NaiveDate, last: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let after_last = last.succ_opt().unwrap_or(last);
    (local_day_start(first), local_day_start(after_last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_bounds_on_monday() {
        // 2024-01-01 is a Monday
        assert_eq!(
            week_bounds(date(2024, 1, 1)),
            (date(2024, 1, 1), date(2024, 1, 7))
        );
    }

    #[test]
    fn test_week_bounds_midweek() {
        // 2024-01-04 is a Thursday
        assert_eq!(
            week_bounds(date(2024, 1, 4)),
            (date(2024, 1, 1), date(2024, 1, 7))
        );
    }

    #[test]
    fn test_week_bounds_on_sunday() {
        // 2024-01-07 is a Sunday, still inside the week that began Monday
        assert_eq!(
            week_bounds(date(2024, 1, 7)),
            (date(2024, 1, 1), date(2024, 1, 7))
        );
    }

    #[test]
    fn test_week_bounds_across_year_boundary() {
        // 2023-12-31 is a Sunday; its week began 2023-12-25
        assert_eq!(
            week_bounds(date(2023, 12, 31)),
            (date(2023, 12, 25), date(2023, 12, 31))
        );
    }

    #[test]
    fn test_completion_rate_rounding() {
        assert_eq!(completion_rate(1, 3), 0.33);
        assert_eq!(completion_rate(2, 3), 0.67);
        assert_eq!(completion_rate(3, 3), 1.0);
        assert_eq!(completion_rate(0, 5), 0.0);
    }

    #[test]
    fn test_completion_rate_zero_total() {
        // No creations this week must not divide by zero
        assert_eq!(completion_rate(0, 0), 0.0);
        assert_eq!(completion_rate(4, 0), 0.0);
    }

    #[test]
    fn test_local_day_range_covers_whole_days() {
        let (start, end) = local_day_range(date(2024, 1, 1), date(2024, 1, 7));
        assert!(start < end);
        // End of the range is the start of the day after the last day
        assert_eq!(end, local_day_start(date(2024, 1, 8)));
    }

    #[test]
    fn test_single_day_range() {
        let (start, end) = local_day_range(date(2024, 6, 15), date(2024, 6, 15));
        assert_eq!(end, local_day_start(date(2024, 6, 16)));
        assert!(start < end);
    }
}
