use color_eyre::Result;

use super::models::{StudentOverview, WeekdayCompletions};
use super::Db;
use crate::names;

impl Db {
    pub async fn count_students(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(names::STUDENT_ROLE)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_completed_units(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM unit_progress WHERE completed = 1")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn total_gems_in_circulation(&self) -> Result<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(gems), 0) FROM users WHERE role = $1")
                .bind(names::STUDENT_ROLE)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    /// Students active within the last seven days, inclusive of today.
    pub async fn weekly_active_students(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM users
               WHERE role = $1 AND last_active_date >= date('now', '-6 days')"#,
        )
        .bind(names::STUDENT_ROLE)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Lesson results recorded in the last seven days, grouped by weekday.
    pub async fn weekly_completions(&self) -> Result<Vec<WeekdayCompletions>> {
        let rows = sqlx::query_as::<_, WeekdayCompletions>(
            r#"SELECT strftime('%w', updated_at) AS weekday, COUNT(*) AS completions
               FROM unit_progress
               WHERE updated_at >= datetime('now', '-7 days')
               GROUP BY weekday"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// One row per student with their aggregate course standing.
    pub async fn students_overview(&self) -> Result<Vec<StudentOverview>> {
        let rows = sqlx::query_as::<_, StudentOverview>(
            r#"SELECT u.id, u.display_name, u.email, u.gems, u.streak, u.last_active_date,
                      COALESCE(SUM(p.completed), 0) AS completed_units,
                      COALESCE(SUM(p.score), 0) * $1 AS xp,
                      COALESCE(u.last_active_date >= date('now', '-6 days'), 0) AS active_week
               FROM users u
               LEFT JOIN unit_progress p ON p.user_id = u.id
               WHERE u.role = $2
               GROUP BY u.id
               ORDER BY xp DESC, u.id ASC"#,
        )
        .bind(names::XP_PER_POINT)
        .bind(names::STUDENT_ROLE)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// `(user_id, unit_id)` pairs for every completed unit by a student,
    /// used to bucket students into course levels.
    pub async fn completed_units_by_student(&self) -> Result<Vec<(i64, String)>> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            r#"SELECT p.user_id, p.unit_id
               FROM unit_progress p
               JOIN users u ON u.id = p.user_id
               WHERE u.role = $1 AND p.completed = 1"#,
        )
        .bind(names::STUDENT_ROLE)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
