use color_eyre::Result;

use super::models::{LeaderboardRow, ProgressRow};
use super::Db;
use crate::names;
use crate::services::progress::ProgressRepository;

impl Db {
    /// Writes the latest attempt for `(user_id, unit_id)` and credits the
    /// gems in the same transaction. A repeat attempt overwrites the stored
    /// score and completion flag; gems always accumulate.
    pub async fn upsert_progress(
        &self,
        user_id: i64,
        unit_id: &str,
        score: i64,
        completed: bool,
        gems_earned: i64,
    ) -> Result<(ProgressRow, i64)> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProgressRow>(
            r#"INSERT INTO unit_progress (user_id, unit_id, score, completed, updated_at)
               VALUES ($1, $2, $3, $4, datetime('now'))
               ON CONFLICT(user_id, unit_id) DO UPDATE
               SET score = excluded.score,
                   completed = excluded.completed,
                   updated_at = excluded.updated_at
               RETURNING unit_id, score, completed"#,
        )
        .bind(user_id)
        .bind(unit_id)
        .bind(score)
        .bind(completed)
        .fetch_one(&mut *tx)
        .await?;

        let new_balance: i64 =
            sqlx::query_scalar("UPDATE users SET gems = gems + $1 WHERE id = $2 RETURNING gems")
                .bind(gems_earned)
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        tracing::info!(
            "progress saved: user_id={user_id}, unit={unit_id}, score={score}, completed={completed}, gems +{gems_earned}"
        );
        Ok((row, new_balance))
    }

    pub async fn get_progress(&self, user_id: i64) -> Result<Vec<ProgressRow>> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            "SELECT unit_id, score, completed FROM unit_progress WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns `(streak, last_active_date)`, the date as `YYYY-MM-DD`.
    pub async fn get_streak(&self, user_id: i64) -> Result<(i64, Option<String>)> {
        let row: (i64, Option<String>) =
            sqlx::query_as("SELECT streak, last_active_date FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(row)
    }

    pub async fn set_streak(&self, user_id: i64, streak: i64, active_date: &str) -> Result<()> {
        sqlx::query("UPDATE users SET streak = $1, last_active_date = $2 WHERE id = $3")
            .bind(streak)
            .bind(active_date)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Students ordered by experience, best first. Ties go to the older
    /// account so the board is stable between refreshes.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardRow>> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"SELECT u.id, u.display_name, COALESCE(SUM(p.score), 0) * $1 AS xp
               FROM users u
               LEFT JOIN unit_progress p ON p.user_id = u.id
               WHERE u.role = $2
               GROUP BY u.id
               ORDER BY xp DESC, u.id ASC
               LIMIT $3"#,
        )
        .bind(names::XP_PER_POINT)
        .bind(names::STUDENT_ROLE)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

impl ProgressRepository for Db {
    async fn upsert_progress(
        &self,
        user_id: i64,
        unit_id: &str,
        score: i64,
        completed: bool,
        gems_earned: i64,
    ) -> Result<(ProgressRow, i64)> {
        Db::upsert_progress(self, user_id, unit_id, score, completed, gems_earned).await
    }

    async fn get_progress(&self, user_id: i64) -> Result<Vec<ProgressRow>> {
        Db::get_progress(self, user_id).await
    }

    async fn get_streak(&self, user_id: i64) -> Result<(i64, Option<String>)> {
        Db::get_streak(self, user_id).await
    }

    async fn set_streak(&self, user_id: i64, streak: i64, active_date: &str) -> Result<()> {
        Db::set_streak(self, user_id, streak, active_date).await
    }
}
