use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use color_eyre::Result;

use crate::db::models::ProgressRow;
use crate::db::Db;
use crate::names;

// ---------------------------------------------------------------------------
// ProgressRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait ProgressRepository: Send + Sync {
    fn upsert_progress(
        &self,
        user_id: i64,
        unit_id: &str,
        score: i64,
        completed: bool,
        gems_earned: i64,
    ) -> impl std::future::Future<Output = Result<(ProgressRow, i64)>> + Send;

    fn get_progress(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ProgressRow>>> + Send;

    fn get_streak(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<(i64, Option<String>)>> + Send;

    fn set_streak(
        &self,
        user_id: i64,
        streak: i64,
        active_date: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

// ---------------------------------------------------------------------------
// ProgressService
// ---------------------------------------------------------------------------

/// Everything the user gets for finishing a lesson, ready for rendering.
pub struct CompletionSummary {
    pub unit_id: String,
    pub score: i64,
    pub total_exercises: i64,
    pub completed: bool,
    pub gems_earned: i64,
    pub gem_balance: i64,
    pub streak: i64,
}

pub struct ProgressService<R: ProgressRepository = Db> {
    repo: R,
}

impl<R: ProgressRepository + Clone> Clone for ProgressService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: ProgressRepository> ProgressService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a finished lesson: the latest attempt replaces any earlier
    /// one for the unit, gems are credited unconditionally (pass or fail),
    /// and the daily streak is bumped. Storage failures propagate; the
    /// caller decides how to surface them.
    pub async fn record_completion(
        &self,
        user_id: i64,
        unit_id: &str,
        score: i64,
        total_exercises: i64,
    ) -> Result<CompletionSummary> {
        let completed = score >= names::PASS_THRESHOLD;
        let gems_earned = if completed {
            names::GEMS_PASS_REWARD
        } else {
            names::GEMS_FAIL_REWARD
        };

        let (row, gem_balance) = self
            .repo
            .upsert_progress(user_id, unit_id, score, completed, gems_earned)
            .await?;

        let streak = self.bump_streak(user_id, Utc::now().date_naive()).await?;

        Ok(CompletionSummary {
            unit_id: row.unit_id,
            score: row.score,
            total_exercises,
            completed: row.completed,
            gems_earned,
            gem_balance,
            streak,
        })
    }

    /// The user's progress keyed by unit id.
    pub async fn progress_map(&self, user_id: i64) -> Result<HashMap<String, ProgressRow>> {
        let rows = self.repo.get_progress(user_id).await?;
        Ok(rows.into_iter().map(|r| (r.unit_id.clone(), r)).collect())
    }

    /// Consecutive-day streak: a second lesson on the same day changes
    /// nothing, a lesson on the following day adds one, and any gap resets
    /// to one.
    async fn bump_streak(&self, user_id: i64, today: NaiveDate) -> Result<i64> {
        let (streak, last_active) = self.repo.get_streak(user_id).await?;
        let last_active =
            last_active.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());

        let new_streak = match last_active {
            Some(date) if date == today => return Ok(streak),
            Some(date) if today - date == Duration::days(1) => streak + 1,
            _ => 1,
        };

        self.repo
            .set_streak(user_id, new_streak, &today.format("%Y-%m-%d").to_string())
            .await?;
        Ok(new_streak)
    }
}

/// Experience points for a set of progress rows.
pub fn total_xp<'a>(rows: impl Iterator<Item = &'a ProgressRow>) -> i64 {
    rows.map(|r| r.score * names::XP_PER_POINT).sum()
}

/// Global rank estimate derived from experience. More experience moves the
/// rank towards 1; a fresh account sits at the ceiling.
pub fn rank_for_xp(xp: i64) -> i64 {
    (names::RANK_CEILING - xp / names::RANK_XP_STEP).max(1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(mock_repo: MockProgressRepository) -> ProgressService<MockProgressRepository> {
        ProgressService::new(mock_repo)
    }

    fn upserted(unit_id: &str, score: i64, completed: bool) -> ProgressRow {
        ProgressRow {
            unit_id: unit_id.to_string(),
            score,
            completed,
        }
    }

    fn expect_streak_untouched_today(mock: &mut MockProgressRepository) {
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        mock.expect_get_streak()
            .returning(move |_| {
                let today = today.clone();
                Box::pin(async move { Ok((4, Some(today))) })
            });
    }

    // ----- record_completion tests -----

    #[tokio::test]
    async fn passing_score_earns_full_reward() {
        let mut mock = MockProgressRepository::new();
        mock.expect_upsert_progress()
            .withf(|_, unit_id, score, completed, gems| {
                unit_id == "unit-1" && *score == 3 && *completed && *gems == 10
            })
            .returning(|_, unit_id, score, completed, gems| {
                let row = upserted(unit_id, score, completed);
                let balance = 100 + gems;
                Box::pin(async move { Ok((row, balance)) })
            });
        expect_streak_untouched_today(&mut mock);

        let svc = service(mock);
        let summary = svc.record_completion(1, "unit-1", 3, 3).await.unwrap();

        assert!(summary.completed);
        assert_eq!(summary.gems_earned, 10);
        assert_eq!(summary.gem_balance, 110);
        assert_eq!(summary.total_exercises, 3);
    }

    #[tokio::test]
    async fn failing_score_still_earns_half_reward() {
        let mut mock = MockProgressRepository::new();
        mock.expect_upsert_progress()
            .withf(|_, _, score, completed, gems| *score == 2 && !*completed && *gems == 5)
            .returning(|_, unit_id, score, completed, gems| {
                let row = upserted(unit_id, score, completed);
                let balance = 110 + gems;
                Box::pin(async move { Ok((row, balance)) })
            });
        expect_streak_untouched_today(&mut mock);

        let svc = service(mock);
        let summary = svc.record_completion(1, "unit-1", 2, 3).await.unwrap();

        assert!(!summary.completed);
        assert_eq!(summary.gems_earned, 5);
        assert_eq!(summary.gem_balance, 115);
    }

    #[tokio::test]
    async fn threshold_is_three_regardless_of_total() {
        // 3 of 5 passes even though it is not a perfect run.
        let mut mock = MockProgressRepository::new();
        mock.expect_upsert_progress()
            .withf(|_, _, score, completed, gems| *score == 3 && *completed && *gems == 10)
            .returning(|_, unit_id, score, completed, _| {
                let row = upserted(unit_id, score, completed);
                Box::pin(async move { Ok((row, 110)) })
            });
        expect_streak_untouched_today(&mut mock);

        let svc = service(mock);
        let summary = svc.record_completion(1, "unit-9", 3, 5).await.unwrap();
        assert!(summary.completed);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let mut mock = MockProgressRepository::new();
        mock.expect_upsert_progress().returning(|_, _, _, _, _| {
            Box::pin(async { Err(color_eyre::eyre::eyre!("disk full")) })
        });

        let svc = service(mock);
        assert!(svc.record_completion(1, "unit-1", 3, 3).await.is_err());
    }

    // ----- streak tests -----

    #[tokio::test]
    async fn first_lesson_starts_streak_at_one() {
        let mut mock = MockProgressRepository::new();
        mock.expect_get_streak()
            .returning(|_| Box::pin(async { Ok((0, None)) }));
        mock.expect_set_streak()
            .withf(|_, streak, _| *streak == 1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        let today = Utc::now().date_naive();
        assert_eq!(svc.bump_streak(1, today).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn consecutive_day_extends_streak() {
        let today = Utc::now().date_naive();
        let yesterday = (today - Duration::days(1)).format("%Y-%m-%d").to_string();

        let mut mock = MockProgressRepository::new();
        mock.expect_get_streak().returning(move |_| {
            let yesterday = yesterday.clone();
            Box::pin(async move { Ok((4, Some(yesterday))) })
        });
        mock.expect_set_streak()
            .withf(|_, streak, _| *streak == 5)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        assert_eq!(svc.bump_streak(1, today).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn same_day_keeps_streak() {
        let mut mock = MockProgressRepository::new();
        expect_streak_untouched_today(&mut mock);
        // No expect_set_streak: writing would panic the mock.

        let svc = service(mock);
        let today = Utc::now().date_naive();
        assert_eq!(svc.bump_streak(1, today).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn gap_resets_streak_to_one() {
        let today = Utc::now().date_naive();
        let last_week = (today - Duration::days(7)).format("%Y-%m-%d").to_string();

        let mut mock = MockProgressRepository::new();
        mock.expect_get_streak().returning(move |_| {
            let last_week = last_week.clone();
            Box::pin(async move { Ok((12, Some(last_week))) })
        });
        mock.expect_set_streak()
            .withf(|_, streak, _| *streak == 1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        assert_eq!(svc.bump_streak(1, today).await.unwrap(), 1);
    }

    // ----- xp and rank tests -----

    #[test]
    fn xp_sums_scores() {
        let rows = vec![upserted("unit-1", 3, true), upserted("unit-2", 2, false)];
        assert_eq!(total_xp(rows.iter()), 50);
    }

    #[test]
    fn rank_moves_towards_one_and_never_below() {
        assert_eq!(rank_for_xp(0), 50);
        assert_eq!(rank_for_xp(120), 49);
        assert_eq!(rank_for_xp(350), 47);
        assert_eq!(rank_for_xp(10_000), 1);
    }
}
