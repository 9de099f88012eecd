use color_eyre::Result;

use super::Db;
use crate::names;

/// Demo accounts created on first boot against an empty database.
/// Passwords are intentionally weak; this data exists so the app is
/// explorable without registering.
const DEMO_ADMIN: (&str, &str, &str) = ("admin@example.com", "admin", "Admin");
const DEMO_STUDENT: (&str, &str, &str) = ("student@example.com", "student1234", "Ana Estudiante");

/// Rival students that fill out the leaderboard: display name, password,
/// number of units passed with a full score, and the score of one extra
/// partially-failed unit.
const DEMO_RIVALS: &[(&str, &str, i64, i64)] = &[
    ("Sofía Torres", "lingoruta-demo", 12, 2),
    ("Juan Pérez", "lingoruta-demo", 9, 1),
    ("Marco Díaz", "lingoruta-demo", 3, 2),
];

impl Db {
    /// Populates demo users and their progress. No-op unless the users
    /// table is empty.
    pub async fn seed_demo_data(&self) -> Result<()> {
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if users > 0 {
            tracing::debug!("users table not empty, skipping demo seed");
            return Ok(());
        }

        let (email, password, name) = DEMO_ADMIN;
        self.create_user_with_role(email, password, name, names::ADMIN_ROLE)
            .await?;

        let (email, password, name) = DEMO_STUDENT;
        let student_id = self.create_user(email, password, name).await?;
        self.seed_unit_result(student_id, "unit-1", 3).await?;
        self.seed_unit_result(student_id, "unit-2", 2).await?;
        self.seed_activity(student_id, 3, "-1 days").await?;

        for (i, (name, password, passed_units, last_score)) in DEMO_RIVALS.iter().enumerate() {
            let email = format!("rival{}@example.com", i + 1);
            let rival_id = self.create_user(&email, password, name).await?;
            for unit in 1..=*passed_units {
                self.seed_unit_result(rival_id, &format!("unit-{unit}"), 3)
                    .await?;
            }
            self.seed_unit_result(rival_id, &format!("unit-{}", passed_units + 1), *last_score)
                .await?;
            self.seed_activity(rival_id, *passed_units, "0 days").await?;
        }

        tracing::info!("seeded demo accounts and progress");
        Ok(())
    }

    /// Direct insert mirroring what a recorded lesson result produces,
    /// without the per-row logging of the live write path.
    async fn seed_unit_result(&self, user_id: i64, unit_id: &str, score: i64) -> Result<()> {
        let completed = score >= names::PASS_THRESHOLD;
        let gems_earned = if completed {
            names::GEMS_PASS_REWARD
        } else {
            names::GEMS_FAIL_REWARD
        };

        sqlx::query(
            "INSERT INTO unit_progress (user_id, unit_id, score, completed) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(unit_id)
        .bind(score)
        .bind(completed)
        .execute(&self.pool)
        .await?;

        sqlx::query("UPDATE users SET gems = gems + $1 WHERE id = $2")
            .bind(gems_earned)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn seed_activity(&self, user_id: i64, streak: i64, offset: &str) -> Result<()> {
        sqlx::query(
            "UPDATE users SET streak = $1, last_active_date = date('now', $2) WHERE id = $3",
        )
        .bind(streak)
        .bind(offset)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
