// Database model structs

use crate::names;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub gems: i64,
    pub lives: i64,
    pub streak: i64,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == names::ADMIN_ROLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProgressRow {
    pub unit_id: String,
    pub score: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardRow {
    pub id: i64,
    pub display_name: String,
    pub xp: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentOverview {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub gems: i64,
    pub streak: i64,
    pub last_active_date: Option<String>,
    pub completed_units: i64,
    pub xp: i64,
    pub active_week: bool,
}

/// Lessons finished per weekday, `weekday` as sqlite's `strftime('%w')`
/// ('0' = Sunday .. '6' = Saturday).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeekdayCompletions {
    pub weekday: String,
    pub completions: i64,
}
