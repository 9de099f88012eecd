use std::collections::{HashMap, HashSet};

use axum::{extract::State, routing::get, Router};
use maud::Markup;

use crate::{
    catalog::Catalog,
    db::StudentOverview,
    extractors::{AuthGuard, IsHtmx},
    rejections::{AppError, ResultExt},
    views,
    views::admin as admin_views,
    AppState,
};

/// Weekday codes as sqlite's `strftime('%w')` emits them, Monday first to
/// match the chart.
const WEEKDAY_LABELS: [(&str, &str); 7] = [
    ("1", "Lun"),
    ("2", "Mar"),
    ("3", "Mie"),
    ("4", "Jue"),
    ("5", "Vie"),
    ("6", "Sab"),
    ("0", "Dom"),
];

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin", get(admin_dashboard))
}

async fn admin_dashboard(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Result<Markup, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    let students_count = state
        .db
        .count_students()
        .await
        .reject("could not count students")?;
    let completed_lessons = state
        .db
        .count_completed_units()
        .await
        .reject("could not count completed units")?;
    let weekly_active = state
        .db
        .weekly_active_students()
        .await
        .reject("could not count active students")?;
    let gems_in_circulation = state
        .db
        .total_gems_in_circulation()
        .await
        .reject("could not sum gems")?;
    let completions = state
        .db
        .weekly_completions()
        .await
        .reject("could not load weekly activity")?;
    let students = state
        .db
        .students_overview()
        .await
        .reject("could not load student overview")?;
    let completed_pairs = state
        .db
        .completed_units_by_student()
        .await
        .reject("could not load completed units")?;

    let weekly_retention_pct = if students_count > 0 {
        weekly_active * 100 / students_count
    } else {
        0
    };

    let weekly_activity: Vec<(&'static str, i64)> = WEEKDAY_LABELS
        .iter()
        .map(|(code, label)| {
            let n = completions
                .iter()
                .find(|c| c.weekday == *code)
                .map(|c| c.completions)
                .unwrap_or(0);
            (*label, n)
        })
        .collect();

    let level_distribution = level_distribution(&state.catalog, &students, &completed_pairs);

    Ok(views::render(
        is_htmx,
        "Panel de Administración",
        admin_views::dashboard(admin_views::AdminData {
            students_count,
            completed_lessons,
            weekly_retention_pct,
            gems_in_circulation,
            weekly_activity: &weekly_activity,
            level_distribution: &level_distribution,
            students: &students,
            units_count: state.catalog.units_count(),
        }),
        Some(&user),
    ))
}

/// Buckets every student into the course band their next unit sits in.
fn level_distribution(
    catalog: &Catalog,
    students: &[StudentOverview],
    completed_pairs: &[(i64, String)],
) -> Vec<(String, i64)> {
    let mut completed_by_user: HashMap<i64, HashSet<&str>> = HashMap::new();
    for (user_id, unit_id) in completed_pairs {
        completed_by_user
            .entry(*user_id)
            .or_default()
            .insert(unit_id.as_str());
    }

    let empty = HashSet::new();
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for s in students {
        let done = completed_by_user.get(&s.id).unwrap_or(&empty);
        *counts.entry(student_band(catalog, done)).or_insert(0) += 1;
    }

    // Bands in curriculum order, zeros included so the chart legend is
    // stable.
    let mut out: Vec<(String, i64)> = Vec::new();
    for phase in &catalog.phases {
        let band = level_band(&phase.level);
        if out.iter().any(|(b, _)| b == band) {
            continue;
        }
        out.push((band.to_string(), counts.get(band).copied().unwrap_or(0)));
    }
    out
}

/// The band of the first unit a student has not completed yet; students who
/// finished everything count in the last band.
fn student_band<'a>(catalog: &'a Catalog, done: &HashSet<&str>) -> &'a str {
    for phase in &catalog.phases {
        for unit in &phase.units {
            if !done.contains(unit.id.as_str()) {
                return level_band(&phase.level);
            }
        }
    }
    catalog
        .phases
        .last()
        .map(|p| level_band(&p.level))
        .unwrap_or("")
}

/// CEFR band of a phase level label, e.g. "Nivel B1.2" -> "B1".
fn level_band(level: &str) -> &str {
    let band = level.strip_prefix("Nivel ").unwrap_or(level);
    band.split('.').next().unwrap_or(band)
}

#[cfg(test)]
mod tests {
    use super::level_band;

    #[test]
    fn band_strips_prefix_and_sublevel() {
        assert_eq!(level_band("Nivel A1.1"), "A1");
        assert_eq!(level_band("Nivel B2.6"), "B2");
        assert_eq!(level_band("B1.2"), "B1");
        assert_eq!(level_band("C1"), "C1");
    }
}
