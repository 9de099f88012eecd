use std::collections::HashMap;

use maud::{html, Markup};

use crate::{
    catalog::Catalog,
    db::models::ProgressRow,
    names,
    views::components::glyph,
    views::learn::{tabs, Tab},
};

pub struct PathData<'a> {
    pub catalog: &'a Catalog,
    pub progress: &'a HashMap<String, ProgressRow>,
    /// First unit in course order the student has not attempted yet.
    /// `None` once every unit has been attempted.
    pub current_unit_id: Option<&'a str>,
    pub xp: i64,
    pub rank: i64,
}

pub fn path(data: PathData) -> Markup {
    let level_label = data
        .catalog
        .phases
        .iter()
        .find(|p| {
            p.units
                .iter()
                .any(|u| Some(u.id.as_str()) == data.current_unit_id)
        })
        .map(|p| p.level.as_str())
        .unwrap_or("¡Curso Completado!");

    html! {
        (tabs(Tab::Path))

        div."path-stats" {
            span."stat-chip stat-chip-xp" { (glyph("bolt")) " " (data.xp) " XP" }
            span."stat-chip stat-chip-rank" { (glyph("trophy")) " Rank #" (data.rank) }
            span."stat-chip stat-chip-level" { (glyph("school")) " " (level_label) }
        }

        @if data.current_unit_id.is_none() {
            article."path-finished" {
                h2 { "¡Curso Completado!" }
                p { "Has recorrido toda la ruta. Repasa cualquier unidad para seguir sumando puntos." }
            }
        }

        @for phase in &data.catalog.phases {
            section."path-phase" {
                header."path-phase-header" {
                    small { (phase.id.replace('-', " ")) }
                    h2 { (phase.title) }
                    p { (phase.level) }
                }

                @for (i, unit) in phase.units.iter().enumerate() {
                    @let row = data.progress.get(&unit.id);
                    @let is_completed = row.is_some_and(|r| r.completed);
                    @let is_current = data.current_unit_id == Some(unit.id.as_str());

                    @if is_completed {
                        article."path-unit path-unit-completed" {
                            span."path-unit-icon" { (glyph("check_circle")) }
                            div."path-unit-body" {
                                small { "Lección " (i + 1) }
                                h3 { (unit.title) }
                                p { (unit.core_concept) }
                                @if let Some(row) = row {
                                    small."path-unit-score" {
                                        "Aciertos: " (row.score) " de " (unit.exercises.len())
                                    }
                                }
                            }
                            button."outline"
                                hx-post=(names::start_lesson_url(&unit.id))
                                hx-target="main"
                                hx-swap="innerHTML" {
                                "Repasar"
                            }
                        }
                    } @else if let Some(row) = row {
                        article."path-unit path-unit-attempted" {
                            span."path-unit-icon" { (glyph("replay")) }
                            div."path-unit-body" {
                                small { "Lección " (i + 1) }
                                h3 { (unit.title) }
                                p { (unit.core_concept) }
                                small."path-unit-score" {
                                    "Aciertos: " (row.score) " de " (unit.exercises.len())
                                }
                            }
                            button."outline"
                                hx-post=(names::start_lesson_url(&unit.id))
                                hx-target="main"
                                hx-swap="innerHTML" {
                                "Reintentar"
                            }
                        }
                    } @else if is_current {
                        article."path-unit path-unit-current" {
                            span."path-unit-icon" { (glyph("play_circle")) }
                            div."path-unit-body" {
                                small { "Lección " (i + 1) }
                                h3 { (unit.title) }
                                p { (unit.core_concept) }
                            }
                            button
                                hx-post=(names::start_lesson_url(&unit.id))
                                hx-target="main"
                                hx-swap="innerHTML" {
                                "Empezar"
                            }
                        }
                    } @else {
                        article."path-unit path-unit-locked" {
                            span."path-unit-icon" { (glyph("lock")) }
                            div."path-unit-body" {
                                small { "Lección " (i + 1) }
                                h3 { (unit.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}
