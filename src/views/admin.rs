use maud::{html, Markup, PreEscaped};

use crate::db::StudentOverview;
use crate::views::components;

const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

const LEVEL_COLORS: &[&str] = &["#00E0FF", "#7B61FF", "#10B981", "#F59E0B"];

pub struct AdminData<'a> {
    pub students_count: i64,
    pub completed_lessons: i64,
    pub weekly_retention_pct: i64,
    pub gems_in_circulation: i64,
    /// Completions per weekday, Monday first.
    pub weekly_activity: &'a [(&'static str, i64)],
    /// Students per course level, in curriculum order.
    pub level_distribution: &'a [(String, i64)],
    pub students: &'a [StudentOverview],
    pub units_count: usize,
}

pub fn dashboard(data: AdminData) -> Markup {
    html! {
        header."learn-page-header" {
            h1 { "Dashboard General" }
            p { "Monitoreo de progreso y gestión de estudiantes." }
        }

        section."admin-stats" {
            (stat_card("group", &data.students_count.to_string(), "Total Estudiantes", None))
            (stat_card("task_alt", &data.completed_lessons.to_string(), "Lecciones Completadas", None))
            (stat_card("trending_up", &format!("{}%", data.weekly_retention_pct), "Retención Semanal", Some("Activos en los últimos 7 días")))
            (stat_card("diamond", &data.gems_in_circulation.to_string(), "Economía (Gemas)", Some("Gemas en circulación")))
        }

        div."admin-charts" {
            article {
                h4 { "Actividad de Lecciones" }
                p { small { "Lecciones completadas en los últimos 7 días." } }
                div style="position: relative; width: 100%; max-height: 320px;" {
                    canvas id="activity-chart" {}
                }
                (activity_chart_script(data.weekly_activity))
            }
            article {
                h4 { "Distribución por Nivel" }
                p { small { "Dónde se encuentran tus estudiantes." } }
                div style="position: relative; width: 100%; max-height: 320px;" {
                    canvas id="level-chart" {}
                }
                (level_chart_script(data.level_distribution))
            }
        }

        article {
            h4 { "Progreso de Estudiantes" }
            p { small { "Vista detallada del avance por usuario." } }
            @if data.students.is_empty() {
                p."admin-empty" { "No hay estudiantes registrados aún." }
            } @else {
                div."table-scroll" {
                    table."admin-students" {
                        thead { tr {
                            th { "Estudiante" }
                            th { "Progreso General" }
                            th { "XP" }
                            th { "Gemas" }
                            th { "Racha" }
                            th { "Última Actividad" }
                            th { "Estado" }
                        } }
                        tbody {
                            @for s in data.students {
                                @let pct = if data.units_count > 0 {
                                    s.completed_units * 100 / data.units_count as i64
                                } else {
                                    0
                                };
                                tr {
                                    td {
                                        strong { (s.display_name) }
                                        br;
                                        small { (s.email) }
                                    }
                                    td."admin-progress-cell" {
                                        progress value=(pct) max="100" {}
                                        small { (pct) "%" }
                                    }
                                    td { (s.xp) }
                                    td { (s.gems) }
                                    td { (s.streak) }
                                    td {
                                        @if let Some(date) = &s.last_active_date {
                                            (date)
                                        } @else {
                                            small { "Nunca" }
                                        }
                                    }
                                    td {
                                        @if s.active_week {
                                            span."admin-badge admin-badge-active" { "Activo" }
                                        } @else {
                                            span."admin-badge admin-badge-inactive" { "Inactivo" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn stat_card(icon: &str, value: &str, label: &str, hint: Option<&str>) -> Markup {
    html! {
        article."admin-stat-card" {
            span."admin-stat-icon" { (components::glyph(icon)) }
            p."admin-stat-value" { (value) }
            p."admin-stat-label" { (label) }
            @if let Some(hint) = hint {
                small."admin-stat-hint" { (hint) }
            }
        }
    }
}

fn activity_chart_script(activity: &[(&'static str, i64)]) -> Markup {
    let labels: Vec<&str> = activity.iter().map(|(day, _)| *day).collect();
    let labels_json = serde_json::to_string(&labels).unwrap_or_default();
    let values: Vec<String> = activity.iter().map(|(_, n)| n.to_string()).collect();

    let script = format!(
        r#"(function(){{
var draw=function(){{
var ctx=document.getElementById('activity-chart');
if(!ctx)return;
new Chart(ctx,{{type:'bar',data:{{labels:{labels_json},datasets:[{{label:'Lecciones',data:[{values}],backgroundColor:'#00E0FF',borderRadius:4}}]}},options:{{responsive:true,plugins:{{legend:{{display:false}}}},scales:{{y:{{beginAtZero:true,ticks:{{precision:0}}}}}}}}}});
}};
if(window.Chart){{draw();return;}}
var s=document.createElement('script');
s.src='{CHART_JS_SRC}';
s.onload=draw;
document.head.appendChild(s);
}})()"#,
        values = values.join(","),
    );

    html! {
        (PreEscaped(format!("<script>{script}</script>")))
    }
}

fn level_chart_script(distribution: &[(String, i64)]) -> Markup {
    let labels: Vec<&str> = distribution.iter().map(|(level, _)| level.as_str()).collect();
    let labels_json = serde_json::to_string(&labels).unwrap_or_default();
    let colors: Vec<&str> = (0..distribution.len())
        .map(|i| LEVEL_COLORS[i % LEVEL_COLORS.len()])
        .collect();
    let colors_json = serde_json::to_string(&colors).unwrap_or_default();
    let values: Vec<String> = distribution.iter().map(|(_, n)| n.to_string()).collect();

    let script = format!(
        r#"(function(){{
var draw=function(){{
var ctx=document.getElementById('level-chart');
if(!ctx)return;
new Chart(ctx,{{type:'doughnut',data:{{labels:{labels_json},datasets:[{{data:[{values}],backgroundColor:{colors_json},borderWidth:0}}]}},options:{{responsive:true,plugins:{{legend:{{position:'bottom'}}}}}}}});
}};
if(window.Chart){{draw();return;}}
var s=document.createElement('script');
s.src='{CHART_JS_SRC}';
s.onload=draw;
document.head.appendChild(s);
}})()"#,
        values = values.join(","),
    );

    html! {
        (PreEscaped(format!("<script>{script}</script>")))
    }
}
