use maud::{html, Markup};

use crate::{
    db::models::LeaderboardRow,
    views::learn::{tabs, Tab},
};

pub fn ranking(rows: &[LeaderboardRow], current_user_id: i64) -> Markup {
    html! {
        (tabs(Tab::Ranking))
        header."learn-page-header" {
            h2 { "Tabla de Clasificación" }
            p { "Compite con otros estudiantes y sube de liga." }
        }
        table."ranking-table" {
            thead {
                tr {
                    th { "Posición" }
                    th { "Estudiante" }
                    th { "XP Total" }
                }
            }
            tbody {
                @for (i, row) in rows.iter().enumerate() {
                    @let badge_class = match i {
                        0 => "rank-badge rank-gold",
                        1 => "rank-badge rank-silver",
                        2 => "rank-badge rank-bronze",
                        _ => "rank-badge",
                    };
                    @let is_me = row.id == current_user_id;

                    tr class=(if is_me { "ranking-row-me" } else { "" }) {
                        td { span class=(badge_class) { (i + 1) } }
                        td {
                            (row.display_name)
                            @if is_me { " " small { "(tú)" } }
                        }
                        td."ranking-xp" { (row.xp) " XP" }
                    }
                }
            }
        }
    }
}
