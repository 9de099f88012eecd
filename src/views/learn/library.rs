use maud::{html, Markup};

use crate::{
    catalog::LibraryTopic,
    views::components::glyph,
    views::learn::{tabs, Tab},
};

pub fn library(topics: &[LibraryTopic]) -> Markup {
    html! {
        (tabs(Tab::Library))
        header."learn-page-header" {
            h2 { "Librería de Temas" }
            p { "Explora recursos adicionales por categoría." }
        }
        div."library-grid" {
            @for topic in topics {
                article."library-card" {
                    div."library-card-top" {
                        span."library-icon" style=(format!("color: {};", topic.color)) {
                            (glyph(topic.icon.glyph()))
                        }
                        span."library-count" { (topic.lessons_count) " Lecciones" }
                    }
                    h3 { (topic.title) }
                    p { (topic.description) }
                }
            }
        }
    }
}
