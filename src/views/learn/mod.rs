mod lesson;
mod library;
mod path;
mod ranking;
mod store;

pub use lesson::{practice, result, summary, theory, PracticeData, ResultData, SummaryData};
pub use library::library;
pub use path::{path, PathData};
pub use ranking::ranking;
pub use store::{store, StoreState};

use maud::{html, Markup};

use crate::{names, views::components::glyph};

pub(crate) enum Tab {
    Path,
    Library,
    Ranking,
    Store,
}

/// Tab bar shared by the four learn pages.
pub(crate) fn tabs(active: Tab) -> Markup {
    let entries = [
        (names::LEARN_URL, "map", "Ruta de Aprendizaje", matches!(active, Tab::Path)),
        (names::LIBRARY_URL, "menu_book", "Librería de Temas", matches!(active, Tab::Library)),
        (names::RANKING_URL, "trophy", "Ranking y Logros", matches!(active, Tab::Ranking)),
        (names::STORE_URL, "storefront", "Tienda de Items", matches!(active, Tab::Store)),
    ];

    html! {
        nav."learn-tabs" {
            ul {
                @for (href, icon, label, is_active) in entries {
                    li {
                        a href=(href)
                          hx-get=(href)
                          hx-target="main"
                          hx-push-url="true"
                          hx-swap="innerHTML"
                          class=(if is_active { "learn-tab learn-tab-active" } else { "learn-tab" }) {
                            (glyph(icon)) " " (label)
                        }
                    }
                }
            }
        }
    }
}
