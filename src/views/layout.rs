use maud::{html, Markup, DOCTYPE};

use crate::{db::models::AuthUser, names, utils, views::components::glyph};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Material+Symbols+Rounded:opsz,wght,FILL,GRAD@24,400,0,0";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@1.9.12/dist/htmx.min.js" {}
        script src="https://unpkg.com/htmx.org@1.9.12/dist/ext/json-enc.js" {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href="/" {
                            strong { "LingoRuta" }
                        }
                    }
                }
                ul {
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

fn header_with_user(user: &AuthUser) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href=(names::DASHBOARD_URL) {
                            strong { "LingoRuta" }
                        }
                    }
                }
                ul {
                    li."nav-stat" title="Gemas" { (glyph("diamond")) " " (user.gems) }
                    li."nav-stat" title="Vidas" { (glyph("favorite")) " " (user.lives) }
                    li."nav-stat" title="Racha" { (glyph("local_fire_department")) " " (user.streak) }
                    li."secondary" { (user.display_name) }
                    li {
                        button."outline"."secondary"
                            hx-post=(names::LOGOUT_URL)
                            hx-swap="none" {
                            "Salir"
                        }
                    }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())
            (icon())

            title { (format!("{title} - LingoRuta")) }
        }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        (head(title))

        body."container" {
            (header())
            (main(body))
        }
    }
}

pub fn page_with_user(title: &str, body: Markup, user: &AuthUser) -> Markup {
    html! {
        (DOCTYPE)
        (head(title))

        body."container" {
            (header_with_user(user))
            (main(body))
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - LingoRuta" }
        (body)
    }
}
