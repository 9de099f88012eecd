use maud::{html, Markup};

use crate::{
    catalog::StoreItem,
    names,
    views::components::glyph,
    views::learn::{tabs, Tab},
};

pub enum StoreState {
    Browsing,
    Purchased { item_name: String },
    InsufficientGems { item_name: String },
}

pub fn store(items: &[StoreItem], gems: i64, state: StoreState) -> Markup {
    html! {
        (tabs(Tab::Store))
        header."learn-page-header" {
            h2 { "Tienda de Items" }
            p { "Canjea tus gemas por potenciadores y vidas extra." }
            p."store-balance" { (glyph("diamond")) " Tu saldo: " strong { (gems) } " gemas" }
        }

        @match state {
            StoreState::Browsing => {},
            StoreState::Purchased { item_name } => {
                article."store-banner store-banner-ok" {
                    "¡Compra realizada! Has canjeado " mark { (item_name) } "."
                }
            },
            StoreState::InsufficientGems { item_name } => {
                article."store-banner store-banner-error" {
                    "No tienes suficientes gemas para " mark { (item_name) } "."
                }
            }
        }

        div."store-grid" {
            @for item in items {
                @let affordable = gems >= item.price;
                article."store-card" {
                    span."store-price" { (item.price) " " (glyph("diamond")) }
                    span."store-icon" style=(format!("color: {};", item.color)) {
                        (glyph(item.icon.glyph()))
                    }
                    h3 { (item.name) }
                    p { (item.description) }
                    button
                        hx-post=(names::buy_item_url(&item.id))
                        hx-target="main"
                        hx-swap="innerHTML"
                        disabled[!affordable] {
                        @if affordable { "Comprar" } @else { "Insuficientes Gemas" }
                    }
                }
            }
        }
    }
}
