use maud::Markup;

use crate::db::models::AuthUser;

pub mod admin;
pub mod components;
pub mod homepage;
pub mod layout;
pub mod learn;

// Re-export commonly used functions from layout
pub use layout::{page, page_with_user, titled};

/// Render a full page for plain navigation, or a titled fragment for an
/// htmx request that swaps into `main`.
pub fn render(is_htmx: bool, title: &str, body: Markup, user: Option<&AuthUser>) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        match user {
            Some(user) => page_with_user(title, body, user),
            None => page(title, body),
        }
    }
}
