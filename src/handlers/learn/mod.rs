mod lesson;

use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use maud::Markup;

use crate::{
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    services::progress::{rank_for_xp, total_xp},
    views, AppState,
};

use crate::views::learn as learn_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/learn", get(path_page))
        .route("/learn/library", get(library_page))
        .route("/learn/ranking", get(ranking_page))
        .route("/learn/store", get(store_page))
        .route("/learn/store/buy/{item_id}", post(buy_item))
        .route("/learn/unit/{unit_id}/start", post(lesson::start_lesson))
        .route("/learn/lesson", get(lesson::lesson_page))
        .route("/learn/lesson/practice", post(lesson::begin_practice))
        .route("/learn/lesson/select/{option}", post(lesson::select_option))
        .route("/learn/lesson/check", post(lesson::check_answer))
        .route("/learn/lesson/advance", post(lesson::advance_exercise))
        .route("/learn/lesson/cancel", post(lesson::cancel_lesson))
        .route("/learn/lesson/submit", post(lesson::submit_lesson))
}

async fn path_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Result<Markup, AppError> {
    let progress = state
        .progress
        .progress_map(user.id)
        .await
        .reject("could not load progress")?;

    let attempted: HashSet<String> = progress.keys().cloned().collect();
    let current_unit_id = state.catalog.next_unit(&attempted).map(|u| u.id.as_str());
    let xp = total_xp(progress.values());

    Ok(views::render(
        is_htmx,
        "Ruta de Aprendizaje",
        learn_views::path(learn_views::PathData {
            catalog: &state.catalog,
            progress: &progress,
            current_unit_id,
            xp,
            rank: rank_for_xp(xp),
        }),
        Some(&user),
    ))
}

async fn library_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Markup {
    views::render(
        is_htmx,
        "Librería de Temas",
        learn_views::library(&state.catalog.library_topics),
        Some(&user),
    )
}

async fn ranking_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Result<Markup, AppError> {
    let rows = state
        .db
        .leaderboard(names::LEADERBOARD_LIMIT)
        .await
        .reject("could not load leaderboard")?;

    Ok(views::render(
        is_htmx,
        "Ranking y Logros",
        learn_views::ranking(&rows, user.id),
        Some(&user),
    ))
}

async fn store_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Markup {
    views::render(
        is_htmx,
        "Tienda de Items",
        learn_views::store(
            &state.catalog.store_items,
            user.gems,
            learn_views::StoreState::Browsing,
        ),
        Some(&user),
    )
}

async fn buy_item(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Markup, AppError> {
    let Some(item) = state.catalog.store_item(&item_id) else {
        tracing::warn!("purchase of unknown item '{item_id}' rejected");
        return Err(AppError::NotFound);
    };

    let new_balance = state
        .db
        .purchase_item(user.id, &item.id, item.price, item.grants_life)
        .await
        .reject("could not record purchase")?;

    let (gems, store_state) = match new_balance {
        Some(balance) => (
            balance,
            learn_views::StoreState::Purchased {
                item_name: item.name.clone(),
            },
        ),
        None => (
            user.gems,
            learn_views::StoreState::InsufficientGems {
                item_name: item.name.clone(),
            },
        ),
    };

    Ok(views::titled(
        "Tienda de Items",
        learn_views::store(&state.catalog.store_items, gems, store_state),
    ))
}
