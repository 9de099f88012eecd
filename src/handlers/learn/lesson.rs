use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;

use crate::{
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    session::{LessonSession, LessonSnapshot, LessonStage, SessionError},
    views, AppState,
};

use crate::views::learn as learn_views;

pub(super) async fn start_lesson(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(unit) = state.catalog.unit(&unit_id) else {
        tracing::warn!("lesson start for unknown unit '{unit_id}' rejected");
        return Err(AppError::NotFound);
    };

    state.lessons.start(user.id, unit).await;
    tracing::info!("lesson started: user_id={}, unit={}", user.id, unit.id);

    // Put the lesson screen in the address bar so a refresh resumes it.
    let mut headers = HeaderMap::new();
    headers.insert("HX-Push-Url", HeaderValue::from_static(names::LESSON_URL));
    Ok((headers, views::titled("Lección", learn_views::theory(unit))).into_response())
}

/// Resumes whatever lesson is in flight, e.g. after a page refresh.
pub(super) async fn lesson_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(snapshot) = state.lessons.snapshot(user.id).await else {
        return Ok(Redirect::to(names::LEARN_URL).into_response());
    };

    let body = render_stage(&state, &snapshot)?;
    Ok(views::render(is_htmx, "Lección", body, Some(&user)).into_response())
}

pub(super) async fn begin_practice(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    run_and_render(&state, user.id, |s| s.begin_practice()).await
}

pub(super) async fn select_option(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(option): Path<usize>,
) -> Result<Response, AppError> {
    run_and_render(&state, user.id, move |s| s.select_option(option)).await
}

pub(super) async fn check_answer(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    run_and_render(&state, user.id, |s| s.check()).await
}

pub(super) async fn advance_exercise(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    run_and_render(&state, user.id, |s| s.advance()).await
}

pub(super) async fn cancel_lesson(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Response {
    if state.lessons.cancel(user.id).await {
        tracing::info!("lesson cancelled: user_id={}", user.id);
    }
    redirect_to_path()
}

pub(super) async fn submit_lesson(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.lessons.take_completion(user.id).await {
        None => Ok(redirect_to_path()),
        Some(Err(e)) => {
            tracing::warn!("rejected lesson submit: {e}");
            rerender_current(&state, user.id).await
        }
        Some(Ok(event)) => {
            let summary = state
                .progress
                .record_completion(user.id, &event.unit_id, event.score, event.total_exercises)
                .await
                .reject("could not save lesson result")?;

            let unit_title = state
                .catalog
                .unit(&event.unit_id)
                .map(|u| u.title.as_str())
                .unwrap_or(event.unit_id.as_str());

            Ok(views::titled(
                "Unidad Completada",
                learn_views::summary(learn_views::SummaryData {
                    unit_title,
                    summary: &summary,
                }),
            )
            .into_response())
        }
    }
}

/// Applies `op` to the live lesson and repaints the resulting stage. A
/// rejected action is logged and the current screen is drawn again; a
/// missing session bounces the user back to the path.
async fn run_and_render<T>(
    state: &AppState,
    user_id: i64,
    op: impl FnOnce(&mut LessonSession) -> Result<T, SessionError>,
) -> Result<Response, AppError> {
    match state.lessons.with_session(user_id, op).await {
        None => Ok(redirect_to_path()),
        Some(result) => {
            if let Err(e) = result {
                tracing::warn!("rejected lesson action: {e}");
            }
            rerender_current(state, user_id).await
        }
    }
}

async fn rerender_current(state: &AppState, user_id: i64) -> Result<Response, AppError> {
    let Some(snapshot) = state.lessons.snapshot(user_id).await else {
        return Ok(redirect_to_path());
    };
    let body = render_stage(state, &snapshot)?;
    Ok(views::titled("Lección", body).into_response())
}

/// Renders the screen for the lesson's current stage. The catalog lookups
/// can only fail if a live session refers to units the catalog no longer
/// has, which an immutable embedded curriculum rules out.
fn render_stage(state: &AppState, snapshot: &LessonSnapshot) -> Result<Markup, AppError> {
    let unit = state
        .catalog
        .unit(&snapshot.unit_id)
        .ok_or(AppError::Internal("lesson unit missing from catalog"))?;

    match snapshot.stage {
        LessonStage::Theory => Ok(learn_views::theory(unit)),
        LessonStage::Practice {
            index,
            selection,
            status,
        } => {
            let exercise = unit
                .exercises
                .get(index)
                .ok_or(AppError::Internal("exercise index out of range"))?;
            Ok(learn_views::practice(learn_views::PracticeData {
                exercise,
                index,
                total: snapshot.total_exercises,
                score: snapshot.score,
                selection,
                status,
            }))
        }
        LessonStage::Result { .. } => Ok(learn_views::result(learn_views::ResultData {
            unit,
            score: snapshot.score,
            total: snapshot.total_exercises,
        })),
    }
}

fn redirect_to_path() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", HeaderValue::from_static(names::LEARN_URL));
    (headers, "").into_response()
}
