use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::homepage as homepage_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/register", get(register_page).post(register_post))
        .route("/login", get(login_page).post(login_post))
        .route("/logout", post(logout_post))
        .route("/dashboard", get(dashboard))
}

async fn homepage(
    State(state): State<AppState>,
    jar: CookieJar,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    // Logged-in visitors skip the landing page.
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        if let Ok(Some(_)) = state.db.get_user_by_session(&session_id).await {
            return Ok(Redirect::to(names::DASHBOARD_URL).into_response());
        }
    }

    Ok(views::render(
        is_htmx,
        "Aprende Inglés",
        homepage_views::landing_page(),
        None,
    )
    .into_response())
}

/// Sends students and admins to their respective home screens.
async fn dashboard(AuthGuard(user): AuthGuard) -> Redirect {
    if user.is_admin() {
        Redirect::to(names::ADMIN_URL)
    } else {
        Redirect::to(names::LEARN_URL)
    }
}

async fn register_page(IsHtmx(is_htmx): IsHtmx) -> maud::Markup {
    views::render(
        is_htmx,
        "Crear perfil",
        homepage_views::register(homepage_views::RegisterState::NoError),
        None,
    )
}

async fn login_page(IsHtmx(is_htmx): IsHtmx) -> maud::Markup {
    views::render(
        is_htmx,
        "¡Hora de aprender!",
        homepage_views::login(homepage_views::LoginState::NoError),
        None,
    )
}

/// Sets the session cookie and sends htmx to the dashboard.
fn session_redirect(session_token: &str, secure_cookies: bool) -> Result<Response, AppError> {
    let cookie = utils::cookie(names::USER_SESSION_COOKIE_NAME, session_token, secure_cookies)
        .reject("could not build session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(
        "HX-Redirect",
        HeaderValue::from_static(names::DASHBOARD_URL),
    );
    Ok((headers, "").into_response())
}

#[derive(Deserialize)]
struct RegisterPost {
    email: String,
    display_name: String,
    password: String,
}

async fn register_post(
    State(state): State<AppState>,
    Json(body): Json<RegisterPost>,
) -> Result<Response, AppError> {
    use crate::services::auth::RegisterOutcome;

    let outcome = state
        .auth
        .register(&body.email, &body.password, &body.display_name)
        .await
        .reject("registration failed")?;

    match outcome {
        RegisterOutcome::LoggedIn(session_token) => {
            session_redirect(&session_token, state.secure_cookies)
        }
        RegisterOutcome::EmptyFields => Ok(views::titled(
            "Crear perfil",
            homepage_views::register(homepage_views::RegisterState::EmptyFields),
        )
        .into_response()),
        RegisterOutcome::EmailTaken => Ok(views::titled(
            "Crear perfil",
            homepage_views::register(homepage_views::RegisterState::EmailTaken),
        )
        .into_response()),
    }
}

#[derive(Deserialize)]
struct LoginPost {
    identifier: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Json(body): Json<LoginPost>,
) -> Result<Response, AppError> {
    use crate::services::auth::LoginOutcome;

    let outcome = state
        .auth
        .login(&body.identifier, &body.password)
        .await
        .reject("login failed")?;

    match outcome {
        LoginOutcome::Success(session_token) => {
            session_redirect(&session_token, state.secure_cookies)
        }
        LoginOutcome::InvalidCredentials => Ok(views::titled(
            "¡Hora de aprender!",
            homepage_views::login(homepage_views::LoginState::InvalidCredentials),
        )
        .into_response()),
    }
}

async fn logout_post(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        let _ = state.auth.logout(&session_id).await;
    }

    let clear = utils::clear_cookie(names::USER_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear);
    headers.insert("HX-Redirect", HeaderValue::from_static(names::LOGIN_URL));

    Ok((headers, ""))
}
