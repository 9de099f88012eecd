pub mod catalog;
pub mod db;
pub mod extractors;
pub mod handlers;
pub mod names;
pub mod rejections;
pub mod services;
pub mod session;
pub mod statics;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::{middleware, Router};

use catalog::Catalog;
use services::auth::AuthService;
use services::progress::ProgressService;
use session::LessonRegistry;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub auth: AuthService,
    pub progress: ProgressService,
    pub lessons: LessonRegistry,
    pub catalog: Arc<Catalog>,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: db::Db, catalog: Catalog, secure_cookies: bool) -> Self {
        Self {
            auth: AuthService::new(db.clone()),
            progress: ProgressService::new(db.clone()),
            lessons: LessonRegistry::default(),
            catalog: Arc::new(catalog),
            db,
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::learn::routes())
        .merge(handlers::admin::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
