mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header::SET_COOKIE, Method, Request, StatusCode},
};
use lingoruta::catalog::Catalog;
use lingoruta::db::Db;
use lingoruta::{names, router, AppState};
use tower::ServiceExt;

async fn app_with_db() -> (axum::Router, Db) {
    let db = common::create_test_db().await;
    let catalog = Catalog::load().expect("embedded curriculum should load");
    let app = router(AppState::new(db.clone(), catalog, false));
    (app, db)
}

/// Registers a fresh student and returns their session cookie pair.
async fn register(app: &axum::Router, email: &str) -> String {
    let body = format!(
        r#"{{"email":"{email}","display_name":"Estudiante","password":"secret123"}}"#
    );
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(names::REGISTER_URL)
                .header("content-type", "application/json")
                .header("HX-Request", "true")
                .body(Body::from(body))
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK, "registration should succeed");

    resp.headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("registration should set a session cookie")
        .to_string()
}

fn htmx_post(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("HX-Request", "true")
        .header("cookie", cookie)
        .body(Body::empty())
        .expect("request build should succeed")
}

fn htmx_get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("HX-Request", "true")
        .header("cookie", cookie)
        .body(Body::empty())
        .expect("request build should succeed")
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

async fn post_ok(app: &axum::Router, uri: &str, cookie: &str) -> String {
    let resp = app
        .clone()
        .oneshot(htmx_post(uri, cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK, "POST {uri} should succeed");
    body_string(resp).await
}

/// Plays through every exercise of the active lesson, picking the given
/// option for each one, and leaves the session on the result screen.
async fn answer_all(
    app: &axum::Router,
    cookie: &str,
    exercises: &[lingoruta::catalog::Exercise],
    pick: impl Fn(&lingoruta::catalog::Exercise) -> usize,
) {
    for exercise in exercises {
        post_ok(app, &names::select_option_url(pick(exercise)), cookie).await;
        post_ok(app, names::LESSON_CHECK_URL, cookie).await;
        post_ok(app, names::LESSON_ADVANCE_URL, cookie).await;
    }
}

#[tokio::test]
async fn completing_a_lesson_records_progress_and_pays_gems() {
    let (app, db) = app_with_db().await;
    let catalog = Catalog::load().expect("embedded curriculum should load");
    let unit = catalog.unit("unit-1").expect("unit-1 should exist");

    let cookie = register(&app, "ana@example.com").await;

    // The theory screen opens the lesson and rewrites the address bar so a
    // refresh resumes instead of restarting.
    let resp = app
        .clone()
        .oneshot(htmx_post(&names::start_lesson_url("unit-1"), &cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("HX-Push-Url")
            .and_then(|v| v.to_str().ok()),
        Some(names::LESSON_URL)
    );
    let page = body_string(resp).await;
    assert!(page.contains(&unit.title), "theory screen shows the unit");

    let page = post_ok(&app, names::LESSON_PRACTICE_URL, &cookie).await;
    assert!(page.contains("Ejercicio"), "practice starts at exercise one");

    // Answer everything correctly and land on the result screen.
    for exercise in &unit.exercises {
        post_ok(&app, &names::select_option_url(exercise.correct_answer), &cookie).await;
        let page = post_ok(&app, names::LESSON_CHECK_URL, &cookie).await;
        assert!(page.contains("¡Correcto!"));
        post_ok(&app, names::LESSON_ADVANCE_URL, &cookie).await;
    }

    let page = post_ok(&app, names::LESSON_SUBMIT_URL, &cookie).await;
    assert!(
        page.contains("¡Unidad Completada!"),
        "submitting a passed lesson shows the reward screen"
    );

    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    assert_eq!(user.gems, names::STARTING_GEMS + names::GEMS_PASS_REWARD);
    assert_eq!(user.streak, 1, "the first lesson of the day starts a streak");

    let progress = db.get_progress(user.id).await.expect("list progress");
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].unit_id, "unit-1");
    assert_eq!(progress[0].score as usize, unit.exercises.len());
    assert!(progress[0].completed);

    // The lesson is gone once its completion is collected.
    let resp = app
        .clone()
        .oneshot(htmx_post(names::LESSON_SUBMIT_URL, &cookie))
        .await
        .expect("router should respond");
    assert_eq!(
        resp.headers()
            .get("HX-Redirect")
            .and_then(|v| v.to_str().ok()),
        Some(names::LEARN_URL),
        "a second submit has no session to pay out"
    );
}

#[tokio::test]
async fn failed_attempts_pay_less_and_can_be_retried() {
    let (app, db) = app_with_db().await;
    let catalog = Catalog::load().expect("embedded curriculum should load");
    let unit = catalog.unit("unit-1").expect("unit-1 should exist");

    let cookie = register(&app, "ana@example.com").await;

    // First run: always pick a wrong option.
    post_ok(&app, &names::start_lesson_url("unit-1"), &cookie).await;
    post_ok(&app, names::LESSON_PRACTICE_URL, &cookie).await;
    answer_all(&app, &cookie, &unit.exercises, |ex| {
        (ex.correct_answer + 1) % ex.options.len()
    })
    .await;
    let page = post_ok(&app, names::LESSON_SUBMIT_URL, &cookie).await;
    assert!(
        page.contains("¡Inténtalo de nuevo!"),
        "the reward screen should point out the missed pass mark"
    );

    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    assert_eq!(user.gems, names::STARTING_GEMS + names::GEMS_FAIL_REWARD);
    let progress = db.get_progress(user.id).await.expect("list progress");
    assert_eq!(progress[0].score, 0);
    assert!(!progress[0].completed, "a zero score is below the pass mark");

    // Retry run: full marks overwrite the stored attempt.
    post_ok(&app, &names::start_lesson_url("unit-1"), &cookie).await;
    post_ok(&app, names::LESSON_PRACTICE_URL, &cookie).await;
    answer_all(&app, &cookie, &unit.exercises, |ex| ex.correct_answer).await;
    post_ok(&app, names::LESSON_SUBMIT_URL, &cookie).await;

    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    assert_eq!(
        user.gems,
        names::STARTING_GEMS + names::GEMS_FAIL_REWARD + names::GEMS_PASS_REWARD
    );
    assert_eq!(user.streak, 1, "two lessons on the same day count once");

    let progress = db.get_progress(user.id).await.expect("list progress");
    assert_eq!(progress.len(), 1, "the retry overwrites the stored attempt");
    assert_eq!(progress[0].score as usize, unit.exercises.len());
    assert!(progress[0].completed);
}

#[tokio::test]
async fn abandoning_a_lesson_saves_nothing() {
    let (app, db) = app_with_db().await;

    let cookie = register(&app, "ana@example.com").await;
    post_ok(&app, &names::start_lesson_url("unit-1"), &cookie).await;
    post_ok(&app, names::LESSON_PRACTICE_URL, &cookie).await;

    let resp = app
        .clone()
        .oneshot(htmx_post(names::LESSON_CANCEL_URL, &cookie))
        .await
        .expect("router should respond");
    assert_eq!(
        resp.headers()
            .get("HX-Redirect")
            .and_then(|v| v.to_str().ok()),
        Some(names::LEARN_URL)
    );

    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    assert_eq!(user.gems, names::STARTING_GEMS, "no payout without a submit");
    assert!(
        db.get_progress(user.id)
            .await
            .expect("list progress")
            .is_empty(),
        "abandoned lessons leave no progress row"
    );
}

#[tokio::test]
async fn lesson_screens_survive_out_of_order_actions() {
    let (app, _db) = app_with_db().await;
    let catalog = Catalog::load().expect("embedded curriculum should load");
    let unit = catalog.unit("unit-1").expect("unit-1 should exist");

    let cookie = register(&app, "ana@example.com").await;
    post_ok(&app, &names::start_lesson_url("unit-1"), &cookie).await;

    // Practice-only actions on the theory screen repaint it instead of
    // failing.
    let page = post_ok(&app, names::LESSON_ADVANCE_URL, &cookie).await;
    assert!(page.contains(&unit.title));
    let page = post_ok(&app, names::LESSON_CHECK_URL, &cookie).await;
    assert!(page.contains(&unit.title));

    // A full page load resumes the open lesson.
    post_ok(&app, names::LESSON_PRACTICE_URL, &cookie).await;
    let resp = app
        .clone()
        .oneshot(htmx_get(names::LESSON_URL, &cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("Ejercicio"), "the practice screen is restored");

    // Checking without a selected option keeps the exercise on screen.
    let page = post_ok(&app, names::LESSON_CHECK_URL, &cookie).await;
    assert!(page.contains("Ejercicio"));
}

#[tokio::test]
async fn the_learning_path_reflects_recorded_progress() {
    let (app, db) = app_with_db().await;

    let cookie = register(&app, "ana@example.com").await;
    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    db.upsert_progress(user.id, "unit-1", 3, true, names::GEMS_PASS_REWARD)
        .await
        .expect("record progress");

    let resp = app
        .clone()
        .oneshot(htmx_get(names::LEARN_URL, &cookie))
        .await
        .expect("router should respond");
    let page = body_string(resp).await;

    assert!(page.contains("30 XP"), "the XP chip adds up stored scores");
    assert!(
        page.contains("path-unit-current"),
        "the next unit is marked as the active one"
    );
    assert!(
        page.contains("Repasar"),
        "completed units offer a review run"
    );
}

#[tokio::test]
async fn buying_an_item_debits_the_balance() {
    let (app, db) = app_with_db().await;
    let catalog = Catalog::load().expect("embedded curriculum should load");
    let item = catalog.store_item("item-1").expect("item-1 should exist");
    assert!(item.grants_life, "the demo catalog sells an extra-life item");

    let cookie = register(&app, "ana@example.com").await;

    let page = post_ok(&app, &names::buy_item_url("item-1"), &cookie).await;
    assert!(page.contains("¡Compra realizada!"));
    assert!(page.contains(&item.name));

    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    assert_eq!(user.gems, names::STARTING_GEMS - item.price);
    assert_eq!(user.lives, names::STARTING_LIVES + 1);

    // The space suit costs more than a fresh account holds.
    let page = post_ok(&app, &names::buy_item_url("item-4"), &cookie).await;
    assert!(page.contains("No tienes suficientes gemas"));
    let user = db
        .find_user_by_identifier("ana@example.com")
        .await
        .expect("look up user")
        .expect("user should exist");
    assert_eq!(user.gems, names::STARTING_GEMS - item.price, "a refused sale charges nothing");

    // Unknown items are refused outright.
    let resp = app
        .clone()
        .oneshot(htmx_post(&names::buy_item_url("item-999"), &cookie))
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
