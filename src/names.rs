pub const LOGIN_URL: &str = "/login";
pub const REGISTER_URL: &str = "/register";
pub const LOGOUT_URL: &str = "/logout";
pub const DASHBOARD_URL: &str = "/dashboard";
pub const ADMIN_URL: &str = "/admin";

pub const LEARN_URL: &str = "/learn";
pub const LIBRARY_URL: &str = "/learn/library";
pub const RANKING_URL: &str = "/learn/ranking";
pub const STORE_URL: &str = "/learn/store";

pub const LESSON_URL: &str = "/learn/lesson";
pub const LESSON_PRACTICE_URL: &str = "/learn/lesson/practice";
pub const LESSON_CHECK_URL: &str = "/learn/lesson/check";
pub const LESSON_ADVANCE_URL: &str = "/learn/lesson/advance";
pub const LESSON_CANCEL_URL: &str = "/learn/lesson/cancel";
pub const LESSON_SUBMIT_URL: &str = "/learn/lesson/submit";

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

pub fn start_lesson_url(unit_id: &str) -> String {
    format!("/learn/unit/{unit_id}/start")
}

pub fn select_option_url(option_index: usize) -> String {
    format!("/learn/lesson/select/{option_index}")
}

pub fn buy_item_url(item_id: &str) -> String {
    format!("/learn/store/buy/{item_id}")
}

// Gameplay defaults
pub const STARTING_GEMS: i64 = 100;
pub const STARTING_LIVES: i64 = 5;
pub const PASS_THRESHOLD: i64 = 3;
pub const GEMS_PASS_REWARD: i64 = 10;
pub const GEMS_FAIL_REWARD: i64 = 5;
pub const XP_PER_POINT: i64 = 10;
pub const RANK_CEILING: i64 = 50;
pub const RANK_XP_STEP: i64 = 100;
pub const LEADERBOARD_LIMIT: i64 = 20;

pub const STUDENT_ROLE: &str = "student";
pub const ADMIN_ROLE: &str = "admin";
