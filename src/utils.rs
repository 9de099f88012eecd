use axum::http::HeaderValue;
use color_eyre::Result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const COOKIE_MAX_AGE_SECONDS: u32 = 604800; // one week

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue> {
    let secure_attr = if secure { " Secure;" } else { "" };
    let cookie = format!(
        "{name}={value}; HttpOnly; Max-Age={COOKIE_MAX_AGE_SECONDS};{secure_attr} Path=/; SameSite=Strict"
    );
    Ok(cookie.parse()?)
}

pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue> {
    let secure_attr = if secure { " Secure;" } else { "" };
    let cookie = format!("{name}=; HttpOnly; Max-Age=0;{secure_attr} Path=/; SameSite=Strict");
    Ok(cookie.parse()?)
}
