//! Web helpers: flash notices and page views

pub mod flash;
pub mod page;

use std::borrow::Cow;

use axum_extra::extract::cookie::{Cookie, SameSite};

pub use flash::{Flash, FlashLevel};
pub use page::{Page, render};

/// Site-wide, HTTP-only, `SameSite=Lax` cookie
pub fn build_cookie(
    name: &'static str,
    value: impl Into<Cow<'static, str>>,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}
