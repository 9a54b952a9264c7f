//! Flash notices
//!
//! Queued in a private cookie on redirect, consumed by the next page render.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use shared::{AppError, ErrorCode};

use super::build_cookie;
use crate::core::ServerState;

pub const FLASH_COOKIE: &str = "caixa_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    /// Set when the notice reports an [`AppError`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

fn read(jar: &PrivateCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}

fn enqueue(jar: PrivateCookieJar, state: &ServerState, flash: Flash) -> PrivateCookieJar {
    let mut queue = read(&jar);
    queue.push(flash);
    match serde_json::to_string(&queue) {
        Ok(value) => jar.add(build_cookie(FLASH_COOKIE, value, state.config.secure_cookies)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode flash notices");
            jar
        }
    }
}

/// Append a notice to the queue
pub fn push(
    jar: PrivateCookieJar,
    state: &ServerState,
    level: FlashLevel,
    message: impl Into<String>,
) -> PrivateCookieJar {
    let flash = Flash {
        level,
        message: message.into(),
        code: None,
    };
    enqueue(jar, state, flash)
}

/// Drain the queue
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Vec<Flash>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let queue = read(&jar);
    (jar.remove(build_cookie(FLASH_COOKIE, "", false)), queue)
}

/// Queue a notice and redirect to `to`
pub fn redirect_with(
    jar: PrivateCookieJar,
    state: &ServerState,
    level: FlashLevel,
    message: impl Into<String>,
    to: &str,
) -> Response {
    let jar = push(jar, state, level, message);
    (jar, Redirect::to(to)).into_response()
}

/// Queue `err` as an error notice (message and code) and redirect to `to`
pub fn redirect_with_error(
    jar: PrivateCookieJar,
    state: &ServerState,
    err: &AppError,
    to: &str,
) -> Response {
    let flash = Flash {
        level: FlashLevel::Error,
        message: err.message.clone(),
        code: Some(err.code),
    };
    let jar = enqueue(jar, state, flash);
    (jar, Redirect::to(to)).into_response()
}
