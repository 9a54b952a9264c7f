//! Cookie session
//!
//! The logged-in user lives in an encrypted private cookie. Nothing is kept
//! server-side; logging out drops the cookie.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use shared::AppError;
use shared::models::{UserCredentials, UserRole};

use crate::core::ServerState;
use crate::security_log;
use crate::web::build_cookie;

pub const SESSION_COOKIE: &str = "caixa_session";

/// Session cookie lifetime
const SESSION_TTL_HOURS: i64 = 12;

/// Logged-in user as carried by the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub user_name: String,
    pub role: UserRole,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Read the session from the jar; unreadable or tampered cookies count as absent
    pub fn from_jar(jar: &PrivateCookieJar) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;
        match serde_json::from_str(cookie.value()) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed session cookie");
                None
            }
        }
    }
}

impl From<&UserCredentials> for SessionUser {
    fn from(user: &UserCredentials) -> Self {
        Self {
            user_id: user.id,
            user_name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Store `user` as the current session
pub fn start_session(
    jar: PrivateCookieJar,
    user: &SessionUser,
    secure: bool,
) -> Result<PrivateCookieJar, AppError> {
    let value = serde_json::to_string(user)
        .map_err(|e| AppError::internal(format!("Failed to encode session: {e}")))?;
    let mut cookie = build_cookie(SESSION_COOKIE, value, secure);
    cookie.set_max_age(time::Duration::hours(SESSION_TTL_HOURS));
    Ok(jar.add(cookie))
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(build_cookie(SESSION_COOKIE, "", false))
}

/// Session extractor
///
/// Takes the user the admin gate already put into the request extensions,
/// otherwise decrypts the session cookie.
impl FromRequestParts<ServerState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(user.clone());
        }

        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key().clone());
        match SessionUser::from_jar(&jar) {
            Some(user) => {
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            None => {
                security_log!("WARN", "session_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::unauthorized())
            }
        }
    }
}
