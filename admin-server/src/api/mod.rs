//! API 路由模块
//!
//! # 结构
//!
//! - [`auth`] - 首页跳转、注册、登录、登出
//! - [`health`] - 健康检查
//! - [`dashboard`] - 后台首页与仪表盘
//! - [`users`] - 用户管理
//! - [`pvps`] - PVP 管理
//! - [`categories`] - 分类管理
//! - [`units`] - 计量单位管理
//!
//! Everything under `/sistema/admin` sits behind [`require_admin`].

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod pvps;
pub mod units;
pub mod users;

use axum::Router;
use axum::extract::{FromRequestParts, Path};
use axum::http::{StatusCode, request::Parts};
use axum::response::Response;
use axum_extra::extract::PrivateCookieJar;
use shared::{AppError, AppResult, ErrorCategory};
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::core::ServerState;
use crate::web::flash;

pub const DASHBOARD_PATH: &str = "/sistema/admin/dashboard";

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public routes
        .merge(auth::router())
        .merge(health::router())
        // Admin routes
        .merge(dashboard::router())
        .merge(users::router())
        .merge(pvps::router())
        .merge(categories::router())
        .merge(units::router())
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by the router tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // Admin gate - runs before every /sistema/admin handler
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ))
        // Trace - outermost, logs every request at INFO
        .layer(TraceLayer::new_for_http())
}

/// Numeric `{cod}` / `{id}` path segment; anything else is a 404
pub struct RecordId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        Ok(Self(id))
    }
}

/// Report a failed form submission.
///
/// Business failures become an error notice plus a redirect to `to`;
/// system failures propagate as the JSON error envelope.
pub(crate) fn reject_to(
    err: AppError,
    jar: PrivateCookieJar,
    state: &ServerState,
    to: &str,
) -> AppResult<Response> {
    if err.code.category() == ErrorCategory::System {
        return Err(err);
    }
    tracing::debug!(code = %err.code, message = %err.message, "Form rejected");
    Ok(flash::redirect_with_error(jar, state, &err, to))
}
