//! 管理员门禁中间件
//!
//! Applied to the whole router; acts only on `/sistema/admin` paths.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::PrivateCookieJar;
use shared::{AppError, ErrorCode};

use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::security_log;
use crate::web::flash;

/// Path prefix guarded by [`require_admin`]
pub const ADMIN_PREFIX: &str = "/sistema/admin";

pub fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX
        || path
            .strip_prefix(ADMIN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// 管理员认证中间件
///
/// | 会话 | 结果 |
/// |------|------|
/// | 无 | 错误通知 + 重定向 `/login` |
/// | 非管理员 | 错误通知 + 重定向 `/` |
/// | 管理员 | 注入 [`SessionUser`] 并继续 |
pub async fn require_admin(
    State(state): State<ServerState>,
    jar: PrivateCookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    if !is_admin_path(req.uri().path()) {
        return next.run(req).await;
    }

    let Some(user) = SessionUser::from_jar(&jar) else {
        security_log!("WARN", "admin_no_session", uri = format!("{:?}", req.uri()));
        let err = AppError::with_message(
            ErrorCode::NotAuthenticated,
            "Você precisa fazer login para acessar esta página.",
        );
        return flash::redirect_with_error(jar, &state, &err, "/login");
    };

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_denied",
            user_id = user.user_id,
            uri = format!("{:?}", req.uri())
        );
        let err = AppError::with_message(
            ErrorCode::AdminRequired,
            "Acesso negado. Você não tem permissão para acessar esta página.",
        );
        return flash::redirect_with_error(jar, &state, &err, "/");
    }

    req.extensions_mut().insert(user);
    next.run(req).await
}
