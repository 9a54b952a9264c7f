//! Dashboard API Handlers

use axum::{
    extract::State,
    response::{Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use shared::AppResult;

use crate::api::DASHBOARD_PATH;
use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::db::repository::dashboard;
use crate::web::render;

/// GET /sistema/admin/
pub async fn index() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

/// GET /sistema/admin/dashboard - 汇总卡片 + 最近销售
pub async fn dashboard(
    State(state): State<ServerState>,
    user: SessionUser,
    jar: PrivateCookieJar,
) -> AppResult<Response> {
    let summary = dashboard::summary(&state.pool).await?;
    Ok(render(jar, "dashboard.html", Some(user), summary))
}
