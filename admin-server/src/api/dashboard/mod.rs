//! Dashboard API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sistema/admin", get(handler::index))
        .route("/sistema/admin/", get(handler::index))
        .route("/sistema/admin/dashboard", get(handler::dashboard))
}
