//! User management API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sistema/admin/usuarios", get(handler::list))
        .route(
            "/sistema/admin/usuarios/editar/{cod}",
            get(handler::edit_page).post(handler::update),
        )
}
